//! Command implementations for ctxbox-cli
//!
//! Each command has a runtime-generic core, exercised in tests against a
//! fake runtime, and a thin entry point wired to [`Invocation`].

pub mod containers;
pub mod context;
pub mod contexts;
pub mod pull;
pub mod remove;
pub mod run;
pub mod tidy;

use std::path::PathBuf;

use ctxbox_core::{ConfigLoader, Contexts, LastSelection, Orchestrator, Settings};
use ctxbox_docker::DockerCli;

use crate::error::Result;

pub use containers::run_containers;
pub use context::run_context;
pub use contexts::run_contexts;
pub use pull::run_pull;
pub use remove::{RemoveRequest, run_remove};
pub use run::{RunFlags, run_run};
pub use tidy::run_tidy;

/// What every command knows about the current invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub settings: Settings,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(settings: Settings, cwd: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            cwd: cwd.into(),
        }
    }

    /// Load the configuration tree for this invocation.
    pub fn load(&self) -> Result<Contexts> {
        let contexts =
            ConfigLoader::new(self.cwd.clone()).load(self.settings.config_source())?;
        Ok(contexts)
    }

    /// The last-selection store in the user's home directory.
    pub fn last_selection(&self) -> Result<LastSelection> {
        Ok(LastSelection::in_home(&ctxbox_fs::home_dir()?))
    }

    pub fn orchestrator(&self) -> Orchestrator<DockerCli> {
        Orchestrator::new(self.settings.docker())
    }
}
