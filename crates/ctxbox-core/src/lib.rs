//! Context resolution, container identity and lifecycle for ctxbox
//!
//! This crate implements everything between reading configuration documents
//! and issuing container runtime commands:
//!
//! - **Config tree model**: [`Context`], [`Layer`] and [`Layers`] with their
//!   clone/merge algebra
//! - **Configuration loading**: discovery, `parent` chains (local or remote),
//!   relative path resolution and environment expansion
//! - **Selection**: enumerating name combinations across nested layers and
//!   resolving one combination into a flat [`Context`]
//! - **Identity**: deterministic, content-addressed container names
//! - **Lifecycle**: deciding whether to create, restart, exec into or remove
//!   a container
//!
//! # Architecture
//!
//! ```text
//!                   ctxbox-cli
//!                       |
//!                  ctxbox-core
//!                   /        \
//!            ctxbox-fs   ctxbox-docker
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ctxbox_core::{ConfigLoader, Orchestrator, RunOptions, lifecycle};
//! use ctxbox_docker::DockerCli;
//!
//! let contexts = ConfigLoader::new(std::env::current_dir()?).load(None)?;
//! let context = contexts.resolve(&["dev", "go"])?;
//! let prepared = lifecycle::prepare(&contexts.location, context)?;
//! Orchestrator::new(DockerCli::default()).run(&prepared, &RunOptions::default())?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod last;
pub mod layer;
pub mod lifecycle;
pub mod selection;
pub mod settings;

pub use config::{ConfigLoader, Location};
pub use context::{Build, Context};
pub use error::{Error, Result};
pub use identity::{container_name, container_name_pattern, container_path_prefix};
pub use last::LastSelection;
pub use layer::{Layer, Layers};
pub use lifecycle::{ContainerState, Orchestrator, Prepared, RunOptions, Transition};
pub use selection::Contexts;
pub use settings::Settings;
