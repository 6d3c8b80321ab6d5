use std::path::PathBuf;

use ctxbox_docker::{ContainerRuntime, ContainerStatus, ExecSpec, RunSpec};

use super::image::{ImageSource, Prepared, should_pull};
use super::state::{ContainerState, Transition, plan};
use super::workdir::container_workdir;
use crate::error::{Error, Result};

/// Network used when a context sets none.
pub const DEFAULT_NETWORK: &str = "host";

/// Env var carrying the host working directory into new containers.
pub const WORK_DIR_ENV: &str = "CTXBOX_WORK_DIR";

/// Env var carrying the composite context name into new containers.
pub const CONTEXT_ENV: &str = "CTXBOX_CONTEXT";

/// Per-invocation options for [`Orchestrator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Host working directory of the invocation
    pub cwd: PathBuf,
    /// Force-remove any existing container before creating a new one
    pub reset: bool,
    /// Pull registry images even when a pinned tag is present locally
    pub pull: bool,
}

impl RunOptions {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            reset: false,
            pull: false,
        }
    }

    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    pub fn with_pull(mut self, pull: bool) -> Self {
        self.pull = pull;
        self
    }
}

/// Outcome of a guarded removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// Nothing to remove; not an error
    NotFound,
}

/// Drives containers through their lifecycle using a [`ContainerRuntime`].
pub struct Orchestrator<R> {
    runtime: R,
}

impl<R: ContainerRuntime> Orchestrator<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn state(&self, container: &str) -> Result<ContainerState> {
        let status = self.runtime.status(container)?;
        ContainerState::from_status(container, status)
    }

    /// Create, restart or exec into the container for `prepared`.
    pub fn run(&self, prepared: &Prepared, options: &RunOptions) -> Result<Transition> {
        let container = &prepared.container;

        let state = if options.reset {
            self.remove(container, true)?;
            ContainerState::Absent
        } else {
            self.state(container)?
        };

        let transition = plan(state);
        tracing::info!(container = %container, state = %state, transition = %transition, "running context");

        match transition {
            Transition::CreateAndRun => {
                self.ensure_image(prepared, options.pull)?;
                self.runtime.run(&run_spec(prepared, options))?;
            }
            Transition::RestartAttached => self.runtime.start_attached(container)?,
            Transition::ExecSession => self.runtime.exec(&exec_spec(prepared, options))?,
        }

        Ok(transition)
    }

    /// Make the image for `prepared` available locally.
    ///
    /// Built images are built once per tag and never pulled. Registry images
    /// are pulled when `force_pull` is set or their tag is floating.
    pub fn ensure_image(&self, prepared: &Prepared, force_pull: bool) -> Result<()> {
        match &prepared.image {
            ImageSource::Built(spec) => {
                if self.runtime.image_exists(&spec.tag)? {
                    tracing::debug!(tag = %spec.tag, "image already built");
                } else {
                    self.runtime.build(spec)?;
                }
            }
            ImageSource::Registry(image) => {
                if force_pull || should_pull(image) {
                    self.runtime.pull(image)?;
                }
            }
        }
        Ok(())
    }

    /// Remove one container in any state. Running containers need `force`.
    pub fn remove(&self, container: &str, force: bool) -> Result<Removal> {
        match self.runtime.status(container)? {
            ContainerStatus::Absent => {
                tracing::debug!(container, "nothing to remove");
                Ok(Removal::NotFound)
            }
            ContainerStatus::Running if !force => Err(Error::RemovalRequiresForce {
                container: container.to_string(),
            }),
            status => {
                tracing::info!(container, status = %status, "removing container");
                self.runtime.remove(&[container.to_string()], force)?;
                Ok(Removal::Removed)
            }
        }
    }

    /// Remove several containers in one runtime call.
    ///
    /// Every container is checked first, so a running container without
    /// `force` aborts before anything is removed. Returns the names that
    /// were removed.
    pub fn remove_many(&self, containers: &[String], force: bool) -> Result<Vec<String>> {
        let mut present = Vec::new();
        for container in containers {
            match self.runtime.status(container)? {
                ContainerStatus::Absent => continue,
                ContainerStatus::Running if !force => {
                    return Err(Error::RemovalRequiresForce {
                        container: container.clone(),
                    });
                }
                _ => present.push(container.clone()),
            }
        }

        if !present.is_empty() {
            tracing::info!(count = present.len(), "removing containers");
            self.runtime.remove(&present, force)?;
        }
        Ok(present)
    }
}

fn run_spec(prepared: &Prepared, options: &RunOptions) -> RunSpec {
    let context = &prepared.context;

    let mut env = vec![
        (CONTEXT_ENV.to_string(), context.name.clone()),
        (
            WORK_DIR_ENV.to_string(),
            options.cwd.to_string_lossy().into_owned(),
        ),
    ];
    env.extend(sorted(&context.env));

    let network = if context.network.is_empty() {
        DEFAULT_NETWORK.to_string()
    } else {
        context.network.clone()
    };

    RunSpec {
        name: prepared.container.clone(),
        image: prepared.image.reference().to_string(),
        env,
        mounts: sorted(&context.mounts),
        network,
        workdir: container_workdir(&context.mounts, &options.cwd),
        entrypoint: non_empty(&context.entrypoint),
        remove_on_exit: context.remove_on_exit(),
        extra_args: context.run_args.clone(),
        cmd: context.cmd.clone(),
    }
}

fn exec_spec(prepared: &Prepared, options: &RunOptions) -> ExecSpec {
    let context = &prepared.context;
    ExecSpec {
        name: prepared.container.clone(),
        workdir: container_workdir(&context.mounts, &options.cwd),
        entrypoint: non_empty(&context.entrypoint),
        cmd: context.cmd.clone(),
    }
}

fn sorted(map: &std::collections::HashMap<String, String>) -> Vec<(String, String)> {
    let mut pairs: Vec<_> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    pairs.sort();
    pairs
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}
