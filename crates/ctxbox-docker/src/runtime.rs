//! The runtime trait and the container states it reports

use std::fmt;

use crate::Result;
use crate::spec::{BuildSpec, ExecSpec, RunSpec};

/// Status of a named container as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerStatus {
    /// No container with this name exists
    Absent,
    /// The container exists and is stopped
    Exited,
    /// The container exists and is running
    Running,
    /// Any other status string the runtime reported
    Other(String),
}

impl ContainerStatus {
    /// Interpret the raw `State.Status` string reported by the runtime.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Absent,
            "exited" => Self::Exited,
            "running" => Self::Running,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Exited => write!(f, "exited"),
            Self::Running => write!(f, "running"),
            Self::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Logical operations ctxbox issues against a container runtime.
///
/// Implementations must not retry: container creation and removal are not
/// idempotent, so failures are reported as-is.
pub trait ContainerRuntime {
    /// Query the status of the container with the given name.
    fn status(&self, name: &str) -> Result<ContainerStatus>;

    /// Check whether an image with the given tag exists locally.
    fn image_exists(&self, tag: &str) -> Result<bool>;

    /// Build an image from a Dockerfile.
    fn build(&self, spec: &BuildSpec) -> Result<()>;

    /// Pull an image from its registry.
    fn pull(&self, image: &str) -> Result<()>;

    /// Create and start a new container, attached to the terminal.
    fn run(&self, spec: &RunSpec) -> Result<()>;

    /// Restart a stopped container, reattaching to it.
    fn start_attached(&self, name: &str) -> Result<()>;

    /// Start a new interactive session inside a running container.
    fn exec(&self, spec: &ExecSpec) -> Result<()>;

    /// Remove the given containers. An empty list is a no-op.
    fn remove(&self, names: &[String], force: bool) -> Result<()>;

    /// List container names starting with `prefix`, sorted.
    ///
    /// Only running containers are listed unless `all` is set.
    fn list(&self, prefix: &str, all: bool) -> Result<Vec<String>>;
}

impl<R: ContainerRuntime + ?Sized> ContainerRuntime for &R {
    fn status(&self, name: &str) -> Result<ContainerStatus> {
        (**self).status(name)
    }

    fn image_exists(&self, tag: &str) -> Result<bool> {
        (**self).image_exists(tag)
    }

    fn build(&self, spec: &BuildSpec) -> Result<()> {
        (**self).build(spec)
    }

    fn pull(&self, image: &str) -> Result<()> {
        (**self).pull(image)
    }

    fn run(&self, spec: &RunSpec) -> Result<()> {
        (**self).run(spec)
    }

    fn start_attached(&self, name: &str) -> Result<()> {
        (**self).start_attached(name)
    }

    fn exec(&self, spec: &ExecSpec) -> Result<()> {
        (**self).exec(spec)
    }

    fn remove(&self, names: &[String], force: bool) -> Result<()> {
        (**self).remove(names, force)
    }

    fn list(&self, prefix: &str, all: bool) -> Result<Vec<String>> {
        (**self).list(prefix, all)
    }
}
