use std::fmt;

use ctxbox_docker::ContainerStatus;

use crate::error::{Error, Result};

/// The container states the lifecycle knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Absent,
    Exited,
    Running,
}

impl ContainerState {
    /// Map a runtime status, rejecting anything outside the three known states.
    pub fn from_status(container: &str, status: ContainerStatus) -> Result<Self> {
        match status {
            ContainerStatus::Absent => Ok(Self::Absent),
            ContainerStatus::Exited => Ok(Self::Exited),
            ContainerStatus::Running => Ok(Self::Running),
            ContainerStatus::Other(raw) => Err(Error::UnexpectedState {
                container: container.to_string(),
                state: raw,
            }),
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Exited => write!(f, "exited"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// What running a context does to its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CreateAndRun,
    RestartAttached,
    ExecSession,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateAndRun => write!(f, "create-and-run"),
            Self::RestartAttached => write!(f, "restart-attached"),
            Self::ExecSession => write!(f, "exec-session"),
        }
    }
}

pub fn plan(state: ContainerState) -> Transition {
    match state {
        ContainerState::Absent => Transition::CreateAndRun,
        ContainerState::Exited => Transition::RestartAttached,
        ContainerState::Running => Transition::ExecSession,
    }
}
