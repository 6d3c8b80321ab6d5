//! Container lifecycle
//!
//! Given a resolved context and its container name, the orchestrator asks
//! the runtime for the container's state and picks one transition:
//!
//! | State     | Transition                                         |
//! |-----------|----------------------------------------------------|
//! | `Absent`  | build or pull the image if needed, create and run  |
//! | `Exited`  | restart and reattach; creation parameters are kept |
//! | `Running` | open a new interactive session with `exec`         |
//!
//! Removal is guarded: an absent container is an informational no-op and a
//! running one needs force. `reset` force-removes before creating.

mod image;
mod orchestrator;
mod state;
mod workdir;

pub use image::{ImageSource, Prepared, prepare, should_pull};
pub use orchestrator::{
    CONTEXT_ENV, DEFAULT_NETWORK, Orchestrator, Removal, RunOptions, WORK_DIR_ENV,
};
pub use state::{ContainerState, Transition, plan};
pub use workdir::container_workdir;
