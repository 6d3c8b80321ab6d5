//! Container runtime boundary for ctxbox
//!
//! ctxbox never talks to a container engine directly. Every state query and
//! mutation goes through the [`ContainerRuntime`] trait, whose production
//! implementation [`DockerCli`] shells out to a docker-compatible CLI.
//!
//! # Operations
//!
//! ```text
//! status(name)          -> Absent | Exited | Running | Other(raw)
//! image_exists(tag)     -> bool
//! build(BuildSpec)
//! pull(image)
//! run(RunSpec)          interactive create-and-run
//! start_attached(name)  interactive reattach
//! exec(ExecSpec)        interactive session in a running container
//! remove(names, force)
//! list(prefix, all)     -> sorted names
//! ```

pub mod cli;
pub mod error;
pub mod runtime;
pub mod spec;

pub use cli::DockerCli;
pub use error::{Error, Result};
pub use runtime::{ContainerRuntime, ContainerStatus};
pub use spec::{BuildSpec, ExecSpec, RunSpec};
