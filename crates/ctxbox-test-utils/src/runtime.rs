//! [`FakeRuntime`] for lifecycle tests without a container engine.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use ctxbox_docker::{
    BuildSpec, ContainerRuntime, ContainerStatus, Error, ExecSpec, Result, RunSpec,
};

/// One recorded runtime operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Status(String),
    ImageExists(String),
    Build(BuildSpec),
    Pull(String),
    Run(RunSpec),
    StartAttached(String),
    Exec(ExecSpec),
    Remove { names: Vec<String>, force: bool },
    List { prefix: String, all: bool },
}

/// An in-memory runtime.
///
/// Interactive sessions end immediately: a created container is left
/// `exited` (or gone, with `--rm`), a restarted one is `exited` again, and an
/// exec session leaves a running container running.
///
/// # Example
///
/// ```rust
/// use ctxbox_docker::{ContainerRuntime, ContainerStatus};
/// use ctxbox_test_utils::FakeRuntime;
///
/// let runtime = FakeRuntime::new().with_container("ctxbox-a", ContainerStatus::Running);
/// assert_eq!(runtime.status("ctxbox-a").unwrap(), ContainerStatus::Running);
/// assert_eq!(runtime.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct FakeRuntime {
    containers: RefCell<BTreeMap<String, ContainerStatus>>,
    images: RefCell<BTreeSet<String>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a container in the given state.
    pub fn with_container(self, name: &str, status: ContainerStatus) -> Self {
        self.set_status(name, status);
        self
    }

    /// Seed a locally available image.
    pub fn with_image(self, tag: &str) -> Self {
        self.images.borrow_mut().insert(tag.to_string());
        self
    }

    pub fn set_status(&self, name: &str, status: ContainerStatus) {
        let mut containers = self.containers.borrow_mut();
        if status == ContainerStatus::Absent {
            containers.remove(name);
        } else {
            containers.insert(name.to_string(), status);
        }
    }

    /// Current state without recording a call.
    pub fn status_of(&self, name: &str) -> ContainerStatus {
        self.containers
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(ContainerStatus::Absent)
    }

    /// Names of all existing containers, sorted.
    pub fn containers(&self) -> Vec<String> {
        self.containers.borrow().keys().cloned().collect()
    }

    pub fn has_image(&self, tag: &str) -> bool {
        self.images.borrow().contains(tag)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Recorded calls that change state, i.e. everything except queries.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| {
                !matches!(
                    call,
                    Call::Status(_) | Call::ImageExists(_) | Call::List { .. }
                )
            })
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fail(command: &str, stderr: &str) -> Error {
        Error::CommandFailed {
            command: format!("fake {}", command),
            code: Some(1),
            stderr: stderr.to_string(),
        }
    }
}

impl ContainerRuntime for FakeRuntime {
    fn status(&self, name: &str) -> Result<ContainerStatus> {
        self.record(Call::Status(name.to_string()));
        Ok(self.status_of(name))
    }

    fn image_exists(&self, tag: &str) -> Result<bool> {
        self.record(Call::ImageExists(tag.to_string()));
        Ok(self.has_image(tag))
    }

    fn build(&self, spec: &BuildSpec) -> Result<()> {
        self.record(Call::Build(spec.clone()));
        self.images.borrow_mut().insert(spec.tag.clone());
        Ok(())
    }

    fn pull(&self, image: &str) -> Result<()> {
        self.record(Call::Pull(image.to_string()));
        self.images.borrow_mut().insert(image.to_string());
        Ok(())
    }

    fn run(&self, spec: &RunSpec) -> Result<()> {
        self.record(Call::Run(spec.clone()));
        if self.status_of(&spec.name) != ContainerStatus::Absent {
            return Err(Self::fail("run", "container name already in use"));
        }
        if !spec.remove_on_exit {
            self.set_status(&spec.name, ContainerStatus::Exited);
        }
        Ok(())
    }

    fn start_attached(&self, name: &str) -> Result<()> {
        self.record(Call::StartAttached(name.to_string()));
        match self.status_of(name) {
            ContainerStatus::Absent => Err(Self::fail("start", "No such container")),
            _ => {
                self.set_status(name, ContainerStatus::Exited);
                Ok(())
            }
        }
    }

    fn exec(&self, spec: &ExecSpec) -> Result<()> {
        self.record(Call::Exec(spec.clone()));
        match self.status_of(&spec.name) {
            ContainerStatus::Running => Ok(()),
            _ => Err(Self::fail("exec", "container is not running")),
        }
    }

    fn remove(&self, names: &[String], force: bool) -> Result<()> {
        self.record(Call::Remove {
            names: names.to_vec(),
            force,
        });
        for name in names {
            match self.status_of(name) {
                ContainerStatus::Absent => return Err(Self::fail("rm", "No such container")),
                ContainerStatus::Running if !force => {
                    return Err(Self::fail("rm", "cannot remove a running container"));
                }
                _ => self.set_status(name, ContainerStatus::Absent),
            }
        }
        Ok(())
    }

    fn list(&self, prefix: &str, all: bool) -> Result<Vec<String>> {
        self.record(Call::List {
            prefix: prefix.to_string(),
            all,
        });
        Ok(self
            .containers
            .borrow()
            .iter()
            .filter(|(name, status)| {
                name.starts_with(prefix) && (all || **status == ContainerStatus::Running)
            })
            .map(|(name, _)| name.clone())
            .collect())
    }
}
