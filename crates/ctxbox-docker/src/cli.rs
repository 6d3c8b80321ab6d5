//! Docker-compatible CLI runtime

use std::process::{Command, Stdio};

use crate::runtime::{ContainerRuntime, ContainerStatus};
use crate::spec::{self, BuildSpec, ExecSpec, RunSpec};
use crate::{Error, Result};

/// Markers printed by docker-compatible CLIs for unknown objects
const NOT_FOUND_MARKERS: &[&str] = &["No such object", "No such container", "No such image"];

/// Runtime backed by a docker-compatible command-line tool.
///
/// Interactive operations inherit the terminal. In dry-run mode mutating
/// operations print their command line instead of running it; queries still
/// execute so that decisions reflect the real state.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
    dry_run: bool,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    /// Create a runtime invoking the given binary (e.g. `docker`, `podman`).
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            dry_run: false,
        }
    }

    /// Print mutating commands instead of executing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Render a command line for display, quoting arguments with whitespace.
    pub fn render(&self, args: &[String]) -> String {
        let mut rendered = self.binary.clone();
        for arg in args {
            rendered.push(' ');
            if arg.chars().any(char::is_whitespace) {
                rendered.push('"');
                rendered.push_str(arg);
                rendered.push('"');
            } else {
                rendered.push_str(arg);
            }
        }
        rendered
    }

    /// Run a mutating command attached to the current terminal.
    fn run_attached(&self, args: Vec<String>) -> Result<()> {
        let command = self.render(&args);
        if self.dry_run {
            println!("{}", command);
            return Ok(());
        }
        tracing::debug!(%command, "running");

        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command,
                code: status.code(),
                stderr: String::new(),
            })
        }
    }

    /// Run a query command and capture its output.
    fn query(&self, args: &[String]) -> Result<std::process::Output> {
        let command = self.render(args);
        tracing::debug!(%command, "querying");
        Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn { command, source })
    }
}

fn is_not_found(output: &std::process::Output) -> bool {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    NOT_FOUND_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker) || stdout.contains(marker))
}

impl ContainerRuntime for DockerCli {
    fn status(&self, name: &str) -> Result<ContainerStatus> {
        let args = spec::status_args(name);
        let output = self.query(&args)?;
        if output.status.success() {
            return Ok(ContainerStatus::from_raw(&String::from_utf8_lossy(
                &output.stdout,
            )));
        }
        if is_not_found(&output) {
            return Ok(ContainerStatus::Absent);
        }
        Err(Error::CommandFailed {
            command: self.render(&args),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn image_exists(&self, tag: &str) -> Result<bool> {
        let args = vec!["image".to_string(), "inspect".to_string(), tag.to_string()];
        let output = self.query(&args)?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).trim() != "[]");
        }
        if is_not_found(&output) || String::from_utf8_lossy(&output.stdout).trim() == "[]" {
            return Ok(false);
        }
        Err(Error::CommandFailed {
            command: self.render(&args),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn build(&self, spec: &BuildSpec) -> Result<()> {
        self.run_attached(spec.to_args())
    }

    fn pull(&self, image: &str) -> Result<()> {
        self.run_attached(vec!["pull".to_string(), image.to_string()])
    }

    fn run(&self, spec: &RunSpec) -> Result<()> {
        self.run_attached(spec.to_args())
    }

    fn start_attached(&self, name: &str) -> Result<()> {
        self.run_attached(vec!["start".to_string(), "-i".to_string(), name.to_string()])
    }

    fn exec(&self, spec: &ExecSpec) -> Result<()> {
        self.run_attached(spec.to_args())
    }

    fn remove(&self, names: &[String], force: bool) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        self.run_attached(spec::remove_args(names, force))
    }

    fn list(&self, prefix: &str, all: bool) -> Result<Vec<String>> {
        let args = spec::list_args(prefix, all);
        let output = self.query(&args)?;
        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: self.render(&args),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        // The name filter matches substrings, so re-check the prefix
        let mut names: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.starts_with(prefix))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }
}
