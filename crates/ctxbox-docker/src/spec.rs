//! Argument builders for runtime commands
//!
//! Each spec captures everything one runtime invocation needs and renders
//! the argument list (without the binary name). Map-like inputs are kept as
//! sorted pairs so the rendered command is stable.

use std::path::Path;

/// Parameters for building an image from a Dockerfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    pub dockerfile: String,
    pub tag: String,
    pub args: Vec<(String, String)>,
    /// Build context directory; defaults to the Dockerfile's directory
    pub context: Option<String>,
}

impl BuildSpec {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "-f".to_string(),
            self.dockerfile.clone(),
            "-t".to_string(),
            self.tag.clone(),
        ];
        for (key, value) in &self.args {
            args.push("--build-arg".to_string());
            args.push(format!("{}={}", key, value));
        }
        let context = match &self.context {
            Some(context) if !context.is_empty() => context.clone(),
            _ => Path::new(&self.dockerfile)
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| ".".to_string()),
        };
        args.push(context);
        args
    }
}

/// Parameters for creating and starting a new interactive container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSpec {
    pub name: String,
    pub image: String,
    pub env: Vec<(String, String)>,
    /// Host path to container path bindings
    pub mounts: Vec<(String, String)>,
    pub network: String,
    pub workdir: Option<String>,
    pub entrypoint: Option<String>,
    pub remove_on_exit: bool,
    /// Extra arguments passed verbatim before the image
    pub extra_args: Vec<String>,
    pub cmd: Vec<String>,
}

impl RunSpec {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "-it".to_string(),
            "--name".to_string(),
            self.name.clone(),
        ];

        for (key, value) in &self.env {
            args.push("--env".to_string());
            args.push(format!("{}={}", key, value));
        }

        for (host, container) in &self.mounts {
            args.push("--volume".to_string());
            args.push(format!("{}:{}", host, container));
        }

        if self.remove_on_exit {
            args.push("--rm".to_string());
        }

        args.push("--network".to_string());
        args.push(self.network.clone());

        if let Some(workdir) = &self.workdir {
            args.push("--workdir".to_string());
            args.push(workdir.clone());
        }

        if let Some(entrypoint) = &self.entrypoint {
            args.push("--entrypoint".to_string());
            args.push(entrypoint.clone());
        }

        args.extend(self.extra_args.iter().cloned());
        args.push(self.image.clone());
        args.extend(self.cmd.iter().cloned());
        args
    }
}

/// Parameters for a new session inside a running container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecSpec {
    pub name: String,
    pub workdir: Option<String>,
    pub entrypoint: Option<String>,
    pub cmd: Vec<String>,
}

impl ExecSpec {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["exec".to_string(), "-ti".to_string()];
        if let Some(workdir) = &self.workdir {
            args.push("--workdir".to_string());
            args.push(workdir.clone());
        }
        args.push(self.name.clone());

        if self.entrypoint.is_none() && self.cmd.is_empty() {
            // exec always needs a program to run
            args.push("sh".to_string());
        } else {
            if let Some(entrypoint) = &self.entrypoint {
                args.push(entrypoint.clone());
            }
            args.extend(self.cmd.iter().cloned());
        }
        args
    }
}

/// Arguments for removing containers and their anonymous volumes.
pub fn remove_args(names: &[String], force: bool) -> Vec<String> {
    let mut args = vec!["rm".to_string(), "-v".to_string()];
    if force {
        args.push("-f".to_string());
    }
    args.extend(names.iter().cloned());
    args
}

/// Arguments for listing container names matching a prefix.
pub fn list_args(prefix: &str, all: bool) -> Vec<String> {
    let mut args = vec![
        "ps".to_string(),
        "--filter".to_string(),
        format!("name={}", prefix),
        "--format".to_string(),
        "{{.Names}}".to_string(),
    ];
    if all {
        args.push("--all".to_string());
    }
    args
}

/// Arguments for inspecting a container's status.
pub fn status_args(name: &str) -> Vec<String> {
    vec![
        "inspect".to_string(),
        name.to_string(),
        "--format".to_string(),
        "{{.State.Status}}".to_string(),
    ]
}
