//! Invocation-wide settings
//!
//! Built once from command-line flags and passed explicitly to whatever
//! needs them; there is no global mutable state.

use ctxbox_docker::DockerCli;

/// Runtime binary used when none is configured.
pub const DEFAULT_RUNTIME: &str = "docker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Debug-level logging
    pub verbose: bool,
    /// Print mutating runtime commands instead of executing them
    pub dry_run: bool,
    /// Explicit configuration document path or URL
    pub config: Option<String>,
    /// Docker-compatible runtime binary
    pub runtime: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            dry_run: false,
            config: None,
            runtime: DEFAULT_RUNTIME.to_string(),
        }
    }
}

impl Settings {
    /// The runtime these settings select.
    pub fn docker(&self) -> DockerCli {
        DockerCli::new(&self.runtime).with_dry_run(self.dry_run)
    }

    /// The explicit configuration source, if any.
    pub fn config_source(&self) -> Option<&str> {
        self.config.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_docker() {
        let settings = Settings::default();
        assert_eq!(settings.docker().binary(), "docker");
        assert_eq!(settings.config_source(), None);
    }

    #[test]
    fn runtime_is_configurable() {
        let settings = Settings {
            runtime: "podman".into(),
            ..Settings::default()
        };
        assert_eq!(settings.docker().binary(), "podman");
    }
}
