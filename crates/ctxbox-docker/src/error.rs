//! Error types for ctxbox-docker

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported while driving the container runtime
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The runtime binary could not be started at all
    #[error("Failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The runtime ran but exited unsuccessfully
    #[error("`{command}` failed (exit code: {code:?}){}", format_diagnostic(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn format_diagnostic(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
