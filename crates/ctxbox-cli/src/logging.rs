//! Tracing subscriber setup

use ctxbox_core::Settings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
pub fn init(settings: &Settings) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(settings))
        .with_writer(std::io::stderr)
        .with_target(settings.verbose)
        .try_init();

    if settings.verbose && installed.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

fn filter(settings: &Settings) -> EnvFilter {
    if settings.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
