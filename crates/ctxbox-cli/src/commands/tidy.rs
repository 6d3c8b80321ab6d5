//! The `tidy` command

use std::collections::HashSet;

use colored::Colorize;
use ctxbox_core::identity::container_path_prefix;
use ctxbox_core::lifecycle::prepare;
use ctxbox_core::{Contexts, Orchestrator};
use ctxbox_docker::ContainerRuntime;

use super::Invocation;
use crate::error::Result;

pub fn run_tidy(invocation: &Invocation, force: bool) -> Result<()> {
    let contexts = invocation.load()?;
    let removed = tidy(&invocation.orchestrator(), &contexts, force)?;

    if removed.is_empty() {
        println!("{}", "Nothing to tidy.".green());
    } else if !invocation.settings.dry_run {
        for name in &removed {
            println!("{} {}", "Removed".green(), name);
        }
    }
    Ok(())
}

/// Remove containers of this configuration that no current combination
/// maps to, e.g. after the configuration changed.
pub fn tidy<R: ContainerRuntime>(
    orchestrator: &Orchestrator<R>,
    contexts: &Contexts,
    force: bool,
) -> Result<Vec<String>> {
    let current = current_names(contexts)?;

    let prefix = format!("{}-", container_path_prefix(&contexts.location));
    let stale: Vec<String> = orchestrator
        .runtime()
        .list(&prefix, true)?
        .into_iter()
        .filter(|name| !current.contains(name))
        .collect();

    if stale.is_empty() {
        return Ok(Vec::new());
    }
    tracing::debug!(count = stale.len(), "stale containers");
    Ok(orchestrator.remove_many(&stale, force)?)
}

/// Container names of every combination as currently configured.
///
/// Combinations that cannot be prepared are skipped with a warning.
fn current_names(contexts: &Contexts) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for combo in contexts.get_combos() {
        let context = contexts.resolve(combo.as_slice())?;
        match prepare(&contexts.location, context) {
            Ok(prepared) => {
                names.insert(prepared.container);
            }
            Err(e) => {
                tracing::warn!(combination = %combo.join(" "), error = %e, "skipping combination");
            }
        }
    }
    Ok(names)
}
