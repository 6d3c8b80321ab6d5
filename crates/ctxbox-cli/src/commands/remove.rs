//! The `remove` command

use colored::Colorize;
use ctxbox_core::identity::{container_name_patterns_for, container_path_prefix};
use ctxbox_core::{Contexts, Orchestrator};
use ctxbox_docker::ContainerRuntime;

use super::Invocation;
use crate::error::Result;
use crate::selection::Prompter;

/// Which containers `ctxbox remove` should target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveRequest {
    /// Per-depth name filters; commas separate alternatives at one depth
    pub names: Vec<String>,
    pub all: bool,
    pub force: bool,
}

impl RemoveRequest {
    fn alternatives(&self) -> Vec<Vec<String>> {
        self.names
            .iter()
            .map(|depth| {
                depth
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }
}

pub fn run_remove(
    invocation: &Invocation,
    request: &RemoveRequest,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let contexts = invocation.load()?;
    let removed = remove_containers(&invocation.orchestrator(), &contexts, request, prompter)?;

    if !invocation.settings.dry_run {
        for name in &removed {
            println!("{} {}", "Removed".green(), name);
        }
    }
    Ok(())
}

/// Remove the containers of this configuration that `request` selects.
///
/// Returns the names removed; an empty result is not an error.
pub fn remove_containers<R: ContainerRuntime>(
    orchestrator: &Orchestrator<R>,
    contexts: &Contexts,
    request: &RemoveRequest,
    prompter: &mut dyn Prompter,
) -> Result<Vec<String>> {
    let prefix = format!("{}-", container_path_prefix(&contexts.location));
    let candidates = orchestrator.runtime().list(&prefix, true)?;

    if candidates.is_empty() {
        println!("{}", "No ctxbox containers found for this configuration.".green());
        return Ok(Vec::new());
    }

    let targets = if request.all {
        candidates
    } else if !request.names.is_empty() {
        let patterns = container_name_patterns_for(&contexts.location, &request.alternatives())?;
        candidates
            .into_iter()
            .filter(|name| patterns.iter().any(|pattern| pattern.is_match(name)))
            .collect()
    } else {
        prompter
            .multi_select("Remove containers", &candidates)?
            .into_iter()
            .filter_map(|index| candidates.get(index).cloned())
            .collect()
    };

    if targets.is_empty() {
        println!("{}", "No matching containers.".green());
        return Ok(Vec::new());
    }

    tracing::debug!(count = targets.len(), "removal targets");
    Ok(orchestrator.remove_many(&targets, request.force)?)
}
