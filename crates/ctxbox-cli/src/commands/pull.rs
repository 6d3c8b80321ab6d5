//! The `pull` command

use colored::Colorize;
use ctxbox_core::lifecycle::prepare;

use super::Invocation;
use crate::error::Result;
use crate::selection::{Prompter, select_context};

/// Pull the image of a context, or build it when the context has a Dockerfile.
pub fn run_pull(
    invocation: &Invocation,
    names: &[String],
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let contexts = invocation.load()?;
    let store = invocation.last_selection()?;

    let context = select_context(&contexts, names, &store, prompter)?;
    let prepared = prepare(&contexts.location, context)?;

    invocation.orchestrator().ensure_image(&prepared, true)?;
    if !invocation.settings.dry_run {
        println!("{} {}", "Ready:".green(), prepared.image.reference());
    }
    Ok(())
}
