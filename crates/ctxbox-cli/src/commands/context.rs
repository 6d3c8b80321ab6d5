//! The `context` command

use colored::Colorize;
use ctxbox_core::lifecycle::prepare;

use super::Invocation;
use crate::error::Result;
use crate::selection::{Prompter, select_context};

/// Print a resolved context and the name of its container.
pub fn run_context(
    invocation: &Invocation,
    names: &[String],
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let contexts = invocation.load()?;
    let store = invocation.last_selection()?;

    let context = select_context(&contexts, names, &store, prompter)?;
    let prepared = prepare(&contexts.location, context)?;

    println!("{} {}", "Context:".bold(), prepared.context.name.cyan());
    println!("{} {}", "Config:".bold(), contexts.location);
    println!("{} {}", "Container:".bold(), prepared.container);
    println!();
    print!("{}", serde_yaml::to_string(&prepared.context)?);
    Ok(())
}
