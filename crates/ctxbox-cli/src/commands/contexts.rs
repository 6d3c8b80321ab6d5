//! The `contexts` command

use colored::Colorize;
use ctxbox_core::Contexts;

use super::Invocation;
use crate::error::Result;

/// List every combination of selection names.
pub fn run_contexts(invocation: &Invocation, json: bool) -> Result<()> {
    let contexts = invocation.load()?;
    println!("{}", render(&contexts, json)?);
    Ok(())
}

fn render(contexts: &Contexts, json: bool) -> Result<String> {
    let combos = contexts.get_combos();
    if json {
        return Ok(serde_json::to_string_pretty(&combos)?);
    }

    let lines: Vec<String> = combos
        .iter()
        .map(|combo| {
            if combo.is_empty() {
                "(no layers)".dimmed().to_string()
            } else {
                combo.join(" ")
            }
        })
        .collect();
    Ok(lines.join("\n"))
}
