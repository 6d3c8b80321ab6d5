//! Turning positional names into a complete selection
//!
//! Each positional name fills one layer depth. `-` reuses the last selection
//! at that depth, and a lone `-` reuses all of it. Depths still missing are
//! prompted for, with the previous choice preselected.

use ctxbox_core::{Context, Contexts, LastSelection};

use crate::error::{CliError, Result};

/// Marker reusing the previous selection.
pub const REUSE_LAST: &str = "-";

/// Asks the user to pick among options.
pub trait Prompter {
    /// Pick one of `options` for `layer`, returning its index.
    fn select(&mut self, layer: &str, options: &[String], default: usize) -> Result<usize>;

    /// Pick any number of `options`, returning their indices.
    fn multi_select(&mut self, prompt: &str, options: &[String]) -> Result<Vec<usize>>;
}

/// Replace `-` markers with the corresponding previously selected names.
pub fn substitute_last(names: &[String], last: &[String]) -> Result<Vec<String>> {
    if names.len() == 1 && names[0] == REUSE_LAST {
        if last.is_empty() {
            return Err(CliError::user("No previous selection to reuse"));
        }
        return Ok(last.to_vec());
    }

    names
        .iter()
        .enumerate()
        .map(|(depth, name)| {
            if name != REUSE_LAST {
                return Ok(name.clone());
            }
            last.get(depth).cloned().ok_or_else(|| {
                CliError::user(format!("No previous selection at position {}", depth + 1))
            })
        })
        .collect()
}

/// Prompt for every layer the given names leave unselected.
///
/// Layers offering a single name are selected without asking.
pub fn complete_selection(
    contexts: &Contexts,
    names: Vec<String>,
    last: &[String],
    prompter: &mut dyn Prompter,
) -> Result<Vec<String>> {
    let mut chosen = names;

    while let Some(layer) = contexts.next_layer(chosen.as_slice())? {
        let options = layer.names();
        let pick = match options.len() {
            0 => {
                return Err(CliError::user(format!(
                    "Layer '{}' has no contexts to choose from",
                    layer.name
                )));
            }
            1 => 0,
            _ => {
                let default = last
                    .get(chosen.len())
                    .and_then(|previous| options.iter().position(|o| o == previous))
                    .unwrap_or(0);
                prompter.select(&layer.name, &options, default)?
            }
        };

        let name = options
            .get(pick)
            .cloned()
            .ok_or_else(|| CliError::user(format!("Invalid choice for layer '{}'", layer.name)))?;
        tracing::debug!(layer = %layer.name, name = %name, "selected");
        chosen.push(name);
    }

    Ok(chosen)
}

/// Resolve the context the user asked for and remember the choice.
pub fn select_context(
    contexts: &Contexts,
    names: &[String],
    store: &LastSelection,
    prompter: &mut dyn Prompter,
) -> Result<Context> {
    let last = store.load()?;
    let names = substitute_last(names, &last)?;
    let names = complete_selection(contexts, names, &last, prompter)?;

    let context = contexts.resolve(names.as_slice())?;
    store.save(names.as_slice())?;
    Ok(context)
}
