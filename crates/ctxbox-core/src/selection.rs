//! Enumerating and resolving selection combinations
//!
//! A combination picks one selection name per layer, depth first: the name
//! for a layer is followed by the names for any layers its chosen child
//! declares, before moving on to the next sibling layer.

use std::collections::VecDeque;

use crate::config::Location;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::layer::{Layer, Layers};

/// The merged configuration tree plus the location of its root document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contexts {
    pub location: Location,
    pub context: Context,
}

impl Contexts {
    pub fn new(location: Location, context: Context) -> Self {
        Self { location, context }
    }

    /// Every valid combination of selection names.
    ///
    /// A tree without layers has exactly one, empty, combination.
    pub fn get_combos(&self) -> Vec<Vec<String>> {
        self.context.get_combos()
    }

    /// Resolve one combination into a flat context without layers.
    ///
    /// The result is the base context merged with each chosen selection in
    /// turn; its `name` is the chosen names joined by spaces.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Context> {
        let mut remaining: VecDeque<String> =
            names.iter().map(|n| n.as_ref().to_string()).collect();
        let mut chosen = Vec::new();

        let base = Context {
            name: String::new(),
            layers: Layers::default(),
            ..self.context.clone()
        };
        let mut resolved = fold_layers(base, &self.context.layers, &mut remaining, &mut chosen)?;

        if !remaining.is_empty() {
            return Err(Error::ExtraneousNames {
                names: remaining.into_iter().collect(),
            });
        }

        resolved.name = chosen.join(" ");
        tracing::debug!(name = %resolved.name, "resolved context");
        Ok(resolved)
    }

    /// The layer the next name would be chosen from, given the names chosen
    /// so far. `None` once the selection is complete.
    pub fn next_layer<S: AsRef<str>>(&self, chosen: &[S]) -> Result<Option<&Layer>> {
        let mut remaining: VecDeque<String> =
            chosen.iter().map(|n| n.as_ref().to_string()).collect();
        next_layer(&self.context.layers, &mut remaining)
    }
}

impl Context {
    /// Every valid combination of selection names below this context.
    pub fn get_combos(&self) -> Vec<Vec<String>> {
        self.layers.combos()
    }
}

impl Layers {
    /// Cartesian product of each layer's combinations, in layer order.
    pub fn combos(&self) -> Vec<Vec<String>> {
        self.iter().fold(vec![Vec::new()], |acc, layer| {
            let tails = layer.combos();
            acc.iter()
                .flat_map(|head| {
                    tails.iter().map(move |tail| {
                        let mut combo = head.clone();
                        combo.extend(tail.iter().cloned());
                        combo
                    })
                })
                .collect()
        })
    }
}

impl Layer {
    /// Each selection name followed by the combinations of its nested layers.
    pub fn combos(&self) -> Vec<Vec<String>> {
        self.contexts
            .iter()
            .flat_map(|(name, child)| {
                child.layers.combos().into_iter().map(move |tail| {
                    let mut combo = Vec::with_capacity(tail.len() + 1);
                    combo.push(name.clone());
                    combo.extend(tail);
                    combo
                })
            })
            .collect()
    }

    fn select(&self, name: &str) -> Result<&Context> {
        self.get(name).ok_or_else(|| Error::SelectionNotFound {
            name: name.to_string(),
            layer: self.name.clone(),
            available: self.names(),
        })
    }
}

fn fold_layers(
    mut acc: Context,
    layers: &Layers,
    remaining: &mut VecDeque<String>,
    chosen: &mut Vec<String>,
) -> Result<Context> {
    for layer in layers {
        let name = remaining.pop_front().ok_or_else(|| Error::MissingSelection {
            layer: layer.name.clone(),
        })?;
        let child = layer.select(&name)?;

        let flat = Context {
            layers: Layers::default(),
            ..child.clone()
        };
        acc = acc.merge(&flat);
        chosen.push(name);

        acc = fold_layers(acc, &child.layers, remaining, chosen)?;
    }
    Ok(acc)
}

fn next_layer<'a>(layers: &'a Layers, remaining: &mut VecDeque<String>) -> Result<Option<&'a Layer>> {
    for layer in layers {
        let Some(name) = remaining.pop_front() else {
            return Ok(Some(layer));
        };
        let child = layer.select(&name)?;
        if let Some(next) = next_layer(&child.layers, remaining)? {
            return Ok(Some(next));
        }
    }
    Ok(None)
}
