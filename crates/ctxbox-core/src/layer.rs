//! Named selection axes
//!
//! A [`Layer`] maps selection names to child [`Context`]s; [`Layers`] keeps
//! the layers of one context in document order. The YAML shape is decoded in
//! two passes: the `layers` value is first read as an ordered generic
//! mapping, then each layer's value is decoded into selection contexts.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::context::Context;

/// One axis of mutually exclusive choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    pub name: String,
    /// Selection name to child context, ordered lexicographically
    pub contexts: BTreeMap<String, Context>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contexts: BTreeMap::new(),
        }
    }

    /// Add a selection, naming the child context after it.
    pub fn with_context(mut self, name: impl Into<String>, mut context: Context) -> Self {
        let name = name.into();
        context.name = name.clone();
        self.contexts.insert(name, context);
        self
    }

    /// Selection names in enumeration order.
    pub fn names(&self) -> Vec<String> {
        self.contexts.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// Union of selections; selections present on both sides are merged.
    pub fn merge(&self, source: &Layer) -> Layer {
        let mut merged = self.clone();
        for (name, context) in &source.contexts {
            let next = match merged.contexts.get(name) {
                Some(existing) => existing.merge(context),
                None => context.clone(),
            };
            merged.contexts.insert(name.clone(), next);
        }
        merged
    }
}

/// The ordered layers declared by one context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layers(Vec<Layer>);

impl Layers {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self(layers)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&Layer> {
        self.0.first()
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.0.iter().find(|layer| layer.name == name)
    }

    pub fn push(&mut self, layer: Layer) {
        self.0.push(layer);
    }

    /// Merge layer by layer, matching on name.
    ///
    /// Layers only in `source` are appended after the receiver's layers, in
    /// `source` order.
    pub fn merge(&self, source: &Layers) -> Layers {
        let mut merged = self.clone();
        for layer in &source.0 {
            match merged.0.iter_mut().find(|existing| existing.name == layer.name) {
                Some(existing) => *existing = existing.merge(layer),
                None => merged.0.push(layer.clone()),
            }
        }
        merged
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Layer> {
        self.0.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Layers {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Layers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for layer in &self.0 {
            map.serialize_entry(&layer.name, &layer.contexts)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Layers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_yaml::Mapping>::deserialize(deserializer)?;
        let mut layers = Vec::new();

        for (key, value) in raw.unwrap_or_default() {
            let name = key
                .as_str()
                .ok_or_else(|| D::Error::custom(format!("layer name must be a string, got {:?}", key)))?
                .to_string();
            if !value.is_mapping() {
                return Err(D::Error::custom(format!(
                    "expecting a map of contexts for layer {:?}",
                    name
                )));
            }

            let decoded: BTreeMap<String, Option<Context>> = serde_yaml::from_value(value)
                .map_err(|e| {
                    D::Error::custom(format!("failed to parse contexts for layer {:?}: {}", name, e))
                })?;

            let contexts = decoded
                .into_iter()
                .map(|(selection, context)| {
                    let mut context = context.unwrap_or_default();
                    context.name = selection.clone();
                    (selection, context)
                })
                .collect();
            layers.push(Layer { name, contexts });
        }

        Ok(Layers(layers))
    }
}
