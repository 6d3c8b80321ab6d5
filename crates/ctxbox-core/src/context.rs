//! The `Context` value type and its merge algebra
//!
//! A [`Context`] is a plain data record. Inheritance between documents and
//! layer selections is expressed as [`Context::merge`], which always starts
//! from a deep clone of the receiver so the result never shares storage with
//! either operand.

use std::collections::{BTreeMap, HashMap};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::layer::Layers;

/// How to build an image when a context names no `image`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Build {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dockerfile: String,

    /// Build context directory; the Dockerfile's directory when empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,

    #[serde(
        skip_serializing_if = "HashMap::is_empty",
        serialize_with = "serialize_sorted",
        deserialize_with = "deserialize_scalar_map"
    )]
    pub args: HashMap<String, String>,
}

impl Build {
    pub fn is_empty(&self) -> bool {
        self.dockerfile.is_empty() && self.context.is_empty() && self.args.is_empty()
    }

    /// Apply `source` on top of a clone of `self`.
    pub fn merge(&self, source: &Build) -> Build {
        let mut merged = self.clone();
        overwrite(&mut merged.dockerfile, &source.dockerfile);
        overwrite(&mut merged.context, &source.context);
        merged
            .args
            .extend(source.args.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Runtime configuration for one container, possibly partially resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Context {
    /// Composite selection name; derived while decoding and resolving
    #[serde(skip)]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,

    #[serde(skip_serializing_if = "Build::is_empty")]
    pub build: Build,

    #[serde(
        skip_serializing_if = "HashMap::is_empty",
        serialize_with = "serialize_sorted",
        deserialize_with = "deserialize_scalar_map"
    )]
    pub env: HashMap<String, String>,

    /// Host path to container path
    #[serde(
        skip_serializing_if = "HashMap::is_empty",
        serialize_with = "serialize_sorted",
        deserialize_with = "deserialize_scalar_map"
    )]
    pub mounts: HashMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cmd: Vec<String>,

    /// Extra runtime arguments placed before the image
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub run_args: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub entrypoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub network: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<bool>,

    #[serde(skip_serializing_if = "Layers::is_empty")]
    pub layers: Layers,
}

impl Context {
    /// Create an empty context with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Return a clone of `self` with every field of `source` applied on top.
    ///
    /// Strings are overwritten when `source` sets them, maps are unioned with
    /// `source` winning on shared keys, sequences are appended, `remove` is
    /// overwritten only when `source` sets it explicitly, and layers are
    /// merged by name. The receiver's `name` is kept.
    pub fn merge(&self, source: &Context) -> Context {
        let mut merged = self.clone();
        overwrite(&mut merged.image, &source.image);
        merged.build = self.build.merge(&source.build);
        merged
            .env
            .extend(source.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .mounts
            .extend(source.mounts.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.cmd.extend(source.cmd.iter().cloned());
        merged.run_args.extend(source.run_args.iter().cloned());
        overwrite(&mut merged.entrypoint, &source.entrypoint);
        overwrite(&mut merged.network, &source.network);
        if source.remove.is_some() {
            merged.remove = source.remove;
        }
        merged.layers = self.layers.merge(&source.layers);
        merged
    }

    /// Whether containers for this context are removed when they exit.
    pub fn remove_on_exit(&self) -> bool {
        self.remove.unwrap_or(false)
    }
}

fn overwrite(target: &mut String, source: &str) {
    if !source.is_empty() {
        *target = source.to_string();
    }
}

fn serialize_sorted<S: Serializer>(
    map: &HashMap<String, String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    map.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}

/// Decode a string map whose values may be any YAML scalar.
///
/// `PORT: 8080` and `DEBUG: true` are common in hand-written documents, and
/// `KEY:` with no value means the empty string.
fn deserialize_scalar_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<HashMap<String, String>, D::Error> {
    let raw = Option::<HashMap<String, serde_yaml::Value>>::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_yaml::Value::Null => String::new(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::String(s) => s,
                _ => {
                    return Err(D::Error::custom(format!(
                        "expected a scalar value for {:?}",
                        key
                    )));
                }
            };
            Ok((key, value))
        })
        .collect()
}
