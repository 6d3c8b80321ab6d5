//! Parsing a single configuration document

use serde_yaml::{Mapping, Value};

use crate::context::Context;
use crate::error::{Error, Result};

/// The only schema version this build understands.
pub const SUPPORTED_VERSION: u64 = 0;

/// One parsed `.ctxbox.yaml` document, before its parent chain is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub parent: Option<String>,
    pub context: Context,
}

impl Document {
    /// Parse document text. `location` is only used in error messages.
    ///
    /// `version` and `parent` are split off the top-level mapping; the rest
    /// must decode as a [`Context`], so unknown keys are rejected. A missing
    /// `version` is treated as the supported one.
    pub fn parse(text: &str, location: &str) -> Result<Self> {
        let parse_error = |message: String| Error::Parse {
            location: location.to_string(),
            message,
        };

        let mut mapping = serde_yaml::from_str::<Option<Mapping>>(text)
            .map_err(|e| parse_error(e.to_string()))?
            .unwrap_or_default();

        check_version(mapping.remove("version"), location)?;

        let parent = match mapping.remove("parent") {
            None | Some(Value::Null) => None,
            Some(Value::String(parent)) if parent.trim().is_empty() => None,
            Some(Value::String(parent)) => Some(parent),
            Some(other) => {
                return Err(parse_error(format!(
                    "parent must be a path or URL, got {}",
                    describe(&other)
                )));
            }
        };

        let context: Context = serde_yaml::from_value(Value::Mapping(mapping))
            .map_err(|e| parse_error(e.to_string()))?;

        Ok(Self { parent, context })
    }
}

fn check_version(version: Option<Value>, location: &str) -> Result<()> {
    match version {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Number(n)) if n.as_u64() == Some(SUPPORTED_VERSION) => Ok(()),
        Some(other) => Err(Error::UnsupportedVersion {
            location: location.to_string(),
            found: describe(&other),
            expected: SUPPORTED_VERSION,
        }),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Bool(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_inline_context_and_parent() {
        let doc = Document::parse(
            "version: 0\nparent: ../base.yaml\nimage: ubuntu\nlayers:\n  env:\n    dev: {}\n",
            "test.yaml",
        )
        .unwrap();

        assert_eq!(doc.parent.as_deref(), Some("../base.yaml"));
        assert_eq!(doc.context.image, "ubuntu");
        assert_eq!(doc.context.layers.len(), 1);
    }

    #[test]
    fn empty_document_is_empty_context() {
        let doc = Document::parse("", "empty.yaml").unwrap();
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn rejects_other_versions() {
        let err = Document::parse("version: 2\n", "v2.yaml").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVersion { ref found, expected: 0, .. } if found == "2"
        ));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Document::parse("version: 0\nmount: {}\n", "typo.yaml").unwrap_err();
        assert!(matches!(err, Error::Parse { ref location, .. } if location == "typo.yaml"));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            Document::parse("image: [unclosed\n", "bad.yaml"),
            Err(Error::Parse { .. })
        ));
    }
}
