//! Deterministic container names
//!
//! A container name has three parts:
//!
//! ```text
//! ctxbox-<dir basename>-<checksum(config dir)>-<composite name>-<checksum(canonical context)>
//! '------------------- path prefix ----------'
//! ```
//!
//! The canonical form lists fields in a fixed order with sorted map keys, so
//! the name never depends on map iteration order. `remove` is left out so
//! toggling `--rm` keeps addressing the same container.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::LazyLock;

use ctxbox_fs::{short_checksum, short_checksum_bytes};
use regex::Regex;

use crate::config::Location;
use crate::context::Context;
use crate::error::Result;

/// Prefix shared by every container and built image ctxbox creates.
pub const NAME_PREFIX: &str = "ctxbox";

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static PATH_UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());
static NAME_UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap());
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Make a directory basename usable inside a container name.
pub fn sanitize_path_segment(value: &str) -> String {
    let value = WHITESPACE.replace_all(value, "_");
    let value = PATH_UNSAFE.replace_all(&value, "");
    let value = DASH_RUNS.replace_all(&value, "-");
    let value = value.trim_end_matches('-');

    match value.chars().next() {
        None => String::new(),
        Some(c) if c.is_ascii_alphanumeric() => value.to_string(),
        Some(_) => format!("0{}", value),
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `-`.
pub fn sanitize_context_name(value: &str) -> String {
    NAME_UNSAFE.replace_all(value, "-").into_owned()
}

/// The name prefix shared by all containers of one configuration document.
pub fn container_path_prefix(location: &Location) -> String {
    let dir = location.dir();
    let checksum = short_checksum(&dir);
    let basename = Path::new(dir.trim_end_matches('/'))
        .file_name()
        .map(|name| sanitize_path_segment(&name.to_string_lossy()))
        .unwrap_or_default();

    if basename.is_empty() {
        format!("{}-{}", NAME_PREFIX, checksum)
    } else {
        format!("{}-{}-{}", NAME_PREFIX, basename, checksum)
    }
}

/// The container name for a resolved context.
pub fn container_name(location: &Location, context: &Context) -> String {
    let prefix = container_path_prefix(location);
    let checksum = short_checksum(&canonical(context));
    let name = sanitize_context_name(&context.name);

    if name.is_empty() {
        format!("{}-{}", prefix, checksum)
    } else {
        format!("{}-{}-{}", prefix, name, checksum)
    }
}

/// Canonical text of the fields that define a container.
///
/// One `key=value` line per field in a fixed order; map entries are sorted
/// and every value is JSON string encoded so separators cannot collide.
pub fn canonical(context: &Context) -> String {
    let mut out = String::new();
    line(&mut out, "image", &quote(&context.image));
    line(&mut out, "build.dockerfile", &quote(&context.build.dockerfile));
    line(&mut out, "build.context", &quote(&context.build.context));
    map_lines(&mut out, "build.args", &context.build.args);
    map_lines(&mut out, "env", &context.env);
    map_lines(&mut out, "mounts", &context.mounts);
    line(&mut out, "cmd", &quote_all(&context.cmd));
    line(&mut out, "runArgs", &quote_all(&context.run_args));
    line(&mut out, "entrypoint", &quote(&context.entrypoint));
    line(&mut out, "network", &quote(&context.network));
    out
}

/// Tag for an image built from `dockerfile` with the given build args.
pub fn image_tag(dockerfile: &[u8], args: &HashMap<String, String>) -> String {
    let mut content = dockerfile.to_vec();
    let mut rendered = String::new();
    map_lines(&mut rendered, "build.args", args);
    content.extend_from_slice(rendered.as_bytes());
    format!("{}-{}", NAME_PREFIX, short_checksum_bytes(&content))
}

/// Match containers of any configuration whose composite name starts with
/// `names`, in order.
pub fn container_name_pattern<S: AsRef<str>>(names: &[S]) -> Result<Regex> {
    let pattern = format!("^{}-.*-{}", regex::escape(NAME_PREFIX), fragments(names));
    Ok(Regex::new(&pattern)?)
}

/// Like [`container_name_pattern`], restricted to containers of the
/// configuration at `location`.
pub fn container_name_pattern_for<S: AsRef<str>>(location: &Location, names: &[S]) -> Result<Regex> {
    let prefix = container_path_prefix(location);
    let pattern = format!("^{}-{}", regex::escape(&prefix), fragments(names));
    Ok(Regex::new(&pattern)?)
}

/// Expand per-depth alternatives into one pattern per combination.
///
/// `[["dev", "prod"], ["go"]]` gives patterns for `dev go` and `prod go`.
pub fn container_name_patterns(alternatives: &[Vec<String>]) -> Result<Vec<Regex>> {
    expand_alternatives(alternatives)
        .iter()
        .map(|combo| container_name_pattern(combo.as_slice()))
        .collect()
}

/// Like [`container_name_patterns`], anchored on the prefix of `location`.
pub fn container_name_patterns_for(
    location: &Location,
    alternatives: &[Vec<String>],
) -> Result<Vec<Regex>> {
    expand_alternatives(alternatives)
        .iter()
        .map(|combo| container_name_pattern_for(location, combo.as_slice()))
        .collect()
}

fn expand_alternatives(alternatives: &[Vec<String>]) -> Vec<Vec<String>> {
    alternatives.iter().fold(vec![Vec::new()], |acc, options| {
        acc.iter()
            .flat_map(|head: &Vec<String>| {
                options.iter().map(move |option| {
                    let mut combo = head.clone();
                    combo.push(option.clone());
                    combo
                })
            })
            .collect()
    })
}

fn fragments<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| format!("{}-", regex::escape(&sanitize_context_name(name.as_ref()))))
        .collect()
}

fn line(out: &mut String, key: &str, value: &str) {
    let _ = writeln!(out, "{}={}", key, value);
}

fn map_lines(out: &mut String, prefix: &str, map: &HashMap<String, String>) {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort();
    for (key, value) in entries {
        let _ = writeln!(out, "{}.{}={}", prefix, quote(key), quote(value));
    }
}

fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn quote_all(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("[{}]", quoted.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn location() -> Location {
        Location::Local("/work/my project/.ctxbox.yaml".into())
    }

    #[rstest]
    #[case("my project", "my_project")]
    #[case("a--b--", "a-b")]
    #[case(".hidden", "0.hidden")]
    #[case("café", "caf")]
    #[case("___", "0___")]
    #[case("!!!", "")]
    fn sanitizes_path_segments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_path_segment(input), expected);
    }

    #[test]
    fn sanitizes_composite_names() {
        assert_eq!(sanitize_context_name("dev go"), "dev-go");
        assert_eq!(sanitize_context_name("a.b/c"), "a-b-c");
    }

    #[test]
    fn prefix_uses_basename_and_dir_checksum() {
        let prefix = container_path_prefix(&location());
        assert_eq!(
            prefix,
            format!("ctxbox-my_project-{}", short_checksum("/work/my project"))
        );
    }

    #[test]
    fn prefix_without_usable_basename() {
        let prefix = container_path_prefix(&Location::Local("/!!!/.ctxbox.yaml".into()));
        assert_eq!(prefix, format!("ctxbox-{}", short_checksum("/!!!")));
    }

    #[test]
    fn name_layout() {
        let context = Context {
            name: "dev go".into(),
            image: "golang".into(),
            ..Context::default()
        };
        let name = container_name(&location(), &context);
        let prefix = container_path_prefix(&location());

        assert!(name.starts_with(&format!("{prefix}-dev-go-")), "{name}");
        assert_eq!(name.len(), prefix.len() + "-dev-go-".len() + 16);
    }

    #[test]
    fn name_without_layers_omits_composite_segment() {
        let context = Context {
            image: "golang".into(),
            ..Context::default()
        };
        let name = container_name(&location(), &context);
        let prefix = container_path_prefix(&location());
        assert_eq!(name.len(), prefix.len() + 1 + 16);
    }

    #[test]
    fn remove_does_not_affect_identity() {
        let base = Context {
            image: "golang".into(),
            ..Context::default()
        };
        let with_remove = Context {
            remove: Some(true),
            ..base.clone()
        };
        assert_eq!(
            container_name(&location(), &base),
            container_name(&location(), &with_remove)
        );
    }

    #[test]
    fn canonical_quotes_separators() {
        let a = Context {
            cmd: vec!["a,b".into()],
            ..Context::default()
        };
        let b = Context {
            cmd: vec!["a".into(), "b".into()],
            ..Context::default()
        };
        assert_ne!(canonical(&a), canonical(&b));
    }

    #[test]
    fn image_tag_depends_on_args() {
        let args = HashMap::from([("V".to_string(), "1".to_string())]);
        let tag = image_tag(b"FROM alpine\n", &args);

        assert!(tag.starts_with("ctxbox-"));
        assert_ne!(tag, image_tag(b"FROM alpine\n", &HashMap::new()));
        assert_ne!(tag, image_tag(b"FROM debian\n", &args));
    }

    #[test]
    fn patterns_match_ordered_fragments() {
        let pattern = container_name_pattern(&["dev", "go"]).unwrap();
        assert!(pattern.is_match("ctxbox-proj-0123456789abcdef-dev-go-fedcba9876543210"));
        assert!(pattern.is_match("ctxbox-proj-0123456789abcdef-dev-go-eu-fedcba9876543210"));
        assert!(!pattern.is_match("ctxbox-proj-0123456789abcdef-go-dev-fedcba9876543210"));
        assert!(!pattern.is_match("ctxbox-proj-0123456789abcdef-dev-fedcba9876543210"));
    }

    #[test]
    fn pattern_for_location_is_anchored_on_prefix() {
        let pattern = container_name_pattern_for(&location(), &["dev"]).unwrap();
        let prefix = container_path_prefix(&location());

        assert!(pattern.is_match(&format!("{prefix}-dev-0123456789abcdef")));
        assert!(!pattern.is_match("ctxbox-other-0123456789abcdef-dev-0123456789abcdef"));
    }

    #[test]
    fn patterns_expand_alternatives() {
        let patterns = container_name_patterns(&[
            vec!["dev".to_string(), "prod".to_string()],
            vec!["go".to_string()],
        ])
        .unwrap();
        let sources: Vec<_> = patterns.iter().map(|p| p.as_str().to_string()).collect();
        assert_eq!(sources, vec!["^ctxbox-.*-dev-go-", "^ctxbox-.*-prod-go-"]);
    }

    #[test]
    fn anchored_patterns_expand_alternatives() {
        let patterns = container_name_patterns_for(
            &location(),
            &[vec!["dev".to_string()], vec!["go".to_string(), "node".to_string()]],
        )
        .unwrap();
        let prefix = container_path_prefix(&location());

        assert_eq!(patterns.len(), 2);
        assert!(patterns[1].is_match(&format!("{prefix}-dev-node-0123456789abcdef")));
        assert!(!patterns[0].is_match(&format!("{prefix}-dev-node-0123456789abcdef")));
    }
}
