//! Path resolution helpers
//!
//! Configuration documents reference host paths (Dockerfiles, build contexts,
//! mount sources, parent documents) that are relative to the document that
//! declares them. These helpers turn such references into absolute paths.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Whether a reference points to a remote document.
pub fn is_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Expand a leading `~` or `~/` against the given home directory.
///
/// Any other input, including `~user`, is returned unchanged.
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (raw, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        (raw, _) => PathBuf::from(raw),
    }
}

/// Resolve a path declared in a document located in `base_dir`.
///
/// Empty strings stay empty, `~/` is expanded, absolute paths are kept, and
/// relative paths are joined onto `base_dir` and normalized lexically.
pub fn resolve_relative(base_dir: &Path, raw: &str, home: Option<&Path>) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let expanded = expand_home(raw, home);
    let resolved = if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    };
    normalize_lexically(&resolved).to_string_lossy().into_owned()
}

/// Remove `.` components and fold `..` components without touching the
/// filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Climb from `start` towards the filesystem root looking for `file_name`.
///
/// Returns the first existing file found, or `None` once the root has been
/// checked.
pub fn find_upwards(start: &Path, file_name: impl AsRef<Path>) -> Option<PathBuf> {
    let file_name = file_name.as_ref();
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "found file while climbing");
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

/// Canonicalize an existing path, without Windows verbatim prefixes.
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(Error::HomeDirUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_urls() {
        assert!(is_url("https://example.com/ctx.yaml"));
        assert!(is_url("http://localhost:8080/ctx.yaml"));
        assert!(!is_url("./ctx.yaml"));
        assert!(!is_url("/etc/https.yaml"));
    }

    #[test]
    fn expands_tilde_only_with_home() {
        let home = Path::new("/home/me");
        assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/me"));
        assert_eq!(expand_home("~/src", Some(home)), PathBuf::from("/home/me/src"));
        assert_eq!(expand_home("~other/src", Some(home)), PathBuf::from("~other/src"));
        assert_eq!(expand_home("~/src", None), PathBuf::from("~/src"));
    }

    #[test]
    fn normalizes_dot_components() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
    }
}
