//! Where a configuration document lives

use std::fmt;
use std::path::{Path, PathBuf};

use ctxbox_fs::{is_url, resolve_relative};
use reqwest::Url;

use crate::error::{Error, Result};

/// A local document path or a remote document URL.
///
/// Remote URLs are stored parsed, so `..` and `.` segments are already
/// normalized and two spellings of one document compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Local(PathBuf),
    Remote(Url),
}

impl Location {
    /// Interpret a user-supplied reference relative to `cwd`.
    pub fn parse(reference: &str, cwd: &Path, home: Option<&Path>) -> Result<Self> {
        if is_url(reference) {
            Self::remote(reference)
        } else {
            Ok(Self::Local(PathBuf::from(resolve_relative(cwd, reference, home))))
        }
    }

    /// Parse an absolute `http(s)` URL.
    pub fn remote(url: &str) -> Result<Self> {
        Url::parse(url)
            .map(Self::Remote)
            .map_err(|e| invalid_url(url, e))
    }

    /// The directory containing the document, without a trailing separator.
    pub fn dir(&self) -> String {
        match self {
            Self::Local(path) => path
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Remote(url) => {
                let mut dir = url.clone();
                dir.set_query(None);
                dir.set_fragment(None);
                let dir = dir.join(".").unwrap_or(dir);
                dir.as_str().trim_end_matches('/').to_string()
            }
        }
    }

    /// Resolve a `parent` reference declared in the document at `self`.
    ///
    /// URLs are taken as-is. From a remote document, other references are
    /// relative to its URL (a leading `/` means the server root). From a
    /// local document they are filesystem paths relative to its directory.
    pub fn join(&self, reference: &str, home: Option<&Path>) -> Result<Self> {
        if is_url(reference) {
            return Self::remote(reference);
        }
        match self {
            Self::Remote(url) => url
                .join(reference)
                .map(Self::Remote)
                .map_err(|e| invalid_url(reference, e)),
            Self::Local(_) => Ok(Self::Local(PathBuf::from(resolve_relative(
                Path::new(&self.dir()),
                reference,
                home,
            )))),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}

fn invalid_url(url: &str, e: impl fmt::Display) -> Error {
    Error::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    }
}
