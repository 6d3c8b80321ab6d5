//! Well-known file names used by ctxbox.

use std::path::Path;

/// Files ctxbox looks for or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtxPath {
    /// The configuration document searched for while climbing directories
    ConfigFile,
    /// The last-selected names record, stored in the home directory
    LastSelection,
}

impl CtxPath {
    /// Get the string representation of the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigFile => ".ctxbox.yaml",
            Self::LastSelection => ".ctxbox-last",
        }
    }
}

impl AsRef<Path> for CtxPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for CtxPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for CtxPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
