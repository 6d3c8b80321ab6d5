//! The last selected context names
//!
//! Stored as one line of space-separated names in `~/.ctxbox-last`. The file
//! is read and overwritten without coordination between concurrent
//! invocations; each write is atomic, so readers see either the old or the
//! new selection.

use std::path::{Path, PathBuf};

use ctxbox_fs::{
    CtxPath,
    io::{read_text_if_exists, write_atomic},
};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSelection {
    path: PathBuf,
}

impl LastSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store in the given home directory.
    pub fn in_home(home: &Path) -> Self {
        Self::new(home.join(CtxPath::LastSelection))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The previously saved names; empty when nothing was saved yet.
    pub fn load(&self) -> Result<Vec<String>> {
        let names = read_text_if_exists(&self.path)?
            .map(|text| text.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        Ok(names)
    }

    pub fn save<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let line = names
            .iter()
            .map(|name| name.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(path = %self.path.display(), names = %line, "saving last selection");
        write_atomic(&self.path, format!("{}\n", line).as_bytes())?;
        Ok(())
    }
}
