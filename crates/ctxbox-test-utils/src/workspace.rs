//! [`TestWorkspace`] builder for configuration scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding a project tree and a private home directory.
///
/// Tests point the loader's home directory at [`TestWorkspace::home`] so a
/// real `~/.ctxbox.yaml` never leaks into results.
///
/// # Example
///
/// ```rust,no_run
/// use ctxbox_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_config("project", "image: ubuntu\n");
/// ws.assert_file_exists("project/.ctxbox.yaml");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        let workspace = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        workspace.mkdir("home");
        workspace
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The private home directory.
    pub fn home(&self) -> PathBuf {
        self.path("home")
    }

    /// Absolute path for `relative`, without touching the filesystem.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Create a directory (and its parents) and return its path.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("Could not create {}: {}", path.display(), e));
        path
    }

    /// Write a file (creating parent directories) and return its path.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {}", path.display(), e));
        path
    }

    /// Write `dir/.ctxbox.yaml` and return its path.
    pub fn write_config(&self, dir: &str, yaml: &str) -> PathBuf {
        let relative = if dir.is_empty() {
            ".ctxbox.yaml".to_string()
        } else {
            format!("{}/.ctxbox.yaml", dir.trim_end_matches('/'))
        };
        self.write(&relative, yaml)
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.path(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
