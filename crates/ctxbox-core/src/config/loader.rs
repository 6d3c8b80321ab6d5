//! Discovery and parent-chain loading

use std::path::{Path, PathBuf};

use ctxbox_fs::{CtxPath, find_upwards, io::read_text};

use super::document::Document;
use super::expand::expand_env;
use super::fetch::fetch_document;
use super::location::Location;
use super::paths::anchor_paths;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::selection::Contexts;

/// Lookup used for `$NAME` expansion in env values.
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Maximum number of documents in one parent chain.
pub const MAX_PARENT_DEPTH: usize = 32;

/// Loads and merges the configuration tree for a working directory.
pub struct ConfigLoader {
    /// Directory discovery starts from
    cwd: PathBuf,

    /// Home directory for the `~/.ctxbox.yaml` fallback and `~` expansion.
    /// `None` disables both.
    home: Option<PathBuf>,

    env: EnvLookup,
}

impl ConfigLoader {
    /// Create a loader using the real home directory and process environment.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home: dirs::home_dir(),
            env: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Use a different home directory.
    ///
    /// This is primarily useful for testing, where the real `~/.ctxbox.yaml`
    /// must not leak into results.
    pub fn with_home_dir(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Use a different variable lookup for env expansion.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home_dir(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Find the document to load: the explicit `source` if given, otherwise
    /// the nearest `.ctxbox.yaml` above the working directory, otherwise
    /// `~/.ctxbox.yaml`.
    pub fn locate(&self, source: Option<&str>) -> Result<Location> {
        if let Some(source) = source {
            return Location::parse(source, &self.cwd, self.home_dir());
        }

        if let Some(path) = find_upwards(&self.cwd, CtxPath::ConfigFile) {
            return Ok(Location::Local(path));
        }

        if let Some(home) = &self.home {
            let fallback = home.join(CtxPath::ConfigFile);
            if fallback.is_file() {
                tracing::debug!(path = %fallback.display(), "using home directory fallback");
                return Ok(Location::Local(fallback));
            }
        }

        Err(Error::ConfigNotFound {
            start: self.cwd.clone(),
        })
    }

    /// Locate and load the merged tree.
    pub fn load(&self, source: Option<&str>) -> Result<Contexts> {
        let location = self.locate(source)?;
        self.load_from(&location)
    }

    /// Load the tree rooted at `location`, applying its parent chain and
    /// expanding env values.
    pub fn load_from(&self, location: &Location) -> Result<Contexts> {
        let mut chain = Vec::new();
        let merged = self.load_chain(location, &mut chain)?;
        let context = expand_env(merged, &self.env);
        tracing::debug!(location = %location, documents = chain.len(), "loaded configuration");
        Ok(Contexts::new(location.clone(), context))
    }

    fn load_chain(&self, location: &Location, chain: &mut Vec<Location>) -> Result<Context> {
        if chain.contains(location) {
            return Err(Error::ParentCycle {
                location: location.to_string(),
            });
        }
        if chain.len() >= MAX_PARENT_DEPTH {
            return Err(Error::ParentChainTooDeep {
                location: chain
                    .first()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| location.to_string()),
                limit: MAX_PARENT_DEPTH,
            });
        }
        chain.push(location.clone());

        let text = self.read(location)?;
        let Document {
            parent,
            mut context,
        } = Document::parse(&text, &location.to_string())?;
        anchor_paths(&mut context, location, self.home_dir());

        let Some(parent) = parent else {
            return Ok(context);
        };

        let parent_location = location.join(&parent, self.home_dir())?;
        tracing::debug!(child = %location, parent = %parent_location, "resolving parent");

        let base = self
            .load_chain(&parent_location, chain)
            .map_err(|e| match e {
                // keep the innermost cause for chain-level errors
                Error::ParentCycle { .. } | Error::ParentChainTooDeep { .. } => e,
                e => Error::Parent {
                    parent: parent_location.to_string(),
                    location: location.to_string(),
                    source: Box::new(e),
                },
            })?;

        Ok(base.merge(&context))
    }

    fn read(&self, location: &Location) -> Result<String> {
        match location {
            Location::Local(path) => Ok(read_text(path)?),
            Location::Remote(url) => fetch_document(url.as_str()),
        }
    }
}
