//! Loading the configuration tree
//!
//! A tree is assembled from one or more `.ctxbox.yaml` documents:
//!
//! 1. **Discovery** - climb from the working directory to the filesystem
//!    root, then fall back to `~/.ctxbox.yaml` (skipped with an explicit
//!    `--config` path or URL)
//! 2. **Parent chain** - each document's `parent` (local path or http(s)
//!    URL) is loaded first and the document is merged on top of it
//! 3. **Relative paths** - `build.dockerfile`, `build.context` and mount
//!    sources are resolved against the directory of the document that
//!    declares them, before merging
//! 4. **Environment** - `$NAME` and `${NAME}` in env values are expanded once
//!    the whole chain is merged
//!
//! # Example
//!
//! ```ignore
//! use ctxbox_core::config::ConfigLoader;
//!
//! let contexts = ConfigLoader::new(std::env::current_dir()?).load(None)?;
//! for combo in contexts.get_combos() {
//!     println!("{}", combo.join(" "));
//! }
//! ```

mod document;
mod expand;
mod fetch;
mod loader;
mod location;
mod paths;

pub use document::{Document, SUPPORTED_VERSION};
pub use expand::{expand_env, expand_placeholders};
pub use fetch::fetch_document;
pub use loader::{ConfigLoader, EnvLookup, MAX_PARENT_DEPTH};
pub use location::Location;
