//! Filesystem helpers for ctxbox
//!
//! Path resolution relative to configuration documents, directory climbing,
//! short content checksums, and atomic writes for the small amount of state
//! ctxbox persists.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{short_checksum, short_checksum_bytes};
pub use constants::CtxPath;
pub use error::{Error, Result};
pub use path::{canonicalize, expand_home, find_upwards, home_dir, is_url, resolve_relative};
