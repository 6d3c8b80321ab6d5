//! Error types for ctxbox-core

use std::path::PathBuf;

/// Result type for ctxbox-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, resolving or running a context
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No configuration document was found climbing from `start` or in the home directory
    #[error("No .ctxbox.yaml found in {start} or any parent directory, and no ~/.ctxbox.yaml")]
    ConfigNotFound { start: PathBuf },

    /// The document could not be parsed
    #[error("Failed to parse {location}: {message}")]
    Parse { location: String, message: String },

    /// The document declares a schema version other than the supported one
    #[error("Unsupported version {found} in {location} (expected {expected})")]
    UnsupportedVersion {
        location: String,
        found: String,
        expected: u64,
    },

    /// A remote reference is not a valid URL
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// A remote document could not be fetched
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Resolving the `parent` of a document failed
    #[error("Failed to load parent {parent} of {location}: {source}")]
    Parent {
        parent: String,
        location: String,
        #[source]
        source: Box<Error>,
    },

    /// A document appears twice in its own parent chain
    #[error("Parent chain cycles back to {location}")]
    ParentCycle { location: String },

    /// The parent chain exceeds the supported depth
    #[error("Parent chain starting at {location} is deeper than {limit} documents")]
    ParentChainTooDeep { location: String, limit: usize },

    /// A selection name does not exist in its layer
    #[error("Context {name:?} not found in layer {layer:?} (available: {})", available.join(", "))]
    SelectionNotFound {
        name: String,
        layer: String,
        available: Vec<String>,
    },

    /// Fewer names were given than layers to select from
    #[error("No selection given for layer {layer:?}")]
    MissingSelection { layer: String },

    /// More names were given than layers to select from
    #[error("Extraneous context names: {}", names.join(" "))]
    ExtraneousNames { names: Vec<String> },

    /// The resolved context names neither an image nor a Dockerfile
    #[error("Context {context:?} has neither an image nor a build.dockerfile")]
    MissingImage { context: String },

    /// The runtime reported a status the lifecycle does not handle
    #[error("Container {container} is in unexpected state {state:?}")]
    UnexpectedState { container: String, state: String },

    /// Removing a running container needs force
    #[error("Container {container} is running; use --force to remove it")]
    RemovalRequiresForce { container: String },

    /// A container name pattern could not be compiled
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from ctxbox-fs
    #[error(transparent)]
    Fs(#[from] ctxbox_fs::Error),

    /// Runtime error from ctxbox-docker
    #[error(transparent)]
    Runtime(#[from] ctxbox_docker::Error),
}
