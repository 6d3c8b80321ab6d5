//! Shared test utilities for the ctxbox workspace.
//!
//! This crate provides standardised test fixtures so crate test suites do not
//! each grow their own. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`runtime`]: [`FakeRuntime`], an in-memory container runtime that
//!   records every call
//! - [`workspace`]: [`TestWorkspace`] builder for configuration documents,
//!   project directories and a private home directory

pub mod runtime;
pub mod workspace;

pub use runtime::{Call, FakeRuntime};
pub use workspace::TestWorkspace;
