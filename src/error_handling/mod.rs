//! Error handling for the lookup pipeline.
//!
//! This module provides:
//! - Error type definitions for every pipeline stage
//! - Mapping of transport errors (HTTP, DNS, I/O) onto lookup failures
//!
//! Errors are split by stage so that callers can always tell which step
//! failed:
//! - **Validation**: the input literal was rejected, nothing else ran
//! - **Lookup**: a single source (geo or registry) failed; recovered locally
//! - **Artifact**: the marker file could not be written; surfaced to the caller
//! - **Configuration**: detected once at startup (missing GeoIP database)

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_io_error, categorize_resolve_error, categorize_reqwest_error};
pub use types::{
    ArtifactError, ConfigurationError, InitializationError, LookupError, LookupErrorKind,
    TrackerError, ValidationError, ViewerError,
};
