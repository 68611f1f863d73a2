//! Error type definitions.
//!
//! This module defines all error types used throughout the pipeline. Every
//! message starts with the stage that produced it so a user-visible failure
//! is never ambiguous.

use std::fmt;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Rejection of an input literal by the validator.
///
/// Validation errors are terminal for a request: aggregation never starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input is not four dot-separated decimal groups.
    #[error("validation: '{input}' is not a dotted-quad IPv4 address")]
    MalformedFormat {
        /// The rejected input
        input: String,
    },

    /// A group is numeric but outside 0-255.
    #[error("validation: octet {position} ('{octet}') of '{input}' is outside 0-255")]
    OctetOutOfRange {
        /// The rejected input
        input: String,
        /// 1-based position of the offending group
        position: usize,
        /// The offending group as written
        octet: String,
    },
}

/// Why a single source (GeoIP or registry) produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupErrorKind {
    /// The source has no entry for the address
    NotFound,
    /// Connection failure or timeout
    NetworkUnavailable,
    /// The source answered but the answer could not be parsed
    MalformedResponse,
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LookupErrorKind::NotFound => "no record found",
            LookupErrorKind::NetworkUnavailable => "network unavailable",
            LookupErrorKind::MalformedResponse => "malformed response",
        };
        f.write_str(s)
    }
}

/// Failure of one lookup source.
///
/// The aggregator absorbs these into per-field sentinels; they never abort
/// a whole aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct LookupError {
    /// Failure category
    pub kind: LookupErrorKind,
    /// Human-readable detail (source name, upstream message)
    pub detail: String,
}

impl LookupError {
    /// Creates a `NotFound` lookup error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::NotFound,
            detail: detail.into(),
        }
    }

    /// Creates a `NetworkUnavailable` lookup error.
    pub fn network_unavailable(detail: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::NetworkUnavailable,
            detail: detail.into(),
        }
    }

    /// Creates a `MalformedResponse` lookup error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::MalformedResponse,
            detail: detail.into(),
        }
    }
}

/// Errors writing, reading or removing the coordinate artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Permission, lock or rename failure on the artifact path.
    #[error("artifact: cannot write {}: {source}", .path.display())]
    WriteDenied {
        /// Target artifact path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The artifact (or its parent directory) does not exist.
    #[error("artifact: {} does not exist", .path.display())]
    FileMissing {
        /// Missing path
        path: PathBuf,
    },
}

/// Startup-time configuration problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The GeoIP database file is absent or unusable.
    ///
    /// Reported once; the geo adapter then answers `NotFound` for the session.
    #[error("configuration: GeoIP database {} unavailable: {reason}", .path.display())]
    DatabaseMissing {
        /// Configured database path
        path: PathBuf,
        /// Why it could not be loaded
        reason: String,
    },
}

/// Errors launching an external viewer.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// No lookup has produced coordinates yet.
    #[error("viewer: input data error, no latitude/longitude has been resolved")]
    NoCoordinates,

    /// The configured viewer executable does not exist.
    #[error("viewer: executable {} not found", .path.display())]
    ExecutableMissing {
        /// Configured executable path
        path: PathBuf,
    },

    /// The viewer process could not be spawned.
    #[error("viewer: failed to launch {}: {source}", .path.display())]
    LaunchFailed {
        /// Executable path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Whole-request failure returned by the pipeline.
///
/// Either an aggregated result comes back, or one of these names the stage
/// that stopped it.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The input literal was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The artifact could not be written.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_constructors() {
        assert_eq!(
            LookupError::not_found("geo").kind,
            LookupErrorKind::NotFound
        );
        assert_eq!(
            LookupError::network_unavailable("rdap").kind,
            LookupErrorKind::NetworkUnavailable
        );
        assert_eq!(
            LookupError::malformed("rdap").kind,
            LookupErrorKind::MalformedResponse
        );
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::network_unavailable("timed out after 10s");
        assert_eq!(err.to_string(), "network unavailable: timed out after 10s");
    }

    #[test]
    fn test_validation_error_names_stage() {
        let err = ValidationError::OctetOutOfRange {
            input: "256.1.1.1".to_string(),
            position: 1,
            octet: "256".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("validation:"));
        assert!(msg.contains("256"));
    }

    #[test]
    fn test_tracker_error_is_transparent() {
        let err: TrackerError = ArtifactError::FileMissing {
            path: PathBuf::from("/nope/target.kml"),
        }
        .into();
        assert_eq!(err.to_string(), "artifact: /nope/target.kml does not exist");
    }

    #[test]
    fn test_lookup_error_kind_serializes_snake_case() {
        let json = serde_json::to_string(&LookupErrorKind::NetworkUnavailable).unwrap();
        assert_eq!(json, "\"network_unavailable\"");
    }
}
