//! Error categorization.
//!
//! This module maps transport-level errors (HTTP, DNS, filesystem) onto the
//! pipeline's error taxonomy.

use std::io;
use std::path::Path;

use hickory_resolver::error::{ResolveError, ResolveErrorKind};

use super::types::{ArtifactError, LookupError};

/// Categorizes a `reqwest::Error` into a `LookupError`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
/// * `source` - Name of the lookup source, used in the error detail
///
/// # Returns
///
/// - `NotFound` for 404 and 410 responses
/// - `MalformedResponse` for body decode failures and other 4xx statuses
/// - `NetworkUnavailable` for timeouts, connect failures and 5xx statuses
pub fn categorize_reqwest_error(error: &reqwest::Error, source: &str) -> LookupError {
    if let Some(status) = error.status() {
        match status.as_u16() {
            404 | 410 => return LookupError::not_found(format!("{source}: HTTP {status}")),
            429 => {
                return LookupError::network_unavailable(format!("{source}: rate limited ({status})"))
            }
            _ if status.is_server_error() => {
                return LookupError::network_unavailable(format!("{source}: HTTP {status}"))
            }
            _ if status.is_client_error() => {
                return LookupError::malformed(format!("{source}: HTTP {status}"))
            }
            _ => {
                // Non-standard status codes - fall through to check error type
            }
        }
    }

    if error.is_decode() || error.is_body() {
        LookupError::malformed(format!("{source}: {error}"))
    } else {
        // Timeouts, connect errors, redirects and builder errors all mean the
        // registry could not be reached
        LookupError::network_unavailable(format!("{source}: {error}"))
    }
}

/// Categorizes a DNS `ResolveError` into a `LookupError`.
///
/// An authoritative "no records" answer is `NotFound`; everything else
/// (timeouts, I/O, protocol errors) is `NetworkUnavailable`.
pub fn categorize_resolve_error(error: &ResolveError, source: &str) -> LookupError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => {
            LookupError::not_found(format!("{source}: no DNS records"))
        }
        _ => LookupError::network_unavailable(format!("{source}: {error}")),
    }
}

/// Categorizes a filesystem error on the artifact path.
///
/// A missing path (or missing parent directory) is `FileMissing`; every
/// other failure is `WriteDenied`.
pub fn categorize_io_error(error: io::Error, path: &Path) -> ArtifactError {
    match error.kind() {
        io::ErrorKind::NotFound => ArtifactError::FileMissing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::WriteDenied {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
