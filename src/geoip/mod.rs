//! GeoIP lookup using a MaxMind GeoLite2/GeoIP2 City database.
//!
//! The database is loaded once at startup and is read-only afterwards. When
//! it cannot be loaded the adapter stays in an "unavailable" state for the
//! whole session and every lookup reports `NotFound`.

mod init;
mod lookup;
mod metadata;
mod types;

// Re-export public API
pub use init::{init_geo_source, open_geo_database};
pub use lookup::{MaxMindGeoDb, UnavailableGeoDb};
pub use types::{Coordinates, GeoDbStatus, GeoRecord};

use crate::address::IpAddress;
use crate::error_handling::LookupError;

/// An offline source of location data for an address.
///
/// Implementations must be cheap to call repeatedly and must not perform
/// network I/O; the pipeline calls them inline.
pub trait GeoSource: Send + Sync {
    /// Resolves an address to its location record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the database has no entry for the address
    /// - `MalformedResponse` if the entry exists but cannot be decoded
    fn resolve(&self, ip: &IpAddress) -> Result<GeoRecord, LookupError>;

    /// Source name (for logs).
    fn name(&self) -> &'static str;

    /// Whether the database is loaded, and which build.
    fn status(&self) -> GeoDbStatus;
}
