//! GeoIP database metadata.

use maxminddb::Reader;

use super::types::GeoDbStatus;

/// Builds the "active" status for a loaded database.
///
/// MaxMind databases carry a `build_epoch` in their metadata section; it is
/// the only version marker the format guarantees.
pub(crate) fn extract_status<T: AsRef<[u8]>>(reader: &Reader<T>, source: &str) -> GeoDbStatus {
    GeoDbStatus::Active {
        source: source.to_string(),
        version: format_version(reader.metadata.build_epoch),
    }
}

/// Formats a build epoch as a version label.
pub(crate) fn format_version(build_epoch: u64) -> String {
    format!("build_{}", build_epoch)
}
