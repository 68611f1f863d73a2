//! GeoIP database initialization and loading.

use std::path::Path;
use std::sync::Arc;

use maxminddb::Reader;

use super::lookup::{MaxMindGeoDb, UnavailableGeoDb};
use super::types::GeoDbStatus;
use super::GeoSource;
use crate::error_handling::ConfigurationError;

/// Loads a MaxMind City database from a local `.mmdb` file.
///
/// # Errors
///
/// Returns `ConfigurationError::DatabaseMissing` if the file cannot be read
/// or is not a valid MaxMind database.
pub async fn open_geo_database(path: &Path) -> Result<MaxMindGeoDb, ConfigurationError> {
    log::info!("Loading GeoIP database from: {}", path.display());

    let db_bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ConfigurationError::DatabaseMissing {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let reader = Reader::from_source(db_bytes).map_err(|e| ConfigurationError::DatabaseMissing {
        path: path.to_path_buf(),
        reason: format!("not a MaxMind database: {e}"),
    })?;

    Ok(MaxMindGeoDb::new(reader, &path.to_string_lossy()))
}

/// Initializes the GeoIP source for a session.
///
/// A missing or unusable database is reported once here and never retried:
/// the returned source answers `NotFound` for every lookup.
///
/// # Returns
///
/// The source to hand to the pipeline, and its status for display.
pub async fn init_geo_source(path: &Path) -> (Arc<dyn GeoSource>, GeoDbStatus) {
    match open_geo_database(path).await {
        Ok(db) => {
            let status = db.status();
            if let GeoDbStatus::Active { ref version, .. } = status {
                log::info!("GeoIP database loaded successfully ({})", version);
            }
            (Arc::new(db), status)
        }
        Err(e) => {
            log::warn!("{}. Continuing without GeoIP lookup.", e);
            (Arc::new(UnavailableGeoDb), GeoDbStatus::Inactive)
        }
    }
}
