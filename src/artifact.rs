//! Coordinate artifact: a KML placemark for desktop globe viewers.
//!
//! One file at one path, replaced on every located lookup and removed when
//! the session ends. KML orders coordinates longitude first.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;

use crate::error_handling::{categorize_io_error, ArtifactError};
use crate::geoip::Coordinates;

/// Mode of the written marker. Viewers may run as another user.
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o644;

static COORDINATES_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<coordinates>\s*([^<]*?)\s*</coordinates>").expect("coordinates regex is valid")
});

/// Renders the marker document for a point.
///
/// The output depends only on the coordinates, so writing the same point
/// twice produces identical bytes.
pub fn render_kml(longitude: f64, latitude: f64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Placemark>
    <name>Target Location</name>
    <Point>
      <coordinates>{longitude},{latitude},0</coordinates>
    </Point>
  </Placemark>
</kml>
"#
    )
}

/// Writes the marker for a point, replacing any previous file.
///
/// The document is written to a temporary file in the same directory and
/// renamed over `path`, so readers never see a partial file.
///
/// # Errors
///
/// - `FileMissing` if the parent directory does not exist
/// - `WriteDenied` for permission, lock or rename failures
pub fn write_artifact(path: &Path, longitude: f64, latitude: f64) -> Result<(), ArtifactError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| categorize_io_error(e, path))?;
    temp.write_all(render_kml(longitude, latitude).as_bytes())
        .and_then(|()| temp.flush())
        .map_err(|e| categorize_io_error(e, path))?;
    // Temporary files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(ARTIFACT_MODE))
            .map_err(|e| categorize_io_error(e, path))?;
    }
    temp.persist(path)
        .map_err(|e| categorize_io_error(e.error, path))?;

    log::debug!(
        "Wrote artifact {} ({},{})",
        path.display(),
        longitude,
        latitude
    );
    Ok(())
}

/// Removes the marker file. A file that is already gone is not an error.
///
/// # Errors
///
/// Returns `WriteDenied` if the file exists but cannot be removed.
pub fn delete_artifact(path: &Path) -> Result<(), ArtifactError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed artifact {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ArtifactError::WriteDenied {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Extracts the raw `<coordinates>` text (`"lon,lat,alt"`) from a document.
pub fn parse_coordinates_text(document: &str) -> Option<&str> {
    COORDINATES_ELEMENT
        .captures(document)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Reads back the point stored in a marker file.
///
/// # Errors
///
/// - `FileMissing` if there is no artifact
/// - `WriteDenied` if it exists but cannot be read
///
/// Returns `Ok(None)` if the file holds no parsable point.
pub fn read_artifact_coordinates(path: &Path) -> Result<Option<Coordinates>, ArtifactError> {
    let document = std::fs::read_to_string(path).map_err(|e| categorize_io_error(e, path))?;
    Ok(parse_coordinates_text(&document).and_then(|text| {
        let mut parts = text.split(',').map(str::trim);
        let longitude = parts.next()?.parse::<f64>().ok()?;
        let latitude = parts.next()?.parse::<f64>().ok()?;
        Some(Coordinates::new(latitude, longitude))
    }))
}

/// Owns the artifact path for a session.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    path: PathBuf,
}

impl ArtifactWriter {
    /// Creates a writer for a path. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the marker for a point.
    pub fn write(&self, coordinates: &Coordinates) -> Result<(), ArtifactError> {
        write_artifact(&self.path, coordinates.longitude, coordinates.latitude)
    }

    /// Removes the marker.
    pub fn delete(&self) -> Result<(), ArtifactError> {
        delete_artifact(&self.path)
    }

    /// Whether a marker currently exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}
