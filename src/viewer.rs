//! Hand-off to external globe viewers.
//!
//! The web viewer takes `latitude,longitude` in its URL; the marker file
//! stores `longitude,latitude`. Both need a resolved point.

use std::path::{Path, PathBuf};

use tokio::process::{Child, Command};

use crate::config::WEB_VIEWER_URL_TEMPLATE;
use crate::error_handling::ViewerError;
use crate::geoip::Coordinates;

/// Builds the web viewer URL centred on a point.
///
/// # Errors
///
/// Returns `ViewerError::NoCoordinates` if no point has been resolved.
pub fn web_viewer_url(coordinates: Option<&Coordinates>) -> Result<String, ViewerError> {
    let coordinates = coordinates.ok_or(ViewerError::NoCoordinates)?;
    Ok(WEB_VIEWER_URL_TEMPLATE
        .replace("{lat}", &coordinates.latitude.to_string())
        .replace("{lon}", &coordinates.longitude.to_string()))
}

/// Starts a local viewer executable on the marker file.
///
/// The viewer is given the absolute artifact path and is not waited on.
///
/// # Errors
///
/// - `NoCoordinates` if no point has been resolved or the marker is gone
/// - `ExecutableMissing` if `executable` does not exist
/// - `LaunchFailed` if the process cannot be spawned
pub fn launch_local_viewer(
    executable: &Path,
    artifact_path: &Path,
    coordinates: Option<&Coordinates>,
) -> Result<Child, ViewerError> {
    if coordinates.is_none() || !artifact_path.is_file() {
        return Err(ViewerError::NoCoordinates);
    }
    if !executable.is_file() {
        return Err(ViewerError::ExecutableMissing {
            path: executable.to_path_buf(),
        });
    }

    let artifact = absolute_path(artifact_path);
    log::info!(
        "Launching {} {}",
        executable.display(),
        artifact.display()
    );

    Command::new(executable)
        .arg(&artifact)
        .kill_on_drop(false)
        .spawn()
        .map_err(|source| ViewerError::LaunchFailed {
            path: executable.to_path_buf(),
            source,
        })
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_web_viewer_url_is_latitude_first() {
        let url = web_viewer_url(Some(&Coordinates::new(37.8, -122.4))).unwrap();
        assert_eq!(
            url,
            "https://earth.google.com/web/@37.8,-122.4,1000a,35y,0h,0t,0r"
        );
    }

    #[test]
    fn test_web_viewer_url_requires_coordinates() {
        assert!(matches!(
            web_viewer_url(None),
            Err(ViewerError::NoCoordinates)
        ));
    }

    #[tokio::test]
    async fn test_launch_requires_coordinates() {
        let temp_dir = TempDir::new().unwrap();
        let result = launch_local_viewer(
            Path::new("/bin/true"),
            &temp_dir.path().join("target.kml"),
            None,
        );
        assert!(matches!(result, Err(ViewerError::NoCoordinates)));
    }

    #[tokio::test]
    async fn test_launch_requires_artifact_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let result = launch_local_viewer(
            Path::new("/bin/true"),
            &temp_dir.path().join("target.kml"),
            Some(&Coordinates::new(1.0, 2.0)),
        );
        assert!(matches!(result, Err(ViewerError::NoCoordinates)));
    }

    #[tokio::test]
    async fn test_launch_missing_executable() {
        let temp_dir = TempDir::new().unwrap();
        let artifact = temp_dir.path().join("target.kml");
        std::fs::write(&artifact, "<kml/>").unwrap();

        let result = launch_local_viewer(
            &temp_dir.path().join("googleearth.exe"),
            &artifact,
            Some(&Coordinates::new(1.0, 2.0)),
        );
        match result {
            Err(ViewerError::ExecutableMissing { path }) => {
                assert!(path.ends_with("googleearth.exe"));
            }
            other => panic!("expected ExecutableMissing, got {other:?}"),
        }
    }
}
