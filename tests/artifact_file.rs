//! Coordinate artifact behavior on a real filesystem.

use std::path::PathBuf;

use ip_tracker::artifact::{delete_artifact, parse_coordinates_text, render_kml};
use ip_tracker::{read_artifact_coordinates, write_artifact, ArtifactError, ArtifactWriter, Coordinates};
use tempfile::TempDir;

fn artifact_in(dir: &TempDir) -> PathBuf {
    dir.path().join("target_geo_location.kml")
}

#[test]
fn test_round_trip_is_longitude_first() {
    let dir = TempDir::new().unwrap();
    let path = artifact_in(&dir);

    write_artifact(&path, -122.4, 37.8).unwrap();

    let document = std::fs::read_to_string(&path).unwrap();
    let text = parse_coordinates_text(&document).unwrap();
    assert!(text.starts_with("-122.4,37.8,0"), "got {text:?}");
    assert_eq!(
        read_artifact_coordinates(&path).unwrap(),
        Some(Coordinates::new(37.8, -122.4))
    );
}

#[test]
fn test_rewrite_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = artifact_in(&dir);

    write_artifact(&path, 126.9780, 37.5665).unwrap();
    let first = std::fs::read(&path).unwrap();
    write_artifact(&path, 126.9780, 37.5665).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, render_kml(126.9780, 37.5665).into_bytes());
}

#[test]
fn test_new_point_replaces_old_one() {
    let dir = TempDir::new().unwrap();
    let writer = ArtifactWriter::new(artifact_in(&dir));

    writer.write(&Coordinates::new(37.8, -122.4)).unwrap();
    writer.write(&Coordinates::new(-33.87, 151.21)).unwrap();

    let document = std::fs::read_to_string(writer.path()).unwrap();
    assert_eq!(document.matches("<coordinates>").count(), 1);
    assert_eq!(
        read_artifact_coordinates(writer.path()).unwrap(),
        Some(Coordinates::new(-33.87, 151.21))
    );
}

#[test]
fn test_missing_directory_is_file_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gone").join("target.kml");

    let err = write_artifact(&path, 0.0, 0.0).unwrap_err();
    assert!(matches!(err, ArtifactError::FileMissing { .. }));
    assert!(err.to_string().starts_with("artifact:"));
}

#[test]
fn test_read_without_artifact_is_file_missing() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        read_artifact_coordinates(&artifact_in(&dir)),
        Err(ArtifactError::FileMissing { .. })
    ));
}

#[test]
fn test_delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = artifact_in(&dir);

    write_artifact(&path, 1.0, 2.0).unwrap();
    delete_artifact(&path).unwrap();
    assert!(!path.exists());
    delete_artifact(&path).unwrap();
}

#[cfg(unix)]
#[test]
fn test_read_only_directory_is_write_denied() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

    // Permission bits do not bind a privileged user
    let enforced = std::fs::write(locked.join("canary"), b"").is_err();
    let result = write_artifact(&locked.join("target.kml"), 1.0, 2.0);

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    if enforced {
        assert!(matches!(result, Err(ArtifactError::WriteDenied { .. })));
    }
}

#[cfg(unix)]
#[test]
fn test_artifact_is_readable_by_other_users() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = artifact_in(&dir);

    write_artifact(&path, -122.4, 37.8).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644, "got {mode:o}");

    // Replacing the file keeps the mode
    write_artifact(&path, 151.21, -33.87).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644, "got {mode:o}");
}
