//! Session shutdown handling.

use crate::pipeline::Pipeline;

/// Ends a session.
///
/// Removes the coordinate artifact unless `keep_artifact` is set. A failed
/// removal is logged; the session result is not affected.
pub fn shutdown_gracefully(pipeline: &Pipeline, keep_artifact: bool) {
    let path = pipeline.artifact().path();
    if keep_artifact {
        if pipeline.artifact().exists() {
            log::info!("Keeping artifact {}", path.display());
        }
        return;
    }

    match pipeline.shutdown() {
        Ok(()) => log::debug!("Session closed, artifact {} cleared", path.display()),
        Err(e) => log::warn!("Session closed with a leftover artifact: {}", e),
    }
}
