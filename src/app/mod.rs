//! Command-line session: report rendering, the query loop and shutdown.

pub mod report;
pub mod session;
pub mod shutdown;

// Re-export public API
pub use report::{render_failure, render_geo_status, render_result, NO_DATA};
pub use session::{answer_until, build_pipeline, run_session, SessionReport};
pub use shutdown::shutdown_gracefully;
