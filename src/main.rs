//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_tracker` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - The closing summary
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ip_tracker::initialization::init_logger_with;
use ip_tracker::{run_session, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory, then from next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_session(config).await {
        Ok(report) => {
            log::info!(
                "Answered {} quer{} ({} complete, {} partial, {} failed) in {:.1}s{}",
                report.queries,
                if report.queries == 1 { "y" } else { "ies" },
                report.complete,
                report.partial,
                report.failed,
                report.elapsed_seconds,
                if report.interrupted { ", interrupted" } else { "" }
            );
            if report.queries > 0 && report.failed == report.queries {
                process::exit(2);
            }
            // A pending stdin read would otherwise hold the runtime open
            if report.interrupted {
                process::exit(130);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ip_tracker error: {:#}", e);
            process::exit(1);
        }
    }
}
