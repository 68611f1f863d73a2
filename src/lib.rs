//! ip_tracker library: IPv4 geolocation and registry aggregation
//!
//! This library resolves a dotted-quad IPv4 literal through a local MaxMind
//! GeoIP database and live registry data (Team Cymru origin AS plus RDAP),
//! merges both into one record, derives the local currency and writes a
//! KML marker for globe viewers.
//!
//! # Example
//!
//! ```no_run
//! use ip_tracker::{build_pipeline, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     geoip_db: std::path::PathBuf::from("GeoLite2-City.mmdb"),
//!     ..Default::default()
//! };
//!
//! let pipeline = build_pipeline(&config).await?;
//! let result = pipeline.track("8.8.8.8").await?;
//! println!("{} -> {:?} ({})", result.ip, result.coordinates(), result.currency);
//! pipeline.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod address;
pub mod app;
pub mod artifact;
pub mod config;
pub mod country;
pub mod currency;
pub mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod pipeline;
pub mod viewer;
pub mod whois;

// Re-export public API
pub use address::{validate, IpAddress};
pub use app::{build_pipeline, run_session, SessionReport};
pub use artifact::{read_artifact_coordinates, write_artifact, ArtifactWriter};
pub use config::{Config, LogFormat, LogLevel, OutputFormat, RegistryPolicy};
pub use currency::{infer_currency, Currency, CurrencyLabel};
pub use error_handling::{
    ArtifactError, ConfigurationError, LookupError, LookupErrorKind, TrackerError, ValidationError,
};
pub use geoip::{Coordinates, GeoDbStatus, GeoRecord, GeoSource};
pub use pipeline::{AggregatedResult, Pipeline, PipelineBuilder};
pub use whois::{RegistryRecord, RegistrySource};
