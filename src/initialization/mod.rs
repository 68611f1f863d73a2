//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources a
//! session needs:
//! - Logger
//! - HTTP client for RDAP
//! - DNS resolver for ASN origin queries
//!
//! The GeoIP database is opened by `geoip::init_geo_source`.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
