//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including default paths, timeouts and well-known endpoints.

use std::time::Duration;

// Default paths
/// Default GeoIP City database path (MaxMind GeoLite2 format)
pub const DEFAULT_GEOIP_DB_PATH: &str = "./resource/GeoLite2-City.mmdb";
/// Default coordinate artifact path, read by desktop globe viewers
pub const DEFAULT_ARTIFACT_PATH: &str = "./target_geo_location.kml";

// Network operation timeouts
/// Upper bound for one complete registry lookup (DNS origin + RDAP) in seconds
/// The registry is the long pole of a lookup; this bounds how long a caller waits
pub const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 10;
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS attempts per query
pub const DNS_ATTEMPTS: usize = 2;
/// HTTP request timeout for RDAP queries in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 8;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

// Registry endpoints
/// RDAP bootstrap redirector; forwards `/ip/<addr>` to the responsible RIR
pub const DEFAULT_RDAP_BASE_URL: &str = "https://rdap.org";
/// Team Cymru zone answering `<reversed-ip>.origin.asn.cymru.com` TXT queries
pub const CYMRU_ORIGIN_ZONE: &str = "origin.asn.cymru.com";
/// Team Cymru zone answering `AS<n>.asn.cymru.com` TXT queries
pub const CYMRU_ASN_ZONE: &str = "asn.cymru.com";
/// Media type requested from RDAP servers
pub const RDAP_ACCEPT: &str = "application/rdap+json, application/json";

/// User-Agent sent with RDAP requests
pub const DEFAULT_USER_AGENT: &str = concat!("ip_tracker/", env!("CARGO_PKG_VERSION"));

// External viewers
/// Web globe viewer URL template; `{lat}` and `{lon}` are substituted
/// Latitude comes first here, the opposite of the KML artifact order
pub const WEB_VIEWER_URL_TEMPLATE: &str =
    "https://earth.google.com/web/@{lat},{lon},1000a,35y,0h,0t,0r";

// Validation bounds
/// Smallest accepted registry timeout in seconds
pub const MIN_REGISTRY_TIMEOUT_SECS: u64 = 1;
/// Largest accepted registry timeout in seconds
pub const MAX_REGISTRY_TIMEOUT_SECS: u64 = 120;

/// Registry timeout as a `Duration`
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REGISTRY_TIMEOUT_SECS);
