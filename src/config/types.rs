//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_ARTIFACT_PATH, DEFAULT_GEOIP_DB_PATH, DEFAULT_RDAP_BASE_URL,
    DEFAULT_REGISTRY_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_REGISTRY_TIMEOUT_SECS,
    MIN_REGISTRY_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How lookup results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sectioned text report
    Plain,
    /// One JSON object per lookup
    Json,
}

/// When the registry (RDAP/WHOIS) lookup runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RegistryPolicy {
    /// Query the registry for every valid address, independent of the GeoIP outcome
    #[default]
    Always,
    /// Query the registry only when the GeoIP database produced coordinates
    RequireCoordinates,
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Application configuration.
///
/// Parsed from the command line by the binary, or constructed
/// programmatically through `Default`.
///
/// # Examples
///
/// ```no_run
/// use ip_tracker::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     ips: vec!["8.8.8.8".to_string()],
///     geoip_db: PathBuf::from("GeoLite2-City.mmdb"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ip_tracker",
    version,
    about = "Locate an IPv4 address using a local GeoIP database and live RDAP data"
)]
pub struct Config {
    /// IPv4 addresses to look up; reads one per line from stdin when omitted
    #[arg(value_name = "IP")]
    pub ips: Vec<String>,

    /// MaxMind GeoLite2/GeoIP2 City database (.mmdb)
    #[arg(long, env = "IP_TRACKER_GEOIP_DB", default_value = DEFAULT_GEOIP_DB_PATH)]
    pub geoip_db: PathBuf,

    /// Where the KML coordinate marker is written
    #[arg(long, env = "IP_TRACKER_ARTIFACT", default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,

    /// RDAP base URL (`/ip/<addr>` is appended)
    #[arg(long, env = "IP_TRACKER_RDAP_URL", default_value = DEFAULT_RDAP_BASE_URL)]
    pub rdap_url: String,

    /// Upper bound for one registry lookup, in seconds
    #[arg(long, env = "IP_TRACKER_REGISTRY_TIMEOUT", default_value_t = DEFAULT_REGISTRY_TIMEOUT_SECS)]
    pub registry_timeout_secs: u64,

    /// When to query the registry
    #[arg(long, value_enum, default_value_t = RegistryPolicy::Always)]
    pub registry_policy: RegistryPolicy,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value for RDAP requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Desktop globe viewer launched with the artifact after each located lookup
    #[arg(long, env = "IP_TRACKER_VIEWER_EXE")]
    pub viewer_exe: Option<PathBuf>,

    /// Print the web globe viewer URL after each located lookup
    #[arg(long)]
    pub web_viewer: bool,

    /// Leave the artifact in place when the session ends
    #[arg(long)]
    pub keep_artifact: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ips: Vec::new(),
            geoip_db: PathBuf::from(DEFAULT_GEOIP_DB_PATH),
            artifact: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            rdap_url: DEFAULT_RDAP_BASE_URL.to_string(),
            registry_timeout_secs: DEFAULT_REGISTRY_TIMEOUT_SECS,
            registry_policy: RegistryPolicy::Always,
            output: OutputFormat::Plain,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            viewer_exe: None,
            web_viewer: false,
            keep_artifact: false,
        }
    }
}

impl Config {
    /// Registry timeout as a `Duration`.
    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry_timeout_secs)
    }

    /// Checks field values that clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with an actionable message.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(MIN_REGISTRY_TIMEOUT_SECS..=MAX_REGISTRY_TIMEOUT_SECS)
            .contains(&self.registry_timeout_secs)
        {
            return Err(ConfigValidationError {
                field: "registry_timeout_secs",
                message: format!(
                    "must be between {} and {} seconds, got {}",
                    MIN_REGISTRY_TIMEOUT_SECS, MAX_REGISTRY_TIMEOUT_SECS, self.registry_timeout_secs
                ),
            });
        }

        match url::Url::parse(&self.rdap_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigValidationError {
                    field: "rdap_url",
                    message: format!("must use http or https, got '{}'", parsed.scheme()),
                })
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "rdap_url",
                    message: format!("'{}' is not a valid URL: {e}", self.rdap_url),
                })
            }
        }

        if self.artifact.as_os_str().is_empty() || self.artifact.file_name().is_none() {
            return Err(ConfigValidationError {
                field: "artifact",
                message: "must name a file, e.g. ./target_geo_location.kml".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.ips.is_empty());
        assert_eq!(config.registry_timeout_secs, 10);
        assert_eq!(config.registry_policy, RegistryPolicy::Always);
        assert_eq!(config.artifact, PathBuf::from("./target_geo_location.kml"));
        assert!(!config.keep_artifact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_from_args() {
        let config = Config::parse_from([
            "ip_tracker",
            "8.8.8.8",
            "1.1.1.1",
            "--registry-timeout-secs",
            "3",
            "--registry-policy",
            "require-coordinates",
            "--output",
            "json",
            "--keep-artifact",
        ]);
        assert_eq!(config.ips, vec!["8.8.8.8", "1.1.1.1"]);
        assert_eq!(config.registry_timeout(), Duration::from_secs(3));
        assert_eq!(config.registry_policy, RegistryPolicy::RequireCoordinates);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.keep_artifact);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            registry_timeout_secs: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "registry_timeout_secs");
        assert!(err.message.contains("between 1 and 120"));
    }

    #[test]
    fn test_validate_rejects_non_http_rdap_url() {
        let config = Config {
            rdap_url: "ftp://rdap.example".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "rdap_url");

        let config = Config {
            rdap_url: "not a url".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "rdap_url");
    }

    #[test]
    fn test_validate_rejects_directory_artifact() {
        let config = Config {
            artifact: PathBuf::from("/"),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "artifact");
    }
}
