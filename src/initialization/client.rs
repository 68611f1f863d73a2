//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, HTTP_TIMEOUT_SECS, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used for RDAP queries.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Per-request and connect timeouts, both below the registry timeout
/// - Redirect following (RDAP bootstrap answers with a redirect)
/// - Rustls TLS backend
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let request_timeout = Duration::from_secs(HTTP_TIMEOUT_SECS).min(config.registry_timeout());
    let client = ClientBuilder::new()
        .timeout(request_timeout)
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(request_timeout))
        .redirect(reqwest::redirect::Policy::limited(5))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_default_config() {
        assert!(init_client(&Config::default()).is_ok());
    }

    #[test]
    fn test_init_client_short_registry_timeout() {
        let config = Config {
            registry_timeout_secs: 1,
            ..Default::default()
        };
        assert!(init_client(&config).is_ok());
    }
}
