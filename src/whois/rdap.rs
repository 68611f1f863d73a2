//! RDAP ip network queries over HTTP.

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use url::Url;

use super::parse::parse_rdap_network;
use super::types::RdapNetwork;
use crate::address::IpAddress;
use crate::config::RDAP_ACCEPT;
use crate::error_handling::{categorize_reqwest_error, LookupError};

/// Client for `<base>/ip/<addr>` RDAP queries.
///
/// The default base is a bootstrap redirector; redirects to the responsible
/// regional registry are followed by the HTTP client.
#[derive(Clone)]
pub struct RdapClient {
    client: Arc<reqwest::Client>,
    base_url: Url,
}

impl RdapClient {
    /// Creates a client for an RDAP base URL.
    ///
    /// # Errors
    ///
    /// Returns the URL parse error if `base_url` is not a valid URL.
    pub fn new(client: Arc<reqwest::Client>, base_url: &str) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// The URL queried for an address.
    pub fn query_url(&self, ip: &IpAddress) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("ip/{}", ip))
    }

    /// Fetches the RDAP ip network object covering an address.
    ///
    /// # Errors
    ///
    /// - `NotFound` for HTTP 404 or an RDAP 404 error body
    /// - `NetworkUnavailable` for connection failures, timeouts and 5xx
    /// - `MalformedResponse` for unparsable bodies
    pub async fn fetch_network(&self, ip: &IpAddress) -> Result<RdapNetwork, LookupError> {
        let url = self
            .query_url(ip)
            .map_err(|e| LookupError::malformed(format!("RDAP URL for {ip}: {e}")))?;

        log::debug!("RDAP query: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, RDAP_ACCEPT)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e, "RDAP"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::not_found(format!("RDAP has no network for {ip}")));
        }

        let response = response
            .error_for_status()
            .map_err(|e| categorize_reqwest_error(&e, "RDAP"))?;

        let body = response
            .text()
            .await
            .map_err(|e| categorize_reqwest_error(&e, "RDAP"))?;

        parse_rdap_network(&body)
    }
}
