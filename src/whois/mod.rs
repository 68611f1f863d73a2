//! Registry (RDAP/WHOIS) lookup for IP ownership and allocation data.
//!
//! A lookup has two halves, both required:
//! - the origin AS, announced prefix, registry and allocation date, from
//!   Team Cymru's DNS interface
//! - the RDAP "ip network" object (IP version, network type and name)
//!
//! Every call is a live network round trip. Nothing is cached.

mod cymru;
mod parse;
mod rdap;
mod types;

// Re-export public API
pub use cymru::{AsnOriginSource, CymruDns};
pub use parse::{
    parse_asn_description_txt, parse_origin_txt, parse_rdap_network, parse_registry_date,
};
pub use rdap::RdapClient;
pub use types::{AsnOrigin, RdapNetwork, RegistryRecord};

use std::sync::Arc;

use async_trait::async_trait;

use crate::address::IpAddress;
use crate::error_handling::LookupError;

/// A live source of registry data for an address.
///
/// Calls may block for an arbitrary time; the pipeline bounds them with a
/// timeout. Repeated calls for the same address are safe.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Resolves an address to its registry record.
    ///
    /// # Errors
    ///
    /// - `NetworkUnavailable` on connection failure or timeout
    /// - `NotFound` if the registry has no record
    /// - `MalformedResponse` if the answer cannot be parsed
    async fn resolve(&self, ip: &IpAddress) -> Result<RegistryRecord, LookupError>;

    /// Source name (for logs).
    fn name(&self) -> &'static str;
}

/// Registry source combining an origin AS source with RDAP.
pub struct RdapRegistry {
    origin: Arc<dyn AsnOriginSource>,
    rdap: RdapClient,
}

impl RdapRegistry {
    /// Creates a registry source from its two halves.
    pub fn new(origin: Arc<dyn AsnOriginSource>, rdap: RdapClient) -> Self {
        Self { origin, rdap }
    }
}

#[async_trait]
impl RegistrySource for RdapRegistry {
    async fn resolve(&self, ip: &IpAddress) -> Result<RegistryRecord, LookupError> {
        log::info!("Starting registry lookup for {}", ip);

        // Both halves are independent round trips
        let (origin, network) = tokio::join!(self.origin.origin(ip), self.rdap.fetch_network(ip));

        match (origin, network) {
            (Ok(origin), Ok(network)) => {
                log::info!("Registry lookup successful for {}", ip);
                Ok(RegistryRecord::from_parts(origin, network))
            }
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Registry lookup failed for {}: {}", ip, e);
                Err(e)
            }
        }
    }

    fn name(&self) -> &'static str {
        "RDAP"
    }
}
