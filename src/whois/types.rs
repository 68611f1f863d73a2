//! Registry data structures.

use chrono::NaiveDate;
use serde::Serialize;

/// Ownership and allocation data for an address, from the registry chain.
///
/// Populated as a whole: a lookup either yields every mandatory field or
/// fails. Only `asn_description` may be missing from a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryRecord {
    /// Origin autonomous system number, e.g. `"15169"`
    pub asn: String,
    /// AS owner name, e.g. `"GOOGLE - Google LLC, US"`
    pub asn_description: Option<String>,
    /// Regional registry that allocated the AS prefix (`arin`, `ripencc`, ...)
    pub asn_registry: String,
    /// Announced prefix containing the address
    pub asn_cidr: String,
    /// Country code registered for the prefix
    pub asn_country_code: Option<String>,
    /// Prefix allocation date
    pub asn_date: Option<NaiveDate>,
    /// IP version of the registered network (4 or 6)
    pub ip_version: Option<u8>,
    /// Network classification, e.g. `"DIRECT ALLOCATION"`
    pub network_type: Option<String>,
    /// Network name, e.g. `"GOGL"`
    pub network_name: Option<String>,
    /// Registry handle of the network object
    pub network_handle: Option<String>,
    /// First and last address of the network, `"start - end"`
    pub network_range: Option<String>,
}

impl RegistryRecord {
    /// Merges the ASN origin and RDAP network halves of a lookup.
    pub fn from_parts(origin: AsnOrigin, network: RdapNetwork) -> Self {
        let network_range = network.range();
        Self {
            asn: origin.asn,
            asn_description: origin.description,
            asn_registry: origin.registry,
            asn_cidr: origin.cidr,
            asn_country_code: origin.country_code,
            asn_date: origin.allocated,
            ip_version: network.ip_version,
            network_type: network.network_type,
            network_name: network.name,
            network_handle: network.handle,
            network_range,
        }
    }
}

/// Origin AS data for an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnOrigin {
    /// AS number without the `AS` prefix
    pub asn: String,
    /// Announced prefix
    pub cidr: String,
    /// Registered country code
    pub country_code: Option<String>,
    /// Allocating registry, lowercase
    pub registry: String,
    /// Allocation date
    pub allocated: Option<NaiveDate>,
    /// AS owner name, from a second query
    pub description: Option<String>,
}

/// The fields this crate uses from an RDAP "ip network" object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdapNetwork {
    /// Registry handle
    pub handle: Option<String>,
    /// Network name
    pub name: Option<String>,
    /// Network `type`
    pub network_type: Option<String>,
    /// 4 or 6
    pub ip_version: Option<u8>,
    /// First address
    pub start_address: Option<String>,
    /// Last address
    pub end_address: Option<String>,
}

impl RdapNetwork {
    /// `"start - end"` when both bounds are known.
    pub fn range(&self) -> Option<String> {
        match (&self.start_address, &self.end_address) {
            (Some(start), Some(end)) => Some(format!("{start} - {end}")),
            _ => None,
        }
    }
}
