//! Origin AS lookup through Team Cymru's DNS interface.

use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use super::parse::{parse_asn_description_txt, parse_origin_txt};
use super::types::AsnOrigin;
use crate::address::IpAddress;
use crate::config::{CYMRU_ASN_ZONE, CYMRU_ORIGIN_ZONE};
use crate::error_handling::{categorize_resolve_error, LookupError};

/// A source of origin AS data for an address.
#[async_trait]
pub trait AsnOriginSource: Send + Sync {
    /// Resolves the origin AS, announced prefix and owner of an address.
    async fn origin(&self, ip: &IpAddress) -> Result<AsnOrigin, LookupError>;
}

/// Queries `<reversed-ip>.origin.asn.cymru.com` and `AS<n>.asn.cymru.com`.
pub struct CymruDns {
    resolver: Arc<TokioAsyncResolver>,
}

impl CymruDns {
    /// Creates a Cymru client on a shared resolver.
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }

    async fn txt_records(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = self
            .resolver
            .txt_lookup(name)
            .await
            .map_err(|e| categorize_resolve_error(&e, "ASN origin"))?;

        Ok(lookup
            .iter()
            .map(|txt| {
                // TXT records can contain multiple strings - join them
                txt.txt_data()
                    .iter()
                    .map(|part| String::from_utf8_lossy(part).into_owned())
                    .collect::<String>()
            })
            .collect())
    }
}

/// FQDN for the origin query; the trailing dot keeps search domains out.
pub(crate) fn origin_query_name(ip: &IpAddress) -> String {
    format!("{}.{}.", ip.reversed_labels(), CYMRU_ORIGIN_ZONE)
}

/// FQDN for the AS description query.
pub(crate) fn asn_query_name(asn: &str) -> String {
    format!("AS{}.{}.", asn, CYMRU_ASN_ZONE)
}

#[async_trait]
impl AsnOriginSource for CymruDns {
    async fn origin(&self, ip: &IpAddress) -> Result<AsnOrigin, LookupError> {
        let records = self.txt_records(&origin_query_name(ip)).await?;
        let first = records
            .first()
            .ok_or_else(|| LookupError::not_found(format!("no origin AS announced for {ip}")))?;
        let mut origin = parse_origin_txt(first)?;

        // The owner name is optional: a failed description query leaves it empty
        match self.txt_records(&asn_query_name(&origin.asn)).await {
            Ok(records) => {
                origin.description = records.first().and_then(|txt| parse_asn_description_txt(txt));
            }
            Err(e) => {
                log::debug!("AS{} description lookup failed: {}", origin.asn, e);
            }
        }

        log::debug!(
            "Origin for {}: AS{} {} ({})",
            ip,
            origin.asn,
            origin.cidr,
            origin.registry
        );
        Ok(origin)
    }
}
