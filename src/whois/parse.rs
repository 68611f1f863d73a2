//! Registry response parsing.
//!
//! Pure functions turning Team Cymru TXT answers and RDAP JSON bodies into
//! typed records. Every failure is a `MalformedResponse`.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use super::types::{AsnOrigin, RdapNetwork};
use crate::error_handling::LookupError;

/// Parses an origin TXT answer.
///
/// Format: `"ASN | CIDR | CC | registry | allocated"`, for example
/// `"15169 | 8.8.8.0/24 | US | arin | 1992-12-01"`. When the prefix is
/// announced by several AS the first field holds space-separated numbers;
/// the first one is kept.
pub fn parse_origin_txt(txt: &str) -> Result<AsnOrigin, LookupError> {
    let fields: Vec<&str> = txt.trim().trim_matches('"').split('|').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(LookupError::malformed(format!(
            "ASN origin answer has {} fields, expected 5: {:?}",
            fields.len(),
            txt
        )));
    }

    let asn = fields[0]
        .split_whitespace()
        .next()
        .filter(|asn| asn.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(|| LookupError::malformed(format!("ASN origin answer has no AS number: {txt:?}")))?;

    let cidr = fields[1];
    if cidr.is_empty() || !cidr.contains('/') {
        return Err(LookupError::malformed(format!(
            "ASN origin answer has no CIDR: {txt:?}"
        )));
    }

    let registry = fields[3];
    if registry.is_empty() {
        return Err(LookupError::malformed(format!(
            "ASN origin answer has no registry: {txt:?}"
        )));
    }

    Ok(AsnOrigin {
        asn: asn.to_string(),
        cidr: cidr.to_string(),
        country_code: non_empty(fields[2]),
        registry: registry.to_ascii_lowercase(),
        allocated: parse_registry_date(fields[4]),
        description: None,
    })
}

/// Parses an AS description TXT answer.
///
/// Format: `"ASN | CC | registry | allocated | description"`. Returns the
/// description, or `None` if the answer carries none.
pub fn parse_asn_description_txt(txt: &str) -> Option<String> {
    // Descriptions may themselves contain '|'
    let fields: Vec<&str> = txt.trim().trim_matches('"').splitn(5, '|').collect();
    if fields.len() < 5 {
        return None;
    }
    non_empty(fields[4].trim())
}

/// RDAP "ip network" object (RFC 9083 section 5.4), and RDAP error bodies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RdapIpNetworkBody {
    object_class_name: Option<String>,
    handle: Option<String>,
    start_address: Option<String>,
    end_address: Option<String>,
    ip_version: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    network_type: Option<String>,
    error_code: Option<u16>,
    title: Option<String>,
}

/// Parses an RDAP ip network response body.
///
/// # Errors
///
/// - `NotFound` for an RDAP error body with code 404
/// - `MalformedResponse` for invalid JSON, another object class, or an
///   unknown `ipVersion`
pub fn parse_rdap_network(body: &str) -> Result<RdapNetwork, LookupError> {
    let parsed: RdapIpNetworkBody = serde_json::from_str(body)
        .map_err(|e| LookupError::malformed(format!("RDAP body is not valid JSON: {e}")))?;

    if let Some(code) = parsed.error_code {
        let title = parsed.title.unwrap_or_default();
        return Err(if code == 404 {
            LookupError::not_found(format!("RDAP: {title}"))
        } else {
            LookupError::malformed(format!("RDAP error {code}: {title}"))
        });
    }

    match parsed.object_class_name.as_deref() {
        Some("ip network") => {}
        Some(other) => {
            return Err(LookupError::malformed(format!(
                "RDAP returned a '{other}' object, expected 'ip network'"
            )))
        }
        None if parsed.start_address.is_none() => {
            return Err(LookupError::malformed(
                "RDAP body is not an ip network object",
            ))
        }
        None => {}
    }

    let ip_version = match parsed.ip_version.as_deref() {
        Some("v4") => Some(4),
        Some("v6") => Some(6),
        None => None,
        Some(other) => {
            return Err(LookupError::malformed(format!(
                "RDAP ipVersion '{other}' is neither v4 nor v6"
            )))
        }
    };

    Ok(RdapNetwork {
        handle: parsed.handle.and_then(|s| non_empty(&s)),
        name: parsed.name.and_then(|s| non_empty(&s)),
        network_type: parsed.network_type.and_then(|s| non_empty(&s)),
        ip_version,
        start_address: parsed.start_address.and_then(|s| non_empty(&s)),
        end_address: parsed.end_address.and_then(|s| non_empty(&s)),
    })
}

/// Attempts to parse a registry date in various formats
pub fn parse_registry_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    // Try common registry date formats
    let formats = ["%Y-%m-%d", "%Y%m%d", "%d-%b-%Y", "%Y/%m/%d"];
    for format in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.date_naive())
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
