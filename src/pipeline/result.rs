//! The aggregated record returned for one address.

use crate::address::IpAddress;
use crate::currency::CurrencyLabel;
use crate::error_handling::LookupError;
use crate::geoip::{Coordinates, GeoRecord};
use crate::whois::RegistryRecord;

/// Everything known about one address after a lookup.
///
/// Each source half is either its full record or the error that replaced
/// it; nothing is partially filled. Display strings for absent values are
/// chosen by the renderer, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    /// The address that was looked up
    pub ip: IpAddress,
    /// GeoIP database outcome
    pub geo: Result<GeoRecord, LookupError>,
    /// Registry outcome
    pub registry: Result<RegistryRecord, LookupError>,
    /// Currency derived from the GeoIP alpha-3 country code
    pub currency: CurrencyLabel,
    /// Whether this lookup wrote the coordinate artifact
    pub artifact_written: bool,
}

impl AggregatedResult {
    /// The resolved point, if the GeoIP lookup produced one.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.geo.as_ref().ok().and_then(|geo| geo.coordinates)
    }

    /// The GeoIP record, if the lookup succeeded.
    pub fn geo_record(&self) -> Option<&GeoRecord> {
        self.geo.as_ref().ok()
    }

    /// The registry record, if the lookup succeeded.
    pub fn registry_record(&self) -> Option<&RegistryRecord> {
        self.registry.as_ref().ok()
    }

    /// True when both sources answered.
    pub fn is_complete(&self) -> bool {
        self.geo.is_ok() && self.registry.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::validate;

    fn registry_record() -> RegistryRecord {
        RegistryRecord {
            asn: "64500".to_string(),
            asn_description: Some("Example ISP".to_string()),
            asn_registry: "arin".to_string(),
            asn_cidr: "1.2.3.0/24".to_string(),
            asn_country_code: Some("US".to_string()),
            asn_date: None,
            ip_version: Some(4),
            network_type: None,
            network_name: None,
            network_handle: None,
            network_range: None,
        }
    }

    #[test]
    fn test_coordinates_from_geo() {
        let result = AggregatedResult {
            ip: validate("1.2.3.4").unwrap(),
            geo: Ok(GeoRecord {
                coordinates: Some(Coordinates::new(37.8, -122.4)),
                ..Default::default()
            }),
            registry: Err(LookupError::network_unavailable("timed out")),
            currency: CurrencyLabel::Unknown,
            artifact_written: true,
        };
        assert_eq!(result.coordinates(), Some(Coordinates::new(37.8, -122.4)));
        assert!(!result.is_complete());
        assert!(result.registry_record().is_none());
    }

    #[test]
    fn test_geo_error_has_no_coordinates() {
        let result = AggregatedResult {
            ip: validate("10.0.0.1").unwrap(),
            geo: Err(LookupError::not_found("private range")),
            registry: Ok(registry_record()),
            currency: CurrencyLabel::Unknown,
            artifact_written: false,
        };
        assert_eq!(result.coordinates(), None);
        assert!(result.geo_record().is_none());
        assert_eq!(
            result.registry_record().map(|r| r.asn.as_str()),
            Some("64500")
        );
    }
}
