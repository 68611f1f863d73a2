//! IP address lookup against the loaded database.

use std::net::IpAddr;
use std::sync::Arc;

use maxminddb::Reader;

use super::metadata::extract_status;
use super::types::{Coordinates, GeoDbStatus, GeoRecord};
use super::GeoSource;
use crate::address::IpAddress;
use crate::country::alpha3_for_alpha2;
use crate::error_handling::LookupError;

/// GeoIP source backed by a MaxMind City database held in memory.
pub struct MaxMindGeoDb {
    reader: Arc<Reader<Vec<u8>>>,
    status: GeoDbStatus,
}

impl MaxMindGeoDb {
    /// Wraps an opened reader.
    pub fn new(reader: Reader<Vec<u8>>, source: &str) -> Self {
        let status = extract_status(&reader, source);
        Self {
            reader: Arc::new(reader),
            status,
        }
    }
}

impl GeoSource for MaxMindGeoDb {
    fn resolve(&self, ip: &IpAddress) -> Result<GeoRecord, LookupError> {
        let ip_addr = IpAddr::V4(ip.to_ipv4());

        // maxminddb 0.27 API: lookup() returns Result<LookupResult, MaxMindDbError>
        // Use has_data() to check if data exists, then decode() to get the City struct
        let city_lookup = self
            .reader
            .lookup(ip_addr)
            .map_err(|e| LookupError::malformed(format!("GeoIP lookup for {ip} failed: {e}")))?;

        if !city_lookup.has_data() {
            return Err(LookupError::not_found(format!("{ip} is not in the GeoIP database")));
        }

        let city_result: maxminddb::geoip2::City = match city_lookup.decode() {
            Ok(Some(city)) => city,
            Ok(None) => {
                return Err(LookupError::not_found(format!(
                    "{ip} is not in the GeoIP database"
                )))
            }
            Err(e) => {
                return Err(LookupError::malformed(format!(
                    "GeoIP record for {ip} could not be decoded: {e}"
                )))
            }
        };

        let country_code = city_result.country.iso_code.map(|s| s.to_string());
        let country_code3 = country_code
            .as_deref()
            .and_then(alpha3_for_alpha2)
            .map(str::to_string);

        let record = GeoRecord {
            country_name: city_result.country.names.english.map(|s| s.to_string()),
            continent: city_result
                .continent
                .names
                .english
                .or(city_result.continent.code)
                .map(|s| s.to_string()),
            city: city_result.city.names.english.map(|s| s.to_string()),
            timezone: city_result.location.time_zone.map(|s| s.to_string()),
            country_code,
            country_code3,
            postal_code: city_result.postal.code.map(|s| s.to_string()),
            region_code: city_result
                .subdivisions
                .first()
                .and_then(|subdivision| subdivision.iso_code)
                .map(|s| s.to_string()),
            coordinates: Coordinates::from_parts(
                city_result.location.latitude,
                city_result.location.longitude,
            ),
        };

        log::debug!(
            "GeoIP lookup for {}: country={:?}, city={:?}",
            ip,
            record.country_code,
            record.city
        );

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }

    fn status(&self) -> GeoDbStatus {
        self.status.clone()
    }
}

/// GeoIP source used when the database could not be loaded at startup.
///
/// Answers `NotFound` for every address so the rest of the pipeline keeps
/// working with sentinel geo fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableGeoDb;

impl GeoSource for UnavailableGeoDb {
    fn resolve(&self, ip: &IpAddress) -> Result<GeoRecord, LookupError> {
        Err(LookupError::not_found(format!(
            "GeoIP database unavailable, no location for {ip}"
        )))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn status(&self) -> GeoDbStatus {
        GeoDbStatus::Inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::validate;
    use crate::error_handling::LookupErrorKind;

    #[test]
    fn test_unavailable_always_not_found() {
        let source = UnavailableGeoDb;
        for literal in ["8.8.8.8", "1.2.3.4", "0.0.0.0"] {
            let ip = validate(literal).unwrap();
            let err = source.resolve(&ip).unwrap_err();
            assert_eq!(err.kind, LookupErrorKind::NotFound);
            assert!(err.detail.contains(literal));
        }
    }

    #[test]
    fn test_unavailable_status() {
        assert_eq!(UnavailableGeoDb.status(), GeoDbStatus::Inactive);
        assert_eq!(UnavailableGeoDb.name(), "unavailable");
    }
}
