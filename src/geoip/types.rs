//! GeoIP data structures.

use serde::Serialize;

/// A point on the globe in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    /// Latitude, positive north
    pub latitude: f64,
    /// Longitude, positive east
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair from latitude and longitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Pairs the two optional database fields; `None` unless both are present.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Self::new(lat, lon))
            }
            _ => None,
        }
    }
}

/// GeoIP lookup result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoRecord {
    /// English country name
    pub country_name: Option<String>,
    /// English continent name, or its two-letter code
    pub continent: Option<String>,
    /// English city name
    pub city: Option<String>,
    /// IANA time zone, e.g. `"Asia/Seoul"`
    pub timezone: Option<String>,
    /// ISO 3166-1 alpha-2
    pub country_code: Option<String>,
    /// ISO 3166-1 alpha-3
    pub country_code3: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// First subdivision ISO code (state, province)
    pub region_code: Option<String>,
    /// Location, present only when both latitude and longitude are
    pub coordinates: Option<Coordinates>,
}

/// Whether the GeoIP database was loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GeoDbStatus {
    /// Loaded and serving lookups
    Active {
        /// Path the database was read from
        source: String,
        /// Database build (`build_<epoch>`)
        version: String,
    },
    /// Missing or unusable; every lookup answers `NotFound`
    Inactive,
}

impl GeoDbStatus {
    /// `true` when the database is loaded.
    pub fn is_active(&self) -> bool {
        matches!(self, GeoDbStatus::Active { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_from_parts() {
        assert_eq!(
            Coordinates::from_parts(Some(37.8), Some(-122.4)),
            Some(Coordinates::new(37.8, -122.4))
        );
        assert_eq!(Coordinates::from_parts(Some(37.8), None), None);
        assert_eq!(Coordinates::from_parts(None, Some(-122.4)), None);
        assert_eq!(Coordinates::from_parts(Some(f64::NAN), Some(1.0)), None);
    }

    #[test]
    fn test_geo_db_status() {
        let active = GeoDbStatus::Active {
            source: "db.mmdb".to_string(),
            version: "build_1700000000".to_string(),
        };
        assert!(active.is_active());
        assert!(!GeoDbStatus::Inactive.is_active());

        let json = serde_json::to_value(&active).unwrap();
        assert_eq!(json["state"], "active");
        assert_eq!(json["version"], "build_1700000000");
    }
}
