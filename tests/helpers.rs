// Shared test doubles for the GeoIP and registry sources.
//
// Each integration test file includes this module with `mod helpers;`, so
// not every item is used by every file.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ip_tracker::{
    Coordinates, GeoDbStatus, GeoRecord, GeoSource, IpAddress, LookupError, Pipeline,
    PipelineBuilder, RegistryRecord, RegistrySource,
};
use tempfile::TempDir;

/// GeoIP source answering from a fixed record, or `NotFound`.
pub struct FakeGeo {
    record: Option<GeoRecord>,
}

impl FakeGeo {
    pub fn located(record: GeoRecord) -> Self {
        Self {
            record: Some(record),
        }
    }

    pub fn empty() -> Self {
        Self { record: None }
    }
}

impl GeoSource for FakeGeo {
    fn resolve(&self, ip: &IpAddress) -> Result<GeoRecord, LookupError> {
        self.record
            .clone()
            .ok_or_else(|| LookupError::not_found(format!("{ip} is not in the test database")))
    }

    fn name(&self) -> &'static str {
        "fake-geo"
    }

    fn status(&self) -> GeoDbStatus {
        GeoDbStatus::Active {
            source: "memory".to_string(),
            version: "build_0".to_string(),
        }
    }
}

/// Registry source with a fixed answer, an optional delay and a call counter.
pub struct FakeRegistry {
    answer: Result<RegistryRecord, LookupError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeRegistry {
    pub fn answering(record: RegistryRecord) -> Self {
        Self {
            answer: Ok(record),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: LookupError) -> Self {
        Self {
            answer: Err(error),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers only after `delay`; used to trip the pipeline timeout.
    pub fn slow(record: RegistryRecord, delay: Duration) -> Self {
        Self {
            answer: Ok(record),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistrySource for FakeRegistry {
    async fn resolve(&self, _ip: &IpAddress) -> Result<RegistryRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone()
    }

    fn name(&self) -> &'static str {
        "fake-registry"
    }
}

/// A located United States record at (37.8, -122.4).
pub fn us_record() -> GeoRecord {
    GeoRecord {
        country_name: Some("United States".to_string()),
        continent: Some("North America".to_string()),
        city: Some("San Francisco".to_string()),
        timezone: Some("America/Los_Angeles".to_string()),
        country_code: Some("US".to_string()),
        country_code3: Some("USA".to_string()),
        postal_code: Some("94107".to_string()),
        region_code: Some("CA".to_string()),
        coordinates: Some(Coordinates::new(37.8, -122.4)),
    }
}

/// A registry record owned by "Example ISP".
pub fn example_isp() -> RegistryRecord {
    RegistryRecord {
        asn: "64500".to_string(),
        asn_description: Some("Example ISP".to_string()),
        asn_registry: "arin".to_string(),
        asn_cidr: "1.2.3.0/24".to_string(),
        asn_country_code: Some("US".to_string()),
        asn_date: chrono::NaiveDate::from_ymd_opt(2010, 5, 1),
        ip_version: Some(4),
        network_type: Some("ALLOCATION".to_string()),
        network_name: Some("EXAMPLE-NET".to_string()),
        network_handle: Some("NET-1-2-3-0-1".to_string()),
        network_range: Some("1.2.3.0 - 1.2.3.255".to_string()),
    }
}

/// Starts a builder whose artifact lives in a fresh temporary directory.
///
/// The directory is returned so it outlives the pipeline.
pub fn builder_with(
    geo: Arc<dyn GeoSource>,
    registry: Arc<dyn RegistrySource>,
) -> (PipelineBuilder, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let builder = Pipeline::builder(geo, registry)
        .artifact_path(dir.path().join("target_geo_location.kml"));
    (builder, dir)
}

/// Like [`builder_with`], with defaults for everything else.
pub fn pipeline_with(
    geo: Arc<dyn GeoSource>,
    registry: Arc<dyn RegistrySource>,
) -> (Pipeline, TempDir) {
    let (builder, dir) = builder_with(geo, registry);
    (builder.build(), dir)
}
