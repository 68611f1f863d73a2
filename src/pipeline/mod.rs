//! Lookup pipeline: validation, both sources, currency and the artifact.
//!
//! A `Pipeline` is built once per session and holds every shared resource
//! a lookup needs. The GeoIP handle is read-only; the artifact is the one
//! piece of mutable state and is replaced atomically.

mod result;

pub use result::AggregatedResult;

pub use crate::config::RegistryPolicy;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::address::{validate, IpAddress};
use crate::artifact::ArtifactWriter;
use crate::config::{Config, DEFAULT_ARTIFACT_PATH, DEFAULT_REGISTRY_TIMEOUT};
use crate::currency::{infer_currency, CurrencyLabel};
use crate::error_handling::{ArtifactError, LookupError, TrackerError};
use crate::geoip::{GeoDbStatus, GeoRecord, GeoSource};
use crate::whois::{RegistryRecord, RegistrySource};

/// Shared context for address lookups.
#[derive(Clone)]
pub struct Pipeline {
    geo: Arc<dyn GeoSource>,
    registry: Arc<dyn RegistrySource>,
    artifact: ArtifactWriter,
    registry_timeout: Duration,
    registry_policy: RegistryPolicy,
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    geo: Arc<dyn GeoSource>,
    registry: Arc<dyn RegistrySource>,
    artifact_path: PathBuf,
    registry_timeout: Duration,
    registry_policy: RegistryPolicy,
}

impl PipelineBuilder {
    /// Starts a builder with default artifact path, timeout and policy.
    pub fn new(geo: Arc<dyn GeoSource>, registry: Arc<dyn RegistrySource>) -> Self {
        Self {
            geo,
            registry,
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            registry_timeout: DEFAULT_REGISTRY_TIMEOUT,
            registry_policy: RegistryPolicy::default(),
        }
    }

    /// Takes the artifact path, timeout and policy from the configuration.
    pub fn with_config(self, config: &Config) -> Self {
        self.artifact_path(config.artifact.clone())
            .registry_timeout(config.registry_timeout())
            .registry_policy(config.registry_policy)
    }

    /// Sets where the coordinate artifact is written.
    pub fn artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = path.into();
        self
    }

    /// Bounds each registry call.
    pub fn registry_timeout(mut self, timeout: Duration) -> Self {
        self.registry_timeout = timeout;
        self
    }

    /// Sets when the registry is queried.
    pub fn registry_policy(mut self, policy: RegistryPolicy) -> Self {
        self.registry_policy = policy;
        self
    }

    /// Builds the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline {
            geo: self.geo,
            registry: self.registry,
            artifact: ArtifactWriter::new(self.artifact_path),
            registry_timeout: self.registry_timeout,
            registry_policy: self.registry_policy,
        }
    }
}

impl Pipeline {
    /// Shorthand for [`PipelineBuilder::new`].
    pub fn builder(geo: Arc<dyn GeoSource>, registry: Arc<dyn RegistrySource>) -> PipelineBuilder {
        PipelineBuilder::new(geo, registry)
    }

    /// The artifact this pipeline writes.
    pub fn artifact(&self) -> &ArtifactWriter {
        &self.artifact
    }

    /// Status of the GeoIP database behind this pipeline.
    pub fn geo_status(&self) -> GeoDbStatus {
        self.geo.status()
    }

    /// Looks an address up in both sources and merges the outcome.
    ///
    /// Never fails: a source error replaces that source's half of the
    /// result. Touches no files.
    pub async fn aggregate(&self, ip: &IpAddress) -> AggregatedResult {
        let (geo, registry) = match self.registry_policy {
            RegistryPolicy::Always => {
                tokio::join!(async { self.resolve_geo(ip) }, self.resolve_registry(ip))
            }
            RegistryPolicy::RequireCoordinates => {
                let geo = self.resolve_geo(ip);
                let located = geo.as_ref().is_ok_and(|g| g.coordinates.is_some());
                let registry = if located {
                    self.resolve_registry(ip).await
                } else {
                    Err(LookupError::not_found(
                        "skipped: no coordinates for this address",
                    ))
                };
                (geo, registry)
            }
        };

        let currency = geo
            .as_ref()
            .ok()
            .and_then(|g| g.country_code3.as_deref())
            .map(infer_currency)
            .unwrap_or(CurrencyLabel::Unknown);

        AggregatedResult {
            ip: ip.clone(),
            geo,
            registry,
            currency,
            artifact_written: false,
        }
    }

    /// Aggregates, then writes the artifact if a point was resolved.
    ///
    /// A lookup without coordinates leaves any earlier artifact in place.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Artifact` if the artifact cannot be written.
    pub async fn lookup(&self, ip: &IpAddress) -> Result<AggregatedResult, TrackerError> {
        let mut result = self.aggregate(ip).await;

        if let Some(coordinates) = result.coordinates() {
            self.artifact.write(&coordinates)?;
            result.artifact_written = true;
        } else {
            log::debug!(
                "No coordinates for {}, artifact {} left as is",
                ip,
                self.artifact.path().display()
            );
        }

        Ok(result)
    }

    /// Validates a literal and looks it up.
    ///
    /// # Errors
    ///
    /// - `TrackerError::Validation` if the literal is rejected; no source
    ///   is queried
    /// - `TrackerError::Artifact` if the artifact cannot be written
    pub async fn track(&self, input: &str) -> Result<AggregatedResult, TrackerError> {
        let ip = validate(input)?;
        self.lookup(&ip).await
    }

    /// Removes the artifact at the end of a session.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::WriteDenied` if it exists but cannot be removed.
    pub fn shutdown(&self) -> Result<(), ArtifactError> {
        self.artifact.delete()
    }

    fn resolve_geo(&self, ip: &IpAddress) -> Result<GeoRecord, LookupError> {
        let result = self.geo.resolve(ip);
        match &result {
            Ok(_) => log::debug!("{} lookup succeeded for {}", self.geo.name(), ip),
            Err(e) => log::info!("{} lookup failed for {}: {}", self.geo.name(), ip, e),
        }
        result
    }

    async fn resolve_registry(&self, ip: &IpAddress) -> Result<RegistryRecord, LookupError> {
        match tokio::time::timeout(self.registry_timeout, self.registry.resolve(ip)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "{} lookup for {} timed out after {:?}",
                    self.registry.name(),
                    ip,
                    self.registry_timeout
                );
                Err(LookupError::network_unavailable(format!(
                    "{} lookup timed out after {}s",
                    self.registry.name(),
                    self.registry_timeout.as_secs_f64()
                )))
            }
        }
    }
}
