//! Report rendering for lookup results.
//!
//! Absent values are decided here: the model carries `None`/`Err`, the
//! plain renderer prints `No data` and the JSON renderer prints `null`.

use std::fmt::Display;
use std::fmt::Write as _;

use serde_json::{json, Value};

use crate::config::OutputFormat;
use crate::error_handling::{LookupError, TrackerError};
use crate::geoip::GeoDbStatus;
use crate::pipeline::AggregatedResult;

/// Display string for an absent field.
pub const NO_DATA: &str = "No data";

const GEO_STAGE: &str = "geo lookup";
const REGISTRY_STAGE: &str = "registry lookup";

/// Renders one lookup result in the requested format.
pub fn render_result(result: &AggregatedResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => render_plain(result),
        OutputFormat::Json => result_json(result).to_string(),
    }
}

/// Renders a rejected or failed query.
pub fn render_failure(input: &str, error: &TrackerError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => format!("* Query {input:?} failed\n - {error}\n"),
        OutputFormat::Json => {
            let stage = match error {
                TrackerError::Validation(_) => "validation",
                TrackerError::Artifact(_) => "artifact",
            };
            json!({
                "input": input,
                "error": { "stage": stage, "message": error.to_string() },
            })
            .to_string()
        }
    }
}

/// Renders the GeoIP database status block.
pub fn render_geo_status(status: &GeoDbStatus, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => {
            let (state, version) = match status {
                GeoDbStatus::Active { version, .. } => ("Active", version.as_str()),
                GeoDbStatus::Inactive => ("Inactive", NO_DATA),
            };
            format!("* GeoDB info\n - GeoDB Status : {state}\n - GeoDB Version : {version}\n")
        }
        OutputFormat::Json => json!({ "geodb": status }).to_string(),
    }
}

/// Plain text report with one line per field.
pub fn render_plain(result: &AggregatedResult) -> String {
    let geo = result.geo_record();
    let registry = result.registry_record();
    let mut out = String::new();

    out.push_str("* Target IP details\n");
    line(&mut out, "IP Address", Some(&result.ip));
    line(
        &mut out,
        "IP Owner",
        registry.and_then(|r| r.asn_description.as_ref()),
    );
    line(&mut out, "IP version", registry.and_then(|r| r.ip_version));

    out.push_str("* Target network details\n");
    line(&mut out, "ASN", registry.map(|r| format!("AS{}", r.asn)));
    line(&mut out, "ASN registry", registry.map(|r| &r.asn_registry));
    line(&mut out, "ASN cidr", registry.map(|r| &r.asn_cidr));
    line(&mut out, "ASN date", registry.and_then(|r| r.asn_date));
    line(&mut out, "Network type", registry.and_then(|r| r.network_type.as_ref()));
    line(&mut out, "Network name", registry.and_then(|r| r.network_name.as_ref()));
    line(&mut out, "Network range", registry.and_then(|r| r.network_range.as_ref()));
    stage_error(&mut out, REGISTRY_STAGE, &result.registry);

    out.push_str("* Physical Location Info\n");
    line(&mut out, "Country", geo.and_then(country_label));
    line(&mut out, "Continent", geo.and_then(|g| g.continent.as_ref()));
    line(&mut out, "City", geo.and_then(|g| g.city.as_ref()));
    line(&mut out, "Timezone", geo.and_then(|g| g.timezone.as_ref()));
    line(&mut out, "Postal code", geo.and_then(|g| g.postal_code.as_ref()));
    line(&mut out, "Region code", geo.and_then(|g| g.region_code.as_ref()));
    let coordinates = result.coordinates();
    line(&mut out, "Latitude", coordinates.map(|c| c.latitude));
    line(&mut out, "Longitude", coordinates.map(|c| c.longitude));
    line(&mut out, "Currency", result.currency.currency().map(|_| result.currency));
    stage_error(&mut out, GEO_STAGE, &result.geo);

    let artifact = if result.artifact_written {
        "written"
    } else {
        "not written"
    };
    let _ = writeln!(out, " - Artifact : {artifact}");

    out
}

/// JSON document for one result.
pub fn result_json(result: &AggregatedResult) -> Value {
    json!({
        "ip": result.ip.as_str(),
        "geo": result.geo_record(),
        "geo_error": result.geo.as_ref().err().map(|e| error_json(GEO_STAGE, e)),
        "registry": result.registry_record(),
        "registry_error": result.registry.as_ref().err().map(|e| error_json(REGISTRY_STAGE, e)),
        "currency": result.currency,
        "artifact_written": result.artifact_written,
        "complete": result.is_complete(),
    })
}

fn error_json(stage: &str, error: &LookupError) -> Value {
    json!({
        "stage": stage,
        "kind": error.kind,
        "message": error.detail,
    })
}

fn country_label(geo: &crate::geoip::GeoRecord) -> Option<String> {
    let name = geo.country_name.as_deref()?;
    let codes: Vec<&str> = [geo.country_code.as_deref(), geo.country_code3.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if codes.is_empty() {
        Some(name.to_string())
    } else {
        Some(format!("{name} ({})", codes.join("/")))
    }
}

fn line<T: Display>(out: &mut String, label: &str, value: Option<T>) {
    match value {
        Some(value) => {
            let _ = writeln!(out, " - {label} : {value}");
        }
        None => {
            let _ = writeln!(out, " - {label} : {NO_DATA}");
        }
    }
}

fn stage_error<T>(out: &mut String, stage: &str, outcome: &Result<T, LookupError>) {
    if let Err(e) = outcome {
        let _ = writeln!(out, " ! {stage}: {e}");
    }
}
