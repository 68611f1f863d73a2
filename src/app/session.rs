//! Interactive lookup session.
//!
//! A session owns one pipeline and one artifact. Queries come from the
//! command line or, when none are given, one per line from stdin.

use std::future::Future;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::report::{render_failure, render_geo_status, render_result};
use super::shutdown::shutdown_gracefully;
use crate::config::{Config, OutputFormat};
use crate::geoip::{init_geo_source, Coordinates};
use crate::initialization::{init_client, init_resolver};
use crate::pipeline::{AggregatedResult, Pipeline};
use crate::viewer::{launch_local_viewer, web_viewer_url};
use crate::whois::{CymruDns, RdapClient, RdapRegistry};

/// Summary of a finished session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    /// Queries read, excluding blank and comment lines
    pub queries: usize,
    /// Lookups where both sources answered
    pub complete: usize,
    /// Lookups returned with at least one source missing
    pub partial: usize,
    /// Queries rejected or failed before a result was returned
    pub failed: usize,
    /// Whether Ctrl-C ended the session
    pub interrupted: bool,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Counters shared with the query loop, readable after cancellation.
#[derive(Debug, Default)]
pub struct SessionStats {
    queries: AtomicUsize,
    complete: AtomicUsize,
    partial: AtomicUsize,
    failed: AtomicUsize,
}

impl SessionStats {
    fn record(&self, result: Option<&AggregatedResult>) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let counter = match result {
            Some(result) if result.is_complete() => &self.complete,
            Some(_) => &self.partial,
            None => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn report(&self, interrupted: bool, started: Instant) -> SessionReport {
        SessionReport {
            queries: self.queries.load(Ordering::Relaxed),
            complete: self.complete.load(Ordering::Relaxed),
            partial: self.partial.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            interrupted,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        }
    }
}

/// Builds the live pipeline for a configuration.
///
/// A missing GeoIP database is not an error here; see
/// [`init_geo_source`].
///
/// # Errors
///
/// Returns an error if the HTTP client or the RDAP base URL cannot be set up.
pub async fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let (geo, _status) = init_geo_source(&config.geoip_db).await;

    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let resolver = init_resolver();
    let rdap = RdapClient::new(client, &config.rdap_url)
        .with_context(|| format!("Invalid RDAP base URL '{}'", config.rdap_url))?;
    let registry = RdapRegistry::new(Arc::new(CymruDns::new(resolver)), rdap);

    Ok(Pipeline::builder(geo, Arc::new(registry))
        .with_config(config)
        .build())
}

/// Runs a session: builds the pipeline, answers every query, cleans up.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a shared resource
/// cannot be initialized, or stdout/stdin fail. Per-query failures are
/// reported inline and counted, not returned.
pub async fn run_session(config: Config) -> Result<SessionReport> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    let started = Instant::now();
    let pipeline = build_pipeline(&config).await?;
    let stats = SessionStats::default();
    let mut stdout = std::io::stdout();

    write_block(
        &mut stdout,
        &render_geo_status(&pipeline.geo_status(), config.output),
    )?;

    let interrupted = answer_until(
        &pipeline,
        &config,
        answer_queries(&pipeline, &config, &stats, &mut stdout),
        tokio::signal::ctrl_c(),
    )
    .await?;

    Ok(stats.report(interrupted, started))
}

/// Drives `queries` until it finishes or `interrupt` completes, then
/// cleans up the artifact. Returns whether `interrupt` ended the session.
///
/// An interrupted stdin read cannot be cancelled; the caller is expected
/// to exit the process rather than wait for it.
///
/// # Errors
///
/// Returns the query loop's error, after cleanup.
pub async fn answer_until<Q, I>(
    pipeline: &Pipeline,
    config: &Config,
    queries: Q,
    interrupt: I,
) -> Result<bool>
where
    Q: Future<Output = Result<()>>,
    I: Future,
{
    let (outcome, interrupted) = tokio::select! {
        outcome = queries => (outcome, false),
        _ = interrupt => {
            log::warn!("Interrupted, ending session");
            (Ok(()), true)
        }
    };

    // The artifact is removed even when the query loop failed
    shutdown_gracefully(pipeline, config.keep_artifact);
    outcome?;
    Ok(interrupted)
}

async fn answer_queries<W: Write>(
    pipeline: &Pipeline,
    config: &Config,
    stats: &SessionStats,
    out: &mut W,
) -> Result<()> {
    if config.ips.is_empty() {
        log::info!("Reading IP addresses from stdin");
        let stdin = BufReader::new(tokio::io::stdin());
        run_queries_from_reader(pipeline, config, stdin, stats, out).await
    } else {
        for input in &config.ips {
            run_query(pipeline, config, input, stats, out).await?;
        }
        Ok(())
    }
}

/// Answers one query per input line; blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run_queries_from_reader<R, W>(
    pipeline: &Pipeline,
    config: &Config,
    reader: R,
    stats: &SessionStats,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if let Some(input) = query_from_line(&line) {
            run_query(pipeline, config, input, stats, out).await?;
        }
    }
    Ok(())
}

/// Extracts the query from an input line, if it holds one.
pub fn query_from_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

/// Looks up one literal and writes its report.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub async fn run_query<W: Write>(
    pipeline: &Pipeline,
    config: &Config,
    input: &str,
    stats: &SessionStats,
    out: &mut W,
) -> Result<()> {
    match pipeline.track(input).await {
        Ok(result) => {
            stats.record(Some(&result));
            write_block(out, &render_result(&result, config.output))?;
            open_viewers(pipeline, config, result.coordinates(), out)?;
        }
        Err(e) => {
            log::warn!("Query {:?} failed: {}", input, e);
            stats.record(None);
            write_block(out, &render_failure(input, &e, config.output))?;
        }
    }
    Ok(())
}

fn open_viewers<W: Write>(
    pipeline: &Pipeline,
    config: &Config,
    coordinates: Option<Coordinates>,
    out: &mut W,
) -> Result<()> {
    if config.web_viewer {
        match web_viewer_url(coordinates.as_ref()) {
            Ok(url) => match config.output {
                OutputFormat::Plain => writeln!(out, " - Web viewer : {url}")?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::json!({ "web_viewer_url": url }))?
                }
            },
            Err(e) => log::warn!("{}", e),
        }
    }

    if let Some(executable) = &config.viewer_exe {
        if let Err(e) =
            launch_local_viewer(executable, pipeline.artifact().path(), coordinates.as_ref())
        {
            log::warn!("{}", e);
        }
    }

    Ok(())
}

fn write_block<W: Write>(out: &mut W, block: &str) -> Result<()> {
    if block.ends_with('\n') {
        out.write_all(block.as_bytes())?;
    } else {
        writeln!(out, "{block}")?;
    }
    out.flush()?;
    Ok(())
}
