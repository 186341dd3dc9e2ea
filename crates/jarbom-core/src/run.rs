//! One extraction run: source to manifest to pom.

use std::path::PathBuf;

use jarbom_schema::Manifest;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::collector::DependencyCollector;
use crate::config::RunConfig;
use crate::reporter::Reporter;
use crate::resolver::{Resolver, Tier};
use crate::sink::{SinkError, UnknownSink};
use crate::source::{JarSource, SourceError};

/// Failures that abort a run. Per-jar problems never surface here.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[cfg(feature = "network")]
    #[error("Failed to build index client: {0}")]
    Client(#[from] crate::central::LookupError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Counters and the resulting manifest for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Jar candidates seen.
    pub scanned: usize,
    /// Resolved from embedded metadata.
    pub embedded: usize,
    /// Resolved by checksum.
    pub checksum: usize,
    /// Left unidentified.
    pub unresolved: usize,
    /// Copied to the unknown-jar directory.
    pub sunk: usize,
    /// The deduplicated result.
    pub manifest: Manifest,
}

impl RunSummary {
    /// Candidates that resolved through either tier.
    pub fn resolved(&self) -> usize {
        self.embedded + self.checksum
    }
}

fn build_resolver(config: &RunConfig) -> Result<Resolver, RunError> {
    if config.offline {
        info!("Offline: checksum lookups disabled");
        return Ok(Resolver::offline());
    }

    #[cfg(feature = "network")]
    {
        let client = crate::central::CentralClient::new(&config.endpoint, config.connect_timeout)?;
        Ok(Resolver::new(std::sync::Arc::new(client)))
    }

    #[cfg(not(feature = "network"))]
    {
        warn!("Built without network support; checksum lookups disabled");
        Ok(Resolver::offline())
    }
}

/// Scan the source and collect every identified coordinate.
///
/// Jars that stay unidentified are logged, reported, and copied to the
/// unknown-jar directory when one is configured. Cancelling `cancel`
/// stops further index lookups; embedded metadata is still read and the
/// manifest of whatever was resolved is still returned.
///
/// # Errors
///
/// Returns [`RunError`] if the unknown-jar directory cannot be created,
/// the index client cannot be built, or the source cannot be opened.
pub async fn collect<R: Reporter + ?Sized>(
    config: &RunConfig,
    reporter: &R,
    cancel: &CancellationToken,
) -> Result<RunSummary, RunError> {
    let sink = config
        .unknown_dir
        .as_deref()
        .map(UnknownSink::create)
        .transpose()?;
    let resolver = build_resolver(config)?;
    collect_with(config, &resolver, sink.as_ref(), reporter, cancel).await
}

pub(crate) async fn collect_with<R: Reporter + ?Sized>(
    config: &RunConfig,
    resolver: &Resolver,
    sink: Option<&UnknownSink>,
    reporter: &R,
    cancel: &CancellationToken,
) -> Result<RunSummary, RunError> {
    let mut source = JarSource::open(&config.source, config.scratch_dir.as_deref())?;
    info!(source = %source.path().display(), "Scanning for jars");

    let mut collector = DependencyCollector::new();
    let mut summary = RunSummary::default();

    let mut candidates = source.candidates().await?;
    while let Some(candidate) = candidates.next_candidate().await {
        let name = candidate.display_name().to_string();
        summary.scanned += 1;
        reporter.candidate(&name);

        match resolver.resolve(&candidate, cancel).await {
            Ok(resolved) => {
                match resolved.via {
                    Tier::Embedded => summary.embedded += 1,
                    Tier::Checksum => summary.checksum += 1,
                }
                reporter.resolved(&name, &resolved.coordinate, resolved.via);
                if !collector.add(resolved.coordinate) {
                    debug!(jar = %name, "Duplicate coordinate");
                }
            }
            Err(e) => {
                summary.unresolved += 1;
                warn!(jar = %name, error = %e, "Unresolved jar");
                reporter.unresolved(&name, &e);

                if let Some(sink) = sink {
                    match sink.store(&candidate) {
                        Ok(dest) => {
                            summary.sunk += 1;
                            reporter.sunk(&name, &dest);
                        }
                        Err(e) => error!(jar = %name, error = %e, "Failed to keep unknown jar"),
                    }
                }
            }
        }
        // `candidate` drops here, taking any scratch file with it.
    }

    summary.manifest = collector.flush();
    Ok(summary)
}

/// [`collect`], then write the BOM to `config.output`.
///
/// # Errors
///
/// Everything [`collect`] returns, plus [`RunError::Write`] if the pom
/// cannot be written.
pub async fn run<R: Reporter + ?Sized>(
    config: &RunConfig,
    reporter: &R,
    cancel: &CancellationToken,
) -> Result<RunSummary, RunError> {
    let summary = collect(config, reporter, cancel).await?;

    crate::pom::write(&config.output, &config.bom, &summary.manifest).map_err(|source| {
        RunError::Write {
            path: config.output.clone(),
            source,
        }
    })?;

    info!(
        output = %config.output.display(),
        scanned = summary.scanned,
        resolved = summary.resolved(),
        unresolved = summary.unresolved,
        dependencies = summary.manifest.len(),
        "Wrote BOM"
    );
    reporter.summary(&summary);
    Ok(summary)
}
