//! jarbom core: identify the Maven coordinates of a pile of jars and
//! assemble them into a bill of materials.
//!
//! # Pipeline
//!
//! ```text
//! JarSource ──► Resolver ──► DependencyCollector ──► Manifest ──► pom.xml
//!  (dir/tar)     │  tier 1: META-INF/maven/**/pom.properties
//!                │  tier 2: SHA-1 lookup against the search index
//!                └──► UnknownSink (unresolved jars, optional)
//! ```

pub mod central;
pub mod checksum;
pub mod collector;
pub mod config;
pub mod disambiguate;
pub mod metadata;
pub mod pom;
pub mod properties;
pub mod reporter;
pub mod resolver;
pub mod run;
pub mod sink;
pub mod source;

#[cfg(test)]
pub(crate) mod testutil;

pub use central::ChecksumIndex;
pub use collector::DependencyCollector;
pub use config::{BomIdentity, RunConfig};
pub use reporter::{NullReporter, Reporter};
pub use resolver::{ResolveError, Resolved, Resolver, Tier};
pub use run::{RunError, RunSummary, collect, run};
pub use source::{Candidates, JarCandidate, JarSource, SourceError};

/// User Agent string for requests against the search index.
pub const USER_AGENT: &str = concat!("jarbom/", env!("CARGO_PKG_VERSION"));
