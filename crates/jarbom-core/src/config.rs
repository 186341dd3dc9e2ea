//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::central::DEFAULT_ENDPOINT;

/// Identity of the BOM being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomIdentity {
    /// `groupId` of the emitted pom (default `extracted`).
    pub group_id: String,
    /// `artifactId` of the emitted pom (default `bom`).
    pub artifact_id: String,
    /// `version` of the emitted pom (default `1.0.0-SNAPSHOT`).
    pub version: String,
}

impl Default for BomIdentity {
    fn default() -> Self {
        Self {
            group_id: "extracted".to_string(),
            artifact_id: "bom".to_string(),
            version: "1.0.0-SNAPSHOT".to_string(),
        }
    }
}

/// Everything one run needs. Passed to [`crate::run()`]; nothing is read
/// from globals.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory to walk, or a `.tar` / `.tar.gz` to stream.
    pub source: PathBuf,
    /// Where the pom is written.
    pub output: PathBuf,
    /// Copy unresolved jars here when set.
    pub unknown_dir: Option<PathBuf>,
    /// Checksum search endpoint.
    pub endpoint: String,
    /// Connect timeout for the index.
    pub connect_timeout: Duration,
    /// Directory for tar scratch files (system temp dir when unset).
    pub scratch_dir: Option<PathBuf>,
    /// Skip checksum lookups entirely.
    pub offline: bool,
    /// Coordinates of the generated BOM.
    pub bom: BomIdentity,
}

impl RunConfig {
    /// Defaults for everything but the source.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: PathBuf::from("pom.xml"),
            unknown_dir: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(20),
            scratch_dir: None,
            offline: false,
            bom: BomIdentity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunConfig::new("lib");
        assert_eq!(config.output, PathBuf::from("pom.xml"));
        assert_eq!(config.endpoint, "https://search.maven.org/solrsearch/select");
        assert_eq!(config.connect_timeout, Duration::from_secs(20));
        assert!(config.unknown_dir.is_none());
        assert!(!config.offline);
        assert_eq!(config.bom.group_id, "extracted");
        assert_eq!(config.bom.artifact_id, "bom");
        assert_eq!(config.bom.version, "1.0.0-SNAPSHOT");
    }
}
