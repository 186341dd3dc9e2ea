//! Coordinate resolution for one jar: embedded metadata first, then the
//! checksum index.

use std::sync::Arc;

use jarbom_schema::{Coordinate, CoordinateError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::central::{ChecksumIndex, LookupError};
use crate::disambiguate::best_match;
use crate::metadata::{self, MetadataError};
use crate::source::JarCandidate;

/// Which tier produced a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `META-INF/maven/**/pom.properties` inside the jar.
    Embedded,
    /// SHA-1 lookup against the search index.
    Checksum,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Embedded => write!(f, "pom.properties"),
            Tier::Checksum => write!(f, "sha1"),
        }
    }
}

/// A successfully identified jar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The coordinate.
    pub coordinate: Coordinate,
    /// Where it came from.
    pub via: Tier,
}

/// Why a jar stayed unidentified. Always local to one candidate.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no embedded metadata and checksum lookups are disabled")]
    Offline,

    #[error("checksum {0} is unknown to the index")]
    NotFound(String),

    #[error("failed to read jar for checksum: {0}")]
    Checksum(#[source] std::io::Error),

    #[error("checksum lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("index returned an unusable doc: {0}")]
    InvalidDoc(#[from] CoordinateError),

    #[error("lookup cancelled")]
    Cancelled,

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Two-tier coordinate resolver.
#[derive(Clone)]
pub struct Resolver {
    index: Option<Arc<dyn ChecksumIndex>>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("online", &self.index.is_some())
            .finish()
    }
}

impl Resolver {
    /// Resolver that falls back to `index` for jars without metadata.
    pub fn new(index: Arc<dyn ChecksumIndex>) -> Self {
        Self { index: Some(index) }
    }

    /// Resolver that only reads embedded metadata.
    pub fn offline() -> Self {
        Self { index: None }
    }

    /// Identify `candidate`.
    ///
    /// Tier 2 runs only when tier 1 finds nothing. `cancel` is checked while
    /// waiting on the index; a cancelled lookup leaves this candidate
    /// unresolved and nothing else.
    ///
    /// # Errors
    ///
    /// Every [`ResolveError`] is per-candidate and recoverable.
    pub async fn resolve(
        &self,
        candidate: &JarCandidate,
        cancel: &CancellationToken,
    ) -> Result<Resolved, ResolveError> {
        let name = candidate.display_name();

        if let Some(coordinate) = self.embedded(candidate).await? {
            debug!(jar = name, %coordinate, "Resolved from embedded metadata");
            return Ok(Resolved {
                coordinate,
                via: Tier::Embedded,
            });
        }

        let Some(index) = &self.index else {
            return Err(ResolveError::Offline);
        };

        let path = candidate.path().to_path_buf();
        let sha1 = tokio::task::spawn_blocking(move || crate::checksum::sha1_file(&path))
            .await?
            .map_err(ResolveError::Checksum)?;

        let docs = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ResolveError::Cancelled),
            docs = index.lookup(&sha1) => docs?,
        };

        let doc = best_match(&docs, name).ok_or_else(|| ResolveError::NotFound(sha1.to_string()))?;
        if docs.len() > 1 {
            debug!(jar = name, matches = docs.len(), picked = ?doc, "Disambiguated checksum matches");
        }

        let coordinate = doc.to_coordinate()?;
        debug!(jar = name, %coordinate, %sha1, "Resolved from checksum");
        Ok(Resolved {
            coordinate,
            via: Tier::Checksum,
        })
    }

    /// Tier 1. A jar that cannot be read as a zip, or whose marker is
    /// incomplete, is logged and treated as carrying no metadata.
    async fn embedded(&self, candidate: &JarCandidate) -> Result<Option<Coordinate>, ResolveError> {
        let path = candidate.path().to_path_buf();
        let result = tokio::task::spawn_blocking(move || metadata::read_embedded(&path)).await?;

        match result {
            Ok(found) => Ok(found),
            Err(e @ MetadataError::Incomplete { .. }) => {
                warn!(jar = candidate.display_name(), "Ignoring embedded metadata: {e}");
                Ok(None)
            }
            Err(e) => {
                warn!(jar = candidate.display_name(), "Cannot inspect jar: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{write_maven_jar, write_plain_jar};
    use async_trait::async_trait;
    use jarbom_schema::{CentralDoc, Sha1Digest};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Index returning fixed docs and counting calls.
    #[derive(Default)]
    struct FakeIndex {
        docs: Vec<CentralDoc>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeIndex {
        fn with_docs(docs: Vec<CentralDoc>) -> Arc<Self> {
            Arc::new(Self {
                docs,
                ..Self::default()
            })
        }
    }

    #[async_trait]
    impl ChecksumIndex for FakeIndex {
        async fn lookup(&self, _sha1: &Sha1Digest) -> Result<Vec<CentralDoc>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(serde_json::from_str::<()>("garbage").unwrap_err().into());
            }
            Ok(self.docs.clone())
        }
    }

    /// Index that never answers.
    struct HangingIndex;

    #[async_trait]
    impl ChecksumIndex for HangingIndex {
        async fn lookup(&self, _sha1: &Sha1Digest) -> Result<Vec<CentralDoc>, LookupError> {
            std::future::pending().await
        }
    }

    fn doc(g: &str, a: &str, v: &str) -> CentralDoc {
        CentralDoc {
            g: g.into(),
            a: a.into(),
            v: v.into(),
        }
    }

    #[tokio::test]
    async fn embedded_metadata_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("a.jar");
        write_maven_jar(&jar, "com.x", "y", "1.2.3");

        let index = FakeIndex::with_docs(vec![doc("wrong", "wrong", "0")]);
        let resolver = Resolver::new(index.clone());
        let resolved = resolver
            .resolve(&JarCandidate::from_path(&jar), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(resolved.via, Tier::Embedded);
        assert_eq!(resolved.coordinate.dedup_key(), "com.x:y:1.2.3");
        assert_eq!(index.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_back_to_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("b.jar");
        write_plain_jar(&jar, "com/z/W.class");

        let index = FakeIndex::with_docs(vec![doc("com.z", "w", "9.9")]);
        let resolver = Resolver::new(index.clone());
        let resolved = resolver
            .resolve(&JarCandidate::from_path(&jar), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(resolved.via, Tier::Checksum);
        assert_eq!(resolved.coordinate.dedup_key(), "com.z:w:9.9");
        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn disambiguates_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("lib-2.0.jar");
        write_plain_jar(&jar, "lib/Lib.class");

        let index = FakeIndex::with_docs(vec![doc("a", "lib", "1.0"), doc("b", "lib", "2.0")]);
        let resolved = Resolver::new(index)
            .resolve(&JarCandidate::from_path(&jar), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(resolved.coordinate.group(), "b");
        assert_eq!(resolved.coordinate.version(), "2.0");
        assert_eq!(resolved.coordinate.classifier(), None);
    }

    #[tokio::test]
    async fn no_docs_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("mystery.jar");
        write_plain_jar(&jar, "Mystery.class");

        let err = Resolver::new(FakeIndex::with_docs(Vec::new()))
            .resolve(&JarCandidate::from_path(&jar), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[tokio::test]
    async fn lookup_failure_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("x.jar");
        write_plain_jar(&jar, "X.class");

        let index = Arc::new(FakeIndex {
            fail: true,
            ..FakeIndex::default()
        });
        let err = Resolver::new(index)
            .resolve(&JarCandidate::from_path(&jar), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Lookup(LookupError::Parse(_))));
    }

    #[tokio::test]
    async fn corrupt_jar_still_gets_a_checksum_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("corrupt.jar");
        std::fs::write(&jar, b"not a zip").unwrap();

        let index = FakeIndex::with_docs(vec![doc("g", "corrupt", "1")]);
        let resolved = Resolver::new(index.clone())
            .resolve(&JarCandidate::from_path(&jar), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(resolved.via, Tier::Checksum);
        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_file_is_a_checksum_failure() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = JarCandidate::from_path(dir.path().join("gone.jar"));

        let err = Resolver::new(FakeIndex::with_docs(Vec::new()))
            .resolve(&candidate, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Checksum(_)));
    }

    #[tokio::test]
    async fn offline_stops_after_tier_one() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("plain.jar");
        write_plain_jar(&jar, "P.class");

        let err = Resolver::offline()
            .resolve(&JarCandidate::from_path(&jar), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Offline));
    }

    #[tokio::test]
    async fn cancellation_abandons_the_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("slow.jar");
        write_plain_jar(&jar, "S.class");

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = Resolver::new(Arc::new(HangingIndex))
            .resolve(&JarCandidate::from_path(&jar), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Cancelled));
    }

    #[tokio::test]
    async fn cancellation_does_not_block_embedded_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("a.jar");
        write_maven_jar(&jar, "com.x", "y", "1.2.3");

        let cancel = CancellationToken::new();
        cancel.cancel();
        let resolved = Resolver::new(Arc::new(HangingIndex))
            .resolve(&JarCandidate::from_path(&jar), &cancel)
            .await
            .unwrap();
        assert_eq!(resolved.via, Tier::Embedded);
    }
}
