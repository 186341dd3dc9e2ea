//! Archive sources: where jar candidates come from.
//!
//! A source is either a directory tree (jars referenced in place) or a tar
//! stream, optionally gzip-framed (jar entries copied to scratch files).
//! Both yield the same [`JarCandidate`] sequence.

mod tarball;
mod walk;

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::mpsc;

pub use tarball::TarSource;
pub use walk::DirectorySource;

/// Failures opening the top-level source. These abort the run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open source {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Unreadable tar archive {path}: {source}")]
    Tar {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a source path points at, decided by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Walk the path recursively.
    Directory,
    /// Read the path as a tar stream.
    Tar {
        /// Wrap the stream in a gzip decoder first.
        gzip: bool,
    },
}

impl SourceKind {
    /// `.tar` and `.tar.gz` select tar mode; anything else is a directory.
    pub fn detect(path: &Path) -> Self {
        let name = path.to_string_lossy();
        if name.ends_with(".tar.gz") || name.ends_with(".tar") {
            SourceKind::Tar {
                gzip: name.ends_with(".gz"),
            }
        } else {
            SourceKind::Directory
        }
    }
}

/// The bytes backing a candidate.
#[derive(Debug)]
enum Backing {
    /// A jar on disk, referenced in place.
    Path(PathBuf),
    /// A scratch copy of a tar entry, deleted when the candidate is dropped.
    Scratch(NamedTempFile),
}

/// One jar to identify.
///
/// Scratch-backed candidates own their temporary file: dropping the
/// candidate deletes it, so every exit path of a resolution attempt cleans
/// up without further bookkeeping.
#[derive(Debug)]
pub struct JarCandidate {
    display_name: String,
    backing: Backing,
}

impl JarCandidate {
    /// A jar that already lives on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            display_name,
            backing: Backing::Path(path),
        }
    }

    /// A jar materialized from a stream into `scratch`.
    pub fn from_scratch(display_name: impl Into<String>, scratch: NamedTempFile) -> Self {
        Self {
            display_name: display_name.into(),
            backing: Backing::Scratch(scratch),
        }
    }

    /// Original base name, e.g. `guava-33.0.0-jre.jar`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Where the bytes can be read from right now.
    pub fn path(&self) -> &Path {
        match &self.backing {
            Backing::Path(path) => path,
            Backing::Scratch(file) => file.path(),
        }
    }

    /// Whether dropping this candidate deletes its backing file.
    pub fn is_scratch(&self) -> bool {
        matches!(self.backing, Backing::Scratch(_))
    }
}

/// A source of jar candidates.
#[derive(Debug)]
pub enum JarSource {
    /// Jars found by walking a directory tree.
    Directory(DirectorySource),
    /// Jar entries streamed out of a tar archive.
    Tar(TarSource),
}

impl JarSource {
    /// Open `path`, choosing the mode from its suffix. Scratch files for tar
    /// entries go to `scratch_dir`, or the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the path cannot be opened, or is expected
    /// to be a directory but is not.
    pub fn open(path: &Path, scratch_dir: Option<&Path>) -> Result<Self, SourceError> {
        match SourceKind::detect(path) {
            SourceKind::Directory => DirectorySource::open(path).map(JarSource::Directory),
            SourceKind::Tar { gzip } => {
                TarSource::open(path, gzip, scratch_dir).map(JarSource::Tar)
            }
        }
    }

    /// The path this source was opened from.
    pub fn path(&self) -> &Path {
        match self {
            JarSource::Directory(source) => source.root(),
            JarSource::Tar(source) => source.path(),
        }
    }

    /// Start producing candidates, one at a time.
    ///
    /// Per-entry problems are logged and skipped by the producer; only a
    /// failure to start reading is returned here.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Tar`] if the first tar header cannot be read.
    pub async fn candidates(&mut self) -> Result<Candidates<'_>, SourceError> {
        match self {
            JarSource::Directory(source) => Ok(Candidates::Directory(Box::new(source.candidates()))),
            JarSource::Tar(source) => source.candidates().await.map(Candidates::Tar),
        }
    }
}

/// The candidate stream of an open [`JarSource`].
pub enum Candidates<'a> {
    /// Walk results, produced inline.
    Directory(Box<dyn Iterator<Item = JarCandidate> + Send + 'a>),
    /// Scratch files handed over by the blocking tar reader.
    Tar(mpsc::Receiver<JarCandidate>),
}

impl std::fmt::Debug for Candidates<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Candidates::Directory(_) => f.write_str("Candidates::Directory"),
            Candidates::Tar(_) => f.write_str("Candidates::Tar"),
        }
    }
}

impl Candidates<'_> {
    /// The next candidate, or `None` once the source is exhausted.
    pub async fn next_candidate(&mut self) -> Option<JarCandidate> {
        match self {
            Candidates::Directory(walk) => walk.next(),
            Candidates::Tar(rx) => rx.recv().await,
        }
    }
}

/// Whether `name` carries the jar extension.
pub(crate) fn is_jar_name(name: &str) -> bool {
    name.ends_with(jarbom_schema::JAR_EXTENSION)
}
