//! Tar mode: jar entries streamed out of a (possibly gzipped) tar archive
//! into scratch files.
//!
//! `tar::Entries` borrows the archive through a `RefCell`, so it cannot
//! cross threads. Reading happens on a blocking task that hands finished
//! candidates over a bounded channel.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use jarbom_schema::JAR_EXTENSION;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use super::{JarCandidate, SourceError, is_jar_name};

type Stream = Box<dyn Read + Send>;

/// Candidates buffered between the reader and the consumer.
const LOOKAHEAD: usize = 1;

/// An open tar stream.
pub struct TarSource {
    path: PathBuf,
    archive: Option<tar::Archive<Stream>>,
    scratch_dir: Option<PathBuf>,
}

impl std::fmt::Debug for TarSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TarSource")
            .field("path", &self.path)
            .field("scratch_dir", &self.scratch_dir)
            .field("consumed", &self.archive.is_none())
            .finish_non_exhaustive()
    }
}

impl TarSource {
    /// Open the archive at `path`, decoding gzip when `gzip` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] if the file cannot be opened.
    pub fn open(path: &Path, gzip: bool, scratch_dir: Option<&Path>) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let stream: Stream = if gzip {
            Box::new(GzDecoder::new(reader))
        } else {
            Box::new(reader)
        };

        Ok(Self {
            path: path.to_path_buf(),
            archive: Some(tar::Archive::new(stream)),
            scratch_dir: scratch_dir.map(Path::to_path_buf),
        })
    }

    /// The archive path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start reading jar entries as scratch-backed candidates, in archive
    /// order. The stream can be read once.
    ///
    /// Directories, empty entries and non-jar entries are passed over
    /// without being copied. A corrupt entry after the first ends the
    /// stream; candidates already produced stay valid. Dropping the
    /// receiver stops the reader.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Tar`] if the first header cannot be read
    /// (not a tar, bad gzip framing, truncated file) or the stream was
    /// already read.
    pub async fn candidates(&mut self) -> Result<mpsc::Receiver<JarCandidate>, SourceError> {
        let archive = self.archive.take().ok_or_else(|| SourceError::Tar {
            path: self.path.clone(),
            source: io::Error::other("archive was already read"),
        })?;

        let (tx, rx) = mpsc::channel(LOOKAHEAD);
        let (ready_tx, ready_rx) = oneshot::channel();
        let path = self.path.clone();
        let scratch_dir = self.scratch_dir.clone();
        tokio::task::spawn_blocking(move || {
            read_entries(archive, &path, scratch_dir.as_deref(), ready_tx, &tx);
        });

        match ready_rx.await {
            Ok(Ok(())) => Ok(rx),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(SourceError::Tar {
                path: self.path.clone(),
                source: io::Error::other("tar reader stopped before the first entry"),
            }),
        }
    }
}

/// Blocking side of [`TarSource::candidates`]. Reports whether the first
/// header was readable on `ready`, then feeds candidates into `tx`.
fn read_entries(
    mut archive: tar::Archive<Stream>,
    path: &Path,
    scratch_dir: Option<&Path>,
    ready: oneshot::Sender<Result<(), SourceError>>,
    tx: &mpsc::Sender<JarCandidate>,
) {
    let started = archive.entries().and_then(|mut entries| {
        let first = entries.next().transpose()?;
        Ok((first, entries))
    });

    let (first, entries) = match started {
        Ok(started) => started,
        Err(source) => {
            let failed = SourceError::Tar {
                path: path.to_path_buf(),
                source,
            };
            if let Err(Err(e)) = ready.send(Err(failed)) {
                debug!("Tar consumer gone before start: {e}");
            }
            return;
        }
    };
    if ready.send(Ok(())).is_err() {
        return;
    }

    for entry in first.into_iter().map(Ok).chain(entries) {
        let mut entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                error!(archive = %path.display(), "Stopping at corrupt tar entry: {e}");
                break;
            }
        };
        let candidate = match materialize(&mut entry, scratch_dir) {
            Ok(Some(candidate)) => candidate,
            Ok(None) => continue,
            Err(e) => {
                error!(archive = %path.display(), "Skipping tar entry: {e}");
                continue;
            }
        };
        if tx.blocking_send(candidate).is_err() {
            debug!(archive = %path.display(), "Tar consumer gone; stopping");
            break;
        }
    }
}

/// Copy a jar entry into a fresh scratch file named after its base name.
fn materialize<R: Read>(
    entry: &mut tar::Entry<'_, R>,
    scratch_dir: Option<&Path>,
) -> io::Result<Option<JarCandidate>> {
    if entry.header().entry_type().is_dir() || entry.size() == 0 {
        return Ok(None);
    }

    let entry_name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    if !is_jar_name(&entry_name) {
        return Ok(None);
    }

    let base = entry_name
        .rsplit('/')
        .next()
        .unwrap_or(&entry_name)
        .to_owned();
    let stem = base.strip_suffix(JAR_EXTENSION).unwrap_or(&base);
    let prefix = format!("{stem}-");

    let mut builder = tempfile::Builder::new();
    builder.prefix(&prefix).suffix(JAR_EXTENSION);
    let mut scratch = match scratch_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }?;

    io::copy(entry, scratch.as_file_mut())
        .map_err(|e| io::Error::new(e.kind(), format!("copying {entry_name}: {e}")))?;

    debug!(entry = %entry_name, scratch = %scratch.path().display(), "Materialized jar entry");
    Ok(Some(JarCandidate::from_scratch(base, scratch)))
}
