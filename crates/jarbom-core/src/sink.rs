//! Where unidentified jars go.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::source::JarCandidate;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to create unknown-jar directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {name} into {path}: {source}")]
    Copy {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Directory receiving a copy of every jar that could not be resolved,
/// named by its original base name.
#[derive(Debug, Clone)]
pub struct UnknownSink {
    dir: PathBuf,
}

impl UnknownSink {
    /// Use `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Create`] if the directory cannot be created.
    pub fn create(dir: &Path) -> Result<Self, SinkError> {
        std::fs::create_dir_all(dir).map_err(|source| SinkError::Create {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// The destination directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy the candidate's bytes to `<dir>/<display name>`, overwriting.
    ///
    /// The candidate itself is left alone; dropping it afterwards removes
    /// any scratch file behind it.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Copy`] if the copy fails.
    pub fn store(&self, candidate: &JarCandidate) -> Result<PathBuf, SinkError> {
        let dest = self.dir.join(candidate.display_name());
        std::fs::copy(candidate.path(), &dest).map_err(|source| SinkError::Copy {
            name: candidate.display_name().to_string(),
            path: dest.clone(),
            source,
        })?;
        debug!(jar = candidate.display_name(), dest = %dest.display(), "Stored unknown jar");
        Ok(dest)
    }
}
