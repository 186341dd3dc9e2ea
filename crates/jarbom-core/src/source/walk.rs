//! Directory mode: every `*.jar` file under a root, referenced in place.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::{JarCandidate, SourceError, is_jar_name};

/// Recursive walk over a directory tree.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Check that `root` is a readable directory.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] if `root` cannot be stat'ed and
    /// [`SourceError::NotADirectory`] if it is something else.
    pub fn open(root: &Path) -> Result<Self, SourceError> {
        let meta = std::fs::metadata(root).map_err(|source| SourceError::Open {
            path: root.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(SourceError::NotADirectory(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// The walk root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Jar files under the root, in file-name order per directory.
    ///
    /// Symlinks named `*.jar` are followed to their target; symlinked
    /// directories are not descended into. Entries the walk cannot read,
    /// and jar names that do not resolve to a file, are logged and skipped.
    pub fn candidates(&self) -> impl Iterator<Item = JarCandidate> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(root = %self.root.display(), "Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| {
                if entry.file_type().is_dir() || !is_jar_name(&entry.file_name().to_string_lossy()) {
                    return false;
                }
                if entry.path().is_file() {
                    return true;
                }
                warn!(path = %entry.path().display(), "Skipping jar name that is not a file");
                false
            })
            .map(|entry| JarCandidate::from_path(entry.into_path()))
    }
}
