//! Hash command

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Print the SHA-1 of each file, the digest the search index is queried with.
pub fn hash(files: &[PathBuf]) -> Result<()> {
    for file in files {
        println!("{}", hash_line(file)?);
    }
    Ok(())
}

/// `<sha1>  <path>`
pub fn hash_line(path: &Path) -> Result<String> {
    let digest = jarbom_core::checksum::sha1_file(path)
        .with_context(|| format!("Failed to hash {}", path.display()))?;
    Ok(format!("{digest}  {}", path.display()))
}
