//! Tier 1: coordinates a jar carries about itself.
//!
//! Maven writes `META-INF/maven/<groupId>/<artifactId>/pom.properties` into
//! every jar it builds. The first such entry in the central directory wins.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use jarbom_schema::{Coordinate, CoordinateError};
use thiserror::Error;
use zip::ZipArchive;

use crate::properties::Properties;

/// Directory prefix under which Maven stores build metadata in a jar.
pub const METADATA_ROOT: &str = "META-INF/maven/";

/// File name of the embedded coordinate file.
pub const MARKER_FILE: &str = "/pom.properties";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a readable jar: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{entry} is incomplete: {source}")]
    Incomplete {
        entry: String,
        #[source]
        source: CoordinateError,
    },
}

/// Whether a zip entry name is an embedded `pom.properties`.
pub fn is_marker(name: &str) -> bool {
    name.starts_with(METADATA_ROOT) && name.ends_with(MARKER_FILE)
}

/// Read the embedded coordinate of the jar at `path`.
///
/// Returns `Ok(None)` when the jar has no marker entry.
///
/// # Errors
///
/// Returns [`MetadataError::Zip`] or [`MetadataError::Io`] if the jar cannot
/// be opened or the entry cannot be read, and [`MetadataError::Incomplete`]
/// if the marker lacks `groupId`, `artifactId` or `version`.
pub fn read_embedded(path: &Path) -> Result<Option<Coordinate>, MetadataError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let Some(entry_name) = archive
        .file_names()
        .find(|name| is_marker(name))
        .map(str::to_owned)
    else {
        return Ok(None);
    };

    let mut bytes = Vec::new();
    archive.by_name(&entry_name)?.read_to_end(&mut bytes)?;
    let props = Properties::parse_latin1(&bytes);

    coordinate_from_properties(&props)
        .map(Some)
        .map_err(|source| MetadataError::Incomplete {
            entry: entry_name,
            source,
        })
}

/// Build a coordinate from `groupId`, `artifactId`, `version` and the
/// optional `classifier`.
///
/// # Errors
///
/// Returns [`CoordinateError::EmptyField`] naming the first missing key.
pub fn coordinate_from_properties(props: &Properties) -> Result<Coordinate, CoordinateError> {
    let coordinate = Coordinate::new(
        props.get("groupId").unwrap_or_default(),
        props.get("artifactId").unwrap_or_default(),
        props.get("version").unwrap_or_default(),
    )?;
    Ok(coordinate.with_classifier(props.get("classifier").map(str::to_owned)))
}
