//! Maven coordinates and the records the manifest is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur when building a [`Coordinate`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CoordinateError {
    /// A required field (groupId, artifactId or version) is missing or blank.
    #[error("Empty field: {0}")]
    EmptyField(&'static str),
}

/// Maven-style coordinate of a jar: group, artifact, version and an optional
/// classifier.
///
/// Fields are private; a coordinate never changes after it is produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
}

impl Coordinate {
    /// Create a coordinate without a classifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::EmptyField`] if any of the three parts is
    /// empty after trimming.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, CoordinateError> {
        let group = group.into();
        let artifact = artifact.into();
        let version = version.into();

        if group.trim().is_empty() {
            return Err(CoordinateError::EmptyField("groupId"));
        }
        if artifact.trim().is_empty() {
            return Err(CoordinateError::EmptyField("artifactId"));
        }
        if version.trim().is_empty() {
            return Err(CoordinateError::EmptyField("version"));
        }

        Ok(Self {
            group,
            artifact,
            version,
            classifier: None,
        })
    }

    /// Attach a classifier. Blank classifiers are treated as absent.
    pub fn with_classifier(mut self, classifier: Option<String>) -> Self {
        self.classifier = classifier.filter(|c| !c.trim().is_empty());
        self
    }

    /// The `groupId`.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The `artifactId`.
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// The version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The classifier, if any.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Management key: `group:artifact[:classifier]`.
    pub fn management_key(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!("{}:{}:{classifier}", self.group, self.artifact),
            None => format!("{}:{}", self.group, self.artifact),
        }
    }

    /// Dedup key: `managementKey:version`.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.management_key(), self.version)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dedup_key())
    }
}

/// A coordinate as it is recorded in the manifest, keyed for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    coordinate: Coordinate,
    management_key: String,
}

impl DependencyRecord {
    /// Wrap a coordinate, computing its management key once.
    pub fn new(coordinate: Coordinate) -> Self {
        let management_key = coordinate.management_key();
        Self {
            coordinate,
            management_key,
        }
    }

    /// The recorded coordinate.
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// `group:artifact[:classifier]`
    pub fn management_key(&self) -> &str {
        &self.management_key
    }

    /// `managementKey:version`, the ordering and uniqueness key of the manifest.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.management_key, self.coordinate.version())
    }
}

impl From<Coordinate> for DependencyRecord {
    fn from(coordinate: Coordinate) -> Self {
        Self::new(coordinate)
    }
}
