//! Shared types for jarbom: Maven coordinates, the dependency manifest, and
//! the wire format of the remote checksum index.

pub mod central;
pub mod coordinate;
pub mod hash;
pub mod manifest;

// Re-exports
pub use central::{CentralDoc, CentralResponse};
pub use coordinate::{Coordinate, CoordinateError, DependencyRecord};
pub use hash::Sha1Digest;
pub use manifest::Manifest;

/// File extension that marks a jar candidate (case-sensitive).
pub const JAR_EXTENSION: &str = ".jar";
