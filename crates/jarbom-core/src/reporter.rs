//! Reporter trait for dependency injection
//!
//! Lets the run report per-jar progress without being coupled to a
//! terminal. The CLI supplies a printing implementation; library callers
//! and tests use [`NullReporter`].

use std::path::Path;

use jarbom_schema::Coordinate;

use crate::resolver::{ResolveError, Tier};
use crate::run::RunSummary;

pub trait Reporter: Send + Sync {
    /// A candidate is about to be resolved.
    fn candidate(&self, name: &str);

    /// A candidate was identified.
    fn resolved(&self, name: &str, coordinate: &Coordinate, via: Tier);

    /// A candidate could not be identified.
    fn unresolved(&self, name: &str, reason: &ResolveError);

    /// An unresolved candidate was copied to the unknown-jar directory.
    fn sunk(&self, name: &str, dest: &Path);

    /// The run finished.
    fn summary(&self, summary: &RunSummary);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn candidate(&self, name: &str) {
        (**self).candidate(name);
    }
    fn resolved(&self, name: &str, coordinate: &Coordinate, via: Tier) {
        (**self).resolved(name, coordinate, via);
    }
    fn unresolved(&self, name: &str, reason: &ResolveError) {
        (**self).unresolved(name, reason);
    }
    fn sunk(&self, name: &str, dest: &Path) {
        (**self).sunk(name, dest);
    }
    fn summary(&self, summary: &RunSummary) {
        (**self).summary(summary);
    }
}

/// A no-op reporter for silent runs (library use, tests).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn candidate(&self, _: &str) {}
    fn resolved(&self, _: &str, _: &Coordinate, _: Tier) {}
    fn unresolved(&self, _: &str, _: &ResolveError) {}
    fn sunk(&self, _: &str, _: &Path) {}
    fn summary(&self, _: &RunSummary) {}
}
