//! Terminal output for extraction runs.

use std::path::Path;
use std::time::Instant;

use jarbom_core::resolver::{ResolveError, Tier};
use jarbom_core::{Reporter, RunSummary};
use jarbom_schema::Coordinate;

/// Prints one line per jar and a closing summary.
#[derive(Debug)]
pub struct TerminalReporter {
    quiet: bool,
    started: Instant,
}

impl TerminalReporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            started: Instant::now(),
        }
    }
}

/// `✓ name  g:a:v (tier)`
pub fn format_resolved(name: &str, coordinate: &Coordinate, via: Tier) -> String {
    format!("  ✓ {name:<40} {coordinate} ({via})")
}

/// `? name  reason`
pub fn format_unresolved(name: &str, reason: &ResolveError) -> String {
    format!("  ? {name:<40} {reason}")
}

/// The closing block: counts and elapsed time.
pub fn format_summary(summary: &RunSummary, elapsed_secs: f64) -> String {
    let mut out = format!(
        "{} jars scanned in {elapsed_secs:.1}s: {} from pom.properties, {} by checksum, {} unresolved",
        summary.scanned, summary.embedded, summary.checksum, summary.unresolved
    );
    if summary.sunk > 0 {
        out.push_str(&format!(" ({} copied aside)", summary.sunk));
    }
    out.push_str(&format!("\n{} dependencies in BOM", summary.manifest.len()));
    out
}

impl Reporter for TerminalReporter {
    fn candidate(&self, _name: &str) {}

    fn resolved(&self, name: &str, coordinate: &Coordinate, via: Tier) {
        if !self.quiet {
            println!("{}", format_resolved(name, coordinate, via));
        }
    }

    fn unresolved(&self, name: &str, reason: &ResolveError) {
        if !self.quiet {
            println!("{}", format_unresolved(name, reason));
        }
    }

    fn sunk(&self, name: &str, dest: &Path) {
        if !self.quiet {
            println!("    → {name} copied to {}", dest.display());
        }
    }

    fn summary(&self, summary: &RunSummary) {
        let elapsed = self.started.elapsed().as_secs_f64();
        println!();
        println!("{}", format_summary(summary, elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_line() {
        let coordinate = Coordinate::new("com.x", "y", "1.2.3").unwrap();
        let line = format_resolved("y-1.2.3.jar", &coordinate, Tier::Embedded);
        assert!(line.contains("y-1.2.3.jar"));
        assert!(line.ends_with("com.x:y:1.2.3 (pom.properties)"));
    }

    #[test]
    fn unresolved_line() {
        let line = format_unresolved("mystery.jar", &ResolveError::Offline);
        assert!(line.contains("mystery.jar"));
        assert!(line.contains("checksum lookups are disabled"));
    }

    #[test]
    fn summary_mentions_sink_only_when_used() {
        let mut summary = RunSummary {
            scanned: 3,
            embedded: 1,
            checksum: 1,
            unresolved: 1,
            ..RunSummary::default()
        };
        let text = format_summary(&summary, 0.25);
        assert!(text.starts_with("3 jars scanned in 0.2s") || text.starts_with("3 jars scanned in 0.3s"));
        assert!(!text.contains("copied aside"));
        assert!(text.ends_with("0 dependencies in BOM"));

        summary.sunk = 1;
        assert!(format_summary(&summary, 0.0).contains("(1 copied aside)"));
    }
}
