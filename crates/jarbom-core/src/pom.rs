//! Serialize a manifest as a Maven BOM (`pom.xml` with a
//! `dependencyManagement` section).

use std::io::{self, Write};
use std::path::Path;

use jarbom_schema::Manifest;

use crate::config::BomIdentity;

/// Render the BOM document.
pub fn render(identity: &BomIdentity, manifest: &Manifest) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<project xmlns=\"http://maven.apache.org/POM/4.0.0\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"http://maven.apache.org/POM/4.0.0 \
         https://maven.apache.org/xsd/maven-4.0.0.xsd\">\n",
    );
    element(&mut out, 1, "modelVersion", "4.0.0");
    element(&mut out, 1, "groupId", &identity.group_id);
    element(&mut out, 1, "artifactId", &identity.artifact_id);
    element(&mut out, 1, "version", &identity.version);
    element(&mut out, 1, "packaging", "pom");

    if !manifest.is_empty() {
        out.push_str("  <dependencyManagement>\n    <dependencies>\n");
        for record in manifest {
            let coordinate = record.coordinate();
            out.push_str("      <dependency>\n");
            element(&mut out, 4, "groupId", coordinate.group());
            element(&mut out, 4, "artifactId", coordinate.artifact());
            element(&mut out, 4, "version", coordinate.version());
            if let Some(classifier) = coordinate.classifier() {
                element(&mut out, 4, "classifier", classifier);
            }
            out.push_str("      </dependency>\n");
        }
        out.push_str("    </dependencies>\n  </dependencyManagement>\n");
    }

    out.push_str("</project>\n");
    out
}

/// Write the BOM to `path` atomically: a sibling temp file is written and
/// then renamed over the target, so readers never see a partial pom.
///
/// # Errors
///
/// Returns an I/O error if the temp file cannot be written or renamed.
pub fn write(path: &Path, identity: &BomIdentity, manifest: &Manifest) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(render(identity, manifest).as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn element(out: &mut String, depth: usize, name: &str, value: &str) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}<{name}>{}</{name}>\n", escape(value)));
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarbom_schema::{Coordinate, DependencyRecord};

    fn manifest() -> Manifest {
        vec![
            Coordinate::new("com.z", "w", "9.9").unwrap(),
            Coordinate::new("com.x", "y", "1.2.3")
                .unwrap()
                .with_classifier(Some("tests".into())),
        ]
        .into_iter()
        .map(DependencyRecord::new)
        .collect()
    }

    #[test]
    fn renders_dependency_management_in_order() {
        let xml = render(&BomIdentity::default(), &manifest());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("  <groupId>extracted</groupId>\n"));
        assert!(xml.contains("  <artifactId>bom</artifactId>\n"));
        assert!(xml.contains("  <version>1.0.0-SNAPSHOT</version>\n"));
        assert!(xml.contains("<packaging>pom</packaging>"));
        assert!(xml.contains("<classifier>tests</classifier>"));

        let x = xml.find("<groupId>com.x</groupId>").unwrap();
        let z = xml.find("<groupId>com.z</groupId>").unwrap();
        assert!(x < z);
        assert_eq!(xml.matches("<classifier>").count(), 1);
        assert_eq!(xml.matches("<dependency>").count(), 2);
    }

    #[test]
    fn empty_manifest_has_no_dependency_management() {
        let xml = render(&BomIdentity::default(), &Manifest::default());
        assert!(!xml.contains("dependencyManagement"));
        assert!(xml.trim_end().ends_with("</project>"));
    }

    #[test]
    fn escapes_markup() {
        let identity = BomIdentity {
            group_id: "a&b".into(),
            artifact_id: "<bom>".into(),
            version: "1".into(),
        };
        let xml = render(&identity, &Manifest::default());
        assert!(xml.contains("<groupId>a&amp;b</groupId>"));
        assert!(xml.contains("<artifactId>&lt;bom&gt;</artifactId>"));
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/pom.xml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale").unwrap();

        write(&path, &BomIdentity::default(), &manifest()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<groupId>com.z</groupId>"));
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
