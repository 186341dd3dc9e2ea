//! Builders for the jars and tarballs the tests feed through the pipeline.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

/// Write a jar containing `entries` (name, content) to `path`.
pub(crate) fn write_jar(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// A jar whose `pom.properties` names `group:artifact:version`.
pub(crate) fn write_maven_jar(path: &Path, group: &str, artifact: &str, version: &str) {
    let marker = format!("META-INF/maven/{group}/{artifact}/pom.properties");
    let props = format!("groupId={group}\nartifactId={artifact}\nversion={version}\n");
    write_jar(
        path,
        &[
            ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
            (marker.as_str(), props.as_str()),
        ],
    );
}

/// A jar with classes but no Maven metadata.
pub(crate) fn write_plain_jar(path: &Path, class: &str) {
    write_jar(path, &[(class, "cafebabe")]);
}

/// One tar member.
pub(crate) enum TarItem {
    Dir(&'static str),
    File(&'static str, Vec<u8>),
}

/// Write a tar (gzipped when `gzip`) holding `items` in order.
pub(crate) fn write_tar(path: &Path, items: &[TarItem], gzip: bool) {
    let file = File::create(path).unwrap();
    if gzip {
        let encoder = GzEncoder::new(file, Compression::default());
        append_items(tar::Builder::new(encoder), items)
            .finish()
            .unwrap();
    } else {
        append_items(tar::Builder::new(file), items);
    }
}

fn append_items<W: Write>(mut builder: tar::Builder<W>, items: &[TarItem]) -> W {
    for item in items {
        let mut header = tar::Header::new_gnu();
        match item {
            TarItem::Dir(name) => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                builder
                    .append_data(&mut header, name, std::io::empty())
                    .unwrap();
            }
            TarItem::File(name, data) => {
                header.set_entry_type(tar::EntryType::Regular);
                header.set_size(data.len() as u64);
                header.set_mode(0o644);
                builder.append_data(&mut header, name, &data[..]).unwrap();
            }
        }
    }
    builder.into_inner().unwrap()
}
