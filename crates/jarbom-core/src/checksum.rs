//! Streaming SHA-1 of a byte source.
//!
//! The search index keys artifacts by SHA-1, so this is the only digest
//! jarbom computes.

use jarbom_schema::Sha1Digest;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024;

/// Compute the SHA-1 of everything `reader` yields, 64 KiB at a time.
///
/// # Errors
///
/// Returns the underlying I/O error if the reader fails before EOF; no
/// digest is produced in that case.
pub fn sha1_reader(reader: impl Read) -> io::Result<Sha1Digest> {
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, reader);
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let count = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..count]);
    }

    Ok(Sha1Digest::from_bytes(hasher.finalize().into()))
}

/// Compute the SHA-1 of a file on disk.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read to completion.
pub fn sha1_file(path: &Path) -> io::Result<Sha1Digest> {
    sha1_reader(File::open(path)?)
}
