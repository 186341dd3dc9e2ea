//! Picking one artifact when a checksum matches several.
//!
//! The same bytes are often published under more than one coordinate
//! (relocations, re-uploads under a new group). The jar's file name is the
//! only other hint, so each doc is scored against an artifact/version guess
//! taken from it.

use jarbom_schema::CentralDoc;

/// Artifact and version guessed from a file name like `lib-2.0.jar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameGuess {
    /// Everything before the last `-` that precedes the extension, or the
    /// whole file name when there is no usable `-`.
    pub artifact: String,
    /// Between that `-` and the extension; empty when there is no `-`.
    pub version: String,
}

impl NameGuess {
    /// Split `file_name` at the last `-` before its final `.`.
    ///
    /// Without such a `-`, or with one only at the very start, the artifact
    /// is the whole file name and the version is empty.
    pub fn from_file_name(file_name: &str) -> Self {
        let stem_end = file_name.rfind('.').unwrap_or(file_name.len());
        let stem = &file_name[..stem_end];

        match stem.rfind('-') {
            Some(dash) if dash > 0 => Self {
                artifact: stem[..dash].to_string(),
                version: stem[dash + 1..].to_string(),
            },
            _ => Self {
                artifact: file_name.to_string(),
                version: String::new(),
            },
        }
    }

    /// 0, 1 or 2: one point each for a matching artifact and version.
    pub fn score(&self, doc: &CentralDoc) -> u8 {
        u8::from(doc.a == self.artifact) + u8::from(doc.v == self.version)
    }
}

/// Choose among the docs returned for one checksum.
///
/// A single doc is returned as is. With several, the first doc with the
/// strictly highest score wins, so ties go to the earliest doc in the
/// order the service returned them. `None` only for an empty slice.
pub fn best_match<'a>(docs: &'a [CentralDoc], file_name: &str) -> Option<&'a CentralDoc> {
    let (first, rest) = docs.split_first()?;
    if rest.is_empty() {
        return Some(first);
    }

    let guess = NameGuess::from_file_name(file_name);
    let mut best = first;
    let mut best_score = guess.score(first);
    for doc in rest {
        let score = guess.score(doc);
        if score > best_score {
            best = doc;
            best_score = score;
        }
    }
    Some(best)
}
