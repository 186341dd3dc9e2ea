//! Content digests.

use serde::{Deserialize, Deserializer, Serialize};

/// A validated SHA-1 digest (40 lowercase hex characters).
///
/// This is the exact form the remote index expects in its `q=1:<sha1>` query,
/// so the value is normalized to lowercase at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sha1Digest(String);

impl Sha1Digest {
    /// Render raw digest bytes as lowercase hex.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Create a new `Sha1Digest`, validating the input.
    ///
    /// # Errors
    ///
    /// Returns an error string if `s` is not exactly 40 ASCII hex characters.
    pub fn new(s: &str) -> Result<Self, String> {
        if s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(format!("Invalid SHA1 digest: expected 40 hex chars, got '{s}'"))
        }
    }

    /// Return the inner hex string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Sha1Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Sha1Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Sha1Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
