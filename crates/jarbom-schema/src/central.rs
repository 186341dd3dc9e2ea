//! Wire format of the Maven Central search API (`solrsearch/select`).
//!
//! Only the fields jarbom reads are modelled; everything else in the payload
//! (`responseHeader`, `numFound`, per-doc `id`, `p`, `timestamp`, ...) is
//! ignored.

use crate::coordinate::{Coordinate, CoordinateError};
use serde::{Deserialize, Serialize};

/// Top-level response: `{ "response": { "docs": [...] } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralResponse {
    /// The `response` object. Required; its absence is a parse failure.
    pub response: CentralBody,
}

/// The `response` object of a search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CentralBody {
    /// Matching documents. Absent and `null` both mean "no match".
    #[serde(default)]
    pub docs: Option<Vec<CentralDoc>>,
}

/// One matching artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralDoc {
    /// groupId
    pub g: String,
    /// artifactId
    pub a: String,
    /// version
    pub v: String,
}

impl CentralResponse {
    /// Consume the response, yielding its docs in service order.
    pub fn into_docs(self) -> Vec<CentralDoc> {
        self.response.docs.unwrap_or_default()
    }
}

impl CentralDoc {
    /// Convert to a coordinate (never carries a classifier).
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::EmptyField`] if the index returned a blank
    /// field.
    pub fn to_coordinate(&self) -> Result<Coordinate, CoordinateError> {
        Coordinate::new(self.g.clone(), self.a.clone(), self.v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_central_payload() {
        let body = r#"{
            "responseHeader": {"status": 0},
            "response": {
                "numFound": 1,
                "start": 0,
                "docs": [{"id": "com.z:w:9.9", "g": "com.z", "a": "w", "v": "9.9", "p": "jar"}]
            }
        }"#;
        let parsed: CentralResponse = serde_json::from_str(body).unwrap();
        let docs = parsed.into_docs();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].g, "com.z");
    }

    #[test]
    fn absent_or_null_docs_are_empty() {
        let parsed: CentralResponse = serde_json::from_str(r#"{"response": {}}"#).unwrap();
        assert!(parsed.into_docs().is_empty());
        let parsed: CentralResponse =
            serde_json::from_str(r#"{"response": {"docs": null}}"#).unwrap();
        assert!(parsed.into_docs().is_empty());
    }

    #[test]
    fn other_shapes_fail() {
        assert!(serde_json::from_str::<CentralResponse>(r#"{"docs": []}"#).is_err());
        assert!(serde_json::from_str::<CentralResponse>("[]").is_err());
    }
}
