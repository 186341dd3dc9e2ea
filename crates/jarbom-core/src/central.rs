//! Tier 2 backend: the checksum search index.
//!
//! [`ChecksumIndex`] is the seam the resolver talks to; [`CentralClient`]
//! is the HTTP implementation against Maven Central's `solrsearch` API.

use async_trait::async_trait;
use jarbom_schema::{CentralDoc, Sha1Digest};
use thiserror::Error;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://search.maven.org/solrsearch/select";

#[derive(Error, Debug)]
pub enum LookupError {
    #[cfg(feature = "network")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed index response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can list the artifacts published with a given SHA-1.
#[async_trait]
pub trait ChecksumIndex: Send + Sync {
    /// All docs whose content hashes to `sha1`, in the index's own order.
    /// An empty list means "unknown".
    async fn lookup(&self, sha1: &Sha1Digest) -> Result<Vec<CentralDoc>, LookupError>;
}

#[async_trait]
impl<T: ChecksumIndex + ?Sized> ChecksumIndex for std::sync::Arc<T> {
    async fn lookup(&self, sha1: &Sha1Digest) -> Result<Vec<CentralDoc>, LookupError> {
        (**self).lookup(sha1).await
    }
}

/// Parse a search response body into its docs.
///
/// # Errors
///
/// Returns [`LookupError::Parse`] unless the body has the
/// `{"response": {"docs": [...]}}` shape.
pub fn parse_response(body: &str) -> Result<Vec<CentralDoc>, LookupError> {
    let parsed: jarbom_schema::CentralResponse = serde_json::from_str(body)?;
    Ok(parsed.into_docs())
}

#[cfg(feature = "network")]
pub use client::CentralClient;

#[cfg(feature = "network")]
mod client {
    use std::time::Duration;

    use async_trait::async_trait;
    use jarbom_schema::{CentralDoc, Sha1Digest};
    use reqwest::Client;
    use tracing::debug;

    use super::{ChecksumIndex, LookupError, parse_response};

    /// HTTP client for the search index. One GET per lookup, no retries.
    #[derive(Debug, Clone)]
    pub struct CentralClient {
        client: Client,
        endpoint: String,
    }

    impl CentralClient {
        /// Build a client for `endpoint` with the given connect timeout.
        ///
        /// # Errors
        ///
        /// Returns [`LookupError::Http`] if the TLS backend cannot be
        /// initialized.
        pub fn new(endpoint: impl Into<String>, connect_timeout: Duration) -> Result<Self, LookupError> {
            let client = Client::builder()
                .user_agent(crate::USER_AGENT)
                .connect_timeout(connect_timeout)
                .http1_only()
                .build()?;
            Ok(Self {
                client,
                endpoint: endpoint.into(),
            })
        }

        /// The search endpoint.
        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    #[async_trait]
    impl ChecksumIndex for CentralClient {
        async fn lookup(&self, sha1: &Sha1Digest) -> Result<Vec<CentralDoc>, LookupError> {
            let query = format!("1:{sha1}");
            debug!(endpoint = %self.endpoint, %sha1, "Querying checksum index");

            let body = self
                .client
                .get(&self.endpoint)
                .query(&[("q", query.as_str())])
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;

            parse_response(&body)
        }
    }
}

#[cfg(all(test, feature = "network"))]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn sha() -> Sha1Digest {
        Sha1Digest::new("a9993e364706816aba3e25717850c26c9cd0d89d").unwrap()
    }

    #[tokio::test]
    async fn lookup_sends_sha1_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/solrsearch/select")
            .match_query(Matcher::UrlEncoded(
                "q".into(),
                "1:a9993e364706816aba3e25717850c26c9cd0d89d".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":{"numFound":1,"docs":[{"g":"com.z","a":"w","v":"9.9"}]}}"#)
            .create_async()
            .await;

        let endpoint = format!("{}/solrsearch/select", server.url());
        let client = CentralClient::new(endpoint, Duration::from_secs(5)).unwrap();
        let docs = client.lookup(&sha()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].g, "com.z");
        assert_eq!(docs[0].a, "w");
        assert_eq!(docs[0].v, "9.9");
    }

    #[tokio::test]
    async fn empty_docs_is_empty_list() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/select")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"response":{"numFound":0,"docs":[]}}"#)
            .create_async()
            .await;

        let client =
            CentralClient::new(format!("{}/select", server.url()), Duration::from_secs(5)).unwrap();
        assert!(client.lookup(&sha()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_error_is_http_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/select")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client =
            CentralClient::new(format!("{}/select", server.url()), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.lookup(&sha()).await,
            Err(LookupError::Http(_))
        ));
    }

    #[tokio::test]
    async fn wrong_shape_is_parse_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/select")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"docs":[{"g":"x","a":"y","v":"z"}]}"#)
            .create_async()
            .await;

        let client =
            CentralClient::new(format!("{}/select", server.url()), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.lookup(&sha()).await,
            Err(LookupError::Parse(_))
        ));
    }

    #[test]
    fn parse_response_handles_missing_docs() {
        assert!(parse_response(r#"{"response":{}}"#).unwrap().is_empty());
        assert!(parse_response("not json").is_err());
    }
}
