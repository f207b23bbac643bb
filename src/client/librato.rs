//! Librato API client using reqwest

use crate::auth::Credentials;
use crate::client::MetricsClient;
use crate::error::{Error, Result};
use crate::types::{Annotation, AnnotationResponse, annotation_path};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public Librato metrics API
pub const DEFAULT_API_URL: &str = "https://metrics-api.librato.com/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest response excerpt quoted in an error message
const MAX_BODY_EXCERPT: usize = 200;

/// Librato service using reqwest
pub struct LibratoClient {
    client: Client,
    base_url: String,
}

impl LibratoClient {
    /// Create a client for the public Librato API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client for a custom API base URL (e.g. a proxy)
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("librato-annotate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MetricsClient for LibratoClient {
    async fn post_annotation(
        &self,
        credentials: &Credentials,
        name: &str,
        annotation: &Annotation,
    ) -> Result<AnnotationResponse> {
        let url = self.api_url(&annotation_path(name));
        debug!(
            %url,
            title = %annotation.title,
            start_time = annotation.start_time,
            "posting annotation"
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(ACCEPT, "application/json")
            .json(annotation)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "librato responded");

        if body.trim().is_empty() {
            if status.is_success() {
                return Ok(AnnotationResponse::default());
            }
            return Err(Error::Api(status.to_string()));
        }

        match serde_json::from_str::<AnnotationResponse>(&body) {
            // Rejections (400/422) carry an `errors` body; interpret it upstream
            Ok(parsed) if status.is_success() || parsed.errors.is_some() => Ok(parsed),
            Ok(_) => Err(Error::Api(format!("{status}: {}", excerpt(&body)))),
            Err(e) if status.is_success() => {
                Err(Error::Api(format!("unexpected response body: {e}")))
            }
            Err(_) => Err(Error::Api(format!("{status}: {}", excerpt(&body)))),
        }
    }
}

fn excerpt(body: &str) -> &str {
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_client_targets_librato() {
        let client = LibratoClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn test_rejects_invalid_url() {
        let err = LibratoClient::with_base_url("not a url", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    #[serial]
    fn test_rejects_non_http_scheme() {
        let err = LibratoClient::with_base_url("ftp://example.com/v1", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(err.to_string().contains("unsupported scheme ftp"));
    }

    #[test]
    #[serial]
    fn test_api_url_strips_trailing_slash() {
        let client =
            LibratoClient::with_base_url("https://example.com/v1/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url(), "https://example.com/v1");
        assert_eq!(
            client.api_url("/annotations/deploys"),
            "https://example.com/v1/annotations/deploys"
        );
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(500);
        assert_eq!(excerpt(&long).len(), MAX_BODY_EXCERPT);
        assert_eq!(excerpt("  short  "), "short");
    }
}
