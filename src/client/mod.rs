//! Metrics service client
//!
//! The annotation task only needs one call: post an annotation to a stream.
//! Keeping it behind a trait lets tests and embedders swap the transport.

mod librato;

pub use librato::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, LibratoClient};

use crate::auth::Credentials;
use crate::error::Result;
use crate::types::{Annotation, AnnotationResponse};
use async_trait::async_trait;

/// Client for the annotations endpoint of a metrics service
#[async_trait]
pub trait MetricsClient: Send + Sync {
    /// Authenticate with `credentials` and `POST /annotations/{name}`
    ///
    /// Returns the parsed response body. A body carrying `errors` is still
    /// `Ok`; only transport failures and unrecognizable responses are `Err`.
    async fn post_annotation(
        &self,
        credentials: &Credentials,
        name: &str,
        annotation: &Annotation,
    ) -> Result<AnnotationResponse>;
}
