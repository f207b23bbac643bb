//! Core types for librato-annotate

use crate::auth::Credentials;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Annotation payload as sent to `POST /annotations/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Title shown on hover in the Librato UI
    pub title: String,
    /// Event time in Unix epoch seconds
    pub start_time: i64,
    /// Optional longer description, omitted from the JSON when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A fully resolved annotation submission
///
/// Lives for exactly one invocation: built right before the request is sent
/// and dropped once the response has been interpreted.
#[derive(Debug, Clone)]
pub struct AnnotationRequest {
    /// Librato credentials
    pub credentials: Credentials,
    /// Annotation stream name
    pub name: String,
    /// Payload to post
    pub annotation: Annotation,
    /// Whether a rejected annotation should stop the build
    pub halt_on_failure: bool,
}

impl AnnotationRequest {
    /// API path the annotation is posted to, with the stream name encoded
    pub fn path(&self) -> String {
        annotation_path(&self.name)
    }
}

/// API path for an annotation stream
pub fn annotation_path(name: &str) -> String {
    format!("/annotations/{}", urlencoding::encode(name))
}

/// Parsed body of the Librato response
///
/// A created annotation comes back as the event itself; a rejected one
/// carries an `errors` object instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationResponse {
    /// Event ID assigned by Librato
    #[serde(default)]
    pub id: Option<u64>,
    /// Error details when the annotation was rejected
    #[serde(default)]
    pub errors: Option<ApiErrors>,
}

/// The `errors` object of a rejected request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrors {
    /// Request-level messages
    #[serde(default)]
    pub request: Vec<String>,
    /// Per-parameter messages, e.g. `{"title": ["is not present"]}`
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
    /// Server-side messages
    #[serde(default)]
    pub system: Vec<String>,
}

impl ApiErrors {
    /// The message surfaced to the user
    ///
    /// Only the first `request` entry is reported. Bodies without one fall
    /// back to the first parameter or system message.
    pub fn first_message(&self) -> String {
        if let Some(msg) = self.request.first() {
            return msg.clone();
        }

        if let Some((param, value)) = self.params.iter().next() {
            let detail = match value {
                serde_json::Value::Array(items) => items
                    .first()
                    .map(value_text)
                    .unwrap_or_default(),
                other => value_text(other),
            };
            return format!("{param} {detail}").trim_end().to_string();
        }

        self.system
            .first()
            .cloned()
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
