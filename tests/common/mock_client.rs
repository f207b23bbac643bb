//! Mock metrics client and recording reporter for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use librato_annotate::annotate::Reporter;
use librato_annotate::auth::Credentials;
use librato_annotate::client::MetricsClient;
use librato_annotate::error::{Error, Result};
use librato_annotate::types::{Annotation, AnnotationResponse};
use std::sync::Mutex;

/// Call record for `post_annotation`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAnnotationCall {
    pub credentials: Credentials,
    pub name: String,
    pub annotation: Annotation,
}

/// Simple mock client for testing
///
/// Features:
/// - Call tracking for verification
/// - Configurable response body
/// - Error injection for transport failures
pub struct MockMetricsClient {
    response: Mutex<AnnotationResponse>,
    calls: Mutex<Vec<PostAnnotationCall>>,
    error: Mutex<Option<String>>,
}

impl MockMetricsClient {
    /// Mock that accepts every annotation
    pub fn accepting() -> Self {
        Self::responding(AnnotationResponse {
            id: Some(1),
            errors: None,
        })
    }

    /// Mock that answers with `response`
    pub fn responding(response: AnnotationResponse) -> Self {
        Self {
            response: Mutex::new(response),
            calls: Mutex::new(Vec::new()),
            error: Mutex::new(None),
        }
    }

    /// Make `post_annotation` return a transport error
    pub fn fail_post(&self, msg: &str) {
        *self.error.lock().unwrap() = Some(msg.to_string());
    }

    /// All recorded `post_annotation` calls
    pub fn calls(&self) -> Vec<PostAnnotationCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The single recorded call, panicking otherwise
    pub fn only_call(&self) -> PostAnnotationCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got: {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl MetricsClient for MockMetricsClient {
    async fn post_annotation(
        &self,
        credentials: &Credentials,
        name: &str,
        annotation: &Annotation,
    ) -> Result<AnnotationResponse> {
        self.calls.lock().unwrap().push(PostAnnotationCall {
            credentials: credentials.clone(),
            name: name.to_string(),
            annotation: annotation.clone(),
        });

        if let Some(msg) = self.error.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        Ok(self.response.lock().unwrap().clone())
    }
}

/// Level of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Reporter that records every line
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((Level::Info, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((Level::Error, message.to_string()));
    }
}
