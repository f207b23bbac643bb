//! Test data factories
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use librato_annotate::annotate::AnnotationTask;
use librato_annotate::types::{AnnotationResponse, ApiErrors};

pub const USERNAME: &str = "ops@example.com";
pub const PASSWORD: &str = "0123456789abcdef";
pub const STREAM: &str = "deployments";
pub const TITLE: &str = "Deployed api v1.4.0";

/// Task with every required field set explicitly
pub fn make_task() -> AnnotationTask {
    AnnotationTask::new()
        .with_username(USERNAME)
        .with_password(PASSWORD)
        .with_name(STREAM)
        .with_title(TITLE)
}

/// Response Librato sends for a rejected annotation
pub fn make_rejection(messages: &[&str]) -> AnnotationResponse {
    AnnotationResponse {
        id: None,
        errors: Some(ApiErrors {
            request: messages.iter().map(ToString::to_string).collect(),
            ..ApiErrors::default()
        }),
    }
}
