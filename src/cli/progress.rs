//! Styled reporting and a spinner around the API call

use crate::cli::style::{Stylize, check, cross, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use librato_annotate::annotate::Reporter;
use librato_annotate::auth::Credentials;
use librato_annotate::client::MetricsClient;
use librato_annotate::error::Result;
use librato_annotate::types::{Annotation, AnnotationResponse};
use std::time::Duration;

/// Reporter printing the submission line to the terminal
///
/// Success goes to stdout, failure to stderr.
pub struct CliReporter;

impl Reporter for CliReporter {
    fn info(&self, message: &str) {
        println!("{} {}", check(), message.success());
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", cross(), message.error());
    }
}

/// Wraps a client and shows a spinner while a request is in flight
///
/// indicatif draws to stderr and stays hidden when it is not a terminal.
pub struct SpinnerClient<C> {
    inner: C,
}

impl<C> SpinnerClient<C> {
    /// Wrap `inner`
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: MetricsClient> MetricsClient for SpinnerClient<C> {
    async fn post_annotation(
        &self,
        credentials: &Credentials,
        name: &str,
        annotation: &Annotation,
    ) -> Result<AnnotationResponse> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!("Sending annotation to {}...", name.accent()));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let result = self.inner.post_annotation(credentials, name, annotation).await;
        spinner.finish_and_clear();
        result
    }
}
