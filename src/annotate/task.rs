//! The annotation task: settings, resolution and submission

use crate::annotate::Reporter;
use crate::auth::{Credentials, resolve_credential};
use crate::client::MetricsClient;
use crate::config::{PASSWORD_PROPERTY, PropertySource, USERNAME_PROPERTY};
use crate::error::{Error, Result};
use crate::types::{Annotation, AnnotationRequest, AnnotationResponse};
use chrono::Utc;
use std::fmt;
use tracing::debug;

/// Reported when Librato accepts the annotation
pub const SUCCESS_MESSAGE: &str = "Successfully sent annotation to Librato";

/// Prefix of the message for a rejected annotation
pub const FAILURE_PREFIX: &str = "Failed to send annotation to Librato: ";

/// Result of a submission that reached Librato
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Annotation accepted
    Sent {
        /// Event ID assigned by Librato, when returned
        id: Option<u64>,
    },
    /// Annotation rejected; reported, build continues
    Failed(String),
    /// Annotation rejected and the task halts on failure; nothing reported
    Halted(String),
}

impl SubmitOutcome {
    /// Whether the annotation was accepted
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    /// Turn a halted outcome into [`Error::Submission`]
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Sent { .. } | Self::Failed(_) => Ok(()),
            Self::Halted(message) => Err(Error::Submission(message)),
        }
    }
}

/// Settings for sending one annotation
///
/// Fields left `None` are resolved at submission time; credentials fall
/// back to the `librato.username` / `librato.password` properties.
#[derive(Clone, Default)]
pub struct AnnotationTask {
    /// Librato username
    pub username: Option<String>,
    /// Librato password (API token)
    pub password: Option<String>,
    /// Annotation stream name
    pub name: Option<String>,
    /// Annotation title, shown on hover
    pub title: Option<String>,
    /// Annotation description, shown on hover
    pub description: Option<String>,
    /// Stop the build when Librato rejects the annotation
    pub halt_on_failure: bool,
}

impl fmt::Debug for AnnotationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationTask")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("halt_on_failure", &self.halt_on_failure)
            .finish()
    }
}

impl AnnotationTask {
    /// Create a task with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Librato username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the Librato password
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the annotation stream name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the annotation title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the annotation description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set whether a rejected annotation halts the build
    #[must_use]
    pub const fn with_halt_on_failure(mut self, halt: bool) -> Self {
        self.halt_on_failure = halt;
        self
    }

    /// Username, falling back to `librato.username`
    pub fn resolve_username(&self, props: &dyn PropertySource) -> Result<String> {
        let cred = resolve_credential(
            self.username.as_deref(),
            props,
            USERNAME_PROPERTY,
            "Username",
        )?;
        debug!(source = ?cred.source, "resolved username");
        Ok(cred.value)
    }

    /// Password, falling back to `librato.password`
    pub fn resolve_password(&self, props: &dyn PropertySource) -> Result<String> {
        let cred = resolve_credential(
            self.password.as_deref(),
            props,
            PASSWORD_PROPERTY,
            "Password",
        )?;
        debug!(source = ?cred.source, "resolved password");
        Ok(cred.value)
    }

    /// Annotation stream name; no fallback
    pub fn resolve_name(&self) -> Result<String> {
        self.name.clone().ok_or_else(|| Error::not_set("Name"))
    }

    /// Annotation title; no fallback
    pub fn resolve_title(&self) -> Result<String> {
        self.title.clone().ok_or_else(|| Error::not_set("Title"))
    }

    /// Annotation description, if any
    pub fn resolve_description(&self) -> Option<String> {
        self.description.clone()
    }

    /// Resolve every field and build the request
    ///
    /// Fields are resolved in order (username, password, name, title,
    /// description) and the first missing one fails. `start_time` is the
    /// current time.
    pub fn request(&self, props: &dyn PropertySource) -> Result<AnnotationRequest> {
        let username = self.resolve_username(props)?;
        let password = self.resolve_password(props)?;
        let name = self.resolve_name()?;
        let title = self.resolve_title()?;
        let description = self.resolve_description();

        Ok(AnnotationRequest {
            credentials: Credentials::new(username, password),
            name,
            annotation: Annotation {
                title,
                start_time: Utc::now().timestamp(),
                description,
            },
            halt_on_failure: self.halt_on_failure,
        })
    }

    /// Resolve, send and interpret one annotation
    pub async fn submit(
        &self,
        client: &dyn MetricsClient,
        props: &dyn PropertySource,
        reporter: &dyn Reporter,
    ) -> Result<SubmitOutcome> {
        let request = self.request(props)?;
        send(&request, client, reporter).await
    }
}

/// Send an already resolved request and interpret the response
///
/// Transport errors from the client are returned as-is.
pub async fn send(
    request: &AnnotationRequest,
    client: &dyn MetricsClient,
    reporter: &dyn Reporter,
) -> Result<SubmitOutcome> {
    let response = client
        .post_annotation(&request.credentials, &request.name, &request.annotation)
        .await?;
    Ok(interpret(response, request.halt_on_failure, reporter))
}

fn interpret(
    response: AnnotationResponse,
    halt_on_failure: bool,
    reporter: &dyn Reporter,
) -> SubmitOutcome {
    let Some(errors) = response.errors else {
        reporter.info(SUCCESS_MESSAGE);
        return SubmitOutcome::Sent { id: response.id };
    };

    let message = format!("{FAILURE_PREFIX}{}", errors.first_message());
    if halt_on_failure {
        SubmitOutcome::Halted(message)
    } else {
        reporter.error(&message);
        SubmitOutcome::Failed(message)
    }
}
