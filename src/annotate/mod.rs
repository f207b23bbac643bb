//! Annotation submission
//!
//! Resolves the task's settings, builds the payload, posts it once and
//! interprets the answer:
//! 1. Resolution - every required field must be set before any network call
//! 2. Submission - one authenticated POST through a [`MetricsClient`](crate::client::MetricsClient)
//! 3. Interpretation - report success, report failure, or halt

mod report;
mod task;

pub use report::{NoopReporter, Reporter, TracingReporter};
pub use task::{AnnotationTask, FAILURE_PREFIX, SUCCESS_MESSAGE, SubmitOutcome, send};
