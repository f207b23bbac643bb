//! CLI commands
//!
//! Command implementations for the `librato-annotate` binary.

mod annotate;
mod progress;
mod style;

pub use annotate::{AnnotateOptions, run_annotate};
