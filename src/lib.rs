//! librato-annotate - deployment annotations for Librato
//!
//! Library for posting a single annotation event to the Librato API so that
//! metric graphs show when a deployment happened. The `librato-annotate`
//! binary is a thin host around [`annotate::AnnotationTask`].

pub mod annotate;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;
