//! Annotate command - send one annotation to Librato

use crate::cli::progress::{CliReporter, SpinnerClient};
use crate::cli::style::{Stylize, arrow};
use anstream::println;
use librato_annotate::annotate::{AnnotationTask, send};
use librato_annotate::client::LibratoClient;
use librato_annotate::config::{EnvProperties, LayeredProperties, Properties, user_properties_path};
use librato_annotate::error::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Everything the annotate command needs besides the task itself
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// `-D key=value` definitions, highest precedence
    pub defines: Vec<(String, String)>,
    /// Properties files, earlier files take precedence
    pub property_files: Vec<PathBuf>,
    /// Librato API base URL
    pub api_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Print the request instead of sending it
    pub dry_run: bool,
}

/// Build the property chain: defines, files, user file, environment
pub fn load_properties(options: &AnnotateOptions) -> Result<LayeredProperties> {
    let mut defines = Properties::new();
    for (key, value) in &options.defines {
        defines.set(key.as_str(), value.as_str());
    }

    let mut props = LayeredProperties::new().with_layer(defines);

    for path in &options.property_files {
        debug!(path = %path.display(), "loading properties file");
        props.push(Properties::from_file(path)?);
    }

    if let Some(path) = user_properties_path().filter(|p| p.is_file()) {
        debug!(path = %path.display(), "loading user properties");
        props.push(Properties::from_file(&path)?);
    }

    props.push(EnvProperties);
    Ok(props)
}

/// Run the annotate command
///
/// A rejected annotation is only an error when the task halts on failure.
pub async fn run_annotate(task: &AnnotationTask, options: &AnnotateOptions) -> Result<()> {
    let props = load_properties(options)?;
    let request = task.request(&props)?;

    if options.dry_run {
        let payload = serde_json::to_string_pretty(&request.annotation)?;
        println!("{}", "Dry run - nothing will be sent".emphasis());
        println!(
            "{} POST {}{}",
            arrow(),
            options.api_url.trim_end_matches('/'),
            request.path().accent()
        );
        println!("{}", payload.muted());
        return Ok(());
    }

    let client = SpinnerClient::new(LibratoClient::with_base_url(
        &options.api_url,
        options.timeout,
    )?);

    let outcome = send(&request, &client, &CliReporter).await?;
    debug!(?outcome, "submission finished");
    outcome.into_result()
}
