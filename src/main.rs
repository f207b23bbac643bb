//! librato-annotate - mark deployments on Librato graphs
//!
//! CLI binary that sends a single annotation, for use as a build step.

use anyhow::Result;
use clap::Parser;
use librato_annotate::annotate::AnnotationTask;
use librato_annotate::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "librato-annotate")]
#[command(about = "Send a deployment annotation to Librato")]
#[command(version)]
struct Cli {
    /// Librato username (falls back to the `librato.username` property)
    #[arg(short, long)]
    username: Option<String>,

    /// Librato API token (falls back to the `librato.password` property)
    #[arg(short, long)]
    password: Option<String>,

    /// Annotation stream name
    #[arg(short, long)]
    name: Option<String>,

    /// Annotation title, shown on hover
    #[arg(short, long)]
    title: Option<String>,

    /// Annotation description, shown on hover
    #[arg(short, long = "desc")]
    desc: Option<String>,

    /// Exit with an error when Librato rejects the annotation
    #[arg(long)]
    halt_on_failure: bool,

    /// Define a property (repeatable), e.g. `-D librato.username=me@example.com`
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    defines: Vec<(String, String)>,

    /// Read properties from a file (repeatable, earlier files win)
    #[arg(long = "property-file", value_name = "PATH")]
    property_files: Vec<PathBuf>,

    /// Librato API base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Dry run - show the request without sending it
    #[arg(long)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_define(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty property name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("librato_annotate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let task = AnnotationTask {
        username: cli.username,
        password: cli.password,
        name: cli.name,
        title: cli.title,
        description: cli.desc,
        halt_on_failure: cli.halt_on_failure,
    };

    let options = cli::AnnotateOptions {
        defines: cli.defines,
        property_files: cli.property_files,
        api_url: cli.api_url,
        timeout: Duration::from_secs(cli.timeout),
        dry_run: cli.dry_run,
    };

    cli::run_annotate(&task, &options).await?;
    Ok(())
}
