//! Feature Service Renderer
//!
//! Renders ArcGIS Feature Service resources for the configured providers
//! and writes them to stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use featureserver_protocol::OutputFormat;
use featureserver_render::commands::{self, Command};
use featureserver_render::config::ServiceConfig;
use featureserver_render::state::AppState;

/// Feature Service Renderer
#[derive(Parser, Debug)]
#[command(name = "featureserver-render")]
#[command(about = "Render ArcGIS Feature Service resources as JSON or HTML")]
struct Args {
    /// Provider configuration file
    #[arg(long, default_value = "config/featureserver.yaml", env = "FEATURESERVER_CONFIG")]
    config: PathBuf,

    /// Directory of template overrides
    #[arg(long, env = "FEATURESERVER_TEMPLATES")]
    templates: Option<PathBuf>,

    /// Base URL for canonical resource links
    #[arg(long, env = "FEATURESERVER_BASE_URL")]
    base_url: Option<String>,

    /// Output format; only "json" selects JSON
    #[arg(short = 'f', long = "format", default_value = "html")]
    format: String,

    /// Provider to render (defaults to the first configured)
    #[arg(short, long)]
    provider: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "FEATURESERVER_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    let output = runtime.block_on(run(args))?;
    println!("{}", output);
    Ok(())
}

async fn run(args: Args) -> Result<String> {
    info!("Starting feature service renderer");

    let config = ServiceConfig::load(&args.config)?;
    let state = AppState::build(&config, args.templates.as_deref(), args.base_url.as_deref())?;

    let format = OutputFormat::from_tag(&args.format);
    debug!(?format, command = ?args.command, "Dispatching");

    commands::execute(&state, format, args.provider.as_deref(), args.command).await
}
