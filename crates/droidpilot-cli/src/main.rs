//! DroidPilot CLI — entry point.
//!
//! # Commands
//!
//! - `droidpilot models [-p PROVIDER] [--json]` — list selectable models
//! - `droidpilot providers` — list providers and key status
//! - `droidpilot request [MODEL] [-m MESSAGE]` — show the request a model would get
//! - `droidpilot status` — show configuration and provider status

mod helpers;
mod models_cmd;
mod request_cmd;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use droidpilot_core::config::{get_config_path, load_config, Config};
use droidpilot_providers::{Dispatcher, ModelRegistry};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// DroidPilot — model registry and request inspector for the on-device assistant
#[derive(Parser)]
#[command(name = "droidpilot", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.droidpilot/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable models, grouped by provider
    Models {
        /// Only list models for this provider (openai, gemini, openrouter)
        #[arg(short, long)]
        provider: Option<String>,

        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List providers, model counts and API key status
    Providers,

    /// Show the endpoint, headers and body for calling a model
    Request {
        /// Model identifier. Defaults to the configured model.
        model: Option<String>,

        /// API key to use instead of the configured one
        #[arg(long)]
        api_key: Option<String>,

        /// User message to build a chat body for
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let config_path = cli
        .config
        .as_deref()
        .map(helpers::expand_tilde)
        .unwrap_or_else(get_config_path);
    let config = load_config(Some(config_path.as_path()));
    let dispatcher = build_dispatcher(&config)?;

    match cli.command {
        Commands::Models { provider, json } => {
            models_cmd::run_models(&dispatcher, &config, provider.as_deref(), json)
        }
        Commands::Providers => models_cmd::run_providers(&dispatcher, &config),
        Commands::Request {
            model,
            api_key,
            message,
        } => request_cmd::run(
            &dispatcher,
            &config,
            model.as_deref(),
            api_key.as_deref(),
            message.as_deref(),
        ),
        Commands::Status => status::run(&dispatcher, &config, &config_path),
    }
}

/// Build the registry (builtin + configured extras) and the dispatcher over it.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let registry = ModelRegistry::builtin_with_config(&config.models)
        .context("invalid `models` entry in config")?;
    debug!(
        models = registry.len(),
        extra = config.models.len(),
        "Registry loaded"
    );
    Ok(Dispatcher::new(Arc::new(registry)))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("droidpilot=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
