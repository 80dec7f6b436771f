//! `droidpilot models` and `droidpilot providers`.

use anyhow::Result;
use colored::Colorize;

use droidpilot_core::config::Config;
use droidpilot_providers::{Dispatcher, Model, Provider};

use crate::helpers::key_status;

/// List models, optionally restricted to one provider.
pub fn run_models(
    dispatcher: &Dispatcher,
    config: &Config,
    provider: Option<&str>,
    json: bool,
) -> Result<()> {
    let providers = match provider {
        Some(name) => vec![name.parse::<Provider>()?],
        None => dispatcher.providers(),
    };

    if json {
        let models: Vec<&Model> = providers
            .iter()
            .flat_map(|p| dispatcher.models_for_provider(*p))
            .collect();
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    let selected = config.agent.configured_model();

    println!();
    for provider in providers {
        let models = dispatcher.models_for_provider(provider);
        println!(
            "  {} {}",
            provider.display_name().cyan().bold(),
            format!("({})", models.len()).dimmed()
        );
        if models.is_empty() {
            println!("    {}", "(no models)".dimmed());
        }
        for model in models {
            let marker = if selected == Some(model.identifier.as_str()) {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "   {} {:<36} {}",
                marker,
                model.identifier,
                model.display_name.dimmed()
            );
        }
        println!();
    }

    Ok(())
}

/// List the providers present in the registry.
pub fn run_providers(dispatcher: &Dispatcher, config: &Config) -> Result<()> {
    println!();
    for provider in dispatcher.providers() {
        let count = dispatcher.models_for_provider(provider).len();
        let kind = if provider.is_aggregator() {
            "aggregator"
        } else {
            "direct"
        };
        println!(
            "  {:<12} {:<12} {:>3} models   {}",
            provider.display_name().bold(),
            kind.dimmed(),
            count,
            key_status(config, provider)
        );
    }
    println!();
    Ok(())
}
