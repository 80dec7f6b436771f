//! `droidpilot status` — show configuration and provider status.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use droidpilot_core::config::Config;
use droidpilot_providers::{select_model, Dispatcher};

use crate::helpers::key_status;

/// Run the status command.
pub fn run(dispatcher: &Dispatcher, config: &Config, config_path: &Path) -> Result<()> {
    println!();
    println!("{}", "DroidPilot Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Model
    let model_line = match select_model(dispatcher.registry(), config.agent.configured_model()) {
        Ok(selection) => {
            let model = selection.model();
            let origin = if selection.is_default() { " (default)" } else { "" };
            format!(
                "{} via {}{}",
                model.identifier,
                model.provider,
                origin.dimmed()
            )
        }
        Err(e) => format!("{} {}", config.agent.model, format!("({e})").red()),
    };
    println!("  {:<18} {}", "Model:".bold(), model_line);

    println!(
        "  {:<18} {} | {}",
        "Parameters:".bold(),
        format!("temp: {}", config.agent.temperature).dimmed(),
        format!("max_tokens: {}", config.agent.max_tokens).dimmed(),
    );

    println!(
        "  {:<18} {} ({} from config)",
        "Models:".bold(),
        dispatcher.all_models().len(),
        config.models.len()
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    for provider in dispatcher.providers() {
        println!(
            "    {:<20} {}",
            provider.display_name(),
            key_status(config, provider)
        );
    }
    println!();

    Ok(())
}
