//! `droidpilot request` — print the request shape for a model.
//!
//! Nothing is sent. Credentials are masked in the output.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::warn;

use droidpilot_core::config::Config;
use droidpilot_core::types::Message;
use droidpilot_providers::{
    select_model_or_default, Dispatcher, LlmRequestConfig, Model, ModelSelection, RequestShape,
};

use crate::helpers::configured_key;

/// Run the request command.
pub fn run(
    dispatcher: &Dispatcher,
    config: &Config,
    model: Option<&str>,
    api_key: Option<&str>,
    message: Option<&str>,
) -> Result<()> {
    let model: &Model = match model {
        // An explicit model must exist; no fallback
        Some(id) => dispatcher
            .resolve(id)
            .context("run `droidpilot models` to list known ids")?,
        None => {
            let selection =
                select_model_or_default(dispatcher.registry(), config.agent.configured_model())
                    .context("no usable model configured")?;
            if let ModelSelection::Default(m) = selection {
                println!(
                    "{}",
                    format!("(no model configured, using default {})", m.identifier).dimmed()
                );
            }
            selection.model()
        }
    };

    let key = match api_key.or_else(|| configured_key(config, model.provider)) {
        Some(k) => k,
        None => {
            warn!(provider = model.provider.name(), "No API key configured");
            ""
        }
    };

    let params = LlmRequestConfig {
        max_tokens: config.agent.max_tokens,
        temperature: config.agent.temperature,
    };

    let (shape, body) = match message {
        Some(text) => {
            let prepared =
                dispatcher.prepare_chat(&model.identifier, key, &[Message::user(text)], &params)?;
            (prepared.shape, Some(prepared.body))
        }
        None => (dispatcher.request_shape(&model.identifier, key)?, None),
    };

    print_shape(model, &shape.redacted(), body.as_ref())
}

fn print_shape(model: &Model, shape: &RequestShape, body: Option<&serde_json::Value>) -> Result<()> {
    println!();
    println!(
        "  {:<10} {} {}",
        "Model:".bold(),
        model.display_name,
        format!("({})", model.identifier).dimmed()
    );
    println!("  {:<10} {}", "Provider:".bold(), model.provider);
    println!("  {:<10} POST {}", "URL:".bold(), shape.url);

    println!("  {}", "Headers:".bold());
    let mut headers: Vec<_> = shape.headers.iter().collect();
    headers.sort();
    for (name, value) in headers {
        println!("    {}: {}", name.cyan(), value);
    }

    if let Some(body) = body {
        println!("  {}", "Body:".bold());
        for line in serde_json::to_string_pretty(body)?.lines() {
            println!("    {line}");
        }
    }
    println!();
    Ok(())
}
