//! `oncochat models`: list the models visible to the configured API key.
//!
//! Models that support `generateContent` can be used as chat candidates;
//! the ones already in the configured candidate list are flagged.

use anyhow::{Context, Result};
use console::style;

use oncochat_infra::llm::create_provider;
use oncochat_infra::secret::{EnvCredentialProvider, GEMINI_API_KEY_VAR};
use oncochat_types::config::ServerConfig;
use oncochat_types::llm::ModelInfo;

/// Fetch and print the model list.
pub async fn list_models(config: &ServerConfig, json: bool) -> Result<()> {
    let api_key = EnvCredentialProvider::new()
        .api_key()
        .with_context(|| format!("{GEMINI_API_KEY_VAR} is not set"))?;
    let provider = create_provider(api_key, &config.api_base_url)?;

    let models = provider
        .list_models()
        .await
        .context("failed to list models")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} models available",
        style("📋").bold(),
        style(models.len()).cyan()
    );
    println!();
    for model in &models {
        let name = short_name(model);
        let mark = if model.supports_generate_content() {
            style("✓").green().to_string()
        } else {
            style("·").dim().to_string()
        };
        let configured = if is_configured(config, model) {
            style(" (configured)").yellow().to_string()
        } else {
            String::new()
        };
        println!("  {mark} {name}{configured}");
        if let Some(description) = &model.description {
            println!("      {}", style(description).dim());
        }
    }
    println!();
    println!(
        "  {}",
        style("✓ = supports generateContent").dim()
    );

    Ok(())
}

fn short_name(model: &ModelInfo) -> &str {
    model.name.strip_prefix("models/").unwrap_or(&model.name)
}

fn is_configured(config: &ServerConfig, model: &ModelInfo) -> bool {
    let name = short_name(model);
    config
        .models
        .iter()
        .any(|m| m.strip_prefix("models/").unwrap_or(m) == name)
}
