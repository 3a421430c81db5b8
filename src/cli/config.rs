// ABOUTME: CLI config command - print the effective configuration after layering

use super::OutputFormat;
use crate::config::AppConfig;
use anyhow::{Context, Result};

/// Execute the config command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config)
                .context("Failed to serialize configuration")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", config.to_toml()?),
    }
    Ok(())
}
