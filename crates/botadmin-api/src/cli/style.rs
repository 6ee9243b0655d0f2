//! Response-style CLI subcommands.
//!
//! Wraps the [`ResponseStyleSelector`]: show the active preset and token
//! budget, switch presets, or set a custom budget. Every change is loaded
//! from and saved back to the backend settings collection.

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use console::style;

use botadmin_core::settings::ResponseStyleSelector;
use botadmin_types::settings::{ResponseStyle, MAX_TOKEN_BUDGET, MIN_TOKEN_BUDGET};

use crate::cli::spinner;
use crate::state::AppState;

/// Response-style subcommands.
#[derive(Subcommand)]
pub enum StyleCommand {
    /// Show the active style and token budget.
    Show,

    /// Activate a named preset: concisa (150), normal (250), detallada (400).
    Preset {
        /// Preset name.
        name: String,
    },

    /// Set a custom token budget; switches the style to `custom`.
    Budget {
        /// Tokens per reply (clamped to 100-500).
        tokens: u32,
    },
}

/// Handle a style subcommand.
pub async fn handle_style_command(cmd: StyleCommand, state: &AppState, json: bool) -> Result<()> {
    let mut selector = ResponseStyleSelector::new(state.settings_store());
    selector
        .load()
        .await
        .context("could not load settings from the backend")?;

    match cmd {
        StyleCommand::Show => {}
        StyleCommand::Preset { name } => {
            let preset: ResponseStyle = name
                .parse()
                .map_err(|e: String| anyhow!("{e} (try: concisa, normal, detallada)"))?;
            selector.select_preset(preset);
            save(&selector).await?;
        }
        StyleCommand::Budget { tokens } => {
            if !(MIN_TOKEN_BUDGET..=MAX_TOKEN_BUDGET).contains(&tokens) {
                println!(
                    "  {} budget clamped to {MIN_TOKEN_BUDGET}-{MAX_TOKEN_BUDGET}",
                    style("!").yellow().bold()
                );
            }
            selector.set_token_budget(tokens);
            save(&selector).await?;
        }
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "style": selector.style().to_string(),
                "token_budget": selector.token_budget(),
            })
        );
    } else {
        println!();
        println!(
            "  style:  {}",
            style(selector.style().to_string()).cyan().bold()
        );
        println!(
            "  budget: {} tokens",
            style(selector.token_budget()).cyan()
        );
        println!();
    }
    Ok(())
}

async fn save<S: botadmin_core::settings::SettingsStore>(
    selector: &ResponseStyleSelector<S>,
) -> Result<()> {
    let spinner = spinner("saving settings...");
    let result = selector.save().await;
    spinner.finish_and_clear();
    result.context("could not save settings to the backend")
}
