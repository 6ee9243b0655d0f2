//! CLI command definitions and dispatch for the `badmin` binary.
//!
//! Uses clap derive macros. The CLI follows a noun-verb pattern
//! (e.g., `badmin template list`, `badmin style preset detallada`).

pub mod chat;
pub mod editor;
pub mod style;
pub mod template;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Spinner shown while a backend request is pending.
pub(crate) fn spinner(message: &str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Administer your messaging-bot platform.
#[derive(Parser)]
#[command(name = "badmin", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true, hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage message templates (list, show, new, edit, delete).
    #[command(alias = "tpl")]
    Template {
        #[command(subcommand)]
        action: template::TemplateCommand,
    },

    /// Chat with the bot pipeline interactively (test mode).
    Chat,

    /// Control the bot's response length style.
    Style {
        #[command(subcommand)]
        action: style::StyleCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
