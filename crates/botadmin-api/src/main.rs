//! botadmin console entry point.
//!
//! Binary name: `badmin`
//!
//! Parses CLI arguments, loads configuration, builds the shared API
//! client, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbosity = if cli.quiet { 0 } else { cli.verbose };
    botadmin_observe::tracing_setup::init_tracing(verbosity, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "badmin", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await;

    let result = match cli.command {
        Commands::Template { action } => {
            cli::template::handle_template_command(action, &state, cli.json).await
        }
        Commands::Chat => cli::chat::run_chat(&state).await,
        Commands::Style { action } => cli::style::handle_style_command(action, &state, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    botadmin_observe::tracing_setup::shutdown_tracing();
    result
}
