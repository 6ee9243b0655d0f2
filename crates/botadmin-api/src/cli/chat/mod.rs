//! Interactive chat simulator.
//!
//! Exercises the bot's reply pipeline directly: each submitted line is one
//! simulator turn. The transcript machine lives in botadmin-core; this
//! module owns input handling and rendering only.

pub mod renderer;

use anyhow::Result;
use console::style;
use rustyline_async::{Readline, ReadlineEvent};

use botadmin_core::simulator::{ConversationSimulator, TurnOutcome};
use botadmin_types::error::SendError;

use crate::cli::spinner;
use crate::state::AppState;

use renderer::TurnRenderer;

/// Run the simulator REPL until Ctrl+D.
pub async fn run_chat(state: &AppState) -> Result<()> {
    println!();
    println!("  {}", style("Probar Bot").cyan().bold());
    println!(
        "  {}",
        style(format!("backend: {}", state.config.base_url)).dim()
    );
    println!("  {}", style("Ctrl+D to exit.").dim());
    println!();

    let mut simulator = ConversationSimulator::new(state.chat_backend());
    let renderer = TurnRenderer::new();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, _writer) =
        Readline::new(prompt).map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match input.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let text = line.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                let _ = input.add_history_entry(text.clone());

                let spinner = spinner("escribiendo...");
                let outcome = simulator.send_message(&text).await;
                spinner.finish_and_clear();

                match outcome {
                    Err(SendError::EmptyMessage) => continue,
                    Err(SendError::ResponsePending) => {
                        println!(
                            "  {}",
                            style("Still waiting for the previous reply.").dim()
                        );
                    }
                    Ok(outcome) => {
                        let last = simulator.turns().len() - 1;
                        let rendered = renderer.render_turn(last, &simulator.turns()[last]);
                        println!("{rendered}");

                        if let TurnOutcome::Fallback(e) = outcome {
                            eprintln!("  {}", style(format!("(request failed: {e})")).dim());
                        }
                    }
                }
            }
            Ok(ReadlineEvent::Eof) => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            Ok(ReadlineEvent::Interrupted) => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
            }
            Err(_) => break,
        }
    }

    Ok(())
}
