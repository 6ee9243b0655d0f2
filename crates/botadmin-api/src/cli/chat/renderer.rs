//! Per-turn terminal rendering for the simulator transcript.
//!
//! Assistant turns are markdown with syntax-highlighted code fences
//! (`termimad` for prose, `syntect` for code). Rendering one turn never
//! fails past that turn: any panic inside the markdown pipeline is caught
//! and replaced with an inline placeholder so the rest of the transcript
//! stays intact.

use std::panic::{catch_unwind, AssertUnwindSafe};

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};
use termimad::MadSkin;
use tracing::warn;

use botadmin_types::chat::{ConversationTurn, EngagementTier, TurnMetadata, TurnRole};
use botadmin_types::error::RenderError;

/// Placeholder shown in place of a turn that failed to render.
pub const RENDER_FAILURE_PLACEHOLDER: &str = "\u{26a0}\u{fe0f} Error mostrando mensaje";

/// Terminal renderer for conversation turns.
pub struct TurnRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl TurnRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render one turn, isolating any failure to that turn alone.
    pub fn render_turn(&self, index: usize, turn: &ConversationTurn) -> String {
        match self.try_render(index, turn) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!(index = e.index, reason = %e.reason, "turn render failed");
                format!("  {}", style(RENDER_FAILURE_PLACEHOLDER).red())
            }
        }
    }

    fn try_render(&self, index: usize, turn: &ConversationTurn) -> Result<String, RenderError> {
        let body = catch_unwind(AssertUnwindSafe(|| match turn.role {
            TurnRole::User => format!("  {}", turn.content),
            TurnRole::Assistant => self.render_markdown(&turn.content),
        }))
        .map_err(|payload| RenderError {
            index,
            reason: panic_message(payload),
        })?;

        let mut rendered = body.trim_end().to_string();
        if let Some(metadata) = &turn.metadata {
            rendered.push('\n');
            rendered.push_str(&self.metadata_footer(metadata));
        }
        Ok(rendered)
    }

    /// Render markdown with syntax-highlighted code blocks.
    ///
    /// Code fences with a language tag go through syntect; everything else
    /// through termimad.
    fn render_markdown(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") && in_code_block {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                let rendered = self.skin.term_text(line);
                output.push_str(&format!("  {rendered}"));
            }
        }

        // Handle unclosed code block
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// One dim footer line: agent, intent, confidence, profile, engagement,
    /// retrieval counts. A "general" profile is routine and suppressed.
    fn metadata_footer(&self, metadata: &TurnMetadata) -> String {
        let mut parts = vec![
            format!("\u{1f916} {}", metadata.agent),
            format!("Intenci\u{f3}n: {}", metadata.intent),
            format!("Confianza: {:.0}%", metadata.confidence * 100.0),
        ];
        if let Some(profile) = metadata.profile.as_deref().filter(|p| *p != "general") {
            parts.push(format!("Perfil: {profile}"));
        }
        if let Some(engagement) = metadata.engagement {
            parts.push(engagement_label(engagement).to_string());
        }
        if metadata.knowledge_count > 0 {
            parts.push(format!("\u{1f4da} {} conocimientos", metadata.knowledge_count));
        }
        if metadata.faq_count > 0 {
            parts.push(format!("\u{2753} {} FAQs", metadata.faq_count));
        }
        format!("  {}", style(parts.join(" \u{2022} ")).dim())
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };
        let theme = &self.theme_set.themes["base16-ocean.dark"];
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    output.push_str("  ");
                    output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
                }
                Err(_) => output.push_str(line),
            }
        }
        output.push_str("\u{1b}[0m");
        output
    }
}

impl Default for TurnRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn engagement_label(tier: EngagementTier) -> &'static str {
    match tier {
        EngagementTier::High => "\u{1f525} Hot Lead",
        EngagementTier::Medium => "\u{26a1} Warm Lead",
        EngagementTier::Low => "\u{2744}\u{fe0f} Cold Lead",
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botadmin_types::chat::ChatReply;

    fn assistant_turn(content: &str, agent: &str) -> ConversationTurn {
        let reply = ChatReply {
            response: content.to_string(),
            agent_used: agent.to_string(),
            intent: "pricing".to_string(),
            confidence: 0.75,
            ..Default::default()
        };
        ConversationTurn::assistant(content.to_string(), TurnMetadata::from_reply(&reply))
    }

    #[test]
    fn test_render_turn_includes_footer() {
        let renderer = TurnRenderer::new();
        let turn = assistant_turn("Hola, **bienvenido**.", "Sales Agent");
        let rendered = renderer.render_turn(0, &turn);
        assert!(rendered.contains("Sales Agent"));
        assert!(rendered.contains("75%"));
    }

    #[test]
    fn test_footer_suppresses_general_profile() {
        let renderer = TurnRenderer::new();
        let mut metadata = TurnMetadata::error_handler();
        metadata.profile = Some("general".to_string());
        let footer = renderer.metadata_footer(&metadata);
        assert!(!footer.contains("Perfil"));

        metadata.profile = Some("mayorista".to_string());
        let footer = renderer.metadata_footer(&metadata);
        assert!(footer.contains("Perfil: mayorista"));
    }

    #[test]
    fn test_footer_engagement_labels() {
        let renderer = TurnRenderer::new();
        let mut metadata = TurnMetadata::error_handler();
        metadata.engagement = Some(EngagementTier::High);
        assert!(renderer.metadata_footer(&metadata).contains("Hot Lead"));
        metadata.engagement = Some(EngagementTier::Low);
        assert!(renderer.metadata_footer(&metadata).contains("Cold Lead"));
    }

    #[test]
    fn test_footer_counts_only_when_present() {
        let renderer = TurnRenderer::new();
        let metadata = TurnMetadata::error_handler();
        let footer = renderer.metadata_footer(&metadata);
        assert!(!footer.contains("conocimientos"));
        assert!(!footer.contains("FAQs"));
    }

    #[test]
    fn test_render_survives_hostile_markdown() {
        let renderer = TurnRenderer::new();
        // Unclosed fences, stray backticks, control chars: whatever comes
        // back from the backend must render or degrade to the placeholder,
        // never panic past the turn.
        for content in [
            "```",
            "```python\nprint('hola')",
            "``` \u{0000} ```",
            "**bold *nested `code",
        ] {
            let turn = assistant_turn(content, "General");
            let rendered = renderer.render_turn(3, &turn);
            assert!(!rendered.is_empty());
        }
    }

    #[test]
    fn test_user_turn_renders_plain() {
        let renderer = TurnRenderer::new();
        let turn = ConversationTurn::user("**no markdown here**".to_string());
        let rendered = renderer.render_turn(0, &turn);
        assert!(rendered.contains("**no markdown here**"));
    }
}
