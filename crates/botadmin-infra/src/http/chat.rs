//! HTTP implementation of [`ChatBackend`].
//!
//! `POST /api/test/chat` exercises the bot's reply pipeline directly,
//! without a live chat channel. The request carries the new message plus
//! the prior transcript as `{role, content}` pairs; routing metadata
//! (agent, intent, confidence, retrieval counts, profile, engagement)
//! comes back on the reply.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use botadmin_core::simulator::ChatBackend;
use botadmin_types::chat::{ChatReply, ConversationTurn};
use botadmin_types::error::ApiError;

use super::client::ApiClient;

/// Simulator chat requests over HTTP.
pub struct HttpChatBackend {
    api: Arc<ApiClient>,
}

/// History entry on the wire; metadata stays client-side.
#[derive(Debug, Serialize)]
struct WireTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    conversation_history: Vec<WireTurn<'a>>,
}

impl HttpChatBackend {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl ChatBackend for HttpChatBackend {
    async fn send(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<ChatReply, ApiError> {
        let request = ChatRequest {
            message,
            conversation_history: history
                .iter()
                .map(|turn| WireTurn {
                    role: match turn.role {
                        botadmin_types::chat::TurnRole::User => "user",
                        botadmin_types::chat::TurnRole::Assistant => "assistant",
                    },
                    content: &turn.content,
                })
                .collect(),
        };

        let builder = self.api.request(Method::POST, "/api/test/chat").json(&request);
        ApiClient::send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botadmin_types::chat::TurnMetadata;

    #[test]
    fn test_request_serializes_history_without_metadata() {
        let history = vec![
            ConversationTurn::user("hola".to_string()),
            ConversationTurn::assistant(
                "Hola! En qu\u{e9} te ayudo?".to_string(),
                TurnMetadata::error_handler(),
            ),
        ];
        let request = ChatRequest {
            message: "precios",
            conversation_history: history
                .iter()
                .map(|t| WireTurn {
                    role: match t.role {
                        botadmin_types::chat::TurnRole::User => "user",
                        botadmin_types::chat::TurnRole::Assistant => "assistant",
                    },
                    content: &t.content,
                })
                .collect(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "precios");
        assert_eq!(json["conversation_history"][0]["role"], "user");
        assert_eq!(json["conversation_history"][1]["role"], "assistant");
        assert!(json["conversation_history"][1].get("metadata").is_none());
    }
}
