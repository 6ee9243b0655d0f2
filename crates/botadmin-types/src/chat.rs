//! Conversation transcript types for the bot simulator.
//!
//! A transcript is an append-only list of user/assistant turns. Assistant
//! turns carry routing metadata returned by the backend (agent selected,
//! detected intent, confidence, retrieval counts, customer profile and
//! engagement tier), with every field defaulted independently when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Coarse lead-quality classification returned per conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for EngagementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementTier::Low => write!(f, "low"),
            EngagementTier::Medium => write!(f, "medium"),
            EngagementTier::High => write!(f, "high"),
        }
    }
}

impl FromStr for EngagementTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(EngagementTier::Low),
            "medium" => Ok(EngagementTier::Medium),
            "high" => Ok(EngagementTier::High),
            other => Err(format!("invalid engagement tier: '{other}'")),
        }
    }
}

/// Raw reply payload from `POST /api/test/chat`.
///
/// Every field except `response` is defaulted so a sparse backend payload
/// still deserializes; the per-field fallbacks applied when building
/// [`TurnMetadata`] are the authoritative defaulting layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub agent_used: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub knowledge_used: Vec<serde_json::Value>,
    #[serde(default)]
    pub faqs_used: Vec<serde_json::Value>,
    #[serde(default)]
    pub customer_profile: String,
    #[serde(default)]
    pub customer_context: String,
    #[serde(default)]
    pub engagement_level: String,
}

/// Routing metadata attached to an assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnMetadata {
    pub agent: String,
    pub intent: String,
    pub confidence: f32,
    pub knowledge_count: u32,
    pub faq_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<EngagementTier>,
}

impl TurnMetadata {
    /// Sentinel agent name used on synthesized failure turns.
    pub const ERROR_AGENT: &'static str = "Error Handler";

    /// Sentinel agent name used when the backend omits one.
    pub const UNKNOWN_AGENT: &'static str = "Unknown";

    /// Build metadata from a backend reply, defaulting each field
    /// independently: missing agent becomes "Unknown", missing intent
    /// "unknown", confidence is clamped into [0, 1], empty profile and
    /// unparsable engagement are dropped.
    pub fn from_reply(reply: &ChatReply) -> Self {
        let agent = if reply.agent_used.trim().is_empty() {
            Self::UNKNOWN_AGENT.to_string()
        } else {
            reply.agent_used.clone()
        };
        let intent = if reply.intent.trim().is_empty() {
            "unknown".to_string()
        } else {
            reply.intent.clone()
        };
        let profile = Some(reply.customer_profile.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Self {
            agent,
            intent,
            confidence: reply.confidence.clamp(0.0, 1.0),
            knowledge_count: reply.knowledge_used.len() as u32,
            faq_count: reply.faqs_used.len() as u32,
            profile,
            engagement: reply.engagement_level.parse().ok(),
        }
    }

    /// Metadata for a synthesized connection-failure turn: the "Error
    /// Handler" agent, zero confidence, zero retrieval counts.
    pub fn error_handler() -> Self {
        Self {
            agent: Self::ERROR_AGENT.to_string(),
            intent: "error".to_string(),
            confidence: 0.0,
            knowledge_count: 0,
            faq_count: 0,
            profile: None,
            engagement: None,
        }
    }
}

/// One turn of the simulator transcript.
///
/// Turns are strictly append-only and ordered by submission time; metadata
/// is attached only after a successful or fallback response, never
/// speculatively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub role: TurnRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TurnMetadata>,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// A user turn with no metadata.
    pub fn user(content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: TurnRole::User,
            content,
            metadata: None,
            created_at: Utc::now(),
        }
    }

    /// An assistant turn carrying routing metadata.
    pub fn assistant(content: String, metadata: TurnMetadata) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: TurnRole::Assistant,
            content,
            metadata: Some(metadata),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engagement_tier_roundtrip() {
        for tier in [
            EngagementTier::Low,
            EngagementTier::Medium,
            EngagementTier::High,
        ] {
            let parsed: EngagementTier = tier.to_string().parse().unwrap();
            assert_eq!(tier, parsed);
        }
        assert!("hot".parse::<EngagementTier>().is_err());
        assert!("".parse::<EngagementTier>().is_err());
    }

    #[test]
    fn test_metadata_defaults_each_field_independently() {
        let reply = ChatReply {
            response: "Hola!".to_string(),
            confidence: 0.82,
            knowledge_used: vec![json!({"title": "precios"})],
            ..Default::default()
        };
        let meta = TurnMetadata::from_reply(&reply);
        assert_eq!(meta.agent, "Unknown");
        assert_eq!(meta.intent, "unknown");
        assert_eq!(meta.knowledge_count, 1);
        assert_eq!(meta.faq_count, 0);
        assert!(meta.profile.is_none());
        assert!(meta.engagement.is_none());
    }

    #[test]
    fn test_metadata_clamps_confidence() {
        let reply = ChatReply {
            confidence: 3.5,
            ..Default::default()
        };
        assert_eq!(TurnMetadata::from_reply(&reply).confidence, 1.0);

        let reply = ChatReply {
            confidence: -0.2,
            ..Default::default()
        };
        assert_eq!(TurnMetadata::from_reply(&reply).confidence, 0.0);
    }

    #[test]
    fn test_metadata_parses_populated_reply() {
        let reply = ChatReply {
            response: "Claro, te cuento.".to_string(),
            agent_used: "Sales Agent".to_string(),
            intent: "pricing".to_string(),
            confidence: 0.91,
            knowledge_used: vec![json!("k1"), json!("k2")],
            faqs_used: vec![json!("f1")],
            customer_profile: "mayorista".to_string(),
            customer_context: String::new(),
            engagement_level: "high".to_string(),
        };
        let meta = TurnMetadata::from_reply(&reply);
        assert_eq!(meta.agent, "Sales Agent");
        assert_eq!(meta.intent, "pricing");
        assert_eq!(meta.knowledge_count, 2);
        assert_eq!(meta.faq_count, 1);
        assert_eq!(meta.profile.as_deref(), Some("mayorista"));
        assert_eq!(meta.engagement, Some(EngagementTier::High));
    }

    #[test]
    fn test_error_handler_sentinel() {
        let meta = TurnMetadata::error_handler();
        assert_eq!(meta.agent, TurnMetadata::ERROR_AGENT);
        assert_eq!(meta.confidence, 0.0);
        assert_eq!(meta.knowledge_count, 0);
        assert_eq!(meta.faq_count, 0);
    }

    #[test]
    fn test_sparse_reply_deserializes() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "hola"}"#).unwrap();
        assert_eq!(reply.response, "hola");
        assert_eq!(reply.confidence, 0.0);
        assert!(reply.knowledge_used.is_empty());
    }
}
