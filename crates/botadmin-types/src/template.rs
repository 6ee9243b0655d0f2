//! Message template and step types.
//!
//! A template is an ordered sequence of typed message steps delivered to a
//! customer conversation with per-step pacing delays. Field names on the
//! wire follow the backend's JSON contract (`messages`, `type`, `file_url`),
//! while the Rust names describe the domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Maximum pacing delay between two steps, in seconds.
pub const MAX_DELAY_SECONDS: u32 = 60;

/// Maximum template name length accepted by the backend.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum category label length accepted by the backend.
pub const MAX_CATEGORY_LEN: usize = 100;

/// The kind of payload a single step delivers.
///
/// Text steps carry their body in `content`; every other kind requires a
/// bound asset reference before the template is submittable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Text,
    Image,
    Document,
    Audio,
    Video,
}

impl StepKind {
    /// Whether this kind needs a bound asset reference to be valid.
    pub fn requires_asset(self) -> bool {
        !matches!(self, StepKind::Text)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Text => write!(f, "text"),
            StepKind::Image => write!(f, "image"),
            StepKind::Document => write!(f, "document"),
            StepKind::Audio => write!(f, "audio"),
            StepKind::Video => write!(f, "video"),
        }
    }
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(StepKind::Text),
            "image" => Ok(StepKind::Image),
            "document" => Ok(StepKind::Document),
            "audio" => Ok(StepKind::Audio),
            "video" => Ok(StepKind::Video),
            other => Err(format!("invalid step kind: '{other}'")),
        }
    }
}

impl Default for StepKind {
    fn default() -> Self {
        StepKind::Text
    }
}

/// One typed, ordered unit of an outbound message sequence.
///
/// `order` is the 0-based delivery position and is kept contiguous by the
/// draft editor; steps are never renumbered by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepUnit {
    pub order: u32,
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Message body for text steps; optional caption for media steps.
    pub content: String,
    /// Reference to a bound asset (path or URL). Required for media kinds.
    #[serde(rename = "file_url", skip_serializing_if = "Option::is_none")]
    pub asset_ref: Option<String>,
    /// Delay before this step is delivered, relative to the previous one.
    #[serde(default)]
    pub delay_seconds: u32,
}

impl StepUnit {
    /// A fresh default text step at the given position.
    pub fn text(order: u32) -> Self {
        Self {
            order,
            kind: StepKind::Text,
            content: String::new(),
            asset_ref: None,
            delay_seconds: 0,
        }
    }

    /// Whether this step satisfies its kind's required-field invariant:
    /// text steps need a non-empty body, media steps a bound asset.
    pub fn is_complete(&self) -> bool {
        if self.kind.requires_asset() {
            self.asset_ref.as_deref().is_some_and(|r| !r.trim().is_empty())
        } else {
            !self.content.trim().is_empty()
        }
    }
}

/// A named, ordered collection of steps plus trigger/category metadata.
///
/// `id` is minted by the backend on create; a template that has never been
/// persisted carries `None`. The local catalog is a projection of the
/// remote collection, so timestamps are server-assigned and read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "messages")]
    pub steps: Vec<StepUnit>,
    #[serde(default)]
    pub trigger_keywords: Vec<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MessageTemplate {
    /// A new unsaved template with a single default text step.
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            category: None,
            steps: vec![StepUnit::text(0)],
            trigger_keywords: Vec::new(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// The category used when tagging uploaded assets.
    pub fn upload_category(&self) -> &str {
        self.category.as_deref().filter(|c| !c.is_empty()).unwrap_or("general")
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_kind_roundtrip() {
        for kind in [
            StepKind::Text,
            StepKind::Image,
            StepKind::Document,
            StepKind::Audio,
            StepKind::Video,
        ] {
            let s = kind.to_string();
            let parsed: StepKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_step_kind_requires_asset() {
        assert!(!StepKind::Text.requires_asset());
        assert!(StepKind::Image.requires_asset());
        assert!(StepKind::Document.requires_asset());
        assert!(StepKind::Audio.requires_asset());
        assert!(StepKind::Video.requires_asset());
    }

    #[test]
    fn test_step_serializes_wire_names() {
        let mut step = StepUnit::text(0);
        step.content = "hola".to_string();
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"type\":\"text\""));
        // file_url is omitted while unset
        assert!(!json.contains("file_url"));

        step.kind = StepKind::Image;
        step.asset_ref = Some("uploads/templates/general/logo.png".to_string());
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"file_url\":\"uploads/templates/general/logo.png\""));
    }

    #[test]
    fn test_step_completeness() {
        let mut step = StepUnit::text(0);
        assert!(!step.is_complete());
        step.content = "hola".to_string();
        assert!(step.is_complete());

        step.kind = StepKind::Video;
        assert!(!step.is_complete());
        step.asset_ref = Some("  ".to_string());
        assert!(!step.is_complete());
        step.asset_ref = Some("media/intro.mp4".to_string());
        assert!(step.is_complete());
    }

    #[test]
    fn test_template_deserializes_wire_shape() {
        let json = r#"{
            "id": 7,
            "name": "Bienvenida",
            "category": "bienvenida",
            "messages": [
                {"order": 0, "type": "text", "content": "Hola!", "delay_seconds": 0},
                {"order": 1, "type": "image", "content": "logo", "file_url": "uploads/logo.png", "delay_seconds": 3}
            ],
            "trigger_keywords": ["hola", "buenas"],
            "is_active": true
        }"#;
        let template: MessageTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.id, Some(7));
        assert_eq!(template.steps.len(), 2);
        assert_eq!(template.steps[1].kind, StepKind::Image);
        assert_eq!(template.steps[1].delay_seconds, 3);
        assert!(template.created_at.is_none());
    }

    #[test]
    fn test_upload_category_fallback() {
        let mut template = MessageTemplate::new();
        assert_eq!(template.upload_category(), "general");
        template.category = Some(String::new());
        assert_eq!(template.upload_category(), "general");
        template.category = Some("productos".to_string());
        assert_eq!(template.upload_category(), "productos");
    }
}
