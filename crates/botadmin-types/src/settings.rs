//! Response-style presets controlling generated reply length.
//!
//! A preset is a named shortcut for the backend's `max_response_tokens`
//! setting. Selecting a named preset overwrites the numeric budget;
//! adjusting the budget directly switches the preset to `custom`.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Lowest token budget the backend accepts.
pub const MIN_TOKEN_BUDGET: u32 = 100;

/// Highest token budget the backend accepts.
pub const MAX_TOKEN_BUDGET: u32 = 500;

/// Named reply-length preset. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    /// 2-3 sentences, ~150 tokens.
    Concisa,
    /// Medium length, ~250 tokens.
    Normal,
    /// Full answers, ~400 tokens.
    Detallada,
    /// User-chosen numeric budget.
    Custom,
}

impl ResponseStyle {
    /// The token budget a named preset maps onto. `Custom` carries no
    /// budget of its own -- the numeric setting is authoritative.
    pub fn token_budget(self) -> Option<u32> {
        match self {
            ResponseStyle::Concisa => Some(150),
            ResponseStyle::Normal => Some(250),
            ResponseStyle::Detallada => Some(400),
            ResponseStyle::Custom => None,
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStyle::Concisa => write!(f, "concisa"),
            ResponseStyle::Normal => write!(f, "normal"),
            ResponseStyle::Detallada => write!(f, "detallada"),
            ResponseStyle::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for ResponseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concisa" => Ok(ResponseStyle::Concisa),
            "normal" => Ok(ResponseStyle::Normal),
            "detallada" => Ok(ResponseStyle::Detallada),
            "custom" => Ok(ResponseStyle::Custom),
            other => Err(format!("invalid response style: '{other}'")),
        }
    }
}

impl Default for ResponseStyle {
    fn default() -> Self {
        ResponseStyle::Concisa
    }
}
