//! Console configuration types.
//!
//! `ConsoleConfig` represents the `config.toml` that points the console at
//! a backend deployment. All fields have sensible defaults so a missing
//! file still yields a usable local-development setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the botadmin console.
///
/// Loaded from `~/.botadmin/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the backend API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token attached to every request. Optional for deployments
    /// that sit behind their own auth proxy.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_default_values() {
        let config = ConsoleConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.api_token.is_none());
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_console_config_deserialize_empty() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_console_config_deserialize_with_values() {
        let toml_str = r#"
base_url = "https://bots.example.com"
api_token = "tok-123"
request_timeout_secs = 60
"#;
        let config: ConsoleConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url, "https://bots.example.com");
        assert_eq!(config.api_token.as_deref(), Some("tok-123"));
        assert_eq!(config.request_timeout_secs, 60);
    }
}
