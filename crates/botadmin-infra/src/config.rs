//! Console configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.botadmin/` in
//! production) and deserializes it into [`ConsoleConfig`]. Falls back to
//! sensible defaults when the file is missing or malformed, so a fresh
//! install can talk to a local backend with zero setup.

use std::path::{Path, PathBuf};

use botadmin_types::config::ConsoleConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BOTADMIN_DATA_DIR";

/// Environment variable overriding the configured API token.
pub const API_TOKEN_ENV: &str = "BOTADMIN_API_TOKEN";

/// Resolve the console data directory.
///
/// Priority: `$BOTADMIN_DATA_DIR`, then `~/.botadmin`, then `./.botadmin`
/// as a last resort for homeless environments.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".botadmin"))
        .unwrap_or_else(|| PathBuf::from(".botadmin"))
}

/// Load console configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`ConsoleConfig::default()`].
/// - Unreadable or unparsable file: logs a warning, returns the default.
/// - `$BOTADMIN_API_TOKEN`, when set, overrides the file's token.
pub async fn load_console_config(data_dir: &Path) -> ConsoleConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return apply_env_overrides(ConsoleConfig::default());
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return apply_env_overrides(ConsoleConfig::default());
        }
    };

    let config = match toml::from_str::<ConsoleConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ConsoleConfig::default()
        }
    };
    apply_env_overrides(config)
}

fn apply_env_overrides(mut config: ConsoleConfig) -> ConsoleConfig {
    if let Ok(token) = std::env::var(API_TOKEN_ENV) {
        if !token.is_empty() {
            config.api_token = Some(token);
        }
    }
    config
}
