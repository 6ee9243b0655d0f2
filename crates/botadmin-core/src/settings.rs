//! Response-style selection and persistence.
//!
//! Maps the named presets onto the backend's single length-budget
//! parameter. The two remote settings (`response_style` and
//! `max_response_tokens`) are persisted independently; a failure in
//! either is reported to the caller and changes nothing in memory.

use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

use botadmin_types::error::ApiError;
use botadmin_types::settings::{ResponseStyle, MAX_TOKEN_BUDGET, MIN_TOKEN_BUDGET};

/// Remote key holding the named preset.
pub const RESPONSE_STYLE_KEY: &str = "response_style";

/// Remote key holding the numeric token budget.
pub const MAX_TOKENS_KEY: &str = "max_response_tokens";

/// Settings category both keys are filed under.
pub const SETTINGS_CATEGORY: &str = "bot_behavior";

/// One key/value write against the backend settings collection.
/// Serializes directly as the `POST /api/settings` payload.
#[derive(Debug, Clone, Serialize)]
pub struct SettingUpdate {
    pub key: String,
    pub value: String,
    pub category: String,
    pub description: String,
}

/// Remote key/value settings interface. Implementations live in
/// botadmin-infra.
pub trait SettingsStore: Send + Sync {
    /// Read a setting's value; `None` when the key has never been set.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, ApiError>> + Send;

    /// Upsert a setting.
    fn set(&self, update: &SettingUpdate) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Maps named presets and a custom numeric override onto the backend's
/// length-budget parameter. Exactly one preset is active at a time.
pub struct ResponseStyleSelector<S: SettingsStore> {
    store: S,
    style: ResponseStyle,
    token_budget: u32,
}

impl<S: SettingsStore> ResponseStyleSelector<S> {
    /// Default selection: concisa / 150 tokens.
    pub fn new(store: S) -> Self {
        let style = ResponseStyle::default();
        Self {
            store,
            token_budget: style.token_budget().unwrap_or(MIN_TOKEN_BUDGET),
            style,
        }
    }

    pub fn style(&self) -> ResponseStyle {
        self.style
    }

    pub fn token_budget(&self) -> u32 {
        self.token_budget
    }

    /// Activate a named preset. Non-custom presets overwrite the numeric
    /// budget; selecting `custom` keeps whatever budget is current.
    pub fn select_preset(&mut self, style: ResponseStyle) {
        if let Some(budget) = style.token_budget() {
            self.token_budget = budget;
        }
        self.style = style;
    }

    /// Set the numeric budget directly, clamped into `[100, 500]`.
    /// Doing so always switches the active preset to `custom`.
    pub fn set_token_budget(&mut self, tokens: u32) {
        self.token_budget = tokens.clamp(MIN_TOKEN_BUDGET, MAX_TOKEN_BUDGET);
        self.style = ResponseStyle::Custom;
    }

    /// Load both settings from the backend. Missing or unparsable values
    /// fall back to the defaults without failing the load.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let style = self
            .store
            .get(RESPONSE_STYLE_KEY)
            .await?
            .and_then(|v| v.parse::<ResponseStyle>().ok())
            .unwrap_or_default();

        let budget = self
            .store
            .get(MAX_TOKENS_KEY)
            .await?
            .and_then(|v| v.parse::<u32>().ok())
            .map(|n| n.clamp(MIN_TOKEN_BUDGET, MAX_TOKEN_BUDGET))
            .or_else(|| style.token_budget())
            .unwrap_or(MIN_TOKEN_BUDGET);

        self.style = style;
        self.token_budget = budget;
        debug!(style = %self.style, budget = self.token_budget, "response style loaded");
        Ok(())
    }

    /// Persist the selection as two independent remote settings.
    ///
    /// A failure in either write leaves the in-memory selection unchanged
    /// and is returned to the caller; retrying `save` is always safe.
    pub async fn save(&self) -> Result<(), ApiError> {
        let style_update = SettingUpdate {
            key: RESPONSE_STYLE_KEY.to_string(),
            value: self.style.to_string(),
            category: SETTINGS_CATEGORY.to_string(),
            description: "Estilo de longitud de respuestas del bot".to_string(),
        };
        let tokens_update = SettingUpdate {
            key: MAX_TOKENS_KEY.to_string(),
            value: self.token_budget.to_string(),
            category: SETTINGS_CATEGORY.to_string(),
            description: "N\u{fa}mero m\u{e1}ximo de tokens por respuesta".to_string(),
        };

        if let Err(e) = self.store.set(&style_update).await {
            warn!(error = %e, "failed to save response style");
            return Err(e);
        }
        if let Err(e) = self.store.set(&tokens_update).await {
            warn!(error = %e, "failed to save token budget");
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySettings {
        values: Mutex<HashMap<String, String>>,
        fail_writes: AtomicBool,
    }

    impl SettingsStore for &MemorySettings {
        async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, update: &SettingUpdate) -> Result<(), ApiError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ApiError::Transport("connection refused".to_string()));
            }
            self.values
                .lock()
                .unwrap()
                .insert(update.key.clone(), update.value.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_preset_sets_budget() {
        let store = MemorySettings::default();
        let mut selector = ResponseStyleSelector::new(&store);

        selector.select_preset(ResponseStyle::Detallada);
        assert_eq!(selector.style(), ResponseStyle::Detallada);
        assert_eq!(selector.token_budget(), 400);

        selector.select_preset(ResponseStyle::Normal);
        assert_eq!(selector.token_budget(), 250);
    }

    #[tokio::test]
    async fn test_manual_budget_switches_to_custom() {
        let store = MemorySettings::default();
        let mut selector = ResponseStyleSelector::new(&store);

        selector.select_preset(ResponseStyle::Detallada);
        selector.set_token_budget(180);
        assert_eq!(selector.style(), ResponseStyle::Custom);
        assert_eq!(selector.token_budget(), 180);
    }

    #[tokio::test]
    async fn test_budget_clamped_to_backend_range() {
        let store = MemorySettings::default();
        let mut selector = ResponseStyleSelector::new(&store);

        selector.set_token_budget(50);
        assert_eq!(selector.token_budget(), 100);
        selector.set_token_budget(9000);
        assert_eq!(selector.token_budget(), 500);
    }

    #[tokio::test]
    async fn test_selecting_custom_keeps_current_budget() {
        let store = MemorySettings::default();
        let mut selector = ResponseStyleSelector::new(&store);

        selector.select_preset(ResponseStyle::Normal);
        selector.select_preset(ResponseStyle::Custom);
        assert_eq!(selector.token_budget(), 250);
        assert_eq!(selector.style(), ResponseStyle::Custom);
    }

    #[tokio::test]
    async fn test_save_persists_both_keys() {
        let store = MemorySettings::default();
        let mut selector = ResponseStyleSelector::new(&store);
        selector.select_preset(ResponseStyle::Detallada);
        selector.save().await.unwrap();

        let values = store.values.lock().unwrap();
        assert_eq!(values.get(RESPONSE_STYLE_KEY).map(String::as_str), Some("detallada"));
        assert_eq!(values.get(MAX_TOKENS_KEY).map(String::as_str), Some("400"));
    }

    #[tokio::test]
    async fn test_save_failure_reported_and_memory_unchanged() {
        let store = MemorySettings::default();
        store.fail_writes.store(true, Ordering::SeqCst);

        let mut selector = ResponseStyleSelector::new(&store);
        selector.set_token_budget(300);
        assert!(selector.save().await.is_err());
        assert_eq!(selector.style(), ResponseStyle::Custom);
        assert_eq!(selector.token_budget(), 300);
    }

    #[tokio::test]
    async fn test_load_defaults_when_keys_missing() {
        let store = MemorySettings::default();
        let mut selector = ResponseStyleSelector::new(&store);
        selector.select_preset(ResponseStyle::Detallada);

        selector.load().await.unwrap();
        assert_eq!(selector.style(), ResponseStyle::Concisa);
        assert_eq!(selector.token_budget(), 150);
    }

    #[tokio::test]
    async fn test_load_parses_stored_values() {
        let store = MemorySettings::default();
        {
            let mut values = store.values.lock().unwrap();
            values.insert(RESPONSE_STYLE_KEY.to_string(), "custom".to_string());
            values.insert(MAX_TOKENS_KEY.to_string(), "325".to_string());
        }
        let mut selector = ResponseStyleSelector::new(&store);
        selector.load().await.unwrap();
        assert_eq!(selector.style(), ResponseStyle::Custom);
        assert_eq!(selector.token_budget(), 325);
    }

    #[tokio::test]
    async fn test_load_falls_back_on_garbage_values() {
        let store = MemorySettings::default();
        {
            let mut values = store.values.lock().unwrap();
            values.insert(RESPONSE_STYLE_KEY.to_string(), "verbose".to_string());
            values.insert(MAX_TOKENS_KEY.to_string(), "lots".to_string());
        }
        let mut selector = ResponseStyleSelector::new(&store);
        selector.load().await.unwrap();
        assert_eq!(selector.style(), ResponseStyle::Concisa);
        assert_eq!(selector.token_budget(), 150);
    }
}
