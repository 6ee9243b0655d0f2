//! HTTP implementation of [`SettingsStore`].
//!
//! Settings are plain remote key/value records:
//! `GET /api/settings/{key}` (404 means never set) and
//! `POST /api/settings` for upserts.

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;

use botadmin_core::settings::{SettingUpdate, SettingsStore};
use botadmin_types::error::ApiError;

use super::client::ApiClient;

/// Remote settings collection over HTTP.
pub struct HttpSettingsStore {
    api: Arc<ApiClient>,
}

#[derive(Debug, Deserialize)]
struct SettingRecord {
    #[allow(dead_code)]
    #[serde(default)]
    key: String,
    value: String,
}

impl HttpSettingsStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl SettingsStore for HttpSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let builder = self.api.request(Method::GET, &format!("/api/settings/{key}"));
        match ApiClient::send_json::<SettingRecord>(builder).await {
            Ok(record) => Ok(Some(record.value)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, update: &SettingUpdate) -> Result<(), ApiError> {
        let builder = self.api.request(Method::POST, "/api/settings").json(update);
        ApiClient::send_ok(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_record_deserializes() {
        let record: SettingRecord =
            serde_json::from_str(r#"{"key": "response_style", "value": "detallada"}"#).unwrap();
        assert_eq!(record.value, "detallada");
    }

    #[test]
    fn test_setting_update_payload_shape() {
        let update = SettingUpdate {
            key: "max_response_tokens".to_string(),
            value: "250".to_string(),
            category: "bot_behavior".to_string(),
            description: "tokens".to_string(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["key"], "max_response_tokens");
        assert_eq!(json["value"], "250");
        assert_eq!(json["category"], "bot_behavior");
    }
}
