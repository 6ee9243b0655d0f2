//! Shared application state for CLI command handlers.

use std::path::PathBuf;
use std::sync::Arc;

use botadmin_infra::config::{default_data_dir, load_console_config};
use botadmin_infra::http::{
    ApiClient, HttpAssetUploader, HttpChatBackend, HttpSettingsStore, HttpTemplateStore,
};
use botadmin_types::config::ConsoleConfig;

/// Configuration plus the shared API client, handed to every command.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ConsoleConfig,
    pub api: Arc<ApiClient>,
}

impl AppState {
    /// Load configuration and build the shared client.
    pub async fn init() -> Self {
        let data_dir = default_data_dir();
        let config = load_console_config(&data_dir).await;
        let api = Arc::new(ApiClient::new(&config));
        Self {
            data_dir,
            config,
            api,
        }
    }

    pub fn template_store(&self) -> HttpTemplateStore {
        HttpTemplateStore::new(self.api.clone())
    }

    pub fn uploader(&self) -> HttpAssetUploader {
        HttpAssetUploader::new(self.api.clone())
    }

    pub fn chat_backend(&self) -> HttpChatBackend {
        HttpChatBackend::new(self.api.clone())
    }

    pub fn settings_store(&self) -> HttpSettingsStore {
        HttpSettingsStore::new(self.api.clone())
    }
}
