//! HTTP implementations of the core store traits.
//!
//! One [`client::ApiClient`] is shared (via `Arc`) by the per-concern
//! stores: templates, asset upload, simulator chat, and settings.

pub mod chat;
pub mod client;
pub mod settings;
pub mod templates;
pub mod upload;

pub use chat::HttpChatBackend;
pub use client::ApiClient;
pub use settings::HttpSettingsStore;
pub use templates::HttpTemplateStore;
pub use upload::HttpAssetUploader;
