//! HTTP implementation of [`TemplateStore`].
//!
//! Wire endpoints:
//! - `GET    /api/templates?category=` -> `{templates: [...], total}`
//! - `GET    /api/templates/categories/list` -> `[string]`
//! - `POST   /api/templates`
//! - `PUT    /api/templates/{id}`
//! - `DELETE /api/templates/{id}`

use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;

use botadmin_core::template::TemplateStore;
use botadmin_types::error::ApiError;
use botadmin_types::template::MessageTemplate;

use super::client::ApiClient;

/// Remote template collection over HTTP.
pub struct HttpTemplateStore {
    api: Arc<ApiClient>,
}

/// List envelope returned by the backend.
#[derive(Debug, Deserialize)]
struct TemplateListResponse {
    templates: Vec<MessageTemplate>,
    #[allow(dead_code)]
    #[serde(default)]
    total: u64,
}

impl HttpTemplateStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl TemplateStore for HttpTemplateStore {
    async fn list(&self, category: Option<&str>) -> Result<Vec<MessageTemplate>, ApiError> {
        let mut builder = self.api.request(Method::GET, "/api/templates");
        if let Some(category) = category {
            builder = builder.query(&[("category", category)]);
        }
        let response: TemplateListResponse = ApiClient::send_json(builder).await?;
        Ok(response.templates)
    }

    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let builder = self.api.request(Method::GET, "/api/templates/categories/list");
        ApiClient::send_json(builder).await
    }

    async fn create(&self, template: &MessageTemplate) -> Result<MessageTemplate, ApiError> {
        let builder = self.api.request(Method::POST, "/api/templates").json(template);
        ApiClient::send_json(builder).await
    }

    async fn update(&self, id: i64, template: &MessageTemplate) -> Result<MessageTemplate, ApiError> {
        let builder = self
            .api
            .request(Method::PUT, &format!("/api/templates/{id}"))
            .json(template);
        ApiClient::send_json(builder).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let builder = self.api.request(Method::DELETE, &format!("/api/templates/{id}"));
        ApiClient::send_ok(builder).await
    }
}
