//! Shared HTTP client for the bot-platform REST API.
//!
//! Wraps `reqwest` with the configured base URL, per-request timeout, and
//! optional bearer token. The token is wrapped in
//! [`secrecy::SecretString`] and never appears in Debug output or logs.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use botadmin_types::config::ConsoleConfig;
use botadmin_types::error::ApiError;

/// HTTP client carrying connection settings for the backend API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl ApiClient {
    /// Build a client from the console configuration.
    pub fn new(config: &ConsoleConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone().map(SecretString::from),
        }
    }

    /// Override the base URL (useful for tests against a local stub).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build the full API URL for a given path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with auth applied.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Map a response to the error taxonomy: 404 becomes
    /// [`ApiError::NotFound`], 409 a conflict, any other non-success a
    /// status error carrying the backend's `detail` message when present.
    pub(crate) async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => extract_detail(&body).unwrap_or(body),
            Err(_) => String::new(),
        };

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::CONFLICT => ApiError::Conflict(message),
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Send a request and decode its JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request, requiring only a success status.
    pub(crate) async fn send_ok(builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Pull the `detail` field out of a FastAPI-style error body.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ConsoleConfig {
            base_url: "http://localhost:8000/".to_string(),
            api_token: None,
            request_timeout_secs: 5,
        })
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client();
        assert_eq!(
            client.url("/api/templates"),
            "http://localhost:8000/api/templates"
        );
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let client = client().with_base_url("https://bots.example.com///".to_string());
        assert_eq!(client.url("/api/test/chat"), "https://bots.example.com/api/test/chat");
    }

    #[test]
    fn test_extract_detail_from_fastapi_body() {
        assert_eq!(
            extract_detail(r#"{"detail": "Template with id 9 not found"}"#),
            Some("Template with id 9 not found".to_string())
        );
        assert_eq!(extract_detail("plain text"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
    }
}
