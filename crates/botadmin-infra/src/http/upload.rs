//! HTTP implementation of [`AssetUploader`].
//!
//! `POST /api/templates/upload-file` takes a multipart form (`file`,
//! `category`) and returns the stored asset's path. The backend can also
//! answer 200 with `success: false`, which is mapped to
//! [`UploadError::Rejected`].

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use botadmin_core::template::AssetUploader;
use botadmin_types::error::UploadError;

use super::client::ApiClient;

/// Template asset uploads over HTTP.
pub struct HttpAssetUploader {
    api: Arc<ApiClient>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    #[allow(dead_code)]
    #[serde(default)]
    filename: String,
    #[serde(default)]
    file_path: String,
}

impl HttpAssetUploader {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl AssetUploader for HttpAssetUploader {
    async fn upload(&self, file: &Path, category: &str) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| UploadError::Rejected(format!("cannot read {}: {e}", file.display())))?;
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let form = Form::new()
            .text("category", category.to_string())
            .part("file", Part::bytes(bytes).file_name(filename));

        let builder = self
            .api
            .request(Method::POST, "/api/templates/upload-file")
            .multipart(form);
        let response: UploadResponse = ApiClient::send_json(builder).await.map_err(UploadError::Api)?;

        if !response.success || response.file_path.is_empty() {
            return Err(UploadError::Rejected(
                "backend did not return a stored file path".to_string(),
            ));
        }
        Ok(response.file_path)
    }
}
