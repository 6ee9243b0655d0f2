//! Remote template collection trait.
//!
//! The backend owns the collection; the console only ever sees it through
//! this interface. Uses RPITIT (native async fn in traits, Rust 2024
//! edition) consistent with all async traits in this project.
//! Implementations live in botadmin-infra.

use std::future::Future;

use botadmin_types::error::ApiError;
use botadmin_types::template::MessageTemplate;

/// Persistence interface for the remote template collection.
pub trait TemplateStore: Send + Sync {
    /// List templates, optionally restricted to one category.
    ///
    /// Ordering is whatever the backend returns; callers must not re-sort.
    fn list(
        &self,
        category: Option<&str>,
    ) -> impl Future<Output = Result<Vec<MessageTemplate>, ApiError>> + Send;

    /// The distinct set of categories currently in use.
    fn categories(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    /// Create a new template; the backend mints the id.
    fn create(
        &self,
        template: &MessageTemplate,
    ) -> impl Future<Output = Result<MessageTemplate, ApiError>> + Send;

    /// Replace an existing template.
    fn update(
        &self,
        id: i64,
        template: &MessageTemplate,
    ) -> impl Future<Output = Result<MessageTemplate, ApiError>> + Send;

    /// Delete a template by id.
    fn delete(&self, id: i64) -> impl Future<Output = Result<(), ApiError>> + Send;
}
