//! Client-side projection of the remote template collection.
//!
//! The catalog is not authoritative storage: it holds whatever the backend
//! last returned, filtered by at most one category, and is refreshed after
//! every create/update/delete. Local entries are mutated only after a
//! remote operation's success acknowledgment; drafts produced by
//! [`TemplateCatalog::start_edit`] never touch the projection until their
//! submission succeeds.

use botadmin_types::error::{ApiError, SubmitError};
use botadmin_types::template::MessageTemplate;
use tracing::{info, warn};

use super::draft::TemplateDraft;
use super::store::TemplateStore;

/// The queryable collection of templates backing the list/detail views.
pub struct TemplateCatalog<S: TemplateStore> {
    store: S,
    entries: Vec<MessageTemplate>,
    category_filter: Option<String>,
}

impl<S: TemplateStore> TemplateCatalog<S> {
    /// An empty catalog; call [`refresh`](Self::refresh) to populate it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
            category_filter: None,
        }
    }

    /// The currently projected templates, in backend order.
    pub fn templates(&self) -> &[MessageTemplate] {
        &self.entries
    }

    /// The applied category filter, if any.
    pub fn category_filter(&self) -> Option<&str> {
        self.category_filter.as_deref()
    }

    /// Look up a projected template by id.
    pub fn find(&self, id: i64) -> Option<&MessageTemplate> {
        self.entries.iter().find(|t| t.id == Some(id))
    }

    /// Restrict the projection to one category (or clear the filter).
    /// Takes effect on the next [`refresh`](Self::refresh).
    pub fn set_filter(&mut self, category: Option<String>) {
        self.category_filter = category.filter(|c| !c.is_empty());
    }

    /// Re-fetch the projection with the current filter.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let templates = self.store.list(self.category_filter.as_deref()).await?;
        self.entries = templates;
        Ok(())
    }

    /// The distinct categories currently in use, for filter population.
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.store.categories().await
    }

    /// Produce an editable copy of a projected template.
    pub fn start_edit(&self, id: i64) -> Option<TemplateDraft> {
        self.find(id).map(TemplateDraft::from_template)
    }

    /// Validate and persist a draft, then refresh the projection.
    ///
    /// A [`ValidationError`](botadmin_types::error::ValidationError) never
    /// reaches the network. On a remote failure the projection and the
    /// caller's draft are left exactly as they were -- no partial
    /// application.
    pub async fn submit(&mut self, draft: &TemplateDraft) -> Result<MessageTemplate, SubmitError> {
        draft.validate()?;

        let template = draft.template();
        let saved = match template.id {
            Some(id) => self.store.update(id, template).await?,
            None => self.store.create(template).await?,
        };
        info!(
            template = %saved.name,
            id = ?saved.id,
            "template saved"
        );

        if let Err(e) = self.refresh().await {
            // The save itself succeeded; patch the projection locally so
            // the caller still sees the confirmed server state.
            warn!(error = %e, "catalog refresh after save failed");
            match self.entries.iter_mut().find(|t| t.id == saved.id) {
                Some(entry) => *entry = saved.clone(),
                None => self.entries.push(saved.clone()),
            }
        }
        Ok(saved)
    }

    /// Delete a template. The local entry is removed only after the
    /// remote delete succeeds; user confirmation happens in the console
    /// layer before this is called.
    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.store.delete(id).await?;
        self.entries.retain(|t| t.id != Some(id));
        info!(id, "template deleted");
        Ok(())
    }
}
