//! Per-step asset upload lifecycle.
//!
//! Binding an asset is asynchronous and must not block sequence editing:
//! while an upload is in flight the step index is marked in a side-map
//! owned by the worker, never on the [`StepUnit`] itself, so transient
//! upload state is kept out of persisted template data.
//!
//! At most one upload may be in flight per step index; a second attempt
//! for a busy index is rejected instead of racing. Uploads for different
//! indices proceed independently.
//!
//! [`StepUnit`]: botadmin_types::template::StepUnit

use std::future::Future;
use std::path::Path;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use botadmin_types::error::UploadError;

/// The resolved reference from a local file to a persisted, servable asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBinding {
    /// Backend path/URL for the stored asset.
    pub asset_ref: String,
    /// The uploaded file's display name, used as a default caption.
    pub display_name: String,
}

/// Uploads a local file to the backend's template asset storage.
///
/// Implementations live in botadmin-infra; the returned string is the
/// stored asset's path as reported by the backend.
pub trait AssetUploader: Send + Sync {
    fn upload(
        &self,
        file: &Path,
        category: &str,
    ) -> impl Future<Output = Result<String, UploadError>> + Send;
}

/// Tracks in-flight uploads per step index and resolves files into
/// [`AssetBinding`]s.
pub struct AssetBindingWorker<U: AssetUploader> {
    uploader: U,
    in_flight: DashMap<usize, ()>,
}

/// Clears the in-flight mark for an index on every exit path.
struct InFlightGuard<'a> {
    map: &'a DashMap<usize, ()>,
    index: usize,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.map.remove(&self.index);
    }
}

impl<U: AssetUploader> AssetBindingWorker<U> {
    pub fn new(uploader: U) -> Self {
        Self {
            uploader,
            in_flight: DashMap::new(),
        }
    }

    /// Whether an upload is currently in flight for the given step index.
    /// The UI uses this to disable re-submission of that step without
    /// blocking edits to other steps.
    pub fn is_uploading(&self, index: usize) -> bool {
        self.in_flight.contains_key(&index)
    }

    /// Upload `file` for the step at `index`, tagged with the template's
    /// category.
    ///
    /// Returns the binding to apply via
    /// [`TemplateDraft::bind_asset`](super::draft::TemplateDraft::bind_asset);
    /// on failure the step is untouched. The in-flight mark is cleared on
    /// success and failure alike.
    pub async fn bind(
        &self,
        index: usize,
        file: &Path,
        category: &str,
    ) -> Result<AssetBinding, UploadError> {
        match self.in_flight.entry(index) {
            Entry::Occupied(_) => return Err(UploadError::AlreadyUploading(index)),
            Entry::Vacant(slot) => {
                slot.insert(());
            }
        }
        let _guard = InFlightGuard {
            map: &self.in_flight,
            index,
        };

        let display_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        debug!(index, file = %file.display(), category, "uploading step asset");
        match self.uploader.upload(file, category).await {
            Ok(asset_ref) => Ok(AssetBinding {
                asset_ref,
                display_name,
            }),
            Err(e) => {
                warn!(index, error = %e, "step asset upload failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::draft::{StepField, TemplateDraft};
    use botadmin_types::template::StepKind;

    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Resolves immediately with a deterministic path.
    struct InstantUploader;

    impl AssetUploader for InstantUploader {
        async fn upload(&self, file: &Path, category: &str) -> Result<String, UploadError> {
            let name = file.file_name().unwrap().to_string_lossy();
            Ok(format!("uploads/templates/{category}/{name}"))
        }
    }

    /// Blocks until released, so tests can observe the in-flight state.
    struct GatedUploader {
        started: Arc<Notify>,
        gate: Arc<Notify>,
    }

    impl AssetUploader for GatedUploader {
        async fn upload(&self, file: &Path, category: &str) -> Result<String, UploadError> {
            self.started.notify_one();
            self.gate.notified().await;
            let name = file.file_name().unwrap().to_string_lossy();
            Ok(format!("uploads/templates/{category}/{name}"))
        }
    }

    struct FailingUploader;

    impl AssetUploader for FailingUploader {
        async fn upload(&self, _file: &Path, _category: &str) -> Result<String, UploadError> {
            Err(UploadError::Rejected("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_bind_resolves_path_and_display_name() {
        let worker = AssetBindingWorker::new(InstantUploader);
        let binding = worker
            .bind(0, Path::new("/tmp/logo.png"), "bienvenida")
            .await
            .unwrap();
        assert_eq!(binding.asset_ref, "uploads/templates/bienvenida/logo.png");
        assert_eq!(binding.display_name, "logo.png");
        assert!(!worker.is_uploading(0));
    }

    #[tokio::test]
    async fn test_concurrent_uploads_for_different_steps() {
        let worker = AssetBindingWorker::new(InstantUploader);
        let (a, b) = tokio::join!(
            worker.bind(0, Path::new("a.png"), "general"),
            worker.bind(1, Path::new("b.pdf"), "general"),
        );
        let a = a.unwrap();
        let b = b.unwrap();

        let mut draft = TemplateDraft::new();
        draft.update_step(0, StepField::Kind(StepKind::Image)).unwrap();
        let idx = draft.add_step();
        draft
            .update_step(idx, StepField::Kind(StepKind::Document))
            .unwrap();

        draft.bind_asset(0, a).unwrap();
        draft.bind_asset(1, b).unwrap();
        assert_eq!(
            draft.steps()[0].asset_ref.as_deref(),
            Some("uploads/templates/general/a.png")
        );
        assert_eq!(
            draft.steps()[1].asset_ref.as_deref(),
            Some("uploads/templates/general/b.pdf")
        );
    }

    #[tokio::test]
    async fn test_second_upload_for_busy_index_rejected() {
        let started = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let worker = Arc::new(AssetBindingWorker::new(GatedUploader {
            started: started.clone(),
            gate: gate.clone(),
        }));

        let first = tokio::spawn({
            let worker = worker.clone();
            async move { worker.bind(2, Path::new("big.mp4"), "general").await }
        });
        started.notified().await;
        assert!(worker.is_uploading(2));

        // Same index: rejected, never raced.
        let err = worker.bind(2, Path::new("other.mp4"), "general").await;
        assert!(matches!(err, Err(UploadError::AlreadyUploading(2))));

        // A different index is not blocked by step 2's upload.
        assert!(!worker.is_uploading(3));

        gate.notify_one();
        let binding = first.await.unwrap().unwrap();
        assert_eq!(binding.display_name, "big.mp4");
        assert!(!worker.is_uploading(2));
    }

    #[tokio::test]
    async fn test_failed_upload_clears_mark_and_leaves_step_untouched() {
        let worker = AssetBindingWorker::new(FailingUploader);
        let mut draft = TemplateDraft::new();
        draft.update_step(0, StepField::Kind(StepKind::Image)).unwrap();

        let err = worker.bind(0, Path::new("x.png"), "general").await;
        assert!(matches!(err, Err(UploadError::Rejected(_))));
        assert!(!worker.is_uploading(0));
        assert!(draft.steps()[0].asset_ref.is_none());

        // The index is immediately reusable for a retry.
        let err = worker.bind(0, Path::new("x.png"), "general").await;
        assert!(matches!(err, Err(UploadError::Rejected(_))));
    }
}
