//! Template composition and delivery sequencing.
//!
//! [`draft::TemplateDraft`] owns all mutations of a template under edit,
//! keeping step order contiguous at every intermediate state.
//! [`catalog::TemplateCatalog`] is the client-side projection of the remote
//! collection, and [`upload::AssetBindingWorker`] resolves local files into
//! persisted asset references without blocking sequence editing.

pub mod catalog;
pub mod draft;
pub mod store;
pub mod upload;

pub use catalog::TemplateCatalog;
pub use draft::{MoveDirection, StepField, TemplateDraft};
pub use store::TemplateStore;
pub use upload::{AssetBinding, AssetBindingWorker, AssetUploader};
