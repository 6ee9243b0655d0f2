//! Error taxonomy for the console.
//!
//! Three families, matching how failures propagate:
//!
//! - [`ValidationError`] is client-detected, blocks submission, and never
//!   reaches the network.
//! - [`ApiError`] and [`UploadError`] are transport-layer failures,
//!   surfaced as non-fatal notifications at the component boundary. The
//!   simulator converts them into a synthesized assistant turn instead.
//! - [`RenderError`] is isolated to the single item that failed to display.
//!
//! Nothing here is fatal to the process; every failure is recoverable by
//! retrying the same user action.

use thiserror::Error;

/// Client-side validation failures that block a template submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("template name must not be empty")]
    EmptyName,

    #[error("template name exceeds {0} characters")]
    NameTooLong(usize),

    #[error("category exceeds {0} characters")]
    CategoryTooLong(usize),

    #[error("a template needs at least one step")]
    NoSteps,

    #[error("step {index}: text steps need a non-empty message body")]
    EmptyContent { index: usize },

    #[error("step {index}: {kind} steps need a bound asset")]
    MissingAsset { index: usize, kind: String },

    #[error("step orders must be exactly 0..{expected}")]
    NonContiguousOrder { expected: usize },

    #[error("no step at index {0}")]
    StepOutOfRange(usize),

    #[error("cannot remove the last remaining step")]
    LastStep,
}

/// Failures talking to the backend REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("resource not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Failures binding a local file to a step's asset reference.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("an upload is already in flight for step {0}")]
    AlreadyUploading(usize),

    #[error("backend refused the upload: {0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A template submission failed, either before or on the wire.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A single transcript turn failed to display.
#[derive(Debug, Error)]
#[error("failed to render turn {index}: {reason}")]
pub struct RenderError {
    pub index: usize,
    pub reason: String,
}

/// A simulator send was refused without touching the transcript.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("a response is still pending")]
    ResponsePending,
}
