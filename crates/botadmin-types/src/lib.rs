//! Shared domain types for the botadmin console.
//!
//! This crate contains the types exchanged between the console's state
//! machines and the remote bot-platform backend: message templates and
//! their steps, conversation turns with routing metadata, response-style
//! settings, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod settings;
pub mod template;
