//! Infrastructure for the botadmin console: the reqwest-based client for
//! the bot-platform REST API, and configuration loading.
//!
//! Every store trait from `botadmin-core` gets one HTTP implementation
//! here; core never depends on this crate.

pub mod config;
pub mod http;
