//! Business logic for the botadmin console.
//!
//! Each component is a state machine with pure transition methods, talking
//! to the backend only through async traits (RPITIT) implemented in
//! `botadmin-infra`:
//!
//! - [`template`] -- draft editing, catalog projection, asset binding
//! - [`simulator`] -- the chat-simulator transcript machine
//! - [`settings`] -- the response-style selector

pub mod settings;
pub mod simulator;
pub mod template;
