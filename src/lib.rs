//! Copse: Execution Context Registry
//!
//! Isolated execution contexts for behavior-driven agent runtimes: each
//! context owns its static variables, named instance bindings, event
//! registrations, and an optional world attachment.

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod logging;
pub mod state;
pub mod variables;
pub mod world;
