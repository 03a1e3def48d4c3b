//! Error types for the copse context registry.

use crate::context::ContextId;
use thiserror::Error;

/// Errors raised by context lifecycle and instance binding operations.
///
/// These conditions all signal a logic bug in the caller rather than a
/// recoverable runtime state, but they are surfaced as explicit results so
/// release builds fail loudly instead of corrupting the registry.
/// Expected misses (absent instance, absent event, class-incompatible
/// bind) are reported as `None` / `false` values, never as errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("unknown context id: {0}")]
    UnknownContext(ContextId),

    #[error("instance name not registered: '{0}'")]
    NameNotRegistered(String),

    #[error("instance name already bound: '{0}'")]
    AlreadyBound(String),

    #[error("context {context_id} still has bound instances: {names:?}; unbind them before destroy")]
    BindingsRemain {
        context_id: ContextId,
        names: Vec<String>,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ContextError {
    fn from(err: config::ConfigError) -> Self {
        ContextError::Config(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ContextError>;
