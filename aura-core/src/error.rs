//! Error types for the aura ecosystem.

use thiserror::Error;

/// Errors that can occur in aura operations.
#[derive(Error, Debug)]
pub enum AuraError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid storage key '{0}'")]
    InvalidStorageKey(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Reasons an event form is rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event name is required")]
    EmptyName,

    #[error("Event location is required")]
    MissingLocation,
}

/// Result type alias for aura operations.
pub type AuraResult<T> = Result<T, AuraError>;
