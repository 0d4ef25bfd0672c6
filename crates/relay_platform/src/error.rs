//! Bridge error types

use thiserror::Error;

/// Errors raised at the UI-surface / engine boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A keyboard session is already open; the caller must close it first
    #[error("a keyboard session is already open")]
    AlreadyOpen,

    /// A notification referenced a handle that is no longer registered
    #[error("stale session handle: {0}")]
    StaleHandle(String),

    /// A lifecycle call arrived out of order (e.g. tick before initialize)
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The engine reported an initialization failure
    #[error("engine initialization failed: {0}")]
    EngineInit(String),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BridgeError {
    /// Whether this error is fatal to the component that raised it
    pub fn is_fatal(&self) -> bool {
        matches!(self, BridgeError::Precondition(_))
    }
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
