//! Error types for symreg
//!
//! Provides a unified error type used across all symreg crates.
//!
//! Application-level rejections from the search server are *not* errors in
//! this sense: a confirm command that reaches the server and comes back with
//! a non-zero status is reported through `CommandResult`, while this type
//! covers the exchanges that never completed (transport failures) or that
//! produced unintelligible bytes (protocol and decode failures).

/// Main error type for symreg operations
#[derive(Debug, thiserror::Error)]
pub enum SymregError {
    // === Transport Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Connection closed unexpectedly")]
    ConnectionClosed,

    #[error("Not connected to a server")]
    NotConnected,

    // === Protocol Errors ===

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Failed to decode payload: {0}")]
    Decode(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SymregError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this error indicates the session is no longer usable.
    ///
    /// Every transport and protocol failure forces a disconnect, so callers
    /// seeing one of these must reconnect before issuing further commands.
    /// A decode failure happens after a complete frame was consumed, so the
    /// stream is still in sync and the session stays connected.
    pub fn is_disconnecting(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::Connection(_)
                | Self::ConnectionClosed
                | Self::NotConnected
                | Self::Protocol(_)
        )
    }
}

/// Result type alias using SymregError
pub type Result<T> = std::result::Result<T, SymregError>;
