//! Error types for decoder and reader-port operations.

/// Result type alias for decoder operations.
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Errors that can occur while binding or reading a reader port.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    /// Reader port is not connected or has been disconnected.
    #[error("reader port disconnected: {port}")]
    Disconnected { port: String },

    /// A pulse sink is already attached to this port.
    #[error("pulse sink already attached to {port}")]
    AlreadyAttached { port: String },

    /// No pulse sink has been attached yet.
    #[error("no pulse sink attached to {port}")]
    NotAttached { port: String },

    /// Port-level failure while reading a line or binding edges.
    #[error("reader port error: {message}")]
    Port { message: String },
}

impl DecoderError {
    /// Create a new disconnected error.
    pub fn disconnected(port: impl Into<String>) -> Self {
        Self::Disconnected { port: port.into() }
    }

    /// Create a new already-attached error.
    pub fn already_attached(port: impl Into<String>) -> Self {
        Self::AlreadyAttached { port: port.into() }
    }

    /// Create a new not-attached error.
    pub fn not_attached(port: impl Into<String>) -> Self {
        Self::NotAttached { port: port.into() }
    }

    /// Create a new generic port error.
    pub fn port(message: impl Into<String>) -> Self {
        Self::Port {
            message: message.into(),
        }
    }
}
