/// Result alias that carries the custom [`VisualiserError`] type.
pub type Result<T> = std::result::Result<T, VisualiserError>;

/// Common error type for the core crate.
///
/// The animation player never produces errors; these variants cover the
/// layers around it (algorithm runners, configuration, the async driver).
#[derive(Debug, thiserror::Error)]
pub enum VisualiserError {
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// An algorithm runner refused its input. No frames were produced.
    #[error("invalid input for {algorithm}: {reason}")]
    InvalidInput {
        algorithm: &'static str,
        reason: String,
    },
    /// The task hosting a player has shut down.
    #[error("player has been shut down")]
    PlayerClosed,
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl VisualiserError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn invalid_input(algorithm: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            algorithm,
            reason: reason.into(),
        }
    }
}

impl From<&str> for VisualiserError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for VisualiserError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
