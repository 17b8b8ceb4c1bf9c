use thiserror::Error;

/// Failure reported by a listener callback during a publish
///
/// The bus never propagates this to the publisher: a failing listener is
/// logged with `tracing::warn!` and delivery continues with the remaining
/// listeners of the same publish.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Create a new listener error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Get the failure message
    pub fn message(&self) -> &str {
        &self.message
    }
}
