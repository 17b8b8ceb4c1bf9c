use thiserror::Error;

use crate::projection::RecordProjection;

/// Result type alias using RecordError
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors raised while constructing or serializing a record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The required `message` field was missing or empty at construction
    #[error("message is required and cannot be empty")]
    EmptyMessage,

    /// Serializing a projection for a raise operation failed
    #[error("failed to serialize raise payload: {message}")]
    Serialization { message: String },
}

/// Terminal payload carried by `raise`/`raise_without_publish`
///
/// `Display` is the serialized projection itself, so the raised content is
/// exactly the canonical text form; consumers parse it back into the same
/// named fields via [`RaisedError::parse`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{payload}")]
pub struct RaisedError {
    payload: String,
}

impl RaisedError {
    pub(crate) fn new(payload: String) -> Self {
        Self { payload }
    }

    /// The serialized projection text
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Parse the payload back into the projected fields
    pub fn parse(&self) -> serde_json::Result<RecordProjection> {
        serde_json::from_str(&self.payload)
    }
}
