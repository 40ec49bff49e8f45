use thiserror::Error;

/// Errors raised by ingest, partitioning and score lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AffectError {
    /// Incoming snapshot or node layout does not match the affect schema.
    /// Nothing has been mutated when this is returned.
    #[error("schema error: {0}")]
    Schema(String),
    /// A score was requested from a channel that has no history yet.
    /// Callers treat this as "no score available".
    #[error("no history recorded for channel {channel}")]
    EmptyHistory { channel: String },
    #[error("unknown channel path: {0}")]
    UnknownChannel(String),
    #[error("invalid color literal: {0}")]
    InvalidColor(String),
}

impl AffectError {
    pub fn schema(msg: impl Into<String>) -> Self {
        AffectError::Schema(msg.into())
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, AffectError::Schema(_))
    }
}
