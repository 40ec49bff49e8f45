use affect_core::AffectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Affect(#[from] AffectError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config invalid: {0}")]
    InvalidConfig(String),
    #[error("session lock poisoned")]
    Poisoned,
}

impl SessionError {
    /// True when the incoming snapshot was rejected and the session kept its
    /// previous state.
    pub fn is_rejected_snapshot(&self) -> bool {
        matches!(self, SessionError::Affect(e) if e.is_schema())
    }
}
