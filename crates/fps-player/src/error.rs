//! Controller construction errors.

use fps_config::ConfigError;

/// Errors that abort [`PlayerController`](crate::PlayerController) construction.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// A required host collaborator was not provided.
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// A tuning value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<ConfigError> for PlayerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(msg) => Self::InvalidConfiguration(msg),
            other => Self::InvalidConfiguration(other.to_string()),
        }
    }
}
