//! Error types for marker-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Palette or configuration error
    #[error(transparent)]
    Core(#[from] marker_core::Error),

    /// Markup could not be parsed
    #[error(transparent)]
    Dom(#[from] marker_dom::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Session script is not valid TOML or has an unknown step
    #[error("Invalid session script: {0}")]
    Script(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
