//! Error types for artman-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Resolution failure from artman-core
    #[error(transparent)]
    Core(#[from] artman_core::Error),

    /// Config loading failure from artman-config
    #[error(transparent)]
    Config(#[from] artman_config::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
