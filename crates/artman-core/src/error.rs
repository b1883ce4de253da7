//! Error types for artman-core
//!
//! Every variant is a configuration-authoring problem: nothing here is
//! transient, and nothing is retried.

/// Result type for artman-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving an invocation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The flags and config layers do not describe a resolvable invocation,
    /// e.g. the requested artifact is not declared.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The artifact's declared type has no pipeline
    #[error("Unsupported pipeline type '{kind}' for artifact '{artifact}'")]
    UnsupportedPipeline { artifact: String, kind: String },

    /// Publishing to GitHub without a complete username/token pair
    #[error(
        "Missing GitHub credentials: pass --github-username and --github-token, \
         or set github.username and github.token in the user config"
    )]
    MissingCredentials,

    /// Publish target is not one of `github` or `local`
    #[error("Unsupported publish target: {target}")]
    UnsupportedPublishTarget { target: String },

    /// The pipeline executor rejected the invocation
    #[error("Pipeline {pipeline} failed: {message}")]
    Execution { pipeline: String, message: String },

    /// Filesystem error from artman-fs
    #[error(transparent)]
    Fs(#[from] artman_fs::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The requested artifact is not declared in the artifact config.
    pub fn artifact_not_found(name: &str, available: &[&str]) -> Self {
        let available = if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        };
        Self::configuration(format!(
            "artifact '{name}' not found in artifact config (available: {available})"
        ))
    }
}
