//! Parsed command-line input consumed by the resolver

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::Error;

/// Default artifact config path, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "artman.yaml";

/// Default user config path.
pub const DEFAULT_USER_CONFIG: &str = "~/.artman/config.yaml";

/// Default directory for generated files.
pub const DEFAULT_OUTPUT_DIR: &str = "./artman-genfiles";

/// Which top-level operation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subcommand {
    Generate,
    Publish,
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subcommand::Generate => write!(f, "generate"),
            Subcommand::Publish => write!(f, "publish"),
        }
    }
}

impl FromStr for Subcommand {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generate" => Ok(Subcommand::Generate),
            "publish" => Ok(Subcommand::Publish),
            _ => Err(Error::configuration(format!("unknown subcommand: {s}"))),
        }
    }
}

/// Flags for one invocation. Built once by the argument parser and never
/// mutated afterwards.
///
/// `Debug` redacts the GitHub token.
#[derive(Clone, PartialEq, Eq)]
pub struct RawFlags {
    pub subcommand: Subcommand,
    pub artifact_name: String,
    /// Artifact config path
    pub config: PathBuf,
    /// User config path
    pub user_config: PathBuf,
    /// Root for relative paths; `None` means the current working directory
    pub root_dir: Option<PathBuf>,
    /// Resolve repository paths against a local checkout
    pub local: bool,
    /// Explicit local checkout; wins over the user config
    pub local_repo_dir: Option<PathBuf>,
    /// Publish destination selector (`github` or `local`)
    pub target: Option<String>,
    pub github_username: Option<String>,
    pub github_token: Option<String>,
    pub output_dir: PathBuf,
    /// Container image; injected by the CLI
    pub image: Option<String>,
    pub dry_run: bool,
    pub verbosity: Option<String>,
}

impl RawFlags {
    /// Flags with every optional field at its default.
    pub fn new(subcommand: Subcommand, artifact_name: impl Into<String>) -> Self {
        Self {
            subcommand,
            artifact_name: artifact_name.into(),
            config: PathBuf::from(DEFAULT_CONFIG),
            user_config: PathBuf::from(DEFAULT_USER_CONFIG),
            root_dir: None,
            local: false,
            local_repo_dir: None,
            target: None,
            github_username: None,
            github_token: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            image: None,
            dry_run: false,
            verbosity: None,
        }
    }

    /// Username and token from the command line, when both were given.
    pub fn github_pair(&self) -> Option<(&str, &str)> {
        let username = self.github_username.as_deref().filter(|s| !s.is_empty())?;
        let token = self.github_token.as_deref().filter(|s| !s.is_empty())?;
        Some((username, token))
    }
}

impl fmt::Debug for RawFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFlags")
            .field("subcommand", &self.subcommand)
            .field("artifact_name", &self.artifact_name)
            .field("config", &self.config)
            .field("user_config", &self.user_config)
            .field("root_dir", &self.root_dir)
            .field("local", &self.local)
            .field("local_repo_dir", &self.local_repo_dir)
            .field("target", &self.target)
            .field("github_username", &self.github_username)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("output_dir", &self.output_dir)
            .field("image", &self.image)
            .field("dry_run", &self.dry_run)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}
