//! Publish target resolution
//!
//! Decides where a run publishes to and which credentials it carries.
//! `generate` never publishes. `publish` requires `--target github` or
//! `--target local`.

use std::fmt;

use artman_config::UserConfig;
use artman_fs::{NormalizedPath, resolve};
use serde::Serialize;

use crate::args::{ArgValue, Arguments, GithubCredentials, keys};
use crate::overlay::local_repo_dir;
use crate::{Error, RawFlags, Result, Subcommand};

/// Publish destination of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishMode {
    Noop,
    Github,
    Local,
}

impl PublishMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishMode::Noop => "noop",
            PublishMode::Github => "github",
            PublishMode::Local => "local",
        }
    }
}

impl fmt::Display for PublishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved publish settings.
///
/// Credentials are only ever present in [`PublishMode::Github`], and a
/// local directory only in [`PublishMode::Local`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResolution {
    pub mode: PublishMode,
    pub credentials: Option<GithubCredentials>,
    pub local_repo_dir: Option<NormalizedPath>,
}

impl PublishResolution {
    fn noop() -> Self {
        Self {
            mode: PublishMode::Noop,
            credentials: None,
            local_repo_dir: None,
        }
    }

    /// Write `publish` and the mode-specific keys into `arguments`.
    ///
    /// Any `github` entry that did not come from this resolution is
    /// dropped, so `github` is present exactly when the mode is GitHub.
    pub fn apply(self, arguments: &mut Arguments) {
        arguments.insert(keys::PUBLISH, ArgValue::String(self.mode.as_str().to_string()));

        match self.credentials {
            Some(credentials) => {
                arguments.insert(keys::GITHUB, ArgValue::Github(credentials));
            }
            None => {
                if arguments.remove(keys::GITHUB).is_some() {
                    tracing::warn!(
                        mode = %self.mode,
                        "Dropping 'github' argument outside of GitHub publishing"
                    );
                }
            }
        }

        if let Some(dir) = self.local_repo_dir {
            arguments.insert(keys::LOCAL_REPO_DIR, ArgValue::Path(dir));
        }
    }
}

/// Resolve the publish target for this run.
///
/// `root` anchors a relative local repository directory.
pub fn resolve_publish(
    flags: &RawFlags,
    user_config: &UserConfig,
    root: &NormalizedPath,
) -> Result<PublishResolution> {
    if flags.subcommand != Subcommand::Publish {
        return Ok(PublishResolution::noop());
    }

    // Targets are matched exactly: `GitHub` is not `github`.
    match flags.target.as_deref() {
        Some("github") => {
            let credentials = github_credentials(flags, user_config)?;
            tracing::debug!(username = %credentials.username, "Publishing to GitHub");
            Ok(PublishResolution {
                mode: PublishMode::Github,
                credentials: Some(credentials),
                local_repo_dir: None,
            })
        }
        Some("local") => {
            let dir = local_repo_dir(user_config, flags).ok_or_else(|| {
                Error::configuration(
                    "publishing locally requires local.local_repo_dir in the user config \
                     or --local-repo-dir",
                )
            })?;
            let dir = resolve(dir, root);
            tracing::debug!(dir = %dir, "Publishing to local directory");
            Ok(PublishResolution {
                mode: PublishMode::Local,
                credentials: None,
                local_repo_dir: Some(dir),
            })
        }
        Some("") | None => Err(Error::UnsupportedPublishTarget {
            target: "<none>".to_string(),
        }),
        Some(other) => Err(Error::UnsupportedPublishTarget {
            target: other.to_string(),
        }),
    }
}

/// Credentials from the flags if both halves were given, else from the
/// user config if both halves are set there.
fn github_credentials(flags: &RawFlags, user_config: &UserConfig) -> Result<GithubCredentials> {
    flags
        .github_pair()
        .or_else(|| user_config.github.pair())
        .map(|(username, token)| GithubCredentials::new(username, token))
        .ok_or(Error::MissingCredentials)
}
