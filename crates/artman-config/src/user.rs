//! User config schema (`~/.artman/config.yaml`)
//!
//! ```yaml
//! local:
//!   toolkit: ~/src/toolkit
//!   local_repo_dir: ~/src
//! github:
//!   username: octocat
//!   token: ghp_...
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-local paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Path to a local toolkit checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolkit: Option<String>,

    /// Directory holding local repository checkouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repo_dir: Option<String>,
}

/// GitHub credentials.
///
/// `Debug` never prints the token.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl GithubConfig {
    /// Both username and token, when both are present and non-empty.
    pub fn pair(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|s| !s.is_empty())?;
        let token = self.token.as_deref().filter(|s| !s.is_empty())?;
        Some((username, token))
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Parsed user config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub local: LocalConfig,

    #[serde(default)]
    pub github: GithubConfig,
}

impl UserConfig {
    /// Merge another user config into this one.
    ///
    /// Fields set in `other` take precedence; unset fields keep the
    /// current value.
    pub fn merge(&mut self, other: &UserConfig) {
        fn take(base: &mut Option<String>, over: &Option<String>) {
            if over.is_some() {
                base.clone_from(over);
            }
        }

        take(&mut self.local.toolkit, &other.local.toolkit);
        take(&mut self.local.local_repo_dir, &other.local.local_repo_dir);
        take(&mut self.github.username, &other.github.username);
        take(&mut self.github.token, &other.github.token);
    }
}
