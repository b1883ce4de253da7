//! Loading artifact and user configs from disk

use std::path::{Path, PathBuf};

use artman_fs::{ConfigStore, NormalizedPath};

use crate::validation::validate_artifact_config;
use crate::{ArtifactConfig, Error, Result, UserConfig};

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~` are returned unchanged, as is `~` itself
/// when no home directory can be determined.
pub fn expand_home(path: &Path) -> PathBuf {
    expand_with(path, dirs::home_dir().as_deref())
}

fn expand_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    let raw = path.to_string_lossy();
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Loads the artifact config and the user config.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    store: ConfigStore,

    /// Override for the home directory used in `~` expansion (used for testing).
    /// When `None`, the platform home directory is used via `dirs::home_dir()`.
    home_dir_override: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader that expands `~` to `home` instead of the real home
    /// directory.
    pub fn with_home_dir(home: impl Into<PathBuf>) -> Self {
        Self {
            store: ConfigStore::new(),
            home_dir_override: Some(home.into()),
        }
    }

    /// Expand `~` in `path` using this loader's home directory.
    pub fn expand(&self, path: &Path) -> PathBuf {
        match &self.home_dir_override {
            Some(home) => expand_with(path, Some(home)),
            None => expand_home(path),
        }
    }

    /// Load and validate the artifact config.
    ///
    /// A missing file is an error: every resolution needs one.
    pub fn load_artifact_config(&self, path: &Path) -> Result<ArtifactConfig> {
        let path = self.expand(path);
        let normalized = NormalizedPath::new(&path);
        if !normalized.is_file() {
            return Err(Error::ConfigNotFound { path });
        }

        tracing::debug!(path = %normalized, "Loading artifact config");
        let config: ArtifactConfig = self.store.load(&normalized)?;
        validate_artifact_config(&config, &path)?;
        tracing::debug!(
            artifacts = ?config.artifact_names(),
            "Artifact config loaded"
        );
        Ok(config)
    }

    /// Load the user config, expanding `~` in `local.toolkit` and
    /// `local.local_repo_dir`.
    ///
    /// A missing file yields the default (empty) config.
    pub fn load_user_config(&self, path: &Path) -> Result<UserConfig> {
        let mut config = self.read_user_config(path)?;
        for dir in [&mut config.local.toolkit, &mut config.local.local_repo_dir] {
            if let Some(value) = dir.as_mut() {
                let expanded = self.expand(Path::new(value.as_str()));
                *value = expanded.to_string_lossy().into_owned();
            }
        }
        Ok(config)
    }

    /// The user config as stored, `~` left in place.
    fn read_user_config(&self, path: &Path) -> Result<UserConfig> {
        let path = self.expand(path);
        let normalized = NormalizedPath::new(&path);
        if !normalized.is_file() {
            tracing::debug!(path = %normalized, "No user config found, using defaults");
            return Ok(UserConfig::default());
        }

        tracing::debug!(path = %normalized, "Loading user config");
        Ok(self.store.load(&normalized)?)
    }

    /// Merge `update` into the user config at `path` and write it back.
    ///
    /// Returns the config as written; `~` in stored values is preserved.
    pub fn update_user_config(&self, path: &Path, update: &UserConfig) -> Result<UserConfig> {
        let mut config = self.read_user_config(path)?;
        config.merge(update);

        let target = NormalizedPath::new(self.expand(path));
        self.store.save(&target, &config)?;
        tracing::info!(path = %target, "User config written");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_with_home() {
        let home = Path::new("/home/artman");
        assert_eq!(
            expand_with(Path::new("~/.artman/config.yaml"), Some(home)),
            PathBuf::from("/home/artman/.artman/config.yaml")
        );
        assert_eq!(expand_with(Path::new("~"), Some(home)), PathBuf::from("/home/artman"));
        assert_eq!(
            expand_with(Path::new("artman.yaml"), Some(home)),
            PathBuf::from("artman.yaml")
        );
        assert_eq!(
            expand_with(Path::new("~user/x"), Some(home)),
            PathBuf::from("~user/x")
        );
    }

    #[test]
    fn expand_without_home_is_identity() {
        assert_eq!(
            expand_with(Path::new("~/.artman"), None),
            PathBuf::from("~/.artman")
        );
    }
}
