//! [`TestWorkspace`] builder for CLI and loader scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::fixtures;

/// A temporary directory laid out like a user's checkout: an
/// `artman.yaml` at the top and a fake home holding `.artman/config.yaml`.
///
/// # Example
///
/// ```rust,no_run
/// use artman_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new().with_sample_artman_yaml();
/// ws.write_user_config("local:\n  toolkit: /toolkit\n");
/// assert!(ws.artman_yaml().exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory with an empty `home/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("home")).unwrap();
        Self { temp_dir }
    }

    /// Copy the sample `artman_test.yaml` in as `artman.yaml`.
    pub fn with_sample_artman_yaml(self) -> Self {
        self.write_artman_yaml(&fixtures::artman_yaml());
        self
    }

    /// Root of the workspace.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Fake home directory.
    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    pub fn artman_yaml(&self) -> PathBuf {
        self.root().join("artman.yaml")
    }

    /// `home/.artman/config.yaml`
    pub fn user_config(&self) -> PathBuf {
        self.home().join(".artman").join("config.yaml")
    }

    pub fn write_artman_yaml(&self, content: &str) {
        fs::write(self.artman_yaml(), content).unwrap();
    }

    pub fn write_user_config(&self, content: &str) {
        let path = self.user_config();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }
}
