//! Canned configs backed by `test-fixtures/artman/`.

use std::fs;
use std::path::PathBuf;

use artman_config::{ArtifactConfig, LocalConfig, UserConfig};

/// Artifacts declared in `artman_test.yaml`.
pub const PYTHON_GAPIC: &str = "python_gapic";
pub const JAVA_GRPC: &str = "java_grpc";
pub const GAPIC_CONFIG: &str = "gapic_config";
/// Declared with a type no pipeline handles.
pub const RUBY_EXPERIMENTAL: &str = "ruby_experimental";
/// Discovery-based artifact with float and mapping parameters.
pub const JAVA_DISCOGAPIC: &str = "java_discogapic";
/// Discovery config artifact that omits its discovery document.
pub const DISCOGAPIC_CONFIG: &str = "discogapic_config";

/// Path to `test-fixtures/artman` (relative to the workspace root).
pub fn fixtures_dir() -> PathBuf {
    // crates/artman-test-utils -> ../../test-fixtures
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/artman")
}

/// Path to the sample artifact config.
pub fn artman_yaml_path() -> PathBuf {
    fixtures_dir().join("artman_test.yaml")
}

/// Path to the sample user config (toolkit, local dir and credentials set).
pub fn user_config_path() -> PathBuf {
    fixtures_dir().join("user_config.yaml")
}

/// Raw text of the sample artifact config.
pub fn artman_yaml() -> String {
    let path = artman_yaml_path();
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture at {}: {}", path.display(), e))
}

/// The sample artifact config, parsed.
///
/// # Panics
/// Panics if the fixture is missing or malformed.
pub fn artifact_config() -> ArtifactConfig {
    serde_yaml::from_str(&artman_yaml())
        .unwrap_or_else(|e| panic!("Fixture artman_test.yaml does not parse: {e}"))
}

/// The sample user config, parsed.
pub fn user_config() -> UserConfig {
    let path = user_config_path();
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture at {}: {}", path.display(), e));
    serde_yaml::from_str(&text)
        .unwrap_or_else(|e| panic!("Fixture user_config.yaml does not parse: {e}"))
}

/// A user config with only a toolkit path and no credentials.
pub fn user_config_with_toolkit() -> UserConfig {
    UserConfig {
        local: LocalConfig {
            toolkit: Some("/toolkit".to_string()),
            local_repo_dir: None,
        },
        ..Default::default()
    }
}
