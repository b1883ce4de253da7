//! Structural checks on a loaded artifact config

use std::collections::HashSet;
use std::path::Path;

use crate::{ArtifactConfig, Error, Result};

/// Validate an artifact config loaded from `path`.
///
/// Checks that every artifact has a non-empty name, type and language,
/// and that names are unique. Whether the type is a supported pipeline is
/// decided later, at selection time.
pub fn validate_artifact_config(config: &ArtifactConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| Error::InvalidConfig {
        path: path.to_path_buf(),
        message,
    };

    let mut seen = HashSet::new();
    for (index, artifact) in config.artifacts.iter().enumerate() {
        if artifact.name.trim().is_empty() {
            return Err(invalid(format!("artifact #{index} has an empty name")));
        }
        if !seen.insert(artifact.name.as_str()) {
            return Err(invalid(format!(
                "artifact '{}' is declared more than once",
                artifact.name
            )));
        }
        if artifact.kind.trim().is_empty() {
            return Err(invalid(format!("artifact '{}' has an empty type", artifact.name)));
        }
        if artifact.language.trim().is_empty() {
            return Err(invalid(format!(
                "artifact '{}' has an empty language",
                artifact.name
            )));
        }
        let unknown = artifact.unknown_keys();
        if !unknown.is_empty() {
            tracing::warn!(
                artifact = %artifact.name,
                keys = ?unknown,
                "Ignoring unrecognized artifact keys; pipeline-specific values belong under 'parameters'"
            );
        }
    }

    if config.artifacts.is_empty() {
        tracing::warn!(path = %path.display(), "Artifact config declares no artifacts");
    }

    Ok(())
}
