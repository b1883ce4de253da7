//! Config overlay: artifact config + user config + flags
//!
//! Produces the bulk of a pipeline's arguments. Layers, later overriding
//! earlier:
//!
//! 1. `common` section of the artifact config
//! 2. the matched artifact's own settings
//! 3. user config (`toolkit`, `local_repo_dir`)
//! 4. flags (`root_dir`, `local`, `local_repo_dir`, `output_dir`)
//!
//! Pipeline-specific `parameters` are appended last and never shadow a
//! key computed here.

use artman_config::{Artifact, ArtifactConfig, UserConfig};
use artman_fs::{NormalizedPath, resolve, resolve_root};

use crate::args::{ArgValue, Arguments, keys};
use crate::{Error, RawFlags, Result};

/// Result of the overlay for one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    artifact: Artifact,
    root: NormalizedPath,
    arguments: Arguments,
}

impl EffectiveConfig {
    /// The matched artifact entry.
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Absolute root that relative paths were resolved against.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn into_parts(self) -> (Artifact, NormalizedPath, Arguments) {
        (self.artifact, self.root, self.arguments)
    }
}

/// Merge the artifact config, user config and flags for
/// `flags.artifact_name`.
///
/// Fails with [`Error::Configuration`] when the artifact is not declared,
/// before anything else is computed.
pub fn merge(
    artifact_config: &ArtifactConfig,
    user_config: &UserConfig,
    flags: &RawFlags,
) -> Result<EffectiveConfig> {
    let artifact = artifact_config.find(&flags.artifact_name).ok_or_else(|| {
        Error::artifact_not_found(&flags.artifact_name, &artifact_config.artifact_names())
    })?;

    let root = resolve_root(flags.root_dir.as_deref())?;
    let source_root = source_root(user_config, flags, &root)?;
    tracing::debug!(
        artifact = %artifact.name,
        root = %root,
        source_root = %source_root,
        "Merging config layers"
    );

    let settings = artifact.effective_settings(&artifact_config.common);
    let mut arguments = Arguments::new();

    arguments.insert(keys::ARTIFACT_TYPE, ArgValue::String(artifact.kind.clone()));
    let strings = [
        (keys::API_NAME, &settings.api_name),
        (keys::API_VERSION, &settings.api_version),
        (keys::ORGANIZATION_NAME, &settings.organization_name),
        (keys::RELEASE_LEVEL, &artifact.release_level),
    ];
    for (key, value) in strings {
        if let Some(value) = value {
            arguments.insert(key, ArgValue::String(value.clone()));
        }
    }
    if let Some(deps) = &settings.proto_deps {
        let names = deps.iter().map(|dep| dep.name.clone()).collect();
        arguments.insert(keys::PROTO_DEPS, ArgValue::Strings(names));
    }

    // Repository paths follow `source_root`, which is the local checkout
    // under `--local`.
    if let Some(paths) = &settings.src_proto_paths {
        let resolved = paths.iter().map(|p| resolve(p, &source_root)).collect();
        arguments.insert(keys::DESC_PROTO_PATH, ArgValue::Paths(resolved));
    }
    if let Some(service_yaml) = &settings.service_yaml {
        arguments.insert(
            keys::SERVICE_YAML,
            ArgValue::Paths(vec![resolve(service_yaml, &source_root)]),
        );
    }
    if let Some(gapic_yaml) = &settings.gapic_yaml {
        arguments.insert(
            keys::GAPIC_API_YAML,
            ArgValue::Paths(vec![resolve(gapic_yaml, &source_root)]),
        );
    }

    if let Some(discovery_doc) = &settings.discovery_doc {
        arguments.insert(
            keys::DISCOVERY_DOC,
            ArgValue::Path(resolve(discovery_doc, &source_root)),
        );
    }

    arguments.insert(
        keys::OUTPUT_DIR,
        ArgValue::Path(resolve(&flags.output_dir, &root)),
    );

    if let Some(toolkit) = &user_config.local.toolkit {
        arguments.insert(keys::TOOLKIT, ArgValue::Path(resolve(toolkit, &root)));
    }

    for (key, value) in &artifact.parameters {
        if !arguments.insert_if_absent(key.clone(), value.clone().into()) {
            tracing::warn!(
                artifact = %artifact.name,
                key = %key,
                "Ignoring artifact parameter that shadows a resolved argument"
            );
        }
    }

    Ok(EffectiveConfig {
        artifact: artifact.clone(),
        root,
        arguments,
    })
}

/// Root for repository-relative paths.
///
/// Normally the root directory. Under `--local` it is the local checkout:
/// `flags.local_repo_dir` if given, else the user config's.
fn source_root(
    user_config: &UserConfig,
    flags: &RawFlags,
    root: &NormalizedPath,
) -> Result<NormalizedPath> {
    if !flags.local {
        return Ok(root.clone());
    }

    let local_repo_dir = local_repo_dir(user_config, flags).ok_or_else(|| {
        Error::configuration(
            "--local requires a local repository directory: pass --local-repo-dir \
             or set local.local_repo_dir in the user config",
        )
    })?;
    Ok(resolve(local_repo_dir, root))
}

/// Local checkout directory: flag first, then user config.
pub(crate) fn local_repo_dir(user_config: &UserConfig, flags: &RawFlags) -> Option<String> {
    flags
        .local_repo_dir
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .or_else(|| user_config.local.local_repo_dir.clone())
        .filter(|dir| !dir.is_empty())
}
