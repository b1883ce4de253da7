//! Invocation builder
//!
//! Runs overlay, selection and publish resolution in that order and returns
//! the `(pipeline_name, arguments)` pair as one value. Any failure aborts
//! the whole build; no partial result is ever returned.

use artman_config::{ArtifactConfig, UserConfig};
use serde::Serialize;

use crate::args::{ArgValue, Arguments, keys};
use crate::publish::{PublishMode, resolve_publish};
use crate::{RawFlags, Result, overlay, selector};

/// A fully resolved pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pipeline_name: String,
    arguments: Arguments,
}

impl Invocation {
    pub fn pipeline_name(&self) -> &str {
        &self.pipeline_name
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Publish mode recorded in the arguments.
    pub fn publish_mode(&self) -> PublishMode {
        match self.arguments.get_str(keys::PUBLISH) {
            Some("github") => PublishMode::Github,
            Some("local") => PublishMode::Local,
            _ => PublishMode::Noop,
        }
    }

    /// Copy safe to log or print.
    pub fn redacted(&self) -> Invocation {
        Invocation {
            pipeline_name: self.pipeline_name.clone(),
            arguments: self.arguments.redacted(),
        }
    }
}

/// Resolve one invocation from flags and both config layers.
pub fn build(
    flags: &RawFlags,
    artifact_config: &ArtifactConfig,
    user_config: &UserConfig,
) -> Result<Invocation> {
    let effective = overlay::merge(artifact_config, user_config, flags)?;
    let pipeline_name = selector::select(effective.artifact(), flags.subcommand)?;
    selector::check_required(effective.artifact(), flags.subcommand, effective.arguments())?;
    let publish = resolve_publish(flags, user_config, effective.root())?;

    let (artifact, _root, mut arguments) = effective.into_parts();
    let mode = publish.mode;
    publish.apply(&mut arguments);

    if mode == PublishMode::Github {
        if let Some(target) = artifact.github_target() {
            arguments.insert(keys::GIT_REPO, ArgValue::String(target.location.clone()));
        }
    }
    arguments.insert(
        keys::LANGUAGE,
        ArgValue::String(artifact.language.to_lowercase()),
    );

    tracing::info!(
        artifact = %artifact.name,
        pipeline = pipeline_name,
        publish = %mode,
        "Resolved invocation"
    );
    tracing::debug!(arguments = ?arguments.redacted(), "Final arguments");

    Ok(Invocation {
        pipeline_name: pipeline_name.to_string(),
        arguments,
    })
}
