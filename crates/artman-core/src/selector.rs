//! Pipeline selection
//!
//! Maps an artifact's declared type and the subcommand to the name of the
//! pipeline that runs. The set of types is closed; anything else is
//! [`Error::UnsupportedPipeline`].

use std::fmt;

use artman_config::Artifact;

use crate::args::{Arguments, keys};
use crate::{Error, Result, Subcommand};

/// Pipeline run for every `publish` invocation, whatever the artifact type.
pub const PUBLISH_PIPELINE: &str = "PublishPipeline";

/// Supported artifact types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    Gapic,
    GapicOnly,
    Grpc,
    Protobuf,
    GapicConfig,
    DiscoGapic,
    DiscoGapicConfig,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 7] = [
        PipelineKind::Gapic,
        PipelineKind::GapicOnly,
        PipelineKind::Grpc,
        PipelineKind::Protobuf,
        PipelineKind::GapicConfig,
        PipelineKind::DiscoGapic,
        PipelineKind::DiscoGapicConfig,
    ];

    /// Parse a declared type. Case-insensitive; `-` is accepted for `_`.
    pub fn parse(kind: &str) -> Option<Self> {
        let normalized = kind.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.as_str() == normalized)
    }

    /// Type as written in `artman.yaml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Gapic => "GAPIC",
            PipelineKind::GapicOnly => "GAPIC_ONLY",
            PipelineKind::Grpc => "GRPC",
            PipelineKind::Protobuf => "PROTOBUF",
            PipelineKind::GapicConfig => "GAPIC_CONFIG",
            PipelineKind::DiscoGapic => "DISCOGAPIC",
            PipelineKind::DiscoGapicConfig => "DISCOGAPIC_CONFIG",
        }
    }

    /// Generation pipeline for this type.
    pub fn pipeline_name(&self) -> &'static str {
        match self {
            PipelineKind::Gapic => "GapicClientPipeline",
            PipelineKind::GapicOnly => "GapicOnlyClientPipeline",
            PipelineKind::Grpc => "GrpcClientPipeline",
            PipelineKind::Protobuf => "ProtoClientPipeline",
            PipelineKind::GapicConfig => "GapicConfigPipeline",
            PipelineKind::DiscoGapic => "DiscoGapicClientPipeline",
            PipelineKind::DiscoGapicConfig => "DiscoGapicConfigPipeline",
        }
    }

    /// Arguments the generation pipeline cannot run without.
    pub fn required_arguments(&self) -> &'static [&'static str] {
        match self {
            PipelineKind::Gapic | PipelineKind::GapicOnly => &[
                keys::DESC_PROTO_PATH,
                keys::SERVICE_YAML,
                keys::GAPIC_API_YAML,
            ],
            PipelineKind::Grpc | PipelineKind::Protobuf => &[keys::DESC_PROTO_PATH],
            PipelineKind::GapicConfig => &[keys::DESC_PROTO_PATH, keys::SERVICE_YAML],
            PipelineKind::DiscoGapic => &[keys::DISCOVERY_DOC, keys::GAPIC_API_YAML],
            PipelineKind::DiscoGapicConfig => &[keys::DISCOVERY_DOC],
        }
    }

    /// Resolve the declared type of `artifact`.
    pub fn of(artifact: &Artifact) -> Result<Self> {
        Self::parse(&artifact.kind).ok_or_else(|| Error::UnsupportedPipeline {
            artifact: artifact.name.clone(),
            kind: artifact.kind.clone(),
        })
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the pipeline to run for `artifact` under `subcommand`.
///
/// The artifact type is validated for both subcommands, so an unsupported
/// type cannot be published either.
pub fn select(artifact: &Artifact, subcommand: Subcommand) -> Result<&'static str> {
    let kind = PipelineKind::of(artifact)?;
    let name = match subcommand {
        Subcommand::Generate => kind.pipeline_name(),
        Subcommand::Publish => PUBLISH_PIPELINE,
    };
    tracing::debug!(artifact = %artifact.name, %kind, %subcommand, pipeline = name, "Selected pipeline");
    Ok(name)
}

/// Check that `arguments` carries everything the selected pipeline needs.
///
/// Only generation pipelines declare requirements.
pub fn check_required(
    artifact: &Artifact,
    subcommand: Subcommand,
    arguments: &Arguments,
) -> Result<()> {
    if subcommand != Subcommand::Generate {
        return Ok(());
    }
    let kind = PipelineKind::of(artifact)?;
    let missing: Vec<&str> = kind
        .required_arguments()
        .iter()
        .copied()
        .filter(|key| !arguments.contains_key(key))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(Error::configuration(format!(
        "artifact '{}' of type {} is missing required settings: {}",
        artifact.name,
        kind,
        missing.join(", ")
    )))
}
