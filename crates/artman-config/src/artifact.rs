//! Artifact config schema (`artman.yaml`)
//!
//! ```yaml
//! common:
//!   api_name: iam
//!   api_version: v1
//!   organization_name: google-cloud
//!   src_proto_paths:
//!     - google/iam/v1
//!   service_yaml: google/iam/v1/iam.yaml
//!   gapic_yaml: google/iam/v1/test_gapic.yaml
//! artifacts:
//!   - name: python_gapic
//!     type: GAPIC
//!     language: PYTHON
//!     publish_targets:
//!       - name: python
//!         type: GITHUB
//!         location: git@github.com:googleapis/api-client-staging.git
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A proto dependency of the API, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtoDep {
    pub name: String,
}

/// API-level settings shared between the `common` section and artifacts.
///
/// Every field is optional so that an artifact can override only what it
/// needs; see [`ApiSettings::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proto_deps: Option<Vec<ProtoDep>>,

    /// Proto source directories, relative to the root directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_proto_paths: Option<Vec<String>>,

    /// Service config YAML, relative to the root directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_yaml: Option<String>,

    /// GAPIC config YAML, relative to the root directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gapic_yaml: Option<String>,

    /// Discovery document for DiscoGapic artifacts, relative to the root
    /// directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_doc: Option<String>,
}

impl ApiSettings {
    /// Return a copy of `self` with every field set in `overrides` replaced.
    pub fn overlay(&self, overrides: &ApiSettings) -> ApiSettings {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }

        ApiSettings {
            api_name: pick(&self.api_name, &overrides.api_name),
            api_version: pick(&self.api_version, &overrides.api_version),
            organization_name: pick(&self.organization_name, &overrides.organization_name),
            proto_deps: pick(&self.proto_deps, &overrides.proto_deps),
            src_proto_paths: pick(&self.src_proto_paths, &overrides.src_proto_paths),
            service_yaml: pick(&self.service_yaml, &overrides.service_yaml),
            gapic_yaml: pick(&self.gapic_yaml, &overrides.gapic_yaml),
            discovery_doc: pick(&self.discovery_doc, &overrides.discovery_doc),
        }
    }
}

/// Where a generated artifact can be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishTarget {
    pub name: String,

    /// Target type, e.g. `GITHUB`
    #[serde(rename = "type")]
    pub kind: String,

    /// Repository URL or directory, depending on `kind`
    #[serde(default)]
    pub location: String,
}

impl PublishTarget {
    pub fn is_github(&self) -> bool {
        self.kind.eq_ignore_ascii_case("github")
    }
}

/// Value of a pipeline-specific parameter.
///
/// Parameters are forwarded to the pipeline untouched. Common shapes get
/// their own variant; floats, maps and mixed lists land in `Structured`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
    Structured(serde_yaml::Value),
}

/// A single buildable artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,

    /// Pipeline kind, e.g. `GAPIC` or `GRPC`. Kept as written so that an
    /// unsupported kind is reported at selection time, not as a parse error.
    #[serde(rename = "type")]
    pub kind: String,

    /// Target language, e.g. `PYTHON`
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_level: Option<String>,

    /// Per-artifact overrides of the `common` section
    #[serde(flatten)]
    pub settings: ApiSettings,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publish_targets: Vec<PublishTarget>,

    /// Pipeline-specific parameters forwarded as-is
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ParamValue>,

    /// Artifact-level keys no field claims; reported by validation.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_yaml::Value>,
}

impl Artifact {
    /// Effective API settings: `common` overlaid with this artifact's own.
    pub fn effective_settings(&self, common: &ApiSettings) -> ApiSettings {
        common.overlay(&self.settings)
    }

    /// Names of artifact-level keys that were not recognized.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.unknown.keys().map(String::as_str).collect()
    }

    /// First publish target of type `GITHUB`, if any.
    pub fn github_target(&self) -> Option<&PublishTarget> {
        self.publish_targets.iter().find(|t| t.is_github())
    }
}

/// Parsed `artman.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default)]
    pub common: ApiSettings,

    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl ArtifactConfig {
    /// Look up an artifact by exact name.
    pub fn find(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// Names of all declared artifacts, in declaration order.
    pub fn artifact_names(&self) -> Vec<&str> {
        self.artifacts.iter().map(|a| a.name.as_str()).collect()
    }
}
