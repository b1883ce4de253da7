//! Typed argument map handed to a pipeline

use std::collections::BTreeMap;
use std::fmt;

use artman_config::ParamValue;
use artman_fs::NormalizedPath;
use serde::Serialize;

/// Argument keys produced by the resolver.
pub mod keys {
    pub const LANGUAGE: &str = "language";
    pub const PUBLISH: &str = "publish";
    pub const GITHUB: &str = "github";
    pub const TOOLKIT: &str = "toolkit";
    pub const ARTIFACT_TYPE: &str = "artifact_type";
    pub const API_NAME: &str = "api_name";
    pub const API_VERSION: &str = "api_version";
    pub const ORGANIZATION_NAME: &str = "organization_name";
    pub const RELEASE_LEVEL: &str = "release_level";
    pub const PROTO_DEPS: &str = "proto_deps";
    pub const DESC_PROTO_PATH: &str = "desc_proto_path";
    pub const SERVICE_YAML: &str = "service_yaml";
    pub const GAPIC_API_YAML: &str = "gapic_api_yaml";
    pub const OUTPUT_DIR: &str = "output_dir";
    pub const GIT_REPO: &str = "git_repo";
    pub const LOCAL_REPO_DIR: &str = "local_repo_dir";
    pub const DISCOVERY_DOC: &str = "discovery_doc";
}

const REDACTED: &str = "<redacted>";

/// GitHub username and token passed to a publishing pipeline.
///
/// `Debug` never prints the token; serialization does, since the
/// pipeline needs it.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct GithubCredentials {
    pub username: String,
    pub token: String,
}

impl GithubCredentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for GithubCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubCredentials")
            .field("username", &self.username)
            .field("token", &REDACTED)
            .finish()
    }
}

/// A single argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    String(String),
    Strings(Vec<String>),
    Path(NormalizedPath),
    Paths(Vec<NormalizedPath>),
    Bool(bool),
    Integer(i64),
    Github(GithubCredentials),
    /// Pass-through parameter with no narrower shape (floats, mappings).
    Structured(serde_yaml::Value),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_github(&self) -> Option<&GithubCredentials> {
        match self {
            ArgValue::Github(credentials) => Some(credentials),
            _ => None,
        }
    }

    /// Paths carried by this value; empty for non-path values.
    pub fn paths(&self) -> Vec<&NormalizedPath> {
        match self {
            ArgValue::Path(path) => vec![path],
            ArgValue::Paths(paths) => paths.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl From<ParamValue> for ArgValue {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Bool(b) => ArgValue::Bool(b),
            ParamValue::Integer(i) => ArgValue::Integer(i),
            ParamValue::Text(s) => ArgValue::String(s),
            ParamValue::List(items) => ArgValue::Strings(items),
            ParamValue::Structured(value) => ArgValue::Structured(value),
        }
    }
}

/// Ordered map of argument name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Arguments(BTreeMap<String, ArgValue>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: ArgValue) -> Option<ArgValue> {
        self.0.insert(key.into(), value)
    }

    /// Insert a value unless `key` is already present.
    ///
    /// Returns `false` when the existing value was kept.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: ArgValue) -> bool {
        match self.0.entry(key.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ArgValue::as_str)
    }

    /// Paths for `key`; empty if absent or not path-valued.
    pub fn get_paths(&self, key: &str) -> Vec<&NormalizedPath> {
        self.get(key).map(ArgValue::paths).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy safe to log or print: GitHub tokens replaced.
    pub fn redacted(&self) -> Arguments {
        let inner = self
            .0
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    ArgValue::Github(credentials) => ArgValue::Github(GithubCredentials {
                        username: credentials.username.clone(),
                        token: REDACTED.to_string(),
                    }),
                    other => other.clone(),
                };
                (key.clone(), value)
            })
            .collect();
        Arguments(inner)
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = (&'a String, &'a ArgValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
