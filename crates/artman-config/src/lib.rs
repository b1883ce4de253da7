//! Configuration schemas and loading for artman.
//!
//! Two files feed a resolution:
//!
//! - the artifact config (`artman.yaml`), describing the API and the
//!   artifacts that can be built from it, see [`ArtifactConfig`]
//! - the user config (`~/.artman/config.yaml`), holding machine-local
//!   paths and GitHub credentials, see [`UserConfig`]
//!
//! Both are plain data once loaded. Merging them is the job of
//! `artman-core`.

pub mod artifact;
pub mod error;
pub mod loader;
pub mod user;
pub mod validation;

pub use artifact::{ApiSettings, Artifact, ArtifactConfig, ParamValue, ProtoDep, PublishTarget};
pub use error::{Error, Result};
pub use loader::{ConfigLoader, expand_home};
pub use user::{GithubConfig, LocalConfig, UserConfig};
