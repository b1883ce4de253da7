//! Resolution engine for artman invocations
//!
//! Combines three already-parsed inputs into one pipeline invocation:
//!
//! - [`RawFlags`] from the command line
//! - [`ArtifactConfig`](artman_config::ArtifactConfig) from `artman.yaml`
//! - [`UserConfig`](artman_config::UserConfig) from `~/.artman/config.yaml`
//!
//! ```text
//!   flags + artifact config + user config
//!                    |
//!               overlay::merge
//!                /          \
//!   selector::select    publish::resolve_publish
//!                \          /
//!              invocation::build
//!                    |
//!        (pipeline_name, arguments)
//! ```
//!
//! Resolution is synchronous and stateless. The only environment fact it
//! reads is the current directory, when no root directory is given.
//!
//! # Example
//!
//! ```
//! use artman_config::{ApiSettings, Artifact, ArtifactConfig, UserConfig};
//! use artman_core::{RawFlags, Subcommand, build};
//!
//! let config = ArtifactConfig {
//!     common: ApiSettings {
//!         src_proto_paths: Some(vec!["google/iam/v1".into()]),
//!         ..Default::default()
//!     },
//!     artifacts: vec![Artifact {
//!         name: "java_grpc".into(),
//!         kind: "GRPC".into(),
//!         language: "JAVA".into(),
//!         release_level: None,
//!         settings: ApiSettings::default(),
//!         publish_targets: Vec::new(),
//!         parameters: Default::default(),
//!         unknown: Default::default(),
//!     }],
//! };
//! let mut flags = RawFlags::new(Subcommand::Generate, "java_grpc");
//! flags.root_dir = Some("/work".into());
//!
//! let invocation = build(&flags, &config, &UserConfig::default()).unwrap();
//! assert_eq!(invocation.pipeline_name(), "GrpcClientPipeline");
//! assert_eq!(invocation.arguments().get_str("publish"), Some("noop"));
//! ```

pub mod args;
pub mod error;
pub mod executor;
pub mod flags;
pub mod invocation;
pub mod overlay;
pub mod publish;
pub mod selector;

pub use args::{ArgValue, Arguments, GithubCredentials, keys};
pub use error::{Error, Result};
pub use executor::PipelineExecutor;
pub use flags::{RawFlags, Subcommand};
pub use invocation::{Invocation, build};
pub use overlay::{EffectiveConfig, merge};
pub use publish::{PublishMode, PublishResolution, resolve_publish};
pub use selector::{PUBLISH_PIPELINE, PipelineKind, select};
