//! CLI argument parsing using clap derive

use std::path::PathBuf;

use artman_core::flags::{DEFAULT_CONFIG, DEFAULT_OUTPUT_DIR, DEFAULT_USER_CONFIG};
use artman_core::{RawFlags, Subcommand as CoreSubcommand};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Container image used when `--image` is not given.
pub const DEFAULT_IMAGE: &str = "googleapis/artman:latest";

/// artman - Generate and publish API client artifacts
#[derive(Parser, Debug)]
#[command(name = "artman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shortcut for `--verbosity debug`
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = Verbosity::Warn)]
    pub verbosity: Verbosity,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level; `-v` wins over `--verbosity`.
    pub fn log_level(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Debug
        } else {
            self.verbosity
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Verbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Debug => "debug",
            Verbosity::Info => "info",
            Verbosity::Warn => "warn",
            Verbosity::Error => "error",
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate an artifact
    ///
    /// Examples:
    ///   artman generate python_gapic
    ///   artman generate --local java_grpc
    ///   artman generate --config google/iam/artman_iam.yaml --dry-run python_gapic
    Generate(ResolveArgs),

    /// Generate an artifact and publish it
    ///
    /// Examples:
    ///   artman publish --target github python_gapic
    ///   artman publish --target local --local-repo-dir ~/src java_grpc
    Publish {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// Where to publish (github or local)
        #[arg(long)]
        target: String,

        /// GitHub username; overrides the user config
        #[arg(long, env = "ARTMAN_GITHUB_USERNAME")]
        github_username: Option<String>,

        /// GitHub token; overrides the user config
        #[arg(long, env = "ARTMAN_GITHUB_TOKEN", hide_env_values = true)]
        github_token: Option<String>,
    },

    /// Write settings into the user config
    ///
    /// Only the given settings change; everything else in the file is kept.
    ///
    /// Examples:
    ///   artman configure --toolkit ~/src/toolkit
    ///   artman configure --github-username octocat --github-token ghp_xxx
    Configure {
        /// User config path
        #[arg(long, default_value = DEFAULT_USER_CONFIG)]
        user_config: PathBuf,

        /// Local toolkit checkout
        #[arg(long)]
        toolkit: Option<String>,

        /// Directory holding local repository checkouts
        #[arg(long)]
        local_repo_dir: Option<String>,

        #[arg(long)]
        github_username: Option<String>,

        #[arg(long)]
        github_token: Option<String>,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   artman completions bash > ~/.local/share/bash-completion/completions/artman
    ///   artman completions zsh > ~/.zfunc/_artman
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags shared by `generate` and `publish`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    /// Artifact config path
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// User config path
    #[arg(long, default_value = DEFAULT_USER_CONFIG)]
    pub user_config: PathBuf,

    /// Root for relative paths in the artifact config [default: current directory]
    #[arg(long)]
    pub root_dir: Option<PathBuf>,

    /// Use local checkouts instead of a container
    #[arg(long)]
    pub local: bool,

    /// Local checkout directory; overrides the user config
    #[arg(long)]
    pub local_repo_dir: Option<PathBuf>,

    /// Directory for generated files
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Container image
    #[arg(long, default_value = DEFAULT_IMAGE)]
    pub image: String,

    /// Print the resolved invocation instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Name of the artifact in the artifact config
    pub artifact_name: String,
}

impl ResolveArgs {
    /// Build resolver flags. Flags are fixed from here on.
    pub fn into_flags(self, subcommand: CoreSubcommand, verbosity: Verbosity) -> RawFlags {
        let mut flags = RawFlags::new(subcommand, self.artifact_name);
        flags.config = self.config;
        flags.user_config = self.user_config;
        flags.root_dir = self.root_dir;
        flags.local = self.local;
        flags.local_repo_dir = self.local_repo_dir;
        flags.output_dir = self.output_dir;
        flags.image = Some(self.image);
        flags.dry_run = self.dry_run;
        flags.verbosity = Some(verbosity.as_str().to_string());
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_defaults() {
        let cli = Cli::parse_from(["artman", "generate", "python_gapic"]);
        assert_eq!(cli.log_level(), Verbosity::Warn);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.artifact_name, "python_gapic");
                assert_eq!(args.config, PathBuf::from("artman.yaml"));
                assert_eq!(args.user_config, PathBuf::from("~/.artman/config.yaml"));
                assert_eq!(args.output_dir, PathBuf::from("./artman-genfiles"));
                assert_eq!(args.image, DEFAULT_IMAGE);
                assert!(args.root_dir.is_none());
                assert!(!args.local);
                assert!(!args.dry_run);
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn parse_generate_with_options() {
        let cli = Cli::parse_from([
            "artman",
            "generate",
            "--config",
            "iam.yaml",
            "--root-dir",
            "/work",
            "--local",
            "--local-repo-dir",
            "/src",
            "--dry-run",
            "java_grpc",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.config, PathBuf::from("iam.yaml"));
                assert_eq!(args.root_dir, Some(PathBuf::from("/work")));
                assert_eq!(args.local_repo_dir, Some(PathBuf::from("/src")));
                assert!(args.local);
                assert!(args.dry_run);
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn artifact_name_is_required() {
        assert!(Cli::try_parse_from(["artman", "generate"]).is_err());
    }

    #[test]
    fn publish_requires_target() {
        assert!(Cli::try_parse_from(["artman", "publish", "python_gapic"]).is_err());
    }

    #[test]
    fn parse_publish_command() {
        let cli = Cli::parse_from([
            "artman",
            "publish",
            "--target",
            "github",
            "--github-username",
            "test",
            "--github-token",
            "testtoken",
            "python_gapic",
        ]);
        match cli.command {
            Commands::Publish {
                resolve,
                target,
                github_username,
                github_token,
            } => {
                assert_eq!(resolve.artifact_name, "python_gapic");
                assert_eq!(target, "github");
                assert_eq!(github_username.as_deref(), Some("test"));
                assert_eq!(github_token.as_deref(), Some("testtoken"));
            }
            other => panic!("Expected Publish command, got {other:?}"),
        }
    }

    #[test]
    fn verbose_overrides_verbosity() {
        let cli = Cli::parse_from(["artman", "--verbosity", "error", "-v", "generate", "x"]);
        assert_eq!(cli.log_level(), Verbosity::Debug);

        let cli = Cli::parse_from(["artman", "generate", "x", "--verbosity", "info"]);
        assert_eq!(cli.log_level(), Verbosity::Info);
    }

    #[test]
    fn parse_configure_command() {
        let cli = Cli::parse_from(["artman", "configure", "--toolkit", "/toolkit"]);
        assert!(matches!(
            cli.command,
            Commands::Configure { toolkit: Some(ref t), github_token: None, .. } if t == "/toolkit"
        ));
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["artman", "completions", "bash"]);
        assert!(matches!(cli.command, Commands::Completions { .. }));
    }

    #[test]
    fn into_flags_carries_everything() {
        let cli = Cli::parse_from(["artman", "generate", "--image", "img:1", "python_gapic"]);
        let Commands::Generate(args) = cli.command else {
            panic!("Expected Generate command");
        };
        let flags = args.into_flags(CoreSubcommand::Generate, Verbosity::Info);

        assert_eq!(flags.subcommand, CoreSubcommand::Generate);
        assert_eq!(flags.artifact_name, "python_gapic");
        assert_eq!(flags.image.as_deref(), Some("img:1"));
        assert_eq!(flags.verbosity.as_deref(), Some("info"));
        assert!(flags.target.is_none());
    }
}
