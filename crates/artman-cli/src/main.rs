//! artman CLI
//!
//! Resolves which pipeline to run for an artifact, and with which
//! arguments, then hands the invocation to the pipeline runner.

mod cli;
mod commands;
mod error;
mod executor;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use artman_core::Subcommand;
use cli::{Cli, Commands, Verbosity};
use commands::ConfigureArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let level = cli.log_level();
    init_tracing(level);

    match cli.command {
        Commands::Generate(args) => {
            let flags = args.into_flags(Subcommand::Generate, level);
            commands::run_resolve(&flags)
        }
        Commands::Publish {
            resolve,
            target,
            github_username,
            github_token,
        } => {
            let mut flags = resolve.into_flags(Subcommand::Publish, level);
            flags.target = Some(target);
            flags.github_username = github_username;
            flags.github_token = github_token;
            commands::run_resolve(&flags)
        }
        Commands::Configure {
            user_config,
            toolkit,
            local_repo_dir,
            github_username,
            github_token,
        } => commands::run_configure(
            &user_config,
            ConfigureArgs {
                toolkit,
                local_repo_dir,
                github_username,
                github_token,
            },
        ),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "artman", &mut io::stdout());
            Ok(())
        }
    }
}

/// Log to stderr so stdout carries only the invocation. `RUST_LOG` wins
/// over the command-line level when set.
fn init_tracing(level: Verbosity) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(level == Verbosity::Debug)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{}: tracing already initialised", "warning".yellow().bold());
    }
    tracing::debug!(level = level.as_str(), "Logging initialised");
}
