//! Generate and publish command implementations
//!
//! Both load the two config layers, resolve an invocation and either print
//! it (`--dry-run`) or hand it to the executor.

use std::fmt::Write as _;

use colored::Colorize;

use artman_config::ConfigLoader;
use artman_core::{ArgValue, Invocation, PipelineExecutor, RawFlags, build};

use crate::error::Result;
use crate::executor::StdoutExecutor;

/// Resolve and run one invocation.
pub fn run_resolve(flags: &RawFlags) -> Result<()> {
    run_with_loader(flags, &ConfigLoader::new())
}

pub(crate) fn run_with_loader(flags: &RawFlags, loader: &ConfigLoader) -> Result<()> {
    tracing::debug!(?flags, "Resolving invocation");

    let artifact_config = loader.load_artifact_config(&flags.config)?;
    let user_config = loader.load_user_config(&flags.user_config)?;
    let invocation = build(flags, &artifact_config, &user_config)?;

    if flags.dry_run {
        println!(
            "{} Dry run, nothing will be executed",
            "=>".blue().bold()
        );
        print!("{}", render_summary(&invocation));
        return Ok(());
    }

    // Local runs use the toolkit on this machine, not a container.
    let image = if flags.local { None } else { flags.image.clone() };
    StdoutExecutor::new(image).execute(&invocation)?;
    Ok(())
}

/// Human-readable summary with credentials redacted.
pub fn render_summary(invocation: &Invocation) -> String {
    let invocation = invocation.redacted();
    let mut out = String::new();
    let _ = writeln!(out, "pipeline: {}", invocation.pipeline_name());
    let _ = writeln!(out, "publish:  {}", invocation.publish_mode());
    let _ = writeln!(out, "arguments:");
    for (key, value) in invocation.arguments() {
        let _ = writeln!(out, "  {key}: {}", format_value(value));
    }
    out
}

fn format_value(value: &ArgValue) -> String {
    match value {
        ArgValue::String(s) => s.clone(),
        ArgValue::Strings(items) => format!("[{}]", items.join(", ")),
        ArgValue::Path(path) => path.to_string(),
        ArgValue::Paths(paths) => {
            let paths: Vec<&str> = paths.iter().map(|p| p.as_str()).collect();
            format!("[{}]", paths.join(", "))
        }
        ArgValue::Bool(b) => b.to_string(),
        ArgValue::Integer(i) => i.to_string(),
        ArgValue::Github(credentials) => {
            format!("{} (token {})", credentials.username, credentials.token)
        }
        ArgValue::Structured(value) => {
            serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}
