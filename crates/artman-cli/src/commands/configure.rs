//! Configure command implementation

use std::path::Path;

use colored::Colorize;

use artman_config::{ConfigLoader, GithubConfig, LocalConfig, UserConfig};

use crate::error::{CliError, Result};

/// Settings given to `artman configure`. Unset fields are left alone.
#[derive(Debug, Default)]
pub struct ConfigureArgs {
    pub toolkit: Option<String>,
    pub local_repo_dir: Option<String>,
    pub github_username: Option<String>,
    pub github_token: Option<String>,
}

impl ConfigureArgs {
    fn into_update(self) -> UserConfig {
        UserConfig {
            local: LocalConfig {
                toolkit: self.toolkit,
                local_repo_dir: self.local_repo_dir,
            },
            github: GithubConfig {
                username: self.github_username,
                token: self.github_token,
            },
        }
    }
}

/// Merge `args` into the user config at `path`.
pub fn run_configure(path: &Path, args: ConfigureArgs) -> Result<()> {
    configure_with_loader(path, args, &ConfigLoader::new())
}

pub(crate) fn configure_with_loader(
    path: &Path,
    args: ConfigureArgs,
    loader: &ConfigLoader,
) -> Result<()> {
    let update = args.into_update();
    if update == UserConfig::default() {
        return Err(CliError::user(
            "Nothing to configure: pass at least one of --toolkit, --local-repo-dir, \
             --github-username, --github-token",
        ));
    }

    let written = loader.update_user_config(path, &update)?;

    println!(
        "{} Updated {}",
        "OK".green().bold(),
        loader.expand(path).display().to_string().cyan()
    );
    if let Some(toolkit) = &written.local.toolkit {
        println!("   toolkit:        {toolkit}");
    }
    if let Some(dir) = &written.local.local_repo_dir {
        println!("   local_repo_dir: {dir}");
    }
    if let Some(username) = &written.github.username {
        let token = if written.github.token.is_some() { "set" } else { "not set" };
        println!("   github:         {username} (token {token})");
    }
    Ok(())
}
