// Command-line interface.
// Global repository flags plus the `cache` and `report` subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::Action;
use crate::config::{DEFAULT_OWNER, DEFAULT_REPO, Settings};

/// Cache GitHub issues for a repository and report on their lead times
#[derive(Parser, Debug)]
#[command(name = "git-scrape", version, about, long_about = None)]
pub struct Cli {
    /// Repo owner
    #[arg(long, global = true, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Repo name
    #[arg(long, global = true, default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Directory holding cached issues and schemas
    #[arg(long, global = true, env = "GIT_SCRAPE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// GraphQL endpoint to query
    #[arg(long, global = true, env = "GIT_SCRAPE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// File containing `<login> <token>` (defaults to ~/.gittoken)
    #[arg(long, global = true, env = "GIT_SCRAPE_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Cache issues from GitHub. Will refresh whatever issues may be around.
    Cache,

    /// Report on issues cached from GitHub.
    Report {
        /// Refresh the cache before running the report.
        #[arg(long)]
        refresh: bool,
    },
}

impl Cli {
    /// Resolve flags into settings, falling back to defaults.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new(&self.owner, &self.repo);
        if let Some(dir) = &self.cache_dir {
            settings = settings.with_cache_root(dir);
        }
        if let Some(endpoint) = &self.endpoint {
            settings = settings.with_endpoint(endpoint);
        }
        if let Some(path) = &self.credentials {
            settings = settings.with_credentials_path(path);
        }
        settings
    }

    pub fn action(&self) -> Action {
        match self.command {
            Command::Cache => Action::Cache,
            Command::Report { refresh } => Action::Report { refresh },
        }
    }
}
