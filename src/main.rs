// git-scrape entry point.
// Parses arguments, sets up logging, and runs the requested action.

use std::process::ExitCode;

use clap::Parser;
use git_scrape::ScrapeError;
use git_scrape::app;
use git_scrape::cli::Cli;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "GIT_SCRAPE_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = app::run(&cli.settings(), cli.action()).await;

    match result {
        Ok(Some(report)) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(ScrapeError::CacheMiss(path)) => {
            error!(path = %path.display(), "issue cache missing");
            eprintln!("ERROR: Failed to find cached issues.json. Run `cache` first.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
