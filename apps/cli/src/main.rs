use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use client_core::{
    config::{clamp_num_results, load_settings, load_settings_with},
    HttpPaperApi,
};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "search_cli", about = "Query the exam paper search backend")]
struct Cli {
    /// Base URL of the search backend.
    #[arg(long)]
    server_url: Option<String>,
    /// Path to an exam_search.toml file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Default results per search (1-20).
    #[arg(long)]
    num_results: Option<u32>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_settings_with(path, |name| std::env::var(name).ok()),
        None => load_settings(),
    };
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    if let Some(num_results) = cli.num_results {
        settings.num_results = clamp_num_results(num_results);
    }
    if let Some(secs) = cli.request_timeout_secs {
        settings.request_timeout = Some(std::time::Duration::from_secs(secs));
    }

    let api = HttpPaperApi::from_settings(&settings)?;
    tracing::debug!(server_url = api.server_url(), "using backend");
    let mut stdout = std::io::stdout();
    commands::run(cli.command, &api, &settings, &mut stdout).await
}
