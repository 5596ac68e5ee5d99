use std::{io::Write, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use client_core::{
    config::ClientSettings,
    controller::{
        papers::PaperBrowser,
        search::{SearchPane, SearchRejected, EMPTY_QUERY_ALERT},
    },
    poll_until_ready,
    view::{render_papers, render_results},
    PaperApi, PdfTarget,
};
use shared::domain::{PaperNumber, Year};

use crate::output::{format_lookup, format_papers, format_results, format_status};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the backend status and whether it is ready for searches.
    Status,
    /// Search questions by text.
    Search {
        query: String,
        #[arg(short = 'n', long)]
        num_results: Option<u32>,
        /// Show semantic and keyword sub-scores.
        #[arg(long)]
        debug: bool,
    },
    /// List available years, papers and marking schemes.
    Papers,
    /// Resolve the marking scheme page holding a question's solution.
    MarkingSchemePage { year: String, question: u32 },
    /// Save a paper, or the marking scheme when --paper is absent.
    Download {
        year: String,
        #[arg(long)]
        paper: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Poll the status endpoint until the backend is ready.
    WaitReady {
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

pub async fn run<W>(
    command: Command,
    api: &dyn PaperApi,
    settings: &ClientSettings,
    out: &mut W,
) -> Result<()>
where
    W: Write + Send,
{
    match command {
        Command::Status => {
            let status = api.status().await?;
            writeln!(out, "{}", format_status(&status))?;
        }
        Command::Search {
            query,
            num_results,
            debug,
        } => {
            let mut pane = SearchPane::new(num_results.unwrap_or(settings.num_results));
            pane.set_query_input(query);
            let request = match pane.begin(true) {
                Ok(request) => request,
                Err(SearchRejected::EmptyQuery) => bail!(EMPTY_QUERY_ALERT),
                Err(SearchRejected::NotReady) => bail!("backend is not ready"),
            };
            tracing::debug!(query = %request.query, num_results = request.num_results, "search");
            pane.finish(api.search(&request).await);
            write!(out, "{}", format_results(&render_results(pane.outcome(), debug)))?;
            if pane.last_results().is_none() {
                bail!("search failed");
            }
        }
        Command::Papers => {
            let mut papers = PaperBrowser::Loading;
            papers.apply(api.papers().await);
            write!(out, "{}", format_papers(&render_papers(&papers)))?;
            if matches!(papers, PaperBrowser::Failed(_)) {
                bail!("could not load papers");
            }
        }
        Command::MarkingSchemePage { year, question } => {
            let lookup = api
                .lookup_marking_scheme_page(&Year::new(year), question)
                .await?;
            writeln!(out, "{}", format_lookup(question, &lookup))?;
        }
        Command::Download {
            year,
            paper,
            page,
            out: path,
        } => {
            let year = Year::new(year);
            let target = match paper {
                Some(paper) => PdfTarget::paper(year, PaperNumber::new(paper), page),
                None => PdfTarget::marking_scheme(year, page),
            };
            let bytes = api.fetch_pdf(&target).await?;
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(out, "Saved {} bytes to {}", bytes.len(), path.display())?;
        }
        Command::WaitReady { timeout_secs } => {
            let poll = poll_until_ready(api, settings.status_poll_interval, |result| {
                let written = match result {
                    Ok(status) => writeln!(out, "{}", format_status(&status)),
                    Err(err) => writeln!(out, "Error connecting to server: {err}"),
                };
                if let Err(err) = written {
                    tracing::warn!("failed to write status line: {err}");
                }
            });
            match timeout_secs {
                Some(secs) => {
                    tokio::time::timeout(Duration::from_secs(secs), poll)
                        .await
                        .with_context(|| format!("backend not ready after {secs}s"))?;
                }
                None => {
                    poll.await;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
