use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{
    config::{clamp_num_results, load_settings_with},
    HttpPaperApi,
};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{AppPaths, ExamSearchApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Search past exam papers by question text")]
struct Args {
    /// Base URL of the search backend.
    #[arg(long)]
    server_url: Option<String>,
    /// Results requested per search (1-20).
    #[arg(long)]
    num_results: Option<u32>,
    /// Path to an exam_search.toml file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Do not hand loaded PDFs to the system viewer automatically.
    #[arg(long)]
    no_auto_open: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let paths = AppPaths::resolve(args.config)?;
    let mut settings = load_settings_with(&paths.config_path, |name| std::env::var(name).ok());
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(num_results) = args.num_results {
        settings.num_results = clamp_num_results(num_results);
    }
    if args.no_auto_open {
        settings.auto_open_viewer = false;
    }
    tracing::info!(
        server_url = %settings.server_url,
        config = %paths.config_path.display(),
        "starting desktop gui"
    );

    let api = HttpPaperApi::from_settings(&settings)?;
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(Arc::new(api.clone()), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Exam Paper Search")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    let startup = StartupConfig { settings, paths };
    eframe::run_native(
        "Exam Paper Search",
        options,
        Box::new(move |_cc| Ok(Box::new(ExamSearchApp::new(cmd_tx, ui_rx, api, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop gui exited with error: {err}"))
}
