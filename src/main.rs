mod app;
mod color;
mod config;
mod data;
mod export;
mod figure;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_cli(Cli::parse());

    // The table is loaded exactly once; a bad file means no window.
    let table = data::loader::load_file(&config.dataset_path)
        .with_context(|| format!("loading {}", config.dataset_path.display()))
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))?;
    log::info!(
        "Loaded {} launches from {} sites, payload {}..={} kg",
        table.len(),
        table.sites().len(),
        table.min_payload(),
        table.max_payload()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(table, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
