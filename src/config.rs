use std::path::PathBuf;

use clap::Parser;

/// Launch records dashboard
#[derive(Debug, Parser)]
#[command(name = "launch-dash")]
#[command(version)]
#[command(about = "Interactive launch records dashboard", long_about = None)]
pub struct Cli {
    /// Launch records file (.csv, .json or .parquet)
    pub dataset: Option<PathBuf>,
}

/// Everything the dashboard needs to start, resolved once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Granularity of the payload sliders, in kg.
    pub payload_step: f64,
    /// Distance between slider tick labels, in kg.
    pub mark_spacing: i64,
}

pub const DEFAULT_DATASET: &str = "spacex_launch_dash.csv";

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            window_title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            payload_step: 1000.0,
            mark_spacing: 10_000,
        }
    }
}

impl DashboardConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let mut config = Self::default();
        if let Some(path) = cli.dataset {
            config.dataset_path = path;
        }
        config
    }
}
