//! Admin Charts - renders the analytics dashboard charts to PNG
//!
//! Usage: admin-charts [OUT_DIR] [CONFIG_JSON] [DASHBOARD_JSON]

use admin_charts::dashboard::{Dashboard, DashboardExporter};
use admin_charts::ChartConfig;
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "dashboard".to_string()));

    let config = match args.next() {
        Some(path) => ChartConfig::load(&path)
            .with_context(|| format!("Failed to load chart config from {}", path))?,
        None => ChartConfig::default(),
    };

    let dashboard = match args.next() {
        Some(path) => Dashboard::load(&path)
            .with_context(|| format!("Failed to load dashboard data from {}", path))?,
        None => Dashboard::sample()?,
    };

    let exporter = DashboardExporter::new(&config).context("Invalid chart configuration")?;
    let paths = exporter
        .export(&dashboard, &out_dir)
        .with_context(|| format!("Failed to export charts to {}", out_dir.display()))?;

    info!(count = paths.len(), dir = %out_dir.display(), "Dashboard exported");
    Ok(())
}
