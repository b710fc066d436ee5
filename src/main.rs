mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod state;
mod ui;

use anyhow::Context;

use app::SleepDashboardApp;
use config::DashboardConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args().skip(1));

    // No data, no dashboard: a load failure stops the process here.
    let dataset = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data_path.display()))
        .with_context(|| format!("loading survey data from {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} respondents, genders {:?}",
        dataset.len(),
        dataset.genders()
    );

    eframe::run_native(
        "Sleep & Health Survey Dashboard",
        config.native_options(),
        Box::new(|_cc| Ok(Box::new(SleepDashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
