mod app;
mod cli;
mod color;
mod data;
mod report;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::DashboardApp;
use clap::Parser;
use eframe::egui;

use crate::report::Reports;
use crate::state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let selection = args.selection();

    let dataset = data::loader::load_file(&args.data)
        .with_context(|| format!("loading {}", args.data.display()))?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names(),
        args.data.display()
    );

    if let Some(path) = &args.export {
        let reports = Reports::compute(&dataset, &selection);
        return report::export::write_json(path, &selection, &reports);
    }

    let mut state = AppState::new(selection);
    state.set_dataset(dataset, Some(args.data.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Air Quality Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
