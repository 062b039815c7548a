use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::catalog::{Pollutant, Station};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – the two selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    ui.strong("Select the pollutant to analyze:");
    let current = state.selection.pollutant;
    egui::ComboBox::from_id_salt("pollutant")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for pollutant in Pollutant::ALL {
                if ui
                    .selectable_label(current == pollutant, pollutant.to_string())
                    .clicked()
                {
                    state.set_pollutant(pollutant);
                }
            }
        });
    ui.add_space(8.0);

    ui.strong("Select the station to analyze:");
    let current = state.selection.station;
    egui::ComboBox::from_id_salt("station")
        .selected_text(current.name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for station in Station::ALL {
                if ui
                    .selectable_label(current == station, station.name())
                    .clicked()
                {
                    state.set_station(station);
                }
            }
        });

    ui.separator();
    ui.label(format!(
        "Yearly trend station: {}",
        state.selection.trend_station
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.reports.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export reports…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(summary) = &state.summary {
            let name = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stations = summary
                .stations
                .map_or_else(|| "no station column".to_string(), |n| format!("{n} stations"));
            ui.label(format!(
                "{name}  {} rows, {} columns, {stations}",
                summary.rows, summary.columns
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air quality data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    dataset.len(),
                    dataset.column_names()
                );
                state.set_dataset(dataset, Some(path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let Some(reports) = &state.reports else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export reports")
        .set_file_name("air_quality_reports.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::report::export::write_json(&path, &state.selection, reports) {
            log::error!("Failed to export reports: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
