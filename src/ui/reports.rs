use eframe::egui::{RichText, ScrollArea, Ui};

use crate::color::{INDIGO, ORCHID};
use crate::report::{ReportResult, Reports, Selection};
use crate::state::AppState;

use super::{plot, table};

// ---------------------------------------------------------------------------
// Central page – every report, top to bottom
// ---------------------------------------------------------------------------

/// Render the scrolling report page in the central panel.
pub fn report_page(ui: &mut Ui, state: &AppState) {
    let Some(reports) = &state.reports else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the dashboard  (File → Open…)");
        });
        return;
    };
    let selection = &state.selection;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(
                RichText::new("Air Quality Dashboard Across Stations")
                    .heading()
                    .size(28.0)
                    .color(INDIGO),
            );
            ui.label(
                RichText::new("Air Pollution Data Analysis Across Stations")
                    .heading()
                    .color(ORCHID),
            );
            ui.add_space(12.0);

            pollutant_trend_section(ui, selection, reports);
            ui.add_space(16.0);
            station_trend_section(ui, selection, reports);
            ui.add_space(16.0);
            correlation_section(ui, reports);
            ui.add_space(16.0);
            station_summary_section(ui, reports);
        });
}

fn subheading(ui: &mut Ui, text: String) {
    ui.separator();
    ui.label(RichText::new(text).heading().color(ORCHID));
}

fn no_rows_note(ui: &mut Ui, station: &str) {
    ui.weak(format!("No rows with a year recorded for station {station}."));
}

/// Render the report, or its error message in red.
fn show_or_error<T>(ui: &mut Ui, result: &ReportResult<T>, show: impl FnOnce(&mut Ui, &T)) {
    match result {
        Ok(report) => show(ui, report),
        Err(e) => table::report_error(ui, &e.to_string()),
    }
}

fn pollutant_trend_section(ui: &mut Ui, selection: &Selection, reports: &Reports) {
    let pollutant = selection.pollutant;
    subheading(
        ui,
        format!(
            "Average {pollutant} per Year at {} Station",
            selection.trend_station
        ),
    );
    show_or_error(ui, &reports.pollutant_trend, |ui, trend| {
        if trend.is_empty() {
            no_rows_note(ui, selection.trend_station.name());
        }
        ui.label(format!("Pollutant data (Average per Year for {pollutant}):"));
        table::grouped_means_table(ui, "pollutant_trend_table", trend, false);
        ui.add_space(8.0);
        ui.strong(format!("Average {pollutant} per Year"));
        plot::trend_line_chart(ui, "pollutant_trend_line", trend);
        ui.strong(format!("Average {pollutant} per Year (Bar Chart)"));
        plot::trend_bar_chart(ui, "pollutant_trend_bar", trend);
    });
}

fn station_trend_section(ui: &mut Ui, selection: &Selection, reports: &Reports) {
    let station = selection.station;
    subheading(
        ui,
        format!("Average Pollutant Levels at {station} Station per Year"),
    );
    show_or_error(ui, &reports.station_trend, |ui, trend| {
        if trend.is_empty() {
            no_rows_note(ui, station.name());
        }
        ui.label(format!("Average pollutant data at {station} station:"));
        table::grouped_means_table(ui, "station_trend_table", trend, false);
        ui.add_space(8.0);
        ui.strong(format!("Average Pollutants at {station} per Year"));
        plot::multi_line_chart(ui, "station_trend_lines", trend);
    });
}

fn correlation_section(ui: &mut Ui, reports: &Reports) {
    subheading(
        ui,
        "Correlation Between Dew Point, Temperature, PM2.5, and PM10".to_string(),
    );
    show_or_error(ui, &reports.correlation, |ui, matrix| {
        table::correlation_table(ui, "correlation_table", matrix);
        ui.add_space(8.0);
        ui.strong("Matrix Correlation Between Dew Point, Temperature, PM2.5, and PM10");
        plot::correlation_heatmap(ui, matrix);
    });
}

fn station_summary_section(ui: &mut Ui, reports: &Reports) {
    subheading(
        ui,
        "Average Pollutant Concentrations Across Various Stations".to_string(),
    );
    show_or_error(ui, &reports.station_summary, |ui, summary| {
        ui.label(format!("{} stations", summary.len()));
        table::grouped_means_table(ui, "station_summary_table", summary, true);
    });
}
