use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{DivergingScale, INDIGO, generate_palette};
use crate::report::aggregate::GroupedMeans;
use crate::report::correlation::CorrelationMatrix;

use super::table::format_general;

const CHART_HEIGHT: f32 = 280.0;

/// Year ticks: whole numbers only, no thousands separator.
fn year_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.value.fract().abs() < 1e-9 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}

fn year_plot(id: &str, y_label: String) -> Plot {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(y_label)
        .x_axis_formatter(year_axis)
        .allow_scroll(false)
}

// ---------------------------------------------------------------------------
// Yearly trend of one pollutant
// ---------------------------------------------------------------------------

/// Line chart with point markers for a single-column grouped mean.
pub fn trend_line_chart(ui: &mut Ui, id: &str, trend: &GroupedMeans) {
    let name = trend.value_columns.first().cloned().unwrap_or_default();
    let points = trend.series(0);

    year_plot(id, format!("Average {name} Concentration")).show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(PlotPoints::from(points.clone()))
                .name(&name)
                .color(INDIGO)
                .width(2.0),
        );
        plot_ui.points(
            Points::new(PlotPoints::from(points))
                .name(&name)
                .color(INDIGO)
                .radius(4.0),
        );
    });
}

/// Bar chart of the same single-column grouped mean.
pub fn trend_bar_chart(ui: &mut Ui, id: &str, trend: &GroupedMeans) {
    let name = trend.value_columns.first().cloned().unwrap_or_default();
    let bars: Vec<Bar> = trend
        .series(0)
        .into_iter()
        .map(|[year, mean]| Bar::new(year, mean).width(0.6))
        .collect();

    year_plot(id, format!("Average {name} Concentration")).show(ui, |plot_ui| {
        plot_ui.bar_chart(
            BarChart::new(bars)
                .name(&name)
                .color(INDIGO.gamma_multiply(0.5)),
        );
    });
}

// ---------------------------------------------------------------------------
// Yearly trend of every pollutant
// ---------------------------------------------------------------------------

/// One line per value column on a shared year axis.
pub fn multi_line_chart(ui: &mut Ui, id: &str, trend: &GroupedMeans) {
    let colors = generate_palette(trend.value_columns.len());

    year_plot(id, "Average Concentration (µg/m³)".to_string()).show(ui, |plot_ui| {
        for (idx, (name, color)) in trend.value_columns.iter().zip(colors).enumerate() {
            let points = trend.series(idx);
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(name)
                    .color(color)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name(name)
                    .color(color)
                    .radius(3.0),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Colour-mapped grid with the coefficient written in each cell, plus a
/// colour bar for the fixed [-1, 1] range.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let scale = DivergingScale::correlation();
    let n = matrix.labels.len();
    if n == 0 {
        return;
    }

    let label_w = 60.0;
    let label_h = 22.0;
    let bar_w = 16.0;
    let gap = 12.0;
    let cell = ((ui.available_width() - label_w - bar_w - 3.0 * gap) / n as f32).clamp(40.0, 90.0);
    let size = Vec2::new(
        label_w + n as f32 * cell + gap + bar_w + 3.0 * gap,
        label_h + n as f32 * cell,
    );

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let grid_min = origin + Vec2::new(label_w, label_h);

    for (i, label) in matrix.labels.iter().enumerate() {
        // Column header and row label.
        painter.text(
            grid_min + Vec2::new((i as f32 + 0.5) * cell, -label_h / 2.0),
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(13.0),
            text_color,
        );
        painter.text(
            grid_min + Vec2::new(-6.0, (i as f32 + 0.5) * cell),
            Align2::RIGHT_CENTER,
            label,
            FontId::proportional(13.0),
            text_color,
        );

        for j in 0..n {
            let value = matrix.get(i, j);
            let fill = scale.color_for(value.unwrap_or(f64::NAN));
            let rect = egui::Rect::from_min_size(
                grid_min + Vec2::new(j as f32 * cell, i as f32 * cell),
                Vec2::splat(cell),
            );
            painter.rect_filled(rect, 0.0, fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                value.map_or_else(|| "NaN".to_string(), |v| format_general(v, 2)),
                FontId::monospace(14.0),
                DivergingScale::text_color_on(fill),
            );
        }
    }

    // Colour bar.
    let bar_left = grid_min.x + n as f32 * cell + gap;
    let bar_height = n as f32 * cell;
    let steps = 40;
    for s in 0..steps {
        let t = s as f64 / (steps - 1) as f64;
        let value = scale.max - t * (scale.max - scale.min);
        let y0 = grid_min.y + s as f32 * bar_height / steps as f32;
        let rect = egui::Rect::from_min_max(
            egui::pos2(bar_left, y0),
            egui::pos2(bar_left + bar_w, y0 + bar_height / steps as f32 + 0.5),
        );
        painter.rect_filled(rect, 0.0, scale.color_for(value));
    }
    painter.rect_stroke(
        egui::Rect::from_min_size(egui::pos2(bar_left, grid_min.y), Vec2::new(bar_w, bar_height)),
        0.0,
        Stroke::new(1.0, Color32::DARK_GRAY),
        egui::StrokeKind::Inside,
    );
    for (value, frac) in [(scale.max, 0.0), (0.0, 0.5), (scale.min, 1.0)] {
        painter.text(
            egui::pos2(bar_left + bar_w + 4.0, grid_min.y + frac * bar_height),
            Align2::LEFT_CENTER,
            format!("{value:.1}"),
            FontId::proportional(11.0),
            text_color,
        );
    }
}
