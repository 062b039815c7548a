use eframe::egui::{self, Align, Direction, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::report::aggregate::GroupedMeans;
use crate::report::correlation::CorrelationMatrix;

const ROW_HEIGHT: f32 = 20.0;

/// Format a mean or coefficient; missing values read "NaN".
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "NaN".to_string(),
    }
}

/// Format with `digits` significant digits and no trailing zeros, like
/// printf's `%g` (`1.0` → `1`, `0.8567` → `0.86`).
pub fn format_general(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= digits as i32 {
        let text = format!("{value:.prec$e}", prec = digits - 1);
        return match text.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{exp}", trim_zeros(mantissa)),
            None => text,
        };
    }
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Grouped-mean table: key column followed by one column per value.
pub fn grouped_means_table(ui: &mut Ui, id: &str, table: &GroupedMeans, centered: bool) {
    let layout = if centered {
        Layout::centered_and_justified(Direction::LeftToRight)
    } else {
        Layout::left_to_right(Align::Center)
    };

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(layout)
            .column(Column::auto().at_least(90.0))
            .columns(Column::auto().at_least(70.0), table.value_columns.len())
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong(&table.key_column);
                });
                for name in &table.value_columns {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for row in &table.rows {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(row.key.to_string());
                        });
                        for mean in &row.means {
                            table_row.col(|ui| {
                                ui.monospace(format_value(*mean, 6));
                            });
                        }
                    });
                }
            });
    });
}

/// Correlation matrix as a labelled square table.
pub fn correlation_table(ui: &mut Ui, id: &str, matrix: &CorrelationMatrix) {
    let n = matrix.labels.len();
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(60.0))
            .columns(Column::auto().at_least(80.0), n)
            .header(ROW_HEIGHT, |mut header| {
                header.col(|_ui| {});
                for label in &matrix.labels {
                    header.col(|ui| {
                        ui.strong(label);
                    });
                }
            })
            .body(|mut body| {
                for (i, label) in matrix.labels.iter().enumerate() {
                    body.row(ROW_HEIGHT, |mut table_row| {
                        table_row.col(|ui| {
                            ui.strong(label);
                        });
                        for j in 0..n {
                            table_row.col(|ui| {
                                ui.monospace(format_value(matrix.get(i, j), 6));
                            });
                        }
                    });
                }
            });
    });
}

/// Inline red error line used in place of a report.
pub fn report_error(ui: &mut Ui, message: &str) {
    ui.label(egui::RichText::new(message).color(egui::Color32::RED));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_render_as_nan() {
        assert_eq!(format_value(Some(12.345678), 2), "12.35");
        assert_eq!(format_value(None, 2), "NaN");
    }

    #[test]
    fn general_format_keeps_two_significant_digits() {
        assert_eq!(format_general(1.0, 2), "1");
        assert_eq!(format_general(0.8567, 2), "0.86");
        assert_eq!(format_general(-0.05123, 2), "-0.051");
        assert_eq!(format_general(0.996, 2), "1");
        assert_eq!(format_general(-0.5, 2), "-0.5");
        assert_eq!(format_general(0.0, 2), "0");
        assert_eq!(format_general(0.00001234, 2), "1.2e-5");
    }
}
