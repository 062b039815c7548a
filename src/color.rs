use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// Accent used for headings and the bar chart.
pub const INDIGO: Color32 = Color32::from_rgb(0x4B, 0x00, 0x82);
pub const ORCHID: Color32 = Color32::from_rgb(0x99, 0x32, 0xCC);

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

/// Blue → light grey → red, sampled over a fixed `[min, max]` range.
#[derive(Debug, Clone, Copy)]
pub struct DivergingScale {
    pub min: f64,
    pub max: f64,
    low: LinSrgb,
    mid: LinSrgb,
    high: LinSrgb,
}

impl DivergingScale {
    /// The cool/warm scale centred on zero used for correlations.
    pub fn correlation() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
            low: linear(59, 76, 192),
            mid: linear(221, 221, 221),
            high: linear(180, 4, 38),
        }
    }

    /// Colour for `value`; values outside the range are clamped.
    /// Undefined values (NaN) are drawn grey.
    pub fn color_for(&self, value: f64) -> Color32 {
        if value.is_nan() {
            return Color32::GRAY;
        }
        let centre = (self.min + self.max) / 2.0;
        let v = value.clamp(self.min, self.max);
        let mixed = if v < centre {
            let t = ((v - self.min) / (centre - self.min)) as f32;
            self.low.mix(self.mid, t)
        } else {
            let t = ((v - centre) / (self.max - centre)) as f32;
            self.mid.mix(self.high, t)
        };
        to_color32(Srgb::from_linear(mixed))
    }

    /// Black or white, whichever reads better on top of `fill`.
    pub fn text_color_on(fill: Color32) -> Color32 {
        let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
        if luma > 140.0 {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }
}

fn linear(r: u8, g: u8, b: u8) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        assert_ne!(colors[0], colors[3]);
    }

    #[test]
    fn scale_hits_its_anchor_colours() {
        let scale = DivergingScale::correlation();
        assert_eq!(scale.color_for(-1.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(scale.color_for(0.0), Color32::from_rgb(221, 221, 221));
        assert_eq!(scale.color_for(1.0), Color32::from_rgb(180, 4, 38));
    }

    #[test]
    fn scale_clamps_out_of_range_values() {
        let scale = DivergingScale::correlation();
        assert_eq!(scale.color_for(5.0), scale.color_for(1.0));
        assert_eq!(scale.color_for(-3.0), scale.color_for(-1.0));
        assert_eq!(scale.color_for(f64::NAN), Color32::GRAY);
    }

    #[test]
    fn text_contrast_follows_fill_brightness() {
        assert_eq!(DivergingScale::text_color_on(Color32::WHITE), Color32::BLACK);
        assert_eq!(DivergingScale::text_color_on(Color32::from_rgb(59, 76, 192)), Color32::WHITE);
    }
}
