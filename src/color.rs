use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.75, 0.55).into_color())
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Sequential schemes for count-coloured bars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Blues,
    Greens,
}

impl Scheme {
    fn endpoints(self) -> (Srgb, Srgb) {
        match self {
            Scheme::Blues => (Srgb::new(0.78, 0.86, 0.94), Srgb::new(0.03, 0.19, 0.42)),
            Scheme::Greens => (Srgb::new(0.78, 0.91, 0.75), Srgb::new(0.0, 0.27, 0.11)),
        }
    }

    /// Colour for `value` within `[min, max]`: light at `min`, dark at `max`.
    pub fn color(self, value: f64, min: f64, max: f64) -> Color32 {
        let t = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        let (light, dark) = self.endpoints();
        let light = light.into_linear::<f32>();
        let dark = dark.into_linear::<f32>();
        to_color32(Srgb::from_linear(light.mix(dark, t)))
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from a column's values in first-seen order.
    pub fn new(values: &[CellValue]) -> Self {
        let palette = generate_palette(values.len());
        let mapping = values.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_scheme_darkens_with_value() {
        let low = Scheme::Blues.color(1.0, 1.0, 10.0);
        let high = Scheme::Blues.color(10.0, 1.0, 10.0);
        let brightness = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(brightness(low) > brightness(high));
        // Degenerate range uses the darkest shade.
        assert_eq!(Scheme::Greens.color(5.0, 5.0, 5.0), Scheme::Greens.color(9.0, 0.0, 9.0));
    }

    #[test]
    fn test_color_map_falls_back_to_gray() {
        let values = vec![CellValue::String("City".into()), CellValue::String("Town".into())];
        let map = ColorMap::new(&values);
        assert_ne!(map.color_for(&values[0]), Color32::GRAY);
        assert_eq!(map.color_for(&CellValue::String("Moon".into())), Color32::GRAY);
    }
}
