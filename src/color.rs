use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

const SATURATION: f32 = 0.70;
const LIGHTNESS: f32 = 0.50;

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Display colour of one curve. `rgb` feeds the plot, [`css`](Self::css) the exported chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColor {
    /// Hue in whole degrees.
    pub hue: u32,
    pub rgb: Color32,
}

impl SeriesColor {
    pub fn from_hue(hue: u32) -> Self {
        let hsl = Hsl::new(hue as f32, SATURATION, LIGHTNESS);
        let rgb: Srgb = hsl.into_color();
        SeriesColor {
            hue,
            rgb: Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            ),
        }
    }

    /// `hsl(h, 70%, 50%)`
    pub fn css(&self) -> String {
        format!(
            "hsl({}, {:.0}%, {:.0}%)",
            self.hue,
            SATURATION * 100.0,
            LIGHTNESS * 100.0
        )
    }
}

/// Generates `n` colours stepping the hue by `360 / n` whole degrees.
///
/// The step is truncated, so for `n` that does not divide 360 the hues stop
/// short of the full circle, and for `n > 360` the step is zero and every
/// curve gets hue 0.
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    if n == 0 {
        return Vec::new();
    }
    let hue_step = (360 / n) as u32;
    (0..n as u32)
        .map(|i| SeriesColor::from_hue(i * hue_step))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn css_format() {
        let colors = generate_palette(3);
        let css: Vec<String> = colors.iter().map(SeriesColor::css).collect();
        assert_eq!(
            css,
            vec!["hsl(0, 70%, 50%)", "hsl(120, 70%, 50%)", "hsl(240, 70%, 50%)"]
        );
    }

    #[test]
    fn hue_step_truncates() {
        let hues: Vec<u32> = generate_palette(7).iter().map(|c| c.hue).collect();
        assert_eq!(hues, vec![0, 51, 102, 153, 204, 255, 306]);
    }

    #[test]
    fn hues_distinct_up_to_360() {
        for n in [1, 2, 5, 11, 100, 359, 360] {
            let hues: BTreeSet<u32> = generate_palette(n).iter().map(|c| c.hue).collect();
            assert_eq!(hues.len(), n, "n = {n}");
        }
    }

    #[test]
    fn more_than_360_collapse_to_red() {
        let colors = generate_palette(361);
        assert_eq!(colors.len(), 361);
        assert!(colors.iter().all(|c| c.hue == 0));
    }

    #[test]
    fn rgb_of_primary_hues() {
        // hsl(0, 70%, 50%) = rgb(217, 38, 38)
        assert_eq!(SeriesColor::from_hue(0).rgb, Color32::from_rgb(217, 38, 38));
        assert_eq!(SeriesColor::from_hue(120).rgb, Color32::from_rgb(38, 217, 38));
        assert!(generate_palette(0).is_empty());
    }
}
