//! HSL colors for participants and confetti

use serde::{Deserialize, Serialize};

/// A color in HSL space (hue in degrees, saturation/lightness in 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Participant palette: mid saturation, light
    pub const fn participant(hue: f32) -> Self {
        Self::new(hue, 0.7, 0.6)
    }

    /// Confetti palette: fully saturated
    pub const fn confetti(hue: f32) -> Self {
        Self::new(hue, 1.0, 0.5)
    }

    /// Convert to linear-ish RGBA for the GPU (no gamma correction)
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m, alpha]
    }

    /// CSS `hsl()` string for page glue
    pub fn css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue.round(),
            (self.saturation * 100.0).round(),
            (self.lightness * 100.0).round()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 0.001)
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(Hsl::confetti(0.0).to_rgba(1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(approx(Hsl::confetti(120.0).to_rgba(1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(approx(Hsl::confetti(240.0).to_rgba(0.5), [0.0, 0.0, 1.0, 0.5]));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(approx(
            Hsl::confetti(360.0).to_rgba(1.0),
            Hsl::confetti(0.0).to_rgba(1.0)
        ));
    }

    #[test]
    fn test_css() {
        assert_eq!(Hsl::participant(210.0).css(), "hsl(210, 70%, 60%)");
    }
}
