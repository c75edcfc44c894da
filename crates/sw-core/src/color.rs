//! Per-agent visualization color.

use std::f32::consts::TAU;

/// Linear RGB, each channel conventionally in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED:   Rgb = Rgb { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Rgb = Rgb { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE:  Rgb = Rgb { r: 0.0, g: 0.0, b: 1.0 };

    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated, full-value color for a hue given as an angle in
    /// radians (any value; wrapped into one turn).
    pub fn from_hue(radians: f32) -> Rgb {
        let h = (radians.rem_euclid(TAU) / TAU) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        // rem_euclid can round up to exactly TAU, giving sector 6 == sector 0.
        let (r, g, b) = match (sector as u8) % 6 {
            0 => (1.0, f, 0.0),
            1 => (1.0 - f, 1.0, 0.0),
            2 => (0.0, 1.0, f),
            3 => (0.0, 1.0 - f, 1.0),
            4 => (f, 0.0, 1.0),
            _ => (1.0, 0.0, 1.0 - f),
        };
        Rgb { r, g, b }
    }

    /// Copy with every channel clamped into `[0, 1]`; NaN channels become 0.
    pub fn clamped(self) -> Rgb {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Rgb { r: c(self.r), g: c(self.g), b: c(self.b) }
    }
}
