//! World-space coordinate type.
//!
//! `Point2` uses `f32` to match the 8-byte `vector_float2` layout a GPU
//! compute stage expects; at world extents in the low thousands this still
//! resolves well below a pixel.

/// A 2D world-space position.  Units match the world [`Size`][crate::Size].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point `distance` units away along `heading` (radians, 0 = +x).
    #[inline]
    pub fn advanced(self, heading: f32, distance: f32) -> Point2 {
        Point2 {
            x: self.x + heading.cos() * distance,
            y: self.y + heading.sin() * distance,
        }
    }

    /// Heading (radians, in `(-π, π]`) from `self` towards `target`.
    #[inline]
    pub fn heading_to(self, target: Point2) -> f32 {
        (target.y - self.y).atan2(target.x - self.x)
    }

    #[inline]
    pub fn distance(self, other: Point2) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// `true` if both components are neither NaN nor infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
