//! World bounds for a simulation run.
//!
//! [`Size`] is the raw two-integer descriptor shared with a renderer (it is
//! also the resolution of any trail texture).  [`World`] is the validated,
//! immutable form the step core reads: it caches the `f32` extents used as
//! the wrap modulus so the per-agent kernel never converts integers.

use crate::{Point2, SwarmError, SwarmResult};

/// Integer world extents.  Both must be `> 0` for a run to start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub x: i32,
    pub y: i32,
}

impl Size {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Number of cells in a field buffer of this resolution.
    #[inline]
    pub fn area(self) -> u64 {
        self.x.max(0) as u64 * self.y.max(0) as u64
    }
}

impl Default for Size {
    fn default() -> Self {
        Size { x: 1000, y: 1000 }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Validated, read-only bounds of one run.
///
/// Construct with [`World::configure`]; there is no way to mutate a `World`
/// afterwards.  Resizing means building a new simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct World {
    size:   Size,
    width:  f32,
    height: f32,
}

impl World {
    /// Validate `x`, `y` and derive the wrap constants.
    ///
    /// # Errors
    /// [`SwarmError::InvalidConfig`] if either extent is `<= 0`.
    pub fn configure(x: i32, y: i32) -> SwarmResult<World> {
        if x <= 0 || y <= 0 {
            return Err(SwarmError::config(format!(
                "world extents must be positive, got {x}x{y}"
            )));
        }
        Ok(World {
            size:   Size { x, y },
            width:  x as f32,
            height: y as f32,
        })
    }

    /// Same as [`configure`](Self::configure) from a [`Size`].
    pub fn from_size(size: Size) -> SwarmResult<World> {
        World::configure(size.x, size.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Extent along x as `f32` (the wrap modulus).
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Extent along y as `f32` (the wrap modulus).
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Point2 {
        Point2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Smaller of the two extents; used to size spawn regions.
    #[inline]
    pub fn min_extent(&self) -> f32 {
        self.width.min(self.height)
    }

    /// `true` if `p` lies in the half-open box `[0, w) × [0, h)`.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }

    /// `true` if `p` lies in the closed box `[0, w] × [0, h]`.
    #[inline]
    pub fn contains_inclusive(&self, p: Point2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}
