//! World boundary policy shared by the step core and its tests.
//!
//! The policy is chosen once per run (it lives in `SimConfig`) and applied
//! uniformly to every agent.  All functions here are pure: they read only the
//! candidate position/heading of one agent plus the immutable [`World`].

use std::f32::consts::{PI, TAU};

use crate::{Point2, World};

/// How a position update that leaves the world is resolved.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundaryPolicy {
    /// Toroidal world: `position mod size`, always in `[0, w) × [0, h)`.
    #[default]
    Wrap,
    /// Hard walls: position held on `[0, w] × [0, h]`.  With `reflect`, the
    /// heading bounces off the wall that was hit.
    Clamp { reflect: bool },
}

impl BoundaryPolicy {
    /// Resolve a candidate position against the world.
    ///
    /// Returns the bounded position and the (possibly reflected) heading.
    /// The heading is returned normalized into `[0, 2π)`.
    pub fn apply(self, candidate: Point2, heading: f32, world: &World) -> (Point2, f32) {
        match self {
            BoundaryPolicy::Wrap => {
                let p = Point2 {
                    x: wrap_axis(candidate.x, world.width()),
                    y: wrap_axis(candidate.y, world.height()),
                };
                (p, normalize_angle(heading))
            }
            BoundaryPolicy::Clamp { reflect } => {
                let hit_x = candidate.x < 0.0 || candidate.x > world.width();
                let hit_y = candidate.y < 0.0 || candidate.y > world.height();
                let p = Point2 {
                    x: candidate.x.clamp(0.0, world.width()),
                    y: candidate.y.clamp(0.0, world.height()),
                };
                let mut a = heading;
                if reflect {
                    if hit_x {
                        a = PI - a;
                    }
                    if hit_y {
                        a = -a;
                    }
                }
                (p, normalize_angle(a))
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryPolicy::Wrap                     => "wrap",
            BoundaryPolicy::Clamp { reflect: false } => "clamp",
            BoundaryPolicy::Clamp { reflect: true }  => "clamp+reflect",
        }
    }
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap one coordinate into `[0, extent)`.
#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    let w = v.rem_euclid(extent);
    // A tiny negative `v` rounds up to exactly `extent`.
    if w >= extent { 0.0 } else { w }
}

/// Normalize a heading into `[0, 2π)`.
///
/// Non-finite input maps to `0.0`, so a heading never carries NaN/Inf into
/// the next step.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let n = a.rem_euclid(TAU);
    if n >= TAU { 0.0 } else { n }
}
