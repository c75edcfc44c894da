//! The per-agent state record.

use sw_core::{Point2, Rgb};

/// One simulated particle.
///
/// Records are independent: no field refers to another agent, so any subset
/// of the population can be updated concurrently.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    /// World-space position.
    pub position: Point2,
    /// Heading in radians.  The step core keeps it in `[0, 2π)`.
    pub angle: f32,
    /// Visualization color.  Present for every agent of a
    /// [`ColorLayout::Colored`] store and absent for every agent of a
    /// [`ColorLayout::Plain`] one.
    pub color: Option<Rgb>,
}

impl Agent {
    /// An uncolored agent.
    #[inline]
    pub fn new(position: Point2, angle: f32) -> Self {
        Self { position, angle, color: None }
    }

    /// A colored agent.
    #[inline]
    pub fn colored(position: Point2, angle: f32, color: Rgb) -> Self {
        Self { position, angle, color: Some(color) }
    }

    #[inline]
    pub fn layout(&self) -> ColorLayout {
        if self.color.is_some() { ColorLayout::Colored } else { ColorLayout::Plain }
    }
}

/// Whether the agents of a store carry a color.
///
/// Fixed when the store is created; every record in the store matches it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColorLayout {
    /// Position and heading only.
    Plain,
    /// Position, heading and RGB color.
    Colored,
}

impl ColorLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorLayout::Plain   => "plain",
            ColorLayout::Colored => "colored",
        }
    }
}

impl std::fmt::Display for ColorLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
