//! Run configuration.
//!
//! Loaded from JSON by the application (with the `serde` feature) or built in
//! code, then validated once before a run starts.  Every field is fixed for
//! the lifetime of the run.

use crate::{BoundaryPolicy, Size, SwarmError, SwarmResult, Tick, World};

/// Population used when none is configured.
pub const DEFAULT_POPULATION: usize = 50_000;

/// How the step core updates an agent's color.
///
/// Either rule reads only the agent's own state, so color never introduces a
/// cross-agent dependency.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColorPolicy {
    /// Color assigned at spawn is kept for the whole run.
    #[default]
    Hold,
    /// Color follows the agent's heading (hue = angle / 2π).
    HeadingHue,
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of agents.  Must be `> 0`.
    pub population: usize,

    /// World extents.  Both must be `> 0`.
    pub world: Size,

    /// Simulated seconds per step.  Must be finite and `> 0`.
    pub dt: f32,

    /// Movement speed in world units per second.
    pub speed: f32,

    /// Turning-noise magnitude in radians per second.
    pub turn_noise: f32,

    pub boundary: BoundaryPolicy,

    pub color: ColorPolicy,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Steps simulated by a full run.
    pub total_ticks: u64,

    /// Worker thread count for the parallel step.  `None` uses all logical
    /// cores.
    pub num_threads: Option<usize>,

    /// Publish a snapshot every N completed steps.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population:            DEFAULT_POPULATION,
            world:                 Size::default(),
            dt:                    1.0 / 60.0,
            speed:                 60.0,
            turn_noise:            2.0,
            boundary:              BoundaryPolicy::Wrap,
            color:                 ColorPolicy::Hold,
            seed:                  42,
            total_ticks:           600,
            num_threads:           None,
            output_interval_ticks: 60,
        }
    }
}

impl SimConfig {
    /// Check every field that would make a run ill-defined.
    ///
    /// # Errors
    /// [`SwarmError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> SwarmResult<()> {
        if self.population == 0 {
            return Err(SwarmError::config("population must be > 0"));
        }
        if u32::try_from(self.population).is_err() {
            return Err(SwarmError::config(format!(
                "population {} exceeds the AgentId range",
                self.population
            )));
        }
        World::from_size(self.world)?;
        validate_dt(self.dt)?;
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(SwarmError::config(format!(
                "speed must be finite and >= 0, got {}",
                self.speed
            )));
        }
        if !self.turn_noise.is_finite() || self.turn_noise < 0.0 {
            return Err(SwarmError::config(format!(
                "turn_noise must be finite and >= 0, got {}",
                self.turn_noise
            )));
        }
        if self.num_threads == Some(0) {
            return Err(SwarmError::config("num_threads must be > 0 when set"));
        }
        Ok(())
    }

    /// The validated world for this run.
    pub fn make_world(&self) -> SwarmResult<World> {
        World::from_size(self.world)
    }

    /// The tick at which a full run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}

/// Reject a non-positive or non-finite step length.
pub fn validate_dt(dt: f32) -> SwarmResult<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SwarmError::config(format!("dt must be finite and > 0, got {dt}")));
    }
    Ok(())
}
