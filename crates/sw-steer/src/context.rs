//! Read-only inputs shared by every agent update in one step.

use sw_core::{BoundaryPolicy, ColorPolicy, SimConfig, Tick, World};

/// Run-wide tuning constants, copied out of [`SimConfig`] once.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionParams {
    /// World units per second.
    pub speed:      f32,
    /// Turning-noise magnitude, radians per second.
    pub turn_noise: f32,
    pub boundary:   BoundaryPolicy,
    pub color:      ColorPolicy,
    /// Run seed; keys every per-step RNG.
    pub seed:       u64,
}

impl MotionParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            speed:      config.speed,
            turn_noise: config.turn_noise,
            boundary:   config.boundary,
            color:      config.color,
            seed:       config.seed,
        }
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

/// Everything an agent update may read besides the agent itself.
///
/// Built once per step by sw-sim and shared immutably across all workers.
/// It holds no reference to the agent store.
#[derive(Copy, Clone, Debug)]
pub struct StepContext<'a> {
    /// The step being computed (the tick of the state being read).
    pub tick:   Tick,

    /// Simulated seconds covered by this step.
    pub dt:     f32,

    pub world:  &'a World,

    pub params: MotionParams,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(tick: Tick, dt: f32, world: &'a World, params: MotionParams) -> Self {
        Self { tick, dt, world, params }
    }

    /// Distance an agent covers this step.
    #[inline]
    pub fn step_distance(&self) -> f32 {
        self.params.speed * self.dt
    }
}
