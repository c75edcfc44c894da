//! Concrete turning rules.

use sw_agent::Agent;
use sw_core::AgentRng;

use crate::{Steering, StepContext};

/// Random walk: each step turns by `uniform(-1, 1) · turn_noise · dt`.
///
/// The magnitude comes from `ctx.params.turn_noise`, so one rule instance
/// serves any configuration.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomTurn;

impl Steering for RandomTurn {
    fn turn(
        &self,
        _agent: &Agent,
        ctx:    &StepContext<'_>,
        rng:    &mut AgentRng,
    ) -> f32 {
        if ctx.params.turn_noise == 0.0 {
            return 0.0;
        }
        rng.signed_unit() * ctx.params.turn_noise * ctx.dt
    }
}

/// Constant turn rate in radians per second; agents trace circles of radius
/// `speed / rate`.
#[derive(Copy, Clone, Debug)]
pub struct Spin {
    pub rate: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { rate }
    }
}

impl Steering for Spin {
    fn turn(
        &self,
        _agent: &Agent,
        ctx:    &StepContext<'_>,
        _rng:   &mut AgentRng,
    ) -> f32 {
        self.rate * ctx.dt
    }
}
