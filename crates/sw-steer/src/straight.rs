//! A no-op steering rule: agents keep their heading.

use sw_agent::Agent;
use sw_core::AgentRng;

use crate::{Steering, StepContext};

/// A [`Steering`] rule that never turns.
///
/// Useful in tests and as a baseline: with `Straight`, a step is a pure
/// translation followed by the boundary policy.
pub struct Straight;

impl Steering for Straight {
    fn turn(
        &self,
        _agent: &Agent,
        _ctx:   &StepContext<'_>,
        _rng:   &mut AgentRng,
    ) -> f32 {
        0.0
    }
}
