//! The `Steering` trait: the main extension point for user code.

use sw_agent::Agent;
use sw_core::AgentRng;

use crate::StepContext;

/// Pluggable heading rule.
///
/// # Thread safety
///
/// sw-sim may call `turn` for many agents in parallel via rayon, so
/// implementations must be `Send + Sync`.  State that varies per agent must
/// live in the agent record, not in the rule.
///
/// # Determinism
///
/// Draw randomness only from `rng`.  sw-sim seeds it for each call from the
/// run seed, the tick and the agent's record, so the same record in the same
/// step always turns the same way, whatever its index or the thread count.
///
/// # Example
///
/// ```rust
/// use sw_agent::Agent;
/// use sw_core::AgentRng;
/// use sw_steer::{Steering, StepContext};
///
/// /// Turn left when in the lower half of the world, right otherwise.
/// struct Meander;
///
/// impl Steering for Meander {
///     fn turn(&self, agent: &Agent, ctx: &StepContext<'_>, _rng: &mut AgentRng) -> f32 {
///         let side = if agent.position.y < ctx.world.height() * 0.5 { 1.0 } else { -1.0 };
///         side * ctx.dt
///     }
/// }
/// ```
pub trait Steering: Send + Sync + 'static {
    /// Heading change (radians) for `agent` this step.
    ///
    /// Any finite or non-finite value is accepted: the step core normalizes
    /// the resulting heading and discards non-finite results.
    fn turn(
        &self,
        agent: &Agent,
        ctx:   &StepContext<'_>,
        rng:   &mut AgentRng,
    ) -> f32;
}
