//! The per-agent update and the pass that applies it to a whole population.
//!
//! [`advance_agent`] is a pure function of one committed record and the
//! shared [`StepContext`].  Its randomness comes from an [`AgentRng`] seeded
//! on the spot from the run seed, the tick and the record's bits, so nothing
//! is carried between steps outside the store and an agent's index never
//! reaches the update.  The pass functions only decide how the indices are
//! scheduled, so the sequential and parallel variants write identical
//! buffers.

use sw_agent::Agent;
use sw_core::{AgentRng, ColorPolicy, Rgb, normalize_angle};
use sw_steer::{Steering, StepContext};

/// The RNG a step hands to the steering rule for `agent`.
pub fn step_rng(agent: &Agent, ctx: &StepContext<'_>) -> AgentRng {
    let color = agent.color.map_or([u32::MAX; 3], |c| [c.r.to_bits(), c.g.to_bits(), c.b.to_bits()]);
    AgentRng::for_state(
        ctx.params.seed,
        ctx.tick,
        &[
            agent.position.x.to_bits(),
            agent.position.y.to_bits(),
            agent.angle.to_bits(),
            color[0],
            color[1],
            color[2],
        ],
    )
}

/// Compute the next record for `current`.
///
/// Never fails: a non-finite heading falls back to the previous heading (or
/// `0`), a non-finite position falls back to the previous bounded position
/// (or the world center).
pub fn advance_agent<S: Steering + ?Sized>(steering: &S, current: &Agent, ctx: &StepContext<'_>) -> Agent {
    let mut rng = step_rng(current, ctx);
    let previous = normalize_angle(current.angle);
    let raw = current.angle + steering.turn(current, ctx, &mut rng);
    let heading = if raw.is_finite() { normalize_angle(raw) } else { previous };

    let origin = if current.position.is_finite() {
        current.position
    } else {
        ctx.world.center()
    };
    let candidate = origin.advanced(heading, ctx.step_distance());
    let (position, angle) = if candidate.is_finite() {
        ctx.params.boundary.apply(candidate, heading, ctx.world)
    } else {
        ctx.params.boundary.apply(origin, heading, ctx.world)
    };

    let color = match (ctx.params.color, current.color) {
        (ColorPolicy::HeadingHue, Some(_)) => Some(Rgb::from_hue(angle)),
        (_, color)                         => color,
    };

    Agent { position, angle, color }
}

/// Update every agent in index order on the calling thread.
///
/// Both slices must have the same length.
pub fn step_sequential<S: Steering + ?Sized>(
    steering: &S,
    ctx:      &StepContext<'_>,
    current:  &[Agent],
    next:     &mut [Agent],
) {
    debug_assert_eq!(current.len(), next.len());

    for (cur, out) in current.iter().zip(next.iter_mut()) {
        *out = advance_agent(steering, cur, ctx);
    }
}

/// Update every agent on the current Rayon pool.
///
/// Each index reads its own committed record and writes its own output slot,
/// so the result does not depend on how the range is split across workers.
#[cfg(feature = "parallel")]
pub fn step_parallel<S: Steering + ?Sized>(
    steering: &S,
    ctx:      &StepContext<'_>,
    current:  &[Agent],
    next:     &mut [Agent],
) {
    use rayon::prelude::*;

    debug_assert_eq!(current.len(), next.len());

    current
        .par_iter()
        .zip(next.par_iter_mut())
        .for_each(|(cur, out)| *out = advance_agent(steering, cur, ctx));
}
