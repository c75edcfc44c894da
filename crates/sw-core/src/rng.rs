//! Deterministic RNG wrapper.
//!
//! # Determinism strategy
//!
//! An `AgentRng` is never carried from one step to the next.  It is seeded
//! fresh wherever randomness is needed:
//!
//! - at spawn, from `global_seed XOR (agent_id * MIXING_CONSTANT)`;
//! - in a step, from the global seed, the tick and the bits of the agent's
//!   committed record ([`AgentRng::for_state`]).
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio.  A
//! step draw therefore depends only on what the step core may read, so the
//! result does not depend on worker count, scheduling order or where an
//! agent sits in the store.

use std::f32::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Tick};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 finalizer.
#[inline]
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(MIXING_CONSTANT);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Short-lived deterministic RNG for one agent.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from the global seed, the step being computed and a fingerprint
    /// of the agent's committed state.
    ///
    /// Equal inputs give equal streams; the agent's index is not an input.
    pub fn for_state(global_seed: u64, tick: Tick, state: &[u32]) -> Self {
        let mut h = mix(global_seed ^ tick.0.wrapping_mul(MIXING_CONSTANT));
        for &word in state {
            h = mix(h ^ word as u64);
        }
        AgentRng(SmallRng::seed_from_u64(h))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }

    /// Uniform in `[-1, 1]`.
    #[inline]
    pub fn signed_unit(&mut self) -> f32 {
        self.0.gen_range(-1.0f32..=1.0)
    }

    /// Uniform heading in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.0.gen_range(0.0f32..TAU)
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
