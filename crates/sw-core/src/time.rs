//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter: tick `n` is the state
//! after `n` completed steps.  [`StepClock`] pairs the tick with the
//! simulated seconds the committed steps covered, summed from each step's
//! own `dt` so a run may mix step lengths.
//!
//! Counting ticks as integers keeps step ordering exact.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute step counter.
///
/// `u64` cannot overflow in practice: at 10 000 steps per second a run would
/// need ~58 million years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Tracks the current tick and the simulated seconds covered so far.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepClock {
    current_tick: Tick,
    elapsed_secs: f64,
}

impl StepClock {
    /// A clock at `tick` with no simulated time behind it.
    pub fn starting_at(tick: Tick) -> Self {
        Self { current_tick: tick, elapsed_secs: 0.0 }
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Simulated seconds covered by the steps this clock has counted.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Count one committed step of length `dt`.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = self.current_tick.next();
        self.elapsed_secs += dt as f64;
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs)
    }
}
