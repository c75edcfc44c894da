//! Simulation observer trait for progress reporting and data collection.

use std::sync::{Arc, RwLock};

use sw_agent::Snapshot;
use sw_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, tick: Tick, agents: usize) {
///         if tick.0 % self.interval == 0 {
///             println!("step {tick}: moved {agents} agents");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before step `tick` reads the committed state.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called after step `tick` has been committed.
    ///
    /// `agents` is the number of agents updated (the whole population).
    fn on_step_end(&mut self, _tick: Tick, _agents: usize) {}

    /// Called every `config.output_interval_ticks` committed steps.
    ///
    /// `snapshot.tick()` is the number of steps committed so far and
    /// `elapsed_secs` the simulated time they cover.
    fn on_snapshot(&mut self, _snapshot: &Snapshot, _elapsed_secs: f64) {}

    /// Called once when the run ends, whether it completed or was stopped.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps the most recent snapshot where another thread (a renderer, say) can
/// pick it up.
///
/// Clones share the same slot: hand one clone to [`Sim::run`][crate::Sim::run]
/// and read from another.
#[derive(Clone, Default)]
pub struct LatestSnapshot {
    slot: Arc<RwLock<Option<Snapshot>>>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest published snapshot, if any.
    ///
    /// Cloning a `Snapshot` only bumps a reference count.
    pub fn get(&self) -> Option<Snapshot> {
        match self.slot.read() {
            Ok(guard)     => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, snapshot: Snapshot) {
        match self.slot.write() {
            Ok(mut guard) => *guard = Some(snapshot),
            Err(poisoned) => *poisoned.into_inner() = Some(snapshot),
        }
    }
}

impl SimObserver for LatestSnapshot {
    fn on_snapshot(&mut self, snapshot: &Snapshot, _elapsed_secs: f64) {
        self.publish(snapshot.clone());
    }
}
