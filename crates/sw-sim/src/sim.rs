//! The `Sim` struct and its step loop.

use log::{debug, info, trace};
use sw_agent::{AgentStore, Snapshot};
use sw_core::{SimConfig, StepClock, Tick, World, validate_dt};
use sw_steer::{MotionParams, Steering, StepContext};

use crate::{SimError, SimObserver, SimResult, StopHandle, kernel};

/// The main simulation runner.
///
/// `Sim<S>` owns the population and drives one data-parallel pass per step:
///
/// 1. **Read**: every agent's committed record from the front buffer.
/// 2. **Update** (parallel with the `parallel` feature):
///    [`kernel::advance_agent`] for each index, writing the back buffer.
/// 3. **Commit**: swap buffers.  This is the only barrier in a step; step
///    N + 1 reads exactly what step N wrote.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: Steering> {
    /// Double-buffered agent records.
    pub agents: AgentStore,

    /// The steering rule.  Called once per agent per step.
    pub steering: S,

    /// Fixed for the run; read through [`Sim::config`].
    pub(crate) config: SimConfig,

    /// World bounds, fixed for the run; read through [`Sim::world`].
    pub(crate) world: World,

    pub(crate) params: MotionParams,

    /// Tick and simulated seconds of the committed state.
    pub(crate) clock: StepClock,

    pub(crate) stop: StopHandle,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<S: Steering> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Returns early, on a committed state, once the [`StopHandle`] is set.
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        info!(
            "run start: {} agents, {} → {}, world {}, boundary {}",
            self.agents.len(),
            self.clock.current_tick(),
            end,
            self.world.size(),
            self.params.boundary,
        );
        while self.clock.current_tick() < end {
            if self.stop.is_stopped() {
                debug!("stop requested at {}", self.clock.current_tick());
                break;
            }
            self.observed_step(observer)?;
        }
        self.finish(observer);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.  Honors the stop handle.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.stop.is_stopped() {
                debug!("stop requested at {}", self.clock.current_tick());
                break;
            }
            self.observed_step(observer)?;
        }
        Ok(())
    }

    /// Advance every agent by one step of the configured `dt`.
    pub fn step(&mut self) -> SimResult<()> {
        self.step_with(self.config.dt)
    }

    /// Advance every agent by one step of length `dt`.
    ///
    /// # Errors
    /// [`SimError::InvalidConfig`] if `dt` is not finite and `> 0`.  The store
    /// is untouched in that case.
    pub fn step_with(&mut self, dt: f32) -> SimResult<()> {
        validate_dt(dt).map_err(SimError::lift)?;
        let now = self.clock.current_tick();
        trace!("step {now}: dt {dt}");

        let ctx = StepContext::new(now, dt, &self.world, self.params);
        let steering = &self.steering;
        let (current, next) = self.agents.split_buffers();

        #[cfg(not(feature = "parallel"))]
        kernel::step_sequential(steering, &ctx, current, next);

        #[cfg(feature = "parallel")]
        match &self.pool {
            Some(pool) => pool.install(|| kernel::step_parallel(steering, &ctx, current, next)),
            None       => kernel::step_parallel(steering, &ctx, current, next),
        }

        self.agents.commit();
        self.clock.advance(dt);
        Ok(())
    }

    /// A copy of the committed population.
    pub fn snapshot(&self) -> Snapshot {
        self.agents.snapshot()
    }

    /// Handle that stops [`run`](Self::run) between steps.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Simulated seconds covered by the committed steps.
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    /// Tick of the committed state.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    /// The configuration the run was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// World bounds.  Changing them requires building a new `Sim`.
    pub fn world(&self) -> &World {
        &self.world
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn observed_step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick();
        observer.on_step_start(now);
        self.step()?;
        observer.on_step_end(now, self.agents.len());

        let interval = self.config.output_interval_ticks;
        if interval > 0 && self.agents.generation().0.is_multiple_of(interval) {
            observer.on_snapshot(&self.agents.snapshot(), self.clock.elapsed_secs());
        }
        Ok(())
    }

    fn finish<O: SimObserver>(&self, observer: &mut O) {
        let final_tick: Tick = self.clock.current_tick();
        info!("run end: {final_tick}, {:.2} simulated seconds", self.clock.elapsed_secs());
        observer.on_sim_end(final_tick);
    }
}
