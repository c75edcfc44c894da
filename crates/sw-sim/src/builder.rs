//! Fluent builder for constructing a [`Sim`].

use sw_agent::{AgentStore, AgentStoreBuilder, SpawnOptions};
use sw_core::{SimConfig, StepClock};
use sw_steer::{MotionParams, Steering};

use crate::{Sim, SimError, SimResult, StopHandle};

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: population, world size, `dt`, speed, seed, …
/// - [`AgentStore`]: from [`sw_agent::AgentStoreBuilder`],
///   [`sw_agent::load_agents`], or [`SimBuilder::spawn`]
/// - `S: Steering`: the heading rule
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                 |
/// |-------------------|-------------------------|
/// | `.stop_handle(h)` | A fresh `StopHandle`    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::spawn(config, SpawnOptions::default(), RandomTurn)?
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: Steering> {
    config:   SimConfig,
    agents:   AgentStore,
    steering: S,
    stop:     Option<StopHandle>,
}

impl<S: Steering> SimBuilder<S> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: AgentStore, steering: S) -> Self {
        Self { config, agents, steering, stop: None }
    }

    /// Spawn `config.population` agents with `options`, seeded from
    /// `config.seed`, and wrap them in a builder.
    ///
    /// # Errors
    /// [`SimError::InvalidConfig`] if the config or the spawn options are
    /// invalid.
    pub fn spawn(config: SimConfig, options: SpawnOptions, steering: S) -> SimResult<Self> {
        config.validate().map_err(SimError::lift)?;
        let world = config.make_world().map_err(SimError::lift)?;
        let agents = AgentStoreBuilder::new(config.population, config.seed)
            .options(options)
            .build(&world)
            .map_err(SimError::lift)?;
        Ok(Self::new(config, agents, steering))
    }

    /// Share an existing stop handle, e.g. one wired to a Ctrl-C handler.
    pub fn stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Validate inputs, build the worker pool and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<S>> {
        self.config.validate().map_err(SimError::lift)?;
        let world = self.config.make_world().map_err(SimError::lift)?;

        let agent_count = self.agents.len();
        if agent_count != self.config.population {
            return Err(SimError::AgentCountMismatch {
                expected: self.config.population,
                got:      agent_count,
                what:     "agent store",
            });
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None    => None,
        };

        Ok(Sim {
            clock:    StepClock::starting_at(self.agents.generation()),
            params:   MotionParams::from_config(&self.config),
            config:   self.config,
            world,
            agents:   self.agents,
            steering: self.steering,
            stop:     self.stop.unwrap_or_default(),
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
