//! `sw-sim`: step loop orchestrator for the rust_swarm simulation.
//!
//! # One pass per step
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Context : StepContext { tick, dt, &World, MotionParams } built once.
//!   ② Update  : advance_agent(i) for every index, reading the committed
//!                front buffer and writing the back buffer
//!                (parallel with the `parallel` feature).
//!   ③ Commit  : swap buffers; the new state becomes visible to step N + 1,
//!                to snapshots and to observers.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the update pass on Rayon's thread pool.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sw_agent::SpawnOptions;
//! use sw_core::SimConfig;
//! use sw_sim::{NoopObserver, SimBuilder};
//! use sw_steer::RandomTurn;
//!
//! let mut sim = SimBuilder::spawn(SimConfig::default(), SpawnOptions::default(), RandomTurn)?
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod kernel;
pub mod observer;
pub mod sim;
pub mod stop;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{LatestSnapshot, NoopObserver, SimObserver};
pub use sim::Sim;
pub use stop::StopHandle;
