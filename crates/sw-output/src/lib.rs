//! `sw-output`: trajectory recording for the rust_swarm simulation.
//!
//! | Backend | Files created                               |
//! |---------|---------------------------------------------|
//! | CSV     | `trajectories.csv`, `step_summaries.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `sw_sim::SimObserver` and writes
//! one batch of rows per published snapshot.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sw_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { log::error!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{StepSummaryRow, TrajectoryRow};
pub use writer::OutputWriter;
