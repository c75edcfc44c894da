//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, StepSummaryRow, TrajectoryRow};

/// A sink for trajectory samples and per-snapshot summaries.
///
/// From the observer's perspective all methods are infallible: errors are
/// stored and retrieved with [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one snapshot's worth of agent samples.
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()>;

    /// Write one summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
