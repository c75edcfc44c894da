//! Plain data row types written by output backends.

use sw_agent::Snapshot;
use sw_core::Rgb;

/// One agent's committed state at a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub agent_id: u32,
    /// Steps committed when the sample was taken.
    pub tick:     u64,
    pub x:        f32,
    pub y:        f32,
    pub angle:    f32,
    /// `None` for agents of a plain store; written as three empty fields.
    pub color:    Option<Rgb>,
}

impl TrajectoryRow {
    /// One row per agent, in index order.
    pub fn from_snapshot(snapshot: &Snapshot) -> Vec<TrajectoryRow> {
        let tick = snapshot.tick().0;
        snapshot
            .iter()
            .enumerate()
            .map(|(i, a)| TrajectoryRow {
                agent_id: i as u32,
                tick,
                x:        a.position.x,
                y:        a.position.y,
                angle:    a.angle,
                color:    a.color,
            })
            .collect()
    }
}

/// Population-level statistics for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub agent_count:  u64,
    pub mean_x:       f64,
    pub mean_y:       f64,
}

impl StepSummaryRow {
    pub fn from_snapshot(snapshot: &Snapshot, elapsed_secs: f64) -> StepSummaryRow {
        let n = snapshot.len();
        let (sx, sy) = snapshot
            .iter()
            .fold((0.0f64, 0.0f64), |(sx, sy), a| (sx + a.position.x as f64, sy + a.position.y as f64));
        let (mean_x, mean_y) = if n == 0 { (0.0, 0.0) } else { (sx / n as f64, sy / n as f64) };
        StepSummaryRow {
            tick: snapshot.tick().0,
            elapsed_secs,
            agent_count: n as u64,
            mean_x,
            mean_y,
        }
    }
}
