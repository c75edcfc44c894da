//! CSV population loader.
//!
//! # CSV format
//!
//! One row per agent.  Color columns are either filled on every row (colored
//! store) or empty on every row (plain store).
//!
//! ```csv
//! agent_id,x,y,angle,r,g,b
//! 0,120.5,80.0,0.0,1.0,0.0,0.0
//! 1,64.0,31.25,3.1416,0.0,1.0,0.0
//! ```
//!
//! Rows may appear in any order, but the ids must be exactly `0..n`, each
//! once.  Angles are stored as given; the first step normalizes them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sw_core::{Point2, Rgb, SwarmError, SwarmResult};

use crate::{Agent, AgentStore};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AgentRecord {
    agent_id: u32,
    x:        f32,
    y:        f32,
    angle:    f32,
    r:        Option<f32>,
    g:        Option<f32>,
    b:        Option<f32>,
}

impl AgentRecord {
    fn into_agent(self) -> SwarmResult<Agent> {
        let color = match (self.r, self.g, self.b) {
            (Some(r), Some(g), Some(b)) => Some(Rgb::new(r, g, b)),
            (None, None, None) => None,
            _ => {
                return Err(SwarmError::Parse(format!(
                    "agent {}: r, g, b must be all set or all empty",
                    self.agent_id
                )));
            }
        };
        Ok(Agent {
            position: Point2::new(self.x, self.y),
            angle: self.angle,
            color,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an [`AgentStore`] from a CSV file.
///
/// # Errors
///
/// - [`SwarmError::Io`] if the file cannot be opened.
/// - [`SwarmError::Parse`] for malformed rows.
/// - [`SwarmError::InvalidConfig`] for an empty file, non-dense or duplicate
///   ids, or mixed color layouts.
pub fn load_agents(path: &Path) -> SwarmResult<AgentStore> {
    let file = File::open(path)?;
    load_agents_reader(file)
}

/// Like [`load_agents`] but reads from any `Read` source (useful for tests
/// and embedded data).
pub fn load_agents_reader<R: Read>(reader: R) -> SwarmResult<AgentStore> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut records: Vec<AgentRecord> = Vec::new();
    for result in rdr.deserialize::<AgentRecord>() {
        let record = result.map_err(|e| SwarmError::Parse(e.to_string()))?;
        records.push(record);
    }

    let n = records.len();
    if n == 0 {
        return Err(SwarmError::config("population CSV contains no agents"));
    }

    let mut slots: Vec<Option<Agent>> = vec![None; n];
    for record in records {
        let id = record.agent_id as usize;
        if id >= n {
            return Err(SwarmError::config(format!(
                "agent_id {id} out of range: {n} rows require ids 0..{n}"
            )));
        }
        if slots[id].is_some() {
            return Err(SwarmError::config(format!("duplicate agent_id {id}")));
        }
        slots[id] = Some(record.into_agent()?);
    }

    // n distinct ids below n: every slot is filled.
    AgentStore::from_agents(slots.into_iter().flatten().collect())
}
