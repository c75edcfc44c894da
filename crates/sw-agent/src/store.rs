//! Core agent storage: `AgentStore`, the double-buffered record set.
//!
//! The step pass reads the committed buffer and writes the scratch buffer in
//! the same loop:
//!
//! ```ignore
//! // sw-sim step (simplified):
//! let (front, back) = sim.agents.split_buffers();
//! back.par_iter_mut()
//!     .zip(front.par_iter())
//!     .for_each(|(next, prev)| *next = advance(prev));
//! sim.agents.commit();
//! ```
//!
//! # Double buffer
//!
//! The store holds two equally sized `Vec<Agent>`s.  `front` is the last
//! committed step and the only buffer readers can reach; `back` is scratch
//! space for the step in progress.  [`AgentStore::commit`] swaps them, which
//! is the per-step barrier: nothing written to `back` is observable until the
//! whole pass has finished.

use sw_core::{AgentId, SwarmError, SwarmResult, Tick};

use crate::{Agent, ColorLayout, Snapshot};

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Fixed-size, index-ordered collection of agent records.
///
/// The population never grows or shrinks: `AgentId(i)` names the same agent
/// from creation to teardown.
pub struct AgentStore {
    front:      Vec<Agent>,
    back:       Vec<Agent>,
    layout:     ColorLayout,
    generation: Tick,
}

impl AgentStore {
    /// Allocate `count` agents, each produced by `initializer(id)`.
    ///
    /// # Errors
    /// [`SwarmError::InvalidConfig`] if `count == 0`, if `count` exceeds the
    /// `AgentId` range, or if the initializer mixes colored and uncolored
    /// agents.
    pub fn create<F>(count: usize, mut initializer: F) -> SwarmResult<Self>
    where
        F: FnMut(AgentId) -> Agent,
    {
        check_count(count)?;
        let agents: Vec<Agent> = (0..count as u32).map(|i| initializer(AgentId(i))).collect();
        Self::from_agents(agents)
    }

    /// Take ownership of an already built population (e.g. from a loader).
    ///
    /// # Errors
    /// Same conditions as [`create`](Self::create).
    pub fn from_agents(agents: Vec<Agent>) -> SwarmResult<Self> {
        check_count(agents.len())?;
        let layout = agents[0].layout();
        if let Some(i) = agents.iter().position(|a| a.layout() != layout) {
            return Err(SwarmError::config(format!(
                "agent {i} is {} but agent 0 is {layout}; a store cannot mix color layouts",
                agents[i].layout()
            )));
        }
        Ok(Self {
            back: agents.clone(),
            front: agents,
            layout,
            generation: Tick::ZERO,
        })
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// Number of agents.  Constant for the store's lifetime.
    #[inline]
    pub fn len(&self) -> usize {
        self.front.len()
    }

    /// Always `false` for a successfully created store; kept for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    #[inline]
    pub fn layout(&self) -> ColorLayout {
        self.layout
    }

    /// Number of steps committed so far.
    #[inline]
    pub fn generation(&self) -> Tick {
        self.generation
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.len() as u32).map(AgentId)
    }

    // ── Access ────────────────────────────────────────────────────────────

    /// The committed records, in index order.
    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.front
    }

    /// Bounds-checked read of one committed record.
    ///
    /// # Errors
    /// [`SwarmError::OutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> SwarmResult<&Agent> {
        self.front.get(index).ok_or(SwarmError::OutOfRange {
            index,
            count: self.front.len(),
        })
    }

    /// Bounds-checked overwrite of one committed record.
    ///
    /// On error the store is left untouched.
    ///
    /// # Errors
    /// [`SwarmError::OutOfRange`] if `index >= len()`;
    /// [`SwarmError::InvalidConfig`] if `value`'s color presence does not
    /// match the store's [`ColorLayout`].
    pub fn set(&mut self, index: usize, value: Agent) -> SwarmResult<()> {
        let count = self.front.len();
        if index >= count {
            return Err(SwarmError::OutOfRange { index, count });
        }
        if value.layout() != self.layout {
            return Err(SwarmError::config(format!(
                "cannot store a {} agent in a {} store",
                value.layout(),
                self.layout
            )));
        }
        self.front[index] = value;
        Ok(())
    }

    /// Immutable, ordered copy of the committed records.
    ///
    /// The copy shares nothing with the store, so holding it never delays
    /// the next step.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.generation, self.layout, self.front.as_slice().into())
    }

    // ── Double buffer ─────────────────────────────────────────────────────

    /// Committed buffer (read) and scratch buffer (write) for one step.
    ///
    /// Both slices have exactly `len()` elements.  The scratch buffer holds
    /// stale data from two steps ago; a step must overwrite every element
    /// before calling [`commit`](Self::commit).
    #[inline]
    pub fn split_buffers(&mut self) -> (&[Agent], &mut [Agent]) {
        (&self.front, &mut self.back)
    }

    /// Publish the scratch buffer as the new committed state.
    pub fn commit(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.generation = self.generation.next();
    }
}

/// A population must be non-empty and addressable by `AgentId`.
pub(crate) fn check_count(count: usize) -> SwarmResult<()> {
    if count == 0 {
        return Err(SwarmError::config("agent count must be > 0"));
    }
    if u32::try_from(count).is_err() {
        return Err(SwarmError::config(format!(
            "agent count {count} exceeds the AgentId range"
        )));
    }
    Ok(())
}
