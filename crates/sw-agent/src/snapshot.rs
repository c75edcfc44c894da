//! Point-in-time, read-only view of the population for external consumers.

use std::sync::Arc;

use sw_core::Tick;

use crate::{Agent, ColorLayout};

/// An immutable, ordered copy of every agent after a completed step.
///
/// Cloning is cheap (one `Arc` bump), so a snapshot can be handed to a
/// renderer thread while the simulation keeps stepping.
#[derive(Clone, Debug)]
pub struct Snapshot {
    tick:   Tick,
    layout: ColorLayout,
    agents: Arc<[Agent]>,
}

impl Snapshot {
    pub(crate) fn new(tick: Tick, layout: ColorLayout, agents: Arc<[Agent]>) -> Self {
        Self { tick, layout, agents }
    }

    /// Number of completed steps the snapshot reflects.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn layout(&self) -> ColorLayout {
        self.layout
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.agents.iter()
    }
}
