//! The neighbor observer handed to controllers each tick.

use swarm_core::AgentId;

use crate::{AgentSnapshot, WorldSnapshot};

/// Read-only neighbor query surface over one tick's [`WorldSnapshot`],
/// truncated to the run's k-nearest-neighbor count.
///
/// Perception is omniscient: distances and bearings are ground truth, not
/// sensor-simulated.  An `Observer` is constructed by each agent runtime at
/// the start of its control cycle and lives for that cycle only.
pub struct Observer<'a> {
    world: &'a WorldSnapshot,
    knearest: usize,
}

impl<'a> Observer<'a> {
    pub fn new(world: &'a WorldSnapshot, knearest: usize) -> Self {
        Self { world, knearest }
    }

    /// The k agents nearest to `id`, ascending by distance (ties broken by
    /// ascending ID).
    pub fn neighbors(&self, id: AgentId) -> Vec<AgentId> {
        self.world.k_closest(id, self.knearest)
    }

    /// The single nearest agent, if any other agent exists.
    pub fn nearest(&self, id: AgentId) -> Option<AgentId> {
        if self.knearest == 0 {
            return None;
        }
        self.world.k_closest(id, 1).first().copied()
    }

    #[inline]
    pub fn distance(&self, a: AgentId, b: AgentId) -> f32 {
        self.world.distance(a, b)
    }

    /// Un-normalized bearing from `a` to `b` (`atan2`).
    #[inline]
    pub fn bearing(&self, a: AgentId, b: AgentId) -> f32 {
        self.world.bearing(a, b)
    }

    /// Another agent's published (prior-tick) state.
    #[inline]
    pub fn state(&self, id: AgentId) -> &AgentSnapshot {
        self.world.get(id)
    }

    /// Number of agents in the world (including the observer's own).
    pub fn agent_count(&self) -> usize {
        self.world.len()
    }
}
