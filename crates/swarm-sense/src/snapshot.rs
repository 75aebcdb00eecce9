//! The per-tick published world state.
//!
//! # Data layout
//!
//! `WorldSnapshot` holds one [`AgentSnapshot`] per agent, indexed by
//! `AgentId`, plus an R-tree (via `rstar`) over the positions for
//! nearest-neighbor queries.  The tree is bulk-loaded once at construction;
//! the snapshot is never mutated afterwards, so queries need no locking.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use swarm_core::{ActionId, AgentId, Vec2};

// ── AgentSnapshot ─────────────────────────────────────────────────────────────

/// One agent's state as published at the end of a tick.
///
/// Position and velocity feed the geometry queries; the state index,
/// selected action, and `moving` flag are the outward-facing control state —
/// rendering/logging collaborators read them, and the bearing-shape
/// controller's mutual-exclusion gating reads the *prior-tick* `moving`
/// flags of its captured neighbors.
#[derive(Copy, Clone, Debug, Default)]
pub struct AgentSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Discretized 8-flag neighbor percept, packed LSB-first.
    pub state_index: u8,
    /// Discrete action the agent committed to this tick, if any.
    pub action: ActionId,
    /// `true` while the agent is executing a discrete action step.
    pub moving: bool,
}

impl AgentSnapshot {
    /// A stationary agent at `position` with no control state yet.
    pub fn at(position: Vec2) -> Self {
        Self { position, ..Self::default() }
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the spatial index: an agent's position with its ID.
#[derive(Clone)]
struct AgentEntry {
    point: [f32; 2],
    id: AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── WorldSnapshot ─────────────────────────────────────────────────────────────

/// Immutable view of the whole swarm at one tick boundary.
pub struct WorldSnapshot {
    states: Vec<AgentSnapshot>,
    index: RTree<AgentEntry>,
}

impl WorldSnapshot {
    /// Build a snapshot (and its spatial index) from per-agent states.
    pub fn new(states: Vec<AgentSnapshot>) -> Self {
        let entries: Vec<AgentEntry> = states
            .iter()
            .enumerate()
            .map(|(i, s)| AgentEntry {
                point: [s.position.x, s.position.y],
                id: AgentId(i as u32),
            })
            .collect();
        let index = RTree::bulk_load(entries);
        Self { states, index }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// One agent's published state.
    #[inline]
    pub fn get(&self, id: AgentId) -> &AgentSnapshot {
        &self.states[id.index()]
    }

    /// All published states, indexed by `AgentId`.
    pub fn states(&self) -> &[AgentSnapshot] {
        &self.states
    }

    // ── Geometry queries ──────────────────────────────────────────────────

    /// Euclidean distance between two agents.
    #[inline]
    pub fn distance(&self, a: AgentId, b: AgentId) -> f32 {
        self.get(a).position.distance(self.get(b).position)
    }

    /// Angle of the vector from `a` to `b`, un-normalized (`atan2`).
    /// Callers wrap into `[0, 2π)` or `[-π, π)` as needed.
    #[inline]
    pub fn bearing(&self, a: AgentId, b: AgentId) -> f32 {
        self.get(a).position.bearing_to(self.get(b).position)
    }

    /// All other agents ordered by ascending distance from `id`.
    ///
    /// Ties are broken by ascending `AgentId`, so the ordering is fully
    /// deterministic even when agents coincide.
    pub fn closest(&self, id: AgentId) -> Vec<AgentId> {
        let origin = self.get(id).position;
        let mut ranked: Vec<(f32, AgentId)> = self
            .index
            .nearest_neighbor_iter(&[origin.x, origin.y])
            .filter(|e| e.id != id)
            .map(|e| (e.distance_2(&[origin.x, origin.y]), e.id))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        ranked.into_iter().map(|(_, n)| n).collect()
    }

    /// The `k` nearest agents to `id`, ascending by distance.
    pub fn k_closest(&self, id: AgentId, k: usize) -> Vec<AgentId> {
        let mut all = self.closest(id);
        all.truncate(k);
        all
    }
}
