//! Strongly typed identifier wrappers.
//!
//! Both IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into per-agent `Vec`s via `id.0 as usize`, but callers
//! should prefer the `.index()` helpers for clarity.

use std::fmt;

// ── AgentId ───────────────────────────────────────────────────────────────────

/// Dense index of an agent in the swarm, `0..n_agents`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Sentinel meaning "no valid agent".
    pub const INVALID: AgentId = AgentId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent {}", self.0)
    }
}

impl From<AgentId> for usize {
    #[inline(always)]
    fn from(id: AgentId) -> usize {
        id.index()
    }
}

// ── ActionId ──────────────────────────────────────────────────────────────────

/// One of the 8 discrete compass-direction actions, `0..=7`, indexed East
/// first and proceeding counterclockwise.
///
/// `ActionId::INVALID` is the "no action" sentinel: either no action has been
/// selected yet or the policy table had no admissible action for the state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(pub u8);

impl ActionId {
    /// Sentinel meaning "no action selected".
    pub const INVALID: ActionId = ActionId(u8::MAX);

    /// Number of discrete actions in the action space.
    pub const COUNT: u8 = 8;

    /// `true` for a real member of the action space (not the sentinel).
    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self.0 < Self::COUNT
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for ActionId {
    /// Returns the `INVALID` sentinel so unset actions are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "action {}", self.0)
        } else {
            write!(f, "no action")
        }
    }
}
