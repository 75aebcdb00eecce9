//! The immutable state → admissible-actions mapping.

use rustc_hash::FxHashMap;

use swarm_core::ActionId;

use crate::loader;

/// Mapping from discretized state index to the discrete actions admissible
/// in that state.
///
/// States absent from the table have *no* admissible action; controllers
/// treat that as "hold formation" and fall back to continuous motion.
/// Built once before the run (see [`loader`]) and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct PolicyTable {
    rows: FxHashMap<u8, Vec<ActionId>>,
}

impl PolicyTable {
    /// A table with no rows: every state maps to "no admissible action".
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_rows(rows: FxHashMap<u8, Vec<ActionId>>) -> Self {
        Self { rows }
    }

    /// The admissible actions for `state`, or `None` if the table has no row.
    ///
    /// A returned slice is never empty — rows without actions are dropped at
    /// load time.
    pub fn actions(&self, state: u8) -> Option<&[ActionId]> {
        self.rows.get(&state).map(Vec::as_slice)
    }

    /// Number of states with at least one admissible action.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load a table from `path`, degrading to an empty table if the artifact
    /// is missing or unreadable.
    ///
    /// The degraded path is deliberately non-fatal: affected controllers see
    /// "no admissible action" everywhere and hold formation instead.  The
    /// event is logged, never silent.
    pub fn load_or_empty(path: &std::path::Path) -> Self {
        match loader::load_policy_file(path) {
            Ok(table) => {
                tracing::info!(path = %path.display(), states = table.len(), "loaded policy table");
                table
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "policy table unavailable; continuing with an empty table"
                );
                Self::empty()
            }
        }
    }
}
