//! Per-agent mutable control state.

use swarm_core::ActionId;

/// Control state owned by one agent and mutated only by that agent's own
/// controller invocation — never concurrently.
///
/// Each agent's runtime owns exactly one `ControlContext` for the agent's
/// lifetime; the runtime publishes the outward-facing subset (state index,
/// action, moving flag) in the agent's tick snapshot.
#[derive(Debug, Clone, Default)]
pub struct ControlContext {
    /// `true` while the agent is executing a discrete action step.
    pub moving: bool,

    /// Ticks spent in (or since) the current discrete move; gates both
    /// action re-selection and move duration.
    pub moving_timer: u32,

    /// Post-state-transition hold timer; while non-zero the agent may not
    /// start a discrete move.
    pub waiting_timer: u32,

    /// State index observed on the previous tick, for transition detection.
    pub state_index: u8,

    /// The discrete action currently selected, or `ActionId::INVALID`.
    pub selected_action: ActionId,
}

impl ControlContext {
    pub fn new() -> Self {
        Self::default()
    }
}
