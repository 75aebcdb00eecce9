//! The `Controller` trait — the main extension point for control strategies.

use swarm_core::{AgentId, AgentRng, Vec2};
use swarm_sense::Observer;

use crate::ControlContext;

/// Symmetric per-axis bound applied to every velocity command.
pub const COMMAND_LIMIT: f32 = 1.0;

/// Clamp a velocity command into `[-COMMAND_LIMIT, COMMAND_LIMIT]` per axis.
///
/// Controllers apply this as their final step so downstream integration
/// never sees an unbounded command, regardless of upstream gains.
#[inline]
pub fn clamp_command(v: Vec2) -> Vec2 {
    v.clamp_axes(COMMAND_LIMIT)
}

/// Pluggable agent control policy.
///
/// Called exactly once per agent per tick by the agent's runtime.  The
/// observer exposes the immutable prior-tick world snapshot; `ctx` and `rng`
/// are the agent's own mutable control state and random source — never
/// touched by any other agent, so no locking is involved.
///
/// Implementations must be `Send`: each boxed controller is moved onto its
/// agent's worker thread at spawn time.
pub trait Controller: Send {
    /// Compute the velocity command for this tick.
    ///
    /// Implementations are expected to update `ctx` (state index, selected
    /// action, movement timers) as a side effect; the runtime publishes
    /// those fields in the agent's next snapshot.
    fn velocity_command(
        &mut self,
        agent: AgentId,
        obs:   &Observer<'_>,
        ctx:   &mut ControlContext,
        rng:   &mut AgentRng,
    ) -> Vec2;
}
