//! Simulation observer trait for progress reporting and data collection.

use swarm_core::Tick;
use swarm_sense::AgentSnapshot;

/// Callbacks invoked by [`SwarmSim::run`][crate::SwarmSim::run] at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `on_tick_end` receives the complete
/// per-agent published state — position, velocity, state index, selected
/// action, moving flag — which is the entire outward-facing surface exposed
/// to rendering/logging collaborators.
pub trait SimObserver {
    /// Called at the very start of each tick, before workers are released.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per tick after the barrier closes, with every agent's
    /// freshly published state.
    fn on_tick_end(&mut self, _tick: Tick, _agents: &[AgentSnapshot]) {}

    /// Called once after the final tick completes and all workers joined.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
