//! The `SwarmSim` runner and its tick loop.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use swarm_core::{SwarmClock, SwarmConfig};
use swarm_sense::{AgentSnapshot, WorldSnapshot};

use crate::environment::Wall;
use crate::gate::TickGate;
use crate::observer::SimObserver;
use crate::runtime::TickReport;
use crate::{SimError, SimResult};

// ── SimHandle ─────────────────────────────────────────────────────────────────

/// Cloneable handle for requesting shutdown from outside the run loop
/// (e.g. a signal handler).  The clock observes the request at the next tick
/// boundary; in-flight ticks complete normally.
#[derive(Clone)]
pub struct SimHandle {
    gate: Arc<TickGate>,
}

impl SimHandle {
    pub fn stop(&self) {
        self.gate.shutdown();
    }
}

// ── SwarmSim ──────────────────────────────────────────────────────────────────

/// The simulation runner: owns the clock, the tick gate, the worker handles,
/// the latest published state, and the environment walls.
///
/// Create via [`SwarmSimBuilder`][crate::SwarmSimBuilder]; the agent workers
/// are already running (blocked on the gate) when `build()` returns.
pub struct SwarmSim {
    config:    SwarmConfig,
    clock:     SwarmClock,
    gate:      Arc<TickGate>,
    reports:   Receiver<TickReport>,
    workers:   Vec<thread::JoinHandle<()>>,
    published: Vec<AgentSnapshot>,
    walls:     Vec<Wall>,
}

impl SwarmSim {
    pub(crate) fn assemble(
        config:    SwarmConfig,
        clock:     SwarmClock,
        gate:      Arc<TickGate>,
        reports:   Receiver<TickReport>,
        workers:   Vec<thread::JoinHandle<()>>,
        published: Vec<AgentSnapshot>,
        walls:     Vec<Wall>,
    ) -> Self {
        Self { config, clock, gate, reports, workers, published, walls }
    }

    /// A handle for stopping the run from another thread.
    pub fn handle(&self) -> SimHandle {
        SimHandle { gate: Arc::clone(&self.gate) }
    }

    /// The environment walls in their current state.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Drive the simulation to `config.total_ticks` (or an external
    /// [`SimHandle::stop`]), then shut down and join every worker.
    ///
    /// Returns the final published state of every agent.
    pub fn run<O: SimObserver>(mut self, observer: &mut O) -> SimResult<Vec<AgentSnapshot>> {
        let n = self.config.n_agents;
        let pace = self.clock.pacing();
        let grace = std::time::Duration::from_millis(self.config.stall_timeout_ms);

        tracing::info!(
            agents = n,
            knearest = self.config.knearest,
            total_ticks = self.config.total_ticks,
            "simulation started"
        );

        while self.clock.current_tick.0 < self.config.total_ticks && self.gate.is_running() {
            let tick = self.clock.current_tick;
            observer.on_tick_start(tick);

            // ── Open the tick: release all workers on a fresh snapshot ────
            let generation = self
                .gate
                .open(Arc::new(WorldSnapshot::new(self.published.clone())));
            let opened_at = Instant::now();

            // ── Gather completion reports (bounded wait) ──────────────────
            let deadline = opened_at + pace + grace;
            let mut next: Vec<Option<AgentSnapshot>> = vec![None; n];
            let mut received = 0usize;
            while received < n {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                match self.reports.recv_timeout(deadline - now) {
                    Ok(report) if report.generation == generation => {
                        let slot = &mut next[report.agent.index()];
                        if slot.is_none() {
                            received += 1;
                        }
                        *slot = Some(report.state);
                    }
                    // A late report from a tick this agent was frozen on.
                    Ok(_stale) => {}
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(SimError::WorkersDisconnected);
                    }
                }
            }

            // ── Frozen-agent fallback ─────────────────────────────────────
            if received < n {
                let frozen: Vec<u32> = next
                    .iter()
                    .enumerate()
                    .filter(|(_, slot)| slot.is_none())
                    .map(|(i, _)| i as u32)
                    .collect();
                tracing::warn!(
                    tick = tick.0,
                    agents = ?frozen,
                    "agents missed the tick barrier; reusing their previous state"
                );
            }
            for (i, slot) in next.into_iter().enumerate() {
                if let Some(state) = slot {
                    self.published[i] = state;
                }
            }

            // ── Hold the tick open for the rest of the pacing interval ────
            let elapsed = opened_at.elapsed();
            if elapsed < pace {
                thread::sleep(pace - elapsed);
            }

            // ── Close the tick ────────────────────────────────────────────
            for wall in &mut self.walls {
                wall.step();
            }
            observer.on_tick_end(tick, &self.published);
            self.clock.advance();
        }

        self.finish(observer)
    }

    /// Orderly shutdown: signal the gate, join every worker, fire the final
    /// observer hook, and hand back the last published state.
    fn finish<O: SimObserver>(mut self, observer: &mut O) -> SimResult<Vec<AgentSnapshot>> {
        self.gate.shutdown();
        for (i, handle) in self.workers.drain(..).enumerate() {
            if handle.join().is_err() {
                tracing::error!(agent = i, "agent worker panicked during the run");
            }
        }
        observer.on_sim_end(self.clock.current_tick);
        tracing::info!(
            final_tick = self.clock.current_tick.0,
            sim_time_secs = self.clock.sim_time_secs,
            "simulation complete"
        );
        Ok(self.published)
    }
}
