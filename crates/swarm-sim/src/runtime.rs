//! The per-agent worker: sense → decide → integrate → publish, once per tick.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use swarm_control::{ControlContext, Controller};
use swarm_core::{AgentId, AgentRng, Vec2};
use swarm_sense::{AgentSnapshot, Observer, WorldSnapshot};

use crate::gate::TickGate;

// ── TickReport ────────────────────────────────────────────────────────────────

/// One agent's published state for one tick generation.
///
/// Sending the report is also the agent's barrier-completion signal: the
/// clock counts reports for the current generation before closing the tick.
pub struct TickReport {
    pub agent: AgentId,
    pub generation: u64,
    pub state: AgentSnapshot,
}

// ── BodyState ─────────────────────────────────────────────────────────────────

/// Kinematic state exclusively owned by one agent's worker.
struct BodyState {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
}

// ── AgentRuntime ──────────────────────────────────────────────────────────────

/// Owns one agent end to end: kinematics, control context, controller, and
/// random source.  Moved onto a dedicated worker thread at spawn time.
pub(crate) struct AgentRuntime {
    id: AgentId,
    body: BodyState,
    controller: Box<dyn Controller>,
    ctx: ControlContext,
    rng: AgentRng,
    knearest: usize,
    dt: f32,
}

impl AgentRuntime {
    pub(crate) fn new(
        id:         AgentId,
        position:   Vec2,
        controller: Box<dyn Controller>,
        rng:        AgentRng,
        knearest:   usize,
        dt:         f32,
    ) -> Self {
        Self {
            id,
            body: BodyState {
                position,
                velocity: Vec2::ZERO,
                acceleration: Vec2::ZERO,
            },
            controller,
            ctx: ControlContext::new(),
            rng,
            knearest,
            dt,
        }
    }

    /// The worker loop: block on the gate, run one control cycle against the
    /// released snapshot, publish, repeat until shutdown (or until the clock
    /// side hangs up).
    pub(crate) fn run(mut self, gate: Arc<TickGate>, reports: Sender<TickReport>) {
        let mut seen = 0u64;
        while let Some((generation, world)) = gate.wait_open(seen) {
            seen = generation;
            let state = self.step(&world);
            let report = TickReport { agent: self.id, generation, state };
            if reports.send(report).is_err() {
                break;
            }
        }
    }

    /// One control cycle: query the observer, invoke the controller,
    /// integrate, and produce the state to publish.
    fn step(&mut self, world: &WorldSnapshot) -> AgentSnapshot {
        let obs = Observer::new(world, self.knearest);
        let command = self
            .controller
            .velocity_command(self.id, &obs, &mut self.ctx, &mut self.rng);
        self.integrate(command);

        AgentSnapshot {
            position:    self.body.position,
            velocity:    self.body.velocity,
            state_index: self.ctx.state_index,
            action:      self.ctx.selected_action,
            moving:      self.ctx.moving,
        }
    }

    /// Explicit Euler propagation of the commanded velocity.
    fn integrate(&mut self, command: Vec2) {
        self.body.acceleration = (command - self.body.velocity) / self.dt;
        self.body.velocity = command;
        self.body.position += command * self.dt;
    }
}
