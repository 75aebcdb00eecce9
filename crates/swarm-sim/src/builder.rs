//! Fluent builder for constructing a [`SwarmSim`].

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use swarm_control::Controller;
use swarm_core::{AgentId, AgentRng, SimRng, SwarmConfig, Vec2};
use swarm_sense::{AgentSnapshot, WorldSnapshot};

use crate::environment::Wall;
use crate::gate::TickGate;
use crate::runtime::AgentRuntime;
use crate::{SimError, SimResult, SwarmSim};

/// Generate `n` initial positions uniformly in `[-0.5, 0.5]²`, shifted so
/// each coordinate has exactly zero mean.  Deterministic in `seed`.
pub fn scatter_positions(n: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = SimRng::new(seed);
    let mut xs: Vec<f32> = (0..n).map(|_| rng.gen_range(-0.5..0.5f32)).collect();
    let mut ys: Vec<f32> = (0..n).map(|_| rng.gen_range(-0.5..0.5f32)).collect();

    let mean = |v: &[f32]| v.iter().sum::<f32>() / v.len().max(1) as f32;
    let (mx, my) = (mean(&xs), mean(&ys));
    for x in &mut xs {
        *x -= mx;
    }
    for y in &mut ys {
        *y -= my;
    }

    xs.into_iter().zip(ys).map(|(x, y)| Vec2::new(x, y)).collect()
}

/// Fluent builder for [`SwarmSim`].
///
/// # Required inputs
///
/// - [`SwarmConfig`] — agent count, k-nearest, pacing, seed, …
/// - `.controllers(v)` — one boxed [`Controller`] per agent
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                 |
/// |-------------------------|-----------------------------------------|
/// | `.initial_positions(v)` | zero-mean random scatter from the seed  |
/// | `.wall_at(p)`           | no walls                                |
///
/// # Example
///
/// ```rust,ignore
/// let controllers = (0..n)
///     .map(|_| Box::new(BearingShapeController::new(policy.clone(), params.clone())) as Box<dyn Controller>)
///     .collect();
/// let sim = SwarmSimBuilder::new(config)
///     .controllers(controllers)
///     .build()?;
/// let final_states = sim.run(&mut NoopObserver)?;
/// ```
///
/// `build()` validates the configuration, spawns one named worker thread per
/// agent, and returns a sim ready to [`run`][SwarmSim::run].
pub struct SwarmSimBuilder {
    config:      SwarmConfig,
    controllers: Vec<Box<dyn Controller>>,
    positions:   Option<Vec<Vec2>>,
    walls:       Vec<Vec2>,
}

impl SwarmSimBuilder {
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            config,
            controllers: Vec::new(),
            positions:   None,
            walls:       Vec::new(),
        }
    }

    /// Supply one controller per agent (must be length `n_agents`).
    pub fn controllers(mut self, controllers: Vec<Box<dyn Controller>>) -> Self {
        self.controllers = controllers;
        self
    }

    /// Supply explicit initial positions (must be length `n_agents`).
    ///
    /// If not called, agents start in a zero-mean random scatter derived
    /// from the config seed.
    pub fn initial_positions(mut self, positions: Vec<Vec2>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Add a wall entity at `position`.
    pub fn wall_at(mut self, position: Vec2) -> Self {
        self.walls.push(position);
        self
    }

    /// Validate inputs, spawn the agent workers, and return a ready-to-run
    /// [`SwarmSim`].
    pub fn build(self) -> SimResult<SwarmSim> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;
        let n = self.config.n_agents;

        // ── Validate and resolve optional inputs ──────────────────────────
        if self.controllers.len() != n {
            return Err(SimError::CountMismatch {
                expected: n,
                got:      self.controllers.len(),
                what:     "controllers",
            });
        }

        let positions = match self.positions {
            Some(p) => {
                if p.len() != n {
                    return Err(SimError::CountMismatch {
                        expected: n,
                        got:      p.len(),
                        what:     "initial positions",
                    });
                }
                p
            }
            None => scatter_positions(n, self.config.seed),
        };

        let dt = self.config.step_secs();
        let walls = self.walls.into_iter().map(|p| Wall::new(p, dt)).collect();

        // ── Initial published state and gate ──────────────────────────────
        let published: Vec<AgentSnapshot> =
            positions.iter().map(|&p| AgentSnapshot::at(p)).collect();
        let gate = Arc::new(TickGate::new(Arc::new(WorldSnapshot::new(published.clone()))));

        // ── Spawn one worker per agent ────────────────────────────────────
        let (report_tx, report_rx) = mpsc::channel();
        let mut workers = Vec::with_capacity(n);
        for (i, controller) in self.controllers.into_iter().enumerate() {
            let id = AgentId(i as u32);
            let runtime = AgentRuntime::new(
                id,
                positions[i],
                controller,
                AgentRng::new(self.config.seed, id),
                self.config.knearest,
                dt,
            );
            let gate = Arc::clone(&gate);
            let tx = report_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("agent-{i}"))
                .spawn(move || runtime.run(gate, tx))?;
            workers.push(handle);
        }
        // The clock keeps only the receiver; when every worker has exited
        // the channel disconnects and the run loop can tell.
        drop(report_tx);

        let clock = self.config.make_clock();
        Ok(SwarmSim::assemble(self.config, clock, gate, report_rx, workers, published, walls))
    }
}
