//! Finite-state lookup exploration.
//!
//! The simplest of the three strategies: discretize the neighborhood into a
//! template state, look the state up in the policy table to pick a compass
//! heading (uniform-random over the action space when the table has no
//! row), and persist the choice for a fixed number of ticks so agents cover
//! ground instead of dithering.  A small random jitter keeps identical
//! agents from tracing identical paths.

use std::f32::consts::TAU;
use std::sync::Arc;

use swarm_core::{ActionId, AgentId, AgentRng, Vec2};
use swarm_policy::PolicyTable;
use swarm_sense::Observer;

use crate::controller::{Controller, clamp_command};
use crate::template::assess_neighbors;
use crate::ControlContext;

/// Tuning parameters of the exploration law.
#[derive(Debug, Clone)]
pub struct ExplorationParams {
    /// Mean commanded speed along the chosen heading.
    pub v_mean: f32,
    /// Ticks a chosen heading persists before re-evaluation.
    pub persist_ticks: u32,
    /// Template sensing range.
    pub sensor_range: f32,
    /// Template angular tolerance, degrees.
    pub angle_err_deg: f32,
    /// Magnitude bound of the per-tick random jitter.
    pub jitter: f32,
}

impl Default for ExplorationParams {
    fn default() -> Self {
        Self {
            v_mean: 0.5,
            persist_ticks: 20,
            sensor_range: 1.7,
            angle_err_deg: 22.5,
            jitter: 0.05,
        }
    }
}

/// Finite-state exploration controller.
pub struct ExplorationController {
    policy: Arc<PolicyTable>,
    params: ExplorationParams,
}

impl ExplorationController {
    pub fn new(policy: Arc<PolicyTable>, params: ExplorationParams) -> Self {
        Self { policy, params }
    }
}

impl Controller for ExplorationController {
    fn velocity_command(
        &mut self,
        agent: AgentId,
        obs:   &Observer<'_>,
        ctx:   &mut ControlContext,
        rng:   &mut AgentRng,
    ) -> Vec2 {
        let p = &self.params;

        let (template, _captured) =
            assess_neighbors(agent, obs, p.sensor_range, p.angle_err_deg.to_radians());
        let state = template.state_index();

        // Re-evaluate on timer expiry or whenever the neighborhood changes.
        if ctx.moving_timer == 0 || state != ctx.state_index {
            ctx.selected_action = match self.policy.actions(state) {
                Some(actions) => rng.choose(actions).copied().unwrap_or(ActionId::INVALID),
                None => ActionId(rng.gen_range(0..ActionId::COUNT)),
            };
            ctx.moving_timer = p.persist_ticks;
        } else {
            ctx.moving_timer -= 1;
        }
        ctx.state_index = state;
        ctx.moving = ctx.selected_action.is_valid();

        let mut command = if ctx.selected_action.is_valid() {
            Vec2::from_polar(p.v_mean, ctx.selected_action.index() as f32 * (TAU / 8.0))
        } else {
            Vec2::ZERO
        };
        if p.jitter > 0.0 {
            command += Vec2::from_polar(rng.gen_range(0.0..p.jitter), rng.gen_range(0.0..TAU));
        }

        clamp_command(command)
    }
}
