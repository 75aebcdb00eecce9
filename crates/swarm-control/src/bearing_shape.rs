//! Decentralized bearing-based shape formation.
//!
//! # Control law
//!
//! Each tick the agent looks at its nearest neighbor, picks the equilibrium
//! bearing of the target shape closest (under periodic/mirror symmetry) to
//! the observed bearing, and computes a radial velocity from a logistic
//! attraction term plus a `-k/u` repulsion term whose sum is zero exactly at
//! the desired spacing.  On top of that continuous law sits a discrete
//! layer: a policy table proposes compass-step actions for the current
//! neighbor-template state, gated so that neighboring agents never step
//! simultaneously and so that freshly formed local structure is held for a
//! while before the agent may move again.  Agents gated out of a discrete
//! step fall back to the continuous lattice-correction motion.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2, TAU};
use std::sync::Arc;

use swarm_core::{ActionId, AgentId, AgentRng, Vec2, wrap_to_pi};
use swarm_policy::PolicyTable;
use swarm_sense::Observer;

use crate::controller::{Controller, clamp_command};
use crate::template::assess_neighbors;
use crate::ControlContext;

// ── Desired states ────────────────────────────────────────────────────────────

/// Template states that are locally consistent with the target shape.  An
/// agent entering one of these arms its waiting timer and holds position.
const DESIRED_STATES: [u8; 9] = [3, 28, 31, 96, 124, 163, 190, 226, 227];

/// Priority weight per desired state; higher priority holds longer.
const STATE_PRIORITY: [u32; 9] = [5, 3, 4, 1, 2, 4, 3, 2, 3];

/// Waiting ticks per unit of squared (priority − 1).
const WAIT_TICKS_SCALE: u32 = 1000;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Tuning parameters of the shape-formation law.
#[derive(Debug, Clone)]
pub struct ShapeParams {
    /// Desired equilibrium distance to the nearest neighbor.
    pub d_des: f32,
    /// Repulsion gain (`-k_rep / u`).
    pub k_rep: f32,
    /// Attraction steepness (logistic slope).
    pub k_att: f32,
    /// Discrete step magnitude and lattice-correction velocity.
    pub v_adj: f32,
    /// Sensing range as a multiple of `d_des`.
    pub sensor_scale: f32,
    /// Template angular tolerance, degrees.
    pub angle_err_deg: f32,
    /// Below this nearest-neighbor distance an uncommitted agent holds still.
    pub hold_distance: f32,
    /// Action re-selection is allowed only below this `moving_timer` value.
    pub select_tick_limit: u32,
    /// Discrete moves are allowed only below this `moving_timer` value.
    pub move_tick_limit: u32,
    /// `moving_timer` resets once it reaches this value.
    pub reset_tick_limit: u32,
    /// Equilibrium bearings of the target shape (e.g. `{0, π/2}` for a
    /// square lattice).
    pub desired_bearings: Vec<f32>,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            d_des: 1.0,
            k_rep: 0.1,
            k_att: 2.0,
            v_adj: 0.5,
            sensor_scale: 1.7,
            angle_err_deg: 22.5,
            hold_distance: 0.9,
            select_tick_limit: 70,
            move_tick_limit: 200,
            reset_tick_limit: 400,
            desired_bearings: vec![0.0, FRAC_PI_2],
        }
    }
}

impl ShapeParams {
    /// Maximum neighbor distance captured by the template.
    #[inline]
    pub fn sensor_range(&self) -> f32 {
        self.d_des * self.sensor_scale
    }
}

// ── Motion primitives ─────────────────────────────────────────────────────────

/// Pure radial motion: magnitude `v_r` along bearing `v_b`.
#[inline]
pub fn attraction_motion(v_r: f32, v_b: f32) -> Vec2 {
    Vec2::from_polar(v_r, v_b)
}

/// Radial attraction plus the tangential correction that nudges the agent
/// toward exact lattice alignment at the equilibrium bearing `b_eq`.
pub fn lattice_motion(v_r: f32, v_adj: f32, v_b: f32, b_eq: f32) -> Vec2 {
    let mut v = attraction_motion(v_r + v_adj, v_b);
    v.x -= v_adj * (2.0 * b_eq - v_b).cos();
    v.y -= v_adj * (2.0 * b_eq - v_b).sin();
    v
}

/// Map a discrete action to its compass step: magnitude `v_adj` at
/// `action × 45°`, indexed East first and proceeding counterclockwise.
///
/// # Panics
/// Panics if `action` is the `INVALID` sentinel (callers gate on validity).
pub fn action_motion(action: ActionId, v_adj: f32) -> Vec2 {
    assert!(action.is_valid(), "cannot step on {action}");
    Vec2::from_polar(v_adj, action.index() as f32 * FRAC_PI_4)
}

/// Select the equilibrium bearing from `candidates` nearest to `current`
/// under the five periodic shifts `{-2π, -π, 0, +π, +2π}`.
///
/// The shift/candidate scan keeps the *first* minimum, so for equidistant
/// candidates the lower-indexed one wins — a deterministic tie-break.
pub fn preferred_bearing(candidates: &[f32], current: f32) -> f32 {
    const SHIFTS: [f32; 5] = [-TAU, -PI, 0.0, PI, TAU];

    let mut best_index = 0;
    let mut best_cost = f32::INFINITY;
    for &shift in &SHIFTS {
        for (j, &candidate) in candidates.iter().enumerate() {
            let cost = (candidate + shift - current).abs();
            if cost < best_cost {
                best_cost = cost;
                best_index = j;
            }
        }
    }
    candidates[best_index]
}

// ── Controller ────────────────────────────────────────────────────────────────

/// The bearing-shape-formation controller.
///
/// The policy table is shared read-only across all agents of the swarm;
/// everything mutable lives in the per-agent [`ControlContext`].
pub struct BearingShapeController {
    policy: Arc<PolicyTable>,
    params: ShapeParams,
}

impl BearingShapeController {
    pub fn new(policy: Arc<PolicyTable>, params: ShapeParams) -> Self {
        Self { policy, params }
    }

    /// Logistic attraction toward the equilibrium spacing.
    ///
    /// The midpoint is placed so that attraction and repulsion cancel at
    /// `d_des` — or at `√2 × d_des` when the equilibrium bearing sits on a
    /// lattice diagonal, where neighbors are spaced a diagonal apart.
    fn f_attraction(&self, u: f32, b_eq: f32) -> f32 {
        let p = &self.params;
        let diagonal = (b_eq - FRAC_PI_4).abs() < 0.1 || (b_eq - 3.0 * FRAC_PI_4).abs() < 0.1;
        let spacing = if diagonal { SQRT_2 * p.d_des } else { p.d_des };
        let w = ((p.d_des / p.k_rep - 1.0) / (-p.k_att * spacing).exp()).ln() / p.k_att;
        1.0 / (1.0 + (-p.k_att * (u - w)).exp())
    }

    fn f_repulsion(&self, u: f32) -> f32 {
        -self.params.k_rep / u
    }

    /// Net radial velocity toward/away from a neighbor at distance `u`.
    ///
    /// Requires strictly positive distance; a non-positive `u` is an
    /// invariant violation (two agents cannot coincide), guarded here with a
    /// debug assertion and an epsilon floor rather than letting `-k/0`
    /// propagate as an infinity.
    pub fn attraction_velocity(&self, u: f32, b_eq: f32) -> f32 {
        debug_assert!(u > 0.0, "neighbor distance must be strictly positive, got {u}");
        let u = u.max(f32::EPSILON);
        self.f_attraction(u, b_eq) + self.f_repulsion(u)
    }
}

impl Controller for BearingShapeController {
    fn velocity_command(
        &mut self,
        agent: AgentId,
        obs:   &Observer<'_>,
        ctx:   &mut ControlContext,
        rng:   &mut AgentRng,
    ) -> Vec2 {
        let p = &self.params;

        let Some(nearest) = obs.nearest(agent) else {
            return Vec2::ZERO; // alone in the world
        };

        // Continuous-law inputs from the nearest neighbor.
        let v_b = wrap_to_pi(obs.bearing(agent, nearest));
        let b_eq = preferred_bearing(&p.desired_bearings, v_b);
        let u = obs.distance(agent, nearest);
        let v_r = self.attraction_velocity(u, b_eq);

        // Discretized percept and the neighbors it captured.
        let (template, captured) =
            assess_neighbors(agent, obs, p.sensor_range(), p.angle_err_deg.to_radians());
        let state = template.state_index();

        // Mutual exclusion: if any captured neighbor stepped last tick, this
        // agent may not step now.
        let can_move = captured.iter().all(|&n| !obs.state(n).moving);

        // Proximity hold: an uncommitted agent crowding its nearest neighbor
        // stays put.
        let should_move =
            captured.is_empty() || ctx.moving || u >= p.hold_distance;

        // Entering a desired state arms the waiting timer, scaled by the
        // state's squared priority weight.
        if state != ctx.state_index {
            let was_desired = DESIRED_STATES.contains(&ctx.state_index);
            let now_desired = DESIRED_STATES.iter().position(|&s| s == state);
            if let (false, Some(pos)) = (was_desired, now_desired) {
                ctx.waiting_timer = WAIT_TICKS_SCALE * (STATE_PRIORITY[pos] - 1).pow(2);
            }
        }
        ctx.state_index = state;

        // Action (re)selection, allowed only while not committed to a move.
        if !ctx.moving && ctx.moving_timer < p.select_tick_limit {
            ctx.selected_action = match self.policy.actions(state) {
                Some(actions) => rng.choose(actions).copied().unwrap_or(ActionId::INVALID),
                None => ActionId::INVALID,
            };
        } else if !ctx.moving {
            ctx.selected_action = ActionId::INVALID;
        }

        ctx.moving = false;
        let command = if ctx.selected_action.is_valid()
            && can_move
            && should_move
            && ctx.moving_timer < p.move_tick_limit
            && ctx.waiting_timer == 0
        {
            ctx.moving = true;
            ctx.moving_timer += 1;
            action_motion(ctx.selected_action, p.v_adj)
        } else if can_move {
            // Gated out of a discrete step but free to move: hold formation
            // with the continuous lattice correction.
            if ctx.moving_timer >= p.reset_tick_limit {
                ctx.moving_timer = 0;
            }
            lattice_motion(v_r, p.v_adj, v_b, b_eq)
        } else {
            Vec2::ZERO
        };

        if ctx.moving_timer >= p.move_tick_limit {
            ctx.moving_timer += 1;
        }
        if ctx.waiting_timer > 0 {
            ctx.waiting_timer -= 1;
        }

        clamp_command(command)
    }
}
