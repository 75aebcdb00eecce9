//! Unit tests for percept discretization and the controller variants.

use std::io::Cursor;
use std::sync::Arc;

use swarm_core::{ActionId, AgentId, AgentRng, Vec2};
use swarm_policy::{PolicyTable, load_policy_reader};
use swarm_sense::{AgentSnapshot, Observer, WorldSnapshot};

fn world_at(positions: &[(f32, f32)]) -> WorldSnapshot {
    WorldSnapshot::new(
        positions
            .iter()
            .map(|&(x, y)| AgentSnapshot::at(Vec2::new(x, y)))
            .collect(),
    )
}

fn policy(artifact: &str) -> Arc<PolicyTable> {
    Arc::new(load_policy_reader(Cursor::new(artifact)).unwrap())
}

fn rng() -> AgentRng {
    AgentRng::new(7, AgentId(0))
}

#[cfg(test)]
mod template_tests {
    use crate::NeighborTemplate;
    use std::f32::consts::{FRAC_PI_4, TAU};

    const DMAX: f32 = 1.7;
    const TOL: f32 = 0.3927; // 22.5°

    #[test]
    fn sets_exactly_one_flag_within_tolerance() {
        let mut t = NeighborTemplate::new();
        assert!(t.fill(0.1, 1.0, DMAX, TOL));
        assert_eq!(t.link_count(), 1);
        assert!(t.is_set(0));
    }

    #[test]
    fn each_canonical_bearing_maps_to_its_slot() {
        for i in 0..8 {
            let mut t = NeighborTemplate::new();
            assert!(t.fill(i as f32 * FRAC_PI_4, 1.0, DMAX, TOL));
            assert!(t.is_set(i), "bearing {i}×45° should set slot {i}");
            assert_eq!(t.link_count(), 1);
        }
    }

    #[test]
    fn full_turn_aliases_to_slot_zero() {
        let mut t = NeighborTemplate::new();
        // Just below 2π: nearest canonical angle is the trailing 360° entry.
        assert!(t.fill(TAU - 0.1, 1.0, DMAX, TOL));
        assert!(t.is_set(0));
        assert_eq!(t.link_count(), 1);
    }

    #[test]
    fn no_flag_beyond_sensing_range() {
        let mut t = NeighborTemplate::new();
        assert!(!t.fill(0.0, DMAX, DMAX, TOL)); // distance == dmax is out
        assert!(!t.fill(0.0, 10.0, DMAX, TOL));
        assert_eq!(t.link_count(), 0);
    }

    #[test]
    fn no_flag_outside_tolerance() {
        let mut t = NeighborTemplate::new();
        // 22.5° sits exactly between the 0° and 45° canonical angles; with a
        // 10° tolerance neither matches.
        assert!(!t.fill(FRAC_PI_4 / 2.0, 1.0, DMAX, 0.1745));
        assert_eq!(t.link_count(), 0);
    }

    #[test]
    fn first_match_wins_not_closest() {
        let mut t = NeighborTemplate::new();
        // 30° is closer to 45° than to 0°, but a 60° tolerance matches 0° first.
        assert!(t.fill(30f32.to_radians(), 1.0, DMAX, 60f32.to_radians()));
        assert!(t.is_set(0));
        assert!(!t.is_set(1));
    }

    #[test]
    fn state_index_packs_lsb_first() {
        let mut t = NeighborTemplate::new();
        t.fill(0.0, 1.0, DMAX, TOL); // slot 0
        t.fill(FRAC_PI_4, 1.0, DMAX, TOL); // slot 1
        assert_eq!(t.state_index(), 3);

        let empty = NeighborTemplate::new();
        assert_eq!(empty.state_index(), 0);
    }
}

#[cfg(test)]
mod preferred_bearing_tests {
    use crate::bearing_shape::preferred_bearing;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

    #[test]
    fn picks_nearest_candidate() {
        let candidates = [0.0, FRAC_PI_2];
        assert_eq!(preferred_bearing(&candidates, 0.1), 0.0);
        assert_eq!(preferred_bearing(&candidates, FRAC_PI_2 - 0.1), FRAC_PI_2);
    }

    #[test]
    fn invariant_under_full_turn_shift() {
        let candidates = [0.0, FRAC_PI_2];
        for v_b in [-2.5f32, -0.3, 0.0, 0.7, 1.4] {
            assert_eq!(
                preferred_bearing(&candidates, v_b),
                preferred_bearing(&candidates, v_b + TAU),
                "shifted bearing {v_b} chose a different candidate"
            );
        }
    }

    #[test]
    fn mirror_equivalence_via_pi_shift() {
        // Observing the neighbor at -π/2 is the π/2 equilibrium seen from
        // the other side.
        let candidates = [0.0, FRAC_PI_2];
        assert_eq!(preferred_bearing(&candidates, -FRAC_PI_2), FRAC_PI_2);
    }

    #[test]
    fn equidistant_candidates_take_lower_index() {
        // π/4 is exactly halfway between the 0 and π/2 candidates.
        let candidates = [0.0, FRAC_PI_2];
        assert_eq!(preferred_bearing(&candidates, FRAC_PI_4), 0.0);
    }
}

#[cfg(test)]
mod action_motion_tests {
    use super::*;
    use crate::bearing_shape::action_motion;
    use std::f32::consts::FRAC_PI_4;

    const V_ADJ: f32 = 0.5;

    #[test]
    fn all_steps_have_magnitude_v_adj() {
        for a in 0..ActionId::COUNT {
            let v = action_motion(ActionId(a), V_ADJ);
            assert!((v.norm() - V_ADJ).abs() < 1e-6, "action {a} has norm {}", v.norm());
        }
    }

    #[test]
    fn east_first_counterclockwise() {
        let east = action_motion(ActionId(0), V_ADJ);
        assert!((east.x - V_ADJ).abs() < 1e-6 && east.y.abs() < 1e-6);

        let north = action_motion(ActionId(2), V_ADJ);
        assert!(north.x.abs() < 1e-6 && (north.y - V_ADJ).abs() < 1e-6);

        for a in 0..ActionId::COUNT {
            let v = action_motion(ActionId(a), V_ADJ);
            let angle = v.y.atan2(v.x);
            let expected = swarm_core::wrap_to_pi(a as f32 * FRAC_PI_4);
            assert!((angle - expected).abs() < 1e-5, "action {a}: {angle} vs {expected}");
        }
    }

    #[test]
    fn bijection_onto_eight_directions() {
        let steps: Vec<Vec2> = (0..ActionId::COUNT)
            .map(|a| action_motion(ActionId(a), V_ADJ))
            .collect();
        for i in 0..steps.len() {
            for j in (i + 1)..steps.len() {
                assert!(
                    (steps[i] - steps[j]).norm() > 1e-3,
                    "actions {i} and {j} map to the same step"
                );
            }
        }
    }
}

#[cfg(test)]
mod attraction_tests {
    use super::*;
    use crate::{BearingShapeController, ShapeParams};
    use std::f32::consts::FRAC_PI_4;

    fn controller() -> BearingShapeController {
        BearingShapeController::new(Arc::new(PolicyTable::empty()), ShapeParams::default())
    }

    #[test]
    fn equilibrium_at_desired_distance() {
        let c = controller();
        let net = c.attraction_velocity(1.0, 0.0);
        assert!(net.abs() < 1e-4, "net radial velocity at d_des was {net}");
    }

    #[test]
    fn repulsion_dominates_when_close() {
        let c = controller();
        assert!(c.attraction_velocity(0.2, 0.0) < 0.0);
        // Repulsion diverges as the agents approach.
        assert!(c.attraction_velocity(0.01, 0.0) < c.attraction_velocity(0.2, 0.0));
    }

    #[test]
    fn attraction_dominates_when_far() {
        let c = controller();
        assert!(c.attraction_velocity(3.0, 0.0) > 0.0);
    }

    #[test]
    fn diagonal_equilibrium_uses_wider_midpoint() {
        let c = controller();
        let straight = c.attraction_velocity(1.0, 0.0);
        let diagonal = c.attraction_velocity(1.0, FRAC_PI_4);
        assert!((straight - diagonal).abs() > 1e-3);
        // On the diagonal the attraction midpoint moves outward, so at the
        // straight-lattice distance the net pull is inward (negative).
        assert!(diagonal < 0.0);
    }
}

#[cfg(test)]
mod bearing_shape_controller_tests {
    use super::*;
    use crate::{BearingShapeController, Controller, ControlContext, ShapeParams};

    fn shape(policy_table: Arc<PolicyTable>) -> BearingShapeController {
        BearingShapeController::new(policy_table, ShapeParams::default())
    }

    #[test]
    fn equilibrium_pair_holds_still() {
        // Two agents separated by exactly d_des along bearing 0.
        let world = world_at(&[(0.0, 0.0), (1.0, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = shape(Arc::new(PolicyTable::empty()));
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert!(cmd.norm() < 1e-3, "equilibrium pair drifted: {cmd}");
    }

    #[test]
    fn empty_policy_falls_back_to_lattice_motion() {
        let world = world_at(&[(0.0, 0.0), (1.3, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = shape(Arc::new(PolicyTable::empty()));
        let mut ctx = ControlContext::new();

        for _ in 0..10 {
            c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
            assert_eq!(ctx.selected_action, ActionId::INVALID);
            assert!(!ctx.moving);
        }
    }

    #[test]
    fn admissible_action_executes_as_compass_step() {
        // Neighbor at bearing 0, distance 1 → template slot 0 → state 1.
        let world = world_at(&[(0.0, 0.0), (1.0, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = shape(policy("1 2\n"));
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert_eq!(ctx.selected_action, ActionId(2));
        assert!(ctx.moving);
        assert_eq!(ctx.moving_timer, 1);
        // Action 2 is North: (0, v_adj).
        assert!(cmd.x.abs() < 1e-6 && (cmd.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn moving_neighbor_blocks_discrete_step() {
        let mut states = vec![
            AgentSnapshot::at(Vec2::new(0.0, 0.0)),
            AgentSnapshot::at(Vec2::new(1.0, 0.0)),
        ];
        states[1].moving = true;
        let world = WorldSnapshot::new(states);
        let obs = Observer::new(&world, 1);
        let mut c = shape(policy("1 2\n"));
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert!(!ctx.moving);
        assert_eq!(cmd, Vec2::ZERO);
    }

    #[test]
    fn crowded_uncommitted_agent_holds_position() {
        // Nearest neighbor inside the hold distance → no discrete step even
        // with an admissible action; lattice fallback instead.
        let world = world_at(&[(0.0, 0.0), (0.5, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = shape(policy("1 0\n"));
        let mut ctx = ControlContext::new();

        c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert_eq!(ctx.selected_action, ActionId(0));
        assert!(!ctx.moving, "crowded agent should not step");
    }

    #[test]
    fn entering_desired_state_arms_waiting_timer() {
        // Neighbors at bearings 0 and 45°, both at distance 1 → state 3,
        // which is in the desired set (priority 5).
        let world = world_at(&[(0.0, 0.0), (1.0, 0.0), (0.7071, 0.7071)]);
        let obs = Observer::new(&world, 2);
        let mut c = shape(policy("3 0\n"));
        let mut ctx = ControlContext::new();

        c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert_eq!(ctx.state_index, 3);
        // Armed to 1000 × (5−1)², then decremented once at end of tick.
        assert_eq!(ctx.waiting_timer, 16_000 - 1);
        assert!(!ctx.moving, "waiting timer must gate the discrete step");
    }

    #[test]
    fn command_always_clamped() {
        let mut params = ShapeParams::default();
        params.v_adj = 50.0; // exaggerated gain
        let world = world_at(&[(0.0, 0.0), (1.2, 0.4)]);
        let obs = Observer::new(&world, 1);
        let mut c = BearingShapeController::new(Arc::new(PolicyTable::empty()), params);
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert!(cmd.x.abs() <= 1.0 && cmd.y.abs() <= 1.0, "unclamped command {cmd}");
    }

    #[test]
    fn lone_agent_stays_put() {
        let world = world_at(&[(0.0, 0.0)]);
        let obs = Observer::new(&world, 0);
        let mut c = shape(Arc::new(PolicyTable::empty()));
        let mut ctx = ControlContext::new();
        assert_eq!(c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng()), Vec2::ZERO);
    }
}

#[cfg(test)]
mod exploration_tests {
    use super::*;
    use crate::{Controller, ControlContext, ExplorationController, ExplorationParams};

    fn params_no_jitter() -> ExplorationParams {
        ExplorationParams { jitter: 0.0, ..ExplorationParams::default() }
    }

    #[test]
    fn chosen_heading_persists() {
        let world = world_at(&[(0.0, 0.0), (5.0, 5.0)]); // neighbor out of range
        let obs = Observer::new(&world, 1);
        let mut c = ExplorationController::new(Arc::new(PolicyTable::empty()), params_no_jitter());
        let mut ctx = ControlContext::new();
        let mut r = rng();

        let first = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut r);
        let action = ctx.selected_action;
        assert!(action.is_valid());

        // State is stable, so the heading holds for the persistence window.
        for _ in 0..(ExplorationParams::default().persist_ticks) {
            let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut r);
            assert_eq!(ctx.selected_action, action);
            assert_eq!(cmd, first);
        }
    }

    #[test]
    fn speed_matches_mean_velocity() {
        let world = world_at(&[(0.0, 0.0), (5.0, 5.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = ExplorationController::new(Arc::new(PolicyTable::empty()), params_no_jitter());
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert!((cmd.norm() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn policy_row_restricts_heading_choice() {
        // Neighbor at bearing 0, distance 1 → state 1; row allows only action 6.
        let world = world_at(&[(0.0, 0.0), (1.0, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = ExplorationController::new(policy("1 6\n"), params_no_jitter());
        let mut ctx = ControlContext::new();

        c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert_eq!(ctx.selected_action, ActionId(6));
    }
}

#[cfg(test)]
mod bt_tests {
    use super::*;
    use crate::bt::{Action, Blackboard, BtNode, Condition, Selector, Sequence, Status};
    use crate::{BehaviorTreeController, Controller, ControlContext, TreeParams};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_action(
        counter: Arc<AtomicUsize>,
        status: Status,
    ) -> Box<Action> {
        Action::new(move |_bb| {
            counter.fetch_add(1, Ordering::SeqCst);
            status
        })
    }

    #[test]
    fn sequence_short_circuits_on_failure() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut seq = Sequence::new(vec![
            counter_action(first.clone(), Status::Failure),
            counter_action(second.clone(), Status::Success),
        ]);
        let mut bb = Blackboard::default();
        assert_eq!(seq.tick(&mut bb), Status::Failure);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn selector_short_circuits_on_success() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut sel = Selector::new(vec![
            counter_action(first.clone(), Status::Success),
            counter_action(second.clone(), Status::Success),
        ]);
        let mut bb = Blackboard::default();
        assert_eq!(sel.tick(&mut bb), Status::Success);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn running_propagates_up() {
        let tail = Arc::new(AtomicUsize::new(0));
        let mut seq = Sequence::new(vec![
            counter_action(Arc::new(AtomicUsize::new(0)), Status::Running),
            counter_action(tail.clone(), Status::Success),
        ]);
        let mut bb = Blackboard::default();
        assert_eq!(seq.tick(&mut bb), Status::Running);
        assert_eq!(tail.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn condition_reads_blackboard() {
        let mut cond = Condition::new(|bb: &Blackboard| {
            bb.get("x").copied().unwrap_or(0.0) > 1.0
        });
        let mut bb = Blackboard::default();
        assert_eq!(cond.tick(&mut bb), Status::Failure);
        bb.insert("x", 2.0);
        assert_eq!(cond.tick(&mut bb), Status::Success);
    }

    #[test]
    fn controller_evades_when_too_close() {
        let world = world_at(&[(0.0, 0.0), (0.3, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = BehaviorTreeController::new(TreeParams::default());
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert!(cmd.x < -0.4, "expected evasion away from the neighbor, got {cmd}");
        assert!(cmd.y.abs() < 1e-5);
    }

    #[test]
    fn controller_approaches_when_too_far() {
        let world = world_at(&[(0.0, 0.0), (2.0, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = BehaviorTreeController::new(TreeParams::default());
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert!(cmd.x > 0.4, "expected approach toward the neighbor, got {cmd}");
    }

    #[test]
    fn controller_holds_inside_comfort_band() {
        let world = world_at(&[(0.0, 0.0), (1.0, 0.0)]);
        let obs = Observer::new(&world, 1);
        let mut c = BehaviorTreeController::new(TreeParams::default());
        let mut ctx = ControlContext::new();

        let cmd = c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng());
        assert_eq!(cmd, Vec2::ZERO);
    }

    #[test]
    fn lone_agent_holds() {
        let world = world_at(&[(0.0, 0.0)]);
        let obs = Observer::new(&world, 0);
        let mut c = BehaviorTreeController::new(TreeParams::default());
        let mut ctx = ControlContext::new();
        assert_eq!(c.velocity_command(AgentId(0), &obs, &mut ctx, &mut rng()), Vec2::ZERO);
    }
}
