//! Behavior-tree controller.
//!
//! Each tick the controller writes the percept (nearest-neighbor distance
//! and bearing, neighbor count) into the blackboard, ticks the tree root
//! once, and reads the commanded velocity back out of the blackboard.  Node
//! statuses propagate bottom-up per the composition rules in [`crate::bt`].

use swarm_core::{ActionId, AgentId, AgentRng, Vec2};
use swarm_sense::Observer;

use crate::bt::{Action, Blackboard, BtNode, Condition, Selector, Sequence, Status, bb_get};
use crate::controller::{Controller, clamp_command};
use crate::template::assess_neighbors;
use crate::ControlContext;

// ── Blackboard keys ───────────────────────────────────────────────────────────

pub const KEY_DIST_NEAREST: &str = "dist_nearest";
pub const KEY_BEARING_NEAREST: &str = "bearing_nearest";
pub const KEY_NEIGHBOR_COUNT: &str = "neighbor_count";
pub const KEY_CMD_X: &str = "cmd_x";
pub const KEY_CMD_Y: &str = "cmd_y";

// ── Parameters ────────────────────────────────────────────────────────────────

/// Tuning parameters of the default wheeled-robot tree.
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// Comfortable spacing to the nearest neighbor.
    pub d_des: f32,
    /// Below `d_des × close_ratio` the agent evades.
    pub close_ratio: f32,
    /// Above `d_des × far_ratio` the agent approaches.
    pub far_ratio: f32,
    /// Speed used by the evade/approach actions.
    pub cruise_speed: f32,
    /// Template sensing range.
    pub sensor_range: f32,
    /// Template angular tolerance, degrees.
    pub angle_err_deg: f32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            d_des: 1.0,
            close_ratio: 0.6,
            far_ratio: 1.5,
            cruise_speed: 0.5,
            sensor_range: 1.7,
            angle_err_deg: 22.5,
        }
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Behavior-tree controller with the default spacing-keeper tree:
///
/// ```text
/// selector
/// ├── sequence [ too close? → steer away from nearest ]
/// ├── sequence [ too far?   → steer toward nearest    ]
/// └── hold position
/// ```
pub struct BehaviorTreeController {
    root: Box<dyn BtNode>,
    blackboard: Blackboard,
    params: TreeParams,
}

impl BehaviorTreeController {
    pub fn new(params: TreeParams) -> Self {
        let root = Self::default_tree(&params);
        Self { root, blackboard: Blackboard::default(), params }
    }

    /// Build a controller around a caller-supplied tree instead of the
    /// default one.  The tree communicates through the `KEY_*` blackboard
    /// entries.
    pub fn with_tree(root: Box<dyn BtNode>, params: TreeParams) -> Self {
        Self { root, blackboard: Blackboard::default(), params }
    }

    fn default_tree(params: &TreeParams) -> Box<dyn BtNode> {
        let close = params.d_des * params.close_ratio;
        let far = params.d_des * params.far_ratio;
        let speed = params.cruise_speed;

        let evade = Sequence::new(vec![
            Condition::new(move |bb| bb_get(bb, KEY_DIST_NEAREST) < close),
            Action::new(move |bb| {
                let bearing = bb_get(bb, KEY_BEARING_NEAREST);
                bb.insert(KEY_CMD_X, -speed * bearing.cos());
                bb.insert(KEY_CMD_Y, -speed * bearing.sin());
                Status::Success
            }),
        ]);

        let approach = Sequence::new(vec![
            Condition::new(move |bb| {
                bb_get(bb, KEY_NEIGHBOR_COUNT) > 0.0 && bb_get(bb, KEY_DIST_NEAREST) > far
            }),
            Action::new(move |bb| {
                let bearing = bb_get(bb, KEY_BEARING_NEAREST);
                bb.insert(KEY_CMD_X, speed * bearing.cos());
                bb.insert(KEY_CMD_Y, speed * bearing.sin());
                Status::Success
            }),
        ]);

        let hold = Action::new(|bb| {
            bb.insert(KEY_CMD_X, 0.0);
            bb.insert(KEY_CMD_Y, 0.0);
            Status::Success
        });

        Box::new(Selector::new(vec![Box::new(evade), Box::new(approach), hold]))
    }
}

impl Controller for BehaviorTreeController {
    fn velocity_command(
        &mut self,
        agent: AgentId,
        obs:   &Observer<'_>,
        ctx:   &mut ControlContext,
        _rng:  &mut AgentRng,
    ) -> Vec2 {
        let p = &self.params;

        // Publish the state index like every other controller, even though
        // the tree itself keys on the continuous percept.
        let (template, _) =
            assess_neighbors(agent, obs, p.sensor_range, p.angle_err_deg.to_radians());
        ctx.state_index = template.state_index();
        ctx.selected_action = ActionId::INVALID;
        ctx.moving = false;

        let neighbors = obs.neighbors(agent);
        let (dist, bearing) = match neighbors.first() {
            Some(&nearest) => (obs.distance(agent, nearest), obs.bearing(agent, nearest)),
            None => (f32::INFINITY, 0.0),
        };

        self.blackboard.insert(KEY_DIST_NEAREST, dist);
        self.blackboard.insert(KEY_BEARING_NEAREST, bearing);
        self.blackboard.insert(KEY_NEIGHBOR_COUNT, neighbors.len() as f32);
        self.blackboard.insert(KEY_CMD_X, 0.0);
        self.blackboard.insert(KEY_CMD_Y, 0.0);

        self.root.tick(&mut self.blackboard);

        let command = Vec2::new(
            bb_get(&self.blackboard, KEY_CMD_X),
            bb_get(&self.blackboard, KEY_CMD_Y),
        );
        clamp_command(command)
    }
}
