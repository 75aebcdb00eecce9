//! Neighbor-template percept discretization.
//!
//! An agent summarizes its local geometry as an 8-slot boolean template:
//! slot `i` is set when some neighbor sits (within an angular tolerance and
//! a sensing range) at the canonical bearing `i × 45°`, measured
//! counterclockwise from East.  The packed template is the discrete state
//! index used for policy lookup.

use std::f32::consts::TAU;

use swarm_core::{AgentId, wrap_to_2pi};
use swarm_sense::Observer;

/// Number of template slots (one per 45° sector boundary).
pub const TEMPLATE_SLOTS: usize = 8;

/// The canonical link bearings checked during template fill.  The trailing
/// `2π` entry aliases back to slot 0 so bearings just below a full turn
/// match East.
const CANONICAL_BEARINGS: [f32; 9] = [
    0.0,
    TAU / 8.0,
    2.0 * TAU / 8.0,
    3.0 * TAU / 8.0,
    4.0 * TAU / 8.0,
    5.0 * TAU / 8.0,
    6.0 * TAU / 8.0,
    7.0 * TAU / 8.0,
    TAU,
];

/// The discretized 8-flag neighbor-presence percept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborTemplate {
    flags: [bool; TEMPLATE_SLOTS],
}

impl NeighborTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to record one neighbor at `bearing` (in `[0, 2π)`) and `distance`.
    ///
    /// The first canonical bearing within `angle_err` radians of `bearing`
    /// claims the neighbor (first-match, not closest-match), provided
    /// `distance < dmax`; the `2π` match aliases to slot 0.  Returns whether
    /// the neighbor was captured.
    pub fn fill(&mut self, bearing: f32, distance: f32, dmax: f32, angle_err: f32) -> bool {
        if distance >= dmax {
            return false;
        }
        for (j, &canonical) in CANONICAL_BEARINGS.iter().enumerate() {
            if (bearing - canonical).abs() < angle_err {
                let slot = if j == CANONICAL_BEARINGS.len() - 1 { 0 } else { j };
                self.flags[slot] = true;
                return true;
            }
        }
        false
    }

    /// Pack the flags into the discrete state index (bit `i` = slot `i`).
    pub fn state_index(&self) -> u8 {
        self.flags
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &set)| acc | ((set as u8) << i))
    }

    #[inline]
    pub fn is_set(&self, slot: usize) -> bool {
        self.flags[slot]
    }

    /// Number of occupied slots.
    pub fn link_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }
}

/// Build the template for `agent` from its k nearest neighbors and return it
/// together with the IDs of the neighbors it captured.
///
/// `angle_err` is in radians; bearings are wrapped into `[0, 2π)` before
/// matching.
pub fn assess_neighbors(
    agent:     AgentId,
    obs:       &Observer<'_>,
    dmax:      f32,
    angle_err: f32,
) -> (NeighborTemplate, Vec<AgentId>) {
    let mut template = NeighborTemplate::new();
    let mut captured = Vec::new();

    for neighbor in obs.neighbors(agent) {
        let bearing = wrap_to_2pi(obs.bearing(agent, neighbor));
        let distance = obs.distance(agent, neighbor);
        if template.fill(bearing, distance, dmax, angle_err) {
            captured.push(neighbor);
        }
    }

    (template, captured)
}
