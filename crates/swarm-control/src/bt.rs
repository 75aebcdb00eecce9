//! Minimal behavior-tree primitives.
//!
//! Standard composition semantics, ticked once per simulation tick:
//!
//! - [`Sequence`] runs children in order and short-circuits on the first
//!   `Failure` (or pauses on `Running`);
//! - [`Selector`] runs children in order and short-circuits on the first
//!   `Success` (or pauses on `Running`);
//! - [`Condition`] leaves map a blackboard predicate to Success/Failure;
//! - [`Action`] leaves mutate the blackboard and report their own status.
//!
//! The blackboard is a flat string-keyed `f32` map — enough for percept
//! inputs and velocity outputs.

use rustc_hash::FxHashMap;

/// Result of ticking a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    Running,
}

/// Per-agent key/value store shared by all nodes of one tree.
pub type Blackboard = FxHashMap<&'static str, f32>;

/// Read a blackboard value, defaulting to 0 for unset keys.
#[inline]
pub fn bb_get(bb: &Blackboard, key: &'static str) -> f32 {
    bb.get(key).copied().unwrap_or(0.0)
}

/// A composable tree node.
pub trait BtNode: Send {
    fn tick(&mut self, bb: &mut Blackboard) -> Status;
}

// ── Composites ────────────────────────────────────────────────────────────────

/// Ticks children in order; the first non-`Success` status wins.
pub struct Sequence {
    children: Vec<Box<dyn BtNode>>,
}

impl Sequence {
    pub fn new(children: Vec<Box<dyn BtNode>>) -> Self {
        Self { children }
    }
}

impl BtNode for Sequence {
    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        for child in &mut self.children {
            match child.tick(bb) {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Success
    }
}

/// Ticks children in order; the first non-`Failure` status wins.
pub struct Selector {
    children: Vec<Box<dyn BtNode>>,
}

impl Selector {
    pub fn new(children: Vec<Box<dyn BtNode>>) -> Self {
        Self { children }
    }
}

impl BtNode for Selector {
    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        for child in &mut self.children {
            match child.tick(bb) {
                Status::Failure => continue,
                other => return other,
            }
        }
        Status::Failure
    }
}

// ── Leaves ────────────────────────────────────────────────────────────────────

/// A predicate over the blackboard: `Success` when it holds, else `Failure`.
pub struct Condition {
    pred: Box<dyn Fn(&Blackboard) -> bool + Send>,
}

impl Condition {
    pub fn new(pred: impl Fn(&Blackboard) -> bool + Send + 'static) -> Box<Self> {
        Box::new(Self { pred: Box::new(pred) })
    }
}

impl BtNode for Condition {
    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        if (self.pred)(bb) { Status::Success } else { Status::Failure }
    }
}

/// A leaf that acts on the blackboard and reports its own status.
pub struct Action {
    act: Box<dyn FnMut(&mut Blackboard) -> Status + Send>,
}

impl Action {
    pub fn new(act: impl FnMut(&mut Blackboard) -> Status + Send + 'static) -> Box<Self> {
        Box::new(Self { act: Box::new(act) })
    }
}

impl BtNode for Action {
    fn tick(&mut self, bb: &mut Blackboard) -> Status {
        (self.act)(bb)
    }
}
