//! `swarm-control` — pluggable per-agent control policies.
//!
//! Every controller implements one uniform capability: consume a neighbor
//! percept (through the [`Observer`][swarm_sense::Observer]) plus the
//! agent's own [`ControlContext`], and produce a velocity command.  The
//! concrete strategy is chosen at agent construction time and invoked
//! through `Box<dyn Controller>` — one instance per agent, owned by that
//! agent's runtime, never shared.
//!
//! # Crate layout
//!
//! | Module            | Contents                                          |
//! |-------------------|---------------------------------------------------|
//! | [`controller`]    | `Controller` trait, command clamp                 |
//! | [`context`]       | `ControlContext` per-agent mutable control state  |
//! | [`template`]      | 8-slot neighbor template discretization           |
//! | [`bearing_shape`] | decentralized lattice/shape formation             |
//! | [`exploration`]   | finite-state lookup exploration                   |
//! | [`bt`]            | behavior-tree primitives                          |
//! | [`behavior_tree`] | behavior-tree controller                          |

pub mod bearing_shape;
pub mod behavior_tree;
pub mod bt;
pub mod context;
pub mod controller;
pub mod exploration;
pub mod template;

#[cfg(test)]
mod tests;

pub use bearing_shape::{BearingShapeController, ShapeParams};
pub use behavior_tree::{BehaviorTreeController, TreeParams};
pub use context::ControlContext;
pub use controller::{COMMAND_LIMIT, Controller, clamp_command};
pub use exploration::{ExplorationController, ExplorationParams};
pub use template::NeighborTemplate;
