//! `swarm-sense` — published world snapshots and neighbor geometry queries.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`snapshot`] | `AgentSnapshot`, `WorldSnapshot` (positions + R-tree)    |
//! | [`observer`] | `Observer` — the per-tick neighbor query surface         |
//!
//! # Consistency model
//!
//! A `WorldSnapshot` is immutable once constructed.  The simulation clock
//! builds a fresh snapshot at every tick boundary and hands it to all agent
//! workers behind an `Arc`; within one tick every reader therefore observes
//! the same end-of-previous-tick state for every agent, never a write in
//! progress.

pub mod observer;
pub mod snapshot;


pub use observer::Observer;
pub use snapshot::{AgentSnapshot, WorldSnapshot};
