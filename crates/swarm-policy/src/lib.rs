//! `swarm-policy` — immutable state-action policy tables.
//!
//! A policy table maps a discretized neighbor-percept state index (0–255) to
//! the set of discrete actions admissible in that state.  It is loaded once
//! from a text artifact before the simulation starts and never mutated
//! afterwards, so it can be shared across agent workers without
//! synchronization.
//!
//! # Crate layout
//!
//! | Module     | Contents                               |
//! |------------|----------------------------------------|
//! | [`table`]  | `PolicyTable`                          |
//! | [`loader`] | text-artifact parsing                  |
//! | [`error`]  | `PolicyError`, `PolicyResult<T>`       |

pub mod error;
pub mod loader;
pub mod table;


pub use error::{PolicyError, PolicyResult};
pub use loader::{load_policy_file, load_policy_reader};
pub use table::PolicyTable;
