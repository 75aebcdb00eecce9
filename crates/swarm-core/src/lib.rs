//! `swarm-core` — foundational types for the `rust_swarm` simulator.
//!
//! This crate is a dependency of every other `swarm-*` crate.  It
//! intentionally has no `swarm-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `ActionId`                                 |
//! | [`vec2`]     | `Vec2` planar vector, distance/bearing helpers        |
//! | [`angles`]   | `wrap_to_2pi`, `wrap_to_pi`                           |
//! | [`time`]     | `Tick`, `SwarmClock`                                  |
//! | [`config`]   | `SwarmConfig`                                         |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]    | `SwarmError`, `SwarmResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod angles;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use angles::{wrap_to_2pi, wrap_to_pi};
pub use config::SwarmConfig;
pub use error::{SwarmError, SwarmResult};
pub use ids::{ActionId, AgentId};
pub use rng::{AgentRng, SimRng};
pub use time::{SwarmClock, Tick};
pub use vec2::Vec2;
