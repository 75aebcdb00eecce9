//! `swarm-sim` — the lock-step concurrent simulation engine.
//!
//! # Tick protocol
//!
//! ```text
//! clock thread                         agent workers (one per agent)
//! ────────────                         ─────────────────────────────
//! open(snapshot)      ──release──▶     wait_open(seen)
//!                                      read snapshot, run controller,
//!                                      integrate own kinematics
//! gather TickReports  ◀──publish──     send(TickReport)
//! (bounded wait; missing agents
//!  are frozen for the tick)
//! sleep out pacing interval
//! step walls, build next snapshot,
//! advance clock, fire observer
//! ```
//!
//! Workers only ever read the immutable `Arc<WorldSnapshot>` handed out at
//! tick open; the clock builds the *next* snapshot privately from the
//! reports and swaps it in at the barrier.  Every reader therefore observes
//! a complete end-of-previous-tick state for every agent — never a write in
//! progress.
//!
//! # Crate layout
//!
//! | Module          | Contents                                         |
//! |-----------------|--------------------------------------------------|
//! | [`gate`]        | `TickGate` — tick release + snapshot handoff     |
//! | [`runtime`]     | `AgentRuntime` worker loop, `TickReport`         |
//! | [`sim`]         | `SwarmSim` runner, `SimHandle`                   |
//! | [`builder`]     | `SwarmSimBuilder`, initial scatter               |
//! | [`environment`] | `Wall` — spring-damper environment entity        |
//! | [`observer`]    | `SimObserver` hooks                              |
//! | [`error`]       | `SimError`, `SimResult<T>`                       |

pub mod builder;
pub mod environment;
pub mod error;
pub mod gate;
pub mod observer;
pub mod runtime;
pub mod sim;


pub use builder::{SwarmSimBuilder, scatter_positions};
pub use environment::Wall;
pub use error::{SimError, SimResult};
pub use gate::TickGate;
pub use observer::{NoopObserver, SimObserver};
pub use runtime::TickReport;
pub use sim::{SimHandle, SwarmSim};
