//! The tick gate — release point and snapshot handoff for all agent workers.

use std::sync::{Arc, Condvar, Mutex};

use swarm_sense::WorldSnapshot;

struct GateInner {
    /// Monotonically increasing tick generation.  Workers remember the last
    /// generation they processed and block until it advances.
    generation: u64,
    /// Cleared by [`TickGate::shutdown`]; workers exit at the next boundary.
    running: bool,
    /// The immutable snapshot all workers read during the open generation.
    world: Arc<WorldSnapshot>,
}

/// Coordination point between the clock thread and the agent workers.
///
/// The gate carries two things through one mutex: the current tick
/// generation and the `Arc` of the snapshot to read during that generation.
/// Handing both out under the same lock guarantees a worker can never pair
/// a new generation number with an old snapshot or vice versa.
pub struct TickGate {
    inner: Mutex<GateInner>,
    cond:  Condvar,
}

impl TickGate {
    pub fn new(world: Arc<WorldSnapshot>) -> Self {
        Self {
            inner: Mutex::new(GateInner { generation: 0, running: true, world }),
            cond:  Condvar::new(),
        }
    }

    /// Open the next tick: publish `world` as the snapshot to read, bump the
    /// generation, and wake every waiting worker.  Returns the new
    /// generation number.
    pub fn open(&self, world: Arc<WorldSnapshot>) -> u64 {
        let generation = {
            let mut inner = self.inner.lock().expect("tick gate poisoned");
            inner.generation += 1;
            inner.world = world;
            inner.generation
        };
        self.cond.notify_all();
        generation
    }

    /// Block until a generation newer than `seen` opens, returning it along
    /// with its snapshot.  Returns `None` once the gate has shut down.
    pub fn wait_open(&self, seen: u64) -> Option<(u64, Arc<WorldSnapshot>)> {
        let mut inner = self.inner.lock().expect("tick gate poisoned");
        loop {
            if !inner.running {
                return None;
            }
            if inner.generation > seen {
                return Some((inner.generation, Arc::clone(&inner.world)));
            }
            inner = self.cond.wait(inner).expect("tick gate poisoned");
        }
    }

    /// Request orderly shutdown: workers finish their in-flight tick and
    /// exit at the next boundary.
    pub fn shutdown(&self) {
        {
            let mut inner = self.inner.lock().expect("tick gate poisoned");
            inner.running = false;
        }
        self.cond.notify_all();
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().expect("tick gate poisoned").running
    }
}
