//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  One
//! tick is one lock-step control cycle: every agent senses, decides, and
//! moves exactly once per tick.  The mapping to seconds is held in
//! `SwarmClock`:
//!
//!   step      = 1 / update_freq_hz            (simulated seconds per tick)
//!   pacing    = step / realtime_factor        (real seconds between ticks)
//!
//! `realtime_factor > 1` runs the simulation faster than real time; the
//! simulated-time increment per tick is `pacing × realtime_factor`, which is
//! exactly one `step` regardless of the factor.

use std::fmt;
use std::time::Duration;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at 1000 ticks per second a u64 lasts ~585 million years,
/// far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SwarmClock ────────────────────────────────────────────────────────────────

/// The lock-step simulation clock.
///
/// Owned and advanced only by the clock loop; agents observe the tick and
/// simulated time read-only through the published snapshot generation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmClock {
    /// Control cycles per simulated second.
    pub update_freq_hz: f32,
    /// Wall-clock speedup: 2.0 runs the simulation twice as fast as real time.
    pub realtime_factor: f32,
    /// The current tick — advanced by [`SwarmClock::advance`] once per cycle.
    pub current_tick: Tick,
    /// Accumulated simulated seconds since tick 0.
    pub sim_time_secs: f64,
}

impl SwarmClock {
    pub fn new(update_freq_hz: f32, realtime_factor: f32) -> Self {
        Self {
            update_freq_hz,
            realtime_factor,
            current_tick: Tick::ZERO,
            sim_time_secs: 0.0,
        }
    }

    /// Simulated seconds per tick.  This is the integration step handed to
    /// every agent runtime.
    #[inline]
    pub fn step_secs(&self) -> f32 {
        1.0 / self.update_freq_hz
    }

    /// Real seconds the clock waits between ticks.
    #[inline]
    pub fn pacing(&self) -> Duration {
        Duration::from_secs_f64(1.0 / (self.update_freq_hz as f64 * self.realtime_factor as f64))
    }

    /// Close the current tick: increment the counter and accumulate
    /// simulated time (`pacing × realtime_factor`, i.e. one step).
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.sim_time_secs += self.pacing().as_secs_f64() * self.realtime_factor as f64;
    }
}

impl fmt::Display for SwarmClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_tick, self.sim_time_secs)
    }
}
