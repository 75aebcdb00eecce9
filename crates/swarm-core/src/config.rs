//! Top-level simulation configuration.

use crate::{SwarmClock, SwarmError, SwarmResult};

/// Everything the simulation runner needs to know up front.
///
/// Typically assembled by the launcher binary from its command line and
/// passed to the sim builder.  [`SwarmConfig::validate`] enforces the fatal
/// configuration errors — an invalid config must abort the process before
/// any simulation state (or thread) is constructed.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmConfig {
    /// Number of agents in the swarm.  Fixed for the whole run.
    pub n_agents: usize,

    /// How many nearest neighbors each agent perceives.
    /// `n_agents - 1` means full connectivity.
    pub knearest: usize,

    /// Control cycles per simulated second.
    pub update_freq_hz: f32,

    /// Wall-clock speedup factor consumed by the clock for pacing.
    pub realtime_factor: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical per-agent
    /// random streams.
    pub seed: u64,

    /// Extra milliseconds the tick barrier waits past the pacing interval
    /// before declaring a non-reporting agent frozen for the tick.
    pub stall_timeout_ms: u64,
}

impl SwarmConfig {
    /// A config with full connectivity (`knearest = n_agents - 1`) and
    /// conservative defaults for everything but the agent count.
    pub fn full_connectivity(n_agents: usize) -> Self {
        Self {
            n_agents,
            knearest: n_agents.saturating_sub(1),
            update_freq_hz: 20.0,
            realtime_factor: 1.0,
            total_ticks: 1_000,
            seed: 42,
            stall_timeout_ms: 100,
        }
    }

    /// Enforce the fatal-configuration invariants.
    ///
    /// Call before constructing any simulation state; an `Err` here must
    /// abort the run.
    pub fn validate(&self) -> SwarmResult<()> {
        if self.n_agents == 0 {
            return Err(SwarmError::Config("agent count must be at least 1".into()));
        }
        if self.knearest > self.n_agents - 1 {
            return Err(SwarmError::Config(format!(
                "knearest {} exceeds the {} observable agents",
                self.knearest,
                self.n_agents - 1
            )));
        }
        if !(self.update_freq_hz > 0.0) {
            return Err(SwarmError::Config("update frequency must be positive".into()));
        }
        if !(self.realtime_factor > 0.0) {
            return Err(SwarmError::Config("realtime factor must be positive".into()));
        }
        Ok(())
    }

    /// Construct a `SwarmClock` pre-configured for this run.
    pub fn make_clock(&self) -> SwarmClock {
        SwarmClock::new(self.update_freq_hz, self.realtime_factor)
    }

    /// Simulated seconds per tick (the integration step).
    #[inline]
    pub fn step_secs(&self) -> f32 {
        1.0 / self.update_freq_hz
    }
}
