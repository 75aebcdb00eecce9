//! CSV snapshot writer.
//!
//! Writes one `agent_snapshots.csv` row per agent per recorded tick:
//!
//! ```csv
//! tick,agent,x,y,vx,vy,state,action,moving
//! 0,0,0.1042,-0.3312,0.0000,0.0000,0,-1,false
//! ```
//!
//! `action` is `-1` when no discrete action is selected.

use std::fs::File;
use std::path::Path;

use swarm_core::Tick;
use swarm_sense::AgentSnapshot;
use swarm_sim::SimObserver;

use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records the published swarm state to CSV every
/// `interval_ticks` ticks.
///
/// Observer hooks cannot return errors, so the first write failure is
/// stashed and further writes are skipped; callers collect it with
/// [`take_error`][Self::take_error] after the run.
pub struct CsvSnapshotWriter {
    writer: csv::Writer<File>,
    interval_ticks: u64,
    error: Option<OutputError>,
}

impl CsvSnapshotWriter {
    /// Create `agent_snapshots.csv` inside `dir` (created if absent) and
    /// write the header row.
    pub fn new(dir: &Path, interval_ticks: u64) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let mut writer = csv::Writer::from_path(dir.join("agent_snapshots.csv"))?;
        writer.write_record([
            "tick", "agent", "x", "y", "vx", "vy", "state", "action", "moving",
        ])?;
        Ok(Self { writer, interval_ticks, error: None })
    }

    /// The first error encountered during the run, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.error.take()
    }

    fn write_tick(&mut self, tick: Tick, agents: &[AgentSnapshot]) -> OutputResult<()> {
        for (i, state) in agents.iter().enumerate() {
            let action = if state.action.is_valid() {
                state.action.0 as i32
            } else {
                -1
            };
            self.writer.write_record([
                tick.0.to_string(),
                i.to_string(),
                format!("{:.4}", state.position.x),
                format!("{:.4}", state.position.y),
                format!("{:.4}", state.velocity.x),
                format!("{:.4}", state.velocity.y),
                state.state_index.to_string(),
                action.to_string(),
                state.moving.to_string(),
            ])?;
        }
        Ok(())
    }
}

impl SimObserver for CsvSnapshotWriter {
    fn on_tick_end(&mut self, tick: Tick, agents: &[AgentSnapshot]) {
        if self.error.is_some() {
            return;
        }
        if self.interval_ticks > 0 && tick.0.is_multiple_of(self.interval_ticks) {
            if let Err(e) = self.write_tick(tick, agents) {
                self.error = Some(e);
            }
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        if let Err(e) = self.writer.flush() {
            if self.error.is_none() {
                self.error = Some(OutputError::Io(e));
            }
        }
    }
}
