//! `swarm-output` — recording the outward per-tick interface.
//!
//! Rendering and analysis collaborators see exactly what the simulation
//! publishes once per tick: per-agent position, velocity, discrete state
//! index, and selected action.  This crate records that surface to CSV via
//! a [`SimObserver`][swarm_sim::SimObserver] implementation.

pub mod csv_writer;
pub mod error;


pub use csv_writer::CsvSnapshotWriter;
pub use error::{OutputError, OutputResult};
