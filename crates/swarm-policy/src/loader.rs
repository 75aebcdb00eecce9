//! Policy-table text artifact parsing.
//!
//! # Artifact format
//!
//! One state per line, whitespace-separated integers, variable column count:
//!
//! ```text
//! <state_index> <action_0> <action_1> ... <action_k>
//! ```
//!
//! `state_index` is the 8-bit neighbor-template value (0–255); each action
//! is a compass-direction index (0–7).  Lines with an index but no actions
//! are skipped, as are blank lines.  A duplicate state index keeps the last
//! row seen.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;

use swarm_core::ActionId;

use crate::{PolicyError, PolicyResult, PolicyTable};

/// Load a [`PolicyTable`] from a text artifact on disk.
pub fn load_policy_file(path: &Path) -> PolicyResult<PolicyTable> {
    let file = std::fs::File::open(path).map_err(PolicyError::Io)?;
    load_policy_reader(file)
}

/// Like [`load_policy_file`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded artifacts.
pub fn load_policy_reader<R: Read>(reader: R) -> PolicyResult<PolicyTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true) // variable trailing column count
        .from_reader(reader);

    let mut rows: FxHashMap<u8, Vec<ActionId>> = FxHashMap::default();

    for result in csv_reader.records() {
        let record = result.map_err(|e| PolicyError::Parse(e.to_string()))?;

        // Runs of whitespace produce empty fields; ignore them.
        let mut fields = record.iter().filter(|f| !f.trim().is_empty());

        let Some(first) = fields.next() else {
            continue; // blank line
        };
        let state = parse_state(first)?;

        let actions: Vec<ActionId> = fields
            .map(parse_action)
            .collect::<PolicyResult<_>>()?;

        if !actions.is_empty() {
            rows.insert(state, actions);
        }
    }

    Ok(PolicyTable::from_rows(rows))
}

// ── Field parsing ─────────────────────────────────────────────────────────────

fn parse_state(field: &str) -> PolicyResult<u8> {
    field.trim().parse::<u8>().map_err(|_| {
        PolicyError::Parse(format!(
            "invalid state index {field:?}: expected an integer in 0..=255"
        ))
    })
}

fn parse_action(field: &str) -> PolicyResult<ActionId> {
    let value = field.trim().parse::<u8>().map_err(|_| {
        PolicyError::Parse(format!("invalid action {field:?}: expected an integer"))
    })?;
    if value >= ActionId::COUNT {
        return Err(PolicyError::Parse(format!(
            "action {value} outside the action space 0..{}",
            ActionId::COUNT
        )));
    }
    Ok(ActionId(value))
}
