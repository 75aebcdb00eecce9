//! formation — launcher for the rust_swarm simulator.
//!
//! ```text
//! formation <n_agents> [knearest] [shape|explore|tree]
//! ```
//!
//! Spawns `n_agents` workers running the chosen control policy (bearing-
//! shape formation by default), paces the lock-step clock, and records the
//! published per-tick state to `output/formation/agent_snapshots.csv`.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};

use swarm_control::{
    BearingShapeController, BehaviorTreeController, Controller, ExplorationController,
    ExplorationParams, ShapeParams, TreeParams,
};
use swarm_core::{SwarmConfig, Vec2};
use swarm_output::CsvSnapshotWriter;
use swarm_policy::PolicyTable;
use swarm_sim::SwarmSimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const UPDATE_FREQ_HZ:        f32  = 20.0;
const REALTIME_FACTOR:       f32  = 5.0;
const TOTAL_TICKS:           u64  = 2_000;
const SEED:                  u64  = 42;
const OUTPUT_INTERVAL_TICKS: u64  = 10;
const POLICY_PATH:           &str = "demos/formation/conf/state_action_square.txt";
const OUTPUT_DIR:            &str = "output/formation";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerKind {
    Shape,
    Explore,
    Tree,
}

#[derive(Debug)]
struct CliArgs {
    n_agents:   usize,
    knearest:   usize,
    controller: ControllerKind,
}

/// Parse the positional arguments.  Errors here abort the process before
/// any simulation state or thread exists.
fn parse_args(args: &[String]) -> Result<CliArgs> {
    let n_agents: usize = args
        .get(1)
        .context("usage: formation <n_agents> [knearest] [shape|explore|tree]")?
        .parse()
        .context("agent count must be an integer")?;
    if n_agents == 0 {
        bail!("agent count must be at least 1");
    }

    let knearest = match args.get(2) {
        None => n_agents - 1, // full connectivity
        Some(raw) => {
            let k: usize = raw.parse().context("knearest must be an integer")?;
            if k > n_agents - 1 {
                bail!(
                    "knearest {k} exceeds the {} observable agents",
                    n_agents - 1
                );
            }
            k
        }
    };

    let controller = match args.get(3).map(String::as_str) {
        None | Some("shape") => ControllerKind::Shape,
        Some("explore") => ControllerKind::Explore,
        Some("tree") => ControllerKind::Tree,
        Some(other) => bail!("unknown controller {other:?}; expected shape, explore, or tree"),
    };

    Ok(CliArgs { n_agents, knearest, controller })
}

// ── Controller construction ───────────────────────────────────────────────────

fn build_controllers(
    kind:   ControllerKind,
    n:      usize,
    policy: &Arc<PolicyTable>,
) -> Vec<Box<dyn Controller>> {
    (0..n)
        .map(|_| -> Box<dyn Controller> {
            match kind {
                ControllerKind::Shape => Box::new(BearingShapeController::new(
                    Arc::clone(policy),
                    ShapeParams::default(),
                )),
                ControllerKind::Explore => Box::new(ExplorationController::new(
                    Arc::clone(policy),
                    ExplorationParams::default(),
                )),
                ControllerKind::Tree => Box::new(BehaviorTreeController::new(TreeParams::default())),
            }
        })
        .collect()
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args)?;

    let config = SwarmConfig {
        n_agents:         cli.n_agents,
        knearest:         cli.knearest,
        update_freq_hz:   UPDATE_FREQ_HZ,
        realtime_factor:  REALTIME_FACTOR,
        total_ticks:      TOTAL_TICKS,
        seed:             SEED,
        stall_timeout_ms: 100,
    };

    println!("=== formation — rust_swarm ===");
    println!(
        "Agents: {}  |  k-nearest: {}  |  Controller: {:?}  |  Ticks: {}",
        cli.n_agents, cli.knearest, cli.controller, TOTAL_TICKS
    );
    println!();

    // Missing artifact is non-fatal: the shape controller falls back to
    // continuous lattice motion.
    let policy = Arc::new(PolicyTable::load_or_empty(Path::new(POLICY_PATH)));

    let controllers = build_controllers(cli.controller, cli.n_agents, &policy);
    let sim = SwarmSimBuilder::new(config)
        .controllers(controllers)
        .wall_at(Vec2::new(2.0, 2.0))
        .build()?;

    let mut output = CsvSnapshotWriter::new(Path::new(OUTPUT_DIR), OUTPUT_INTERVAL_TICKS)?;

    let started = Instant::now();
    let finals = sim.run(&mut output)?;
    let elapsed = started.elapsed();

    if let Some(e) = output.take_error() {
        eprintln!("output error: {e}");
    }

    // ── Summary ───────────────────────────────────────────────────────────
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!();
    println!("{:<8} {:<20} {:<8} {:<10}", "Agent", "Position", "State", "Action");
    println!("{}", "-".repeat(48));
    for (i, state) in finals.iter().enumerate() {
        println!(
            "{:<8} {:<20} {:<8} {:<10}",
            i,
            state.position.to_string(),
            state.state_index,
            state.action.to_string(),
        );
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_agent_count_rejected() {
        assert!(parse_args(&args(&["formation"])).is_err());
    }

    #[test]
    fn zero_agent_count_rejected() {
        assert!(parse_args(&args(&["formation", "0"])).is_err());
    }

    #[test]
    fn non_numeric_agent_count_rejected() {
        assert!(parse_args(&args(&["formation", "five"])).is_err());
    }

    #[test]
    fn knearest_defaults_to_full_connectivity() {
        let cli = parse_args(&args(&["formation", "8"])).unwrap();
        assert_eq!(cli.n_agents, 8);
        assert_eq!(cli.knearest, 7);
        assert_eq!(cli.controller, ControllerKind::Shape);
    }

    #[test]
    fn knearest_beyond_peers_rejected() {
        assert!(parse_args(&args(&["formation", "4", "4"])).is_err());
        assert!(parse_args(&args(&["formation", "4", "3"])).is_ok());
    }

    #[test]
    fn controller_kind_parsed() {
        let cli = parse_args(&args(&["formation", "4", "2", "explore"])).unwrap();
        assert_eq!(cli.controller, ControllerKind::Explore);
        assert!(parse_args(&args(&["formation", "4", "2", "bogus"])).is_err());
    }
}
