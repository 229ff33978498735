//! CLI entry point for the placement search.
//!
//! Usage:
//!   placement-search solve --size <n> [options]
//!   placement-search sweep [options]
//!
//! Options:
//!   --strategy <name>     astar, uniform-cost, greedy, breadth-first, depth-first (default: astar)
//!   --fixed <row,col>     Pre-placed queen, repeatable
//!   --budget <n>          Sweep stops once a board needs this many expansions (default: 1500)
//!   --start-size <n>      First board size of a sweep (default: 4)
//!   --max-size <n>        Largest board size of a sweep
//!
//! Set RUST_LOG=debug (or trace) for search progress on stderr.

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{error, info};
use serde::Serialize;

use placement_search::{
    run_sweep, BoardRun, Coord, QueensProblem, SearchEngine, Strategy, SweepConfig,
};

#[derive(Parser)]
#[command(name = "placement-search")]
#[command(about = "Best-first search for N-Queens placements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single board
    Solve {
        /// Board size (number of queens)
        #[arg(long, default_value = "8")]
        size: usize,

        /// Exploration strategy
        #[arg(long, value_enum, default_value = "astar")]
        strategy: Strategy,

        /// Queen fixed before the search starts, as `row,col`
        #[arg(long = "fixed", value_name = "ROW,COL")]
        fixed: Vec<Coord>,
    },
    /// Solve growing boards until the expansion budget is reached
    Sweep {
        /// Exploration strategy; all strategies when omitted
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        /// First board size
        #[arg(long, default_value = "4")]
        start_size: usize,

        /// Largest board size to try
        #[arg(long)]
        max_size: Option<usize>,

        /// Expansion count that ends the sweep
        #[arg(long, default_value = "1500")]
        budget: usize,

        /// Queen fixed on every board, as `row,col`
        #[arg(long = "fixed", value_name = "ROW,COL")]
        fixed: Vec<Coord>,
    },
}

/// Output format for a single solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    strategy: Strategy,
    size: usize,
    solved: bool,
    expansions: usize,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placement: Option<Vec<Coord>>,
}

/// Output format for a sweep, one entry per strategy
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepOutput {
    strategy: Strategy,
    budget: usize,
    runs: Vec<BoardRun>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            size,
            strategy,
            fixed,
        } => {
            let problem = QueensProblem::with_fixed(size, fixed);

            let start_time = Instant::now();
            let outcome =
                SearchEngine::new(strategy).search(&problem.initial_placement(), &problem);
            let time_elapsed_ms = start_time.elapsed().as_millis() as u64;

            let output = SolveOutput {
                strategy,
                size,
                solved: outcome.is_solved(),
                expansions: outcome.expansions,
                time_elapsed_ms,
                cost: outcome.solution.as_ref().map(|node| node.cost),
                placement: outcome.solution.as_ref().map(|node| node.coords().to_vec()),
            };

            if !print_json(&output) {
                return ExitCode::from(2);
            }

            // Exit with appropriate code
            if outcome.is_solved() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Commands::Sweep {
            strategy,
            start_size,
            max_size,
            budget,
            fixed,
        } => {
            let strategies = match strategy {
                Some(strategy) => vec![strategy],
                None => Strategy::ALL.to_vec(),
            };

            let mut outputs = Vec::new();
            for strategy in strategies {
                let config = SweepConfig {
                    strategy,
                    start_size,
                    max_size,
                    expansion_budget: budget,
                    fixed: fixed.clone(),
                };
                let runs = run_sweep(&config);
                info!(
                    "{}: {}",
                    strategy.label(),
                    runs.iter()
                        .map(|run| if run.solved {
                            run.expansions.to_string()
                        } else {
                            "-1".to_string()
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                outputs.push(SweepOutput {
                    strategy,
                    budget,
                    runs,
                });
            }

            if print_json(&outputs) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            error!("failed to serialize output: {}", e);
            eprintln!("Error serializing output: {}", e);
            false
        }
    }
}
