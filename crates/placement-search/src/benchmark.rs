//! Board-size sweep: solve N-Queens for growing boards until a search
//! needs more expansions than the budget allows.

use std::time::Instant;

use log::info;
use serde::{Deserialize, Serialize};

use crate::node::Coord;
use crate::queens::QueensProblem;
use crate::search::SearchEngine;
use crate::strategy::Strategy;

/// Configuration for a sweep
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub strategy: Strategy,
    /// Board size of the first run
    pub start_size: usize,
    /// Largest board to try, regardless of the budget
    pub max_size: Option<usize>,
    /// The sweep stops after the first run that reaches this many expansions
    pub expansion_budget: usize,
    /// Queens placed on every board before searching
    pub fixed: Vec<Coord>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AStar,
            start_size: 4,
            max_size: None,
            expansion_budget: 1500,
            fixed: Vec::new(),
        }
    }
}

/// Outcome of solving one board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRun {
    pub size: usize,
    pub solved: bool,
    pub expansions: usize,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Vec<Coord>>,
}

/// Solve a single board with the given strategy
pub fn solve_board(strategy: Strategy, problem: &QueensProblem) -> BoardRun {
    let start_time = Instant::now();
    let outcome = SearchEngine::new(strategy).search(&problem.initial_placement(), problem);
    let elapsed_ms = start_time.elapsed().as_millis() as u64;

    BoardRun {
        size: problem.size(),
        solved: outcome.is_solved(),
        expansions: outcome.expansions,
        elapsed_ms,
        placement: outcome.solution.map(|node| node.coords().to_vec()),
    }
}

/// Run boards of increasing size. Unsolvable boards are recorded and the
/// sweep moves on to the next size, skipping straight past sizes that
/// cannot hold the fixed queens.
pub fn run_sweep(config: &SweepConfig) -> Vec<BoardRun> {
    let mut runs = Vec::new();
    let mut size = config.start_size;

    loop {
        if config.max_size.is_some_and(|max| size > max) {
            break;
        }

        let problem = QueensProblem::with_fixed(size, config.fixed.iter().copied());
        let run = solve_board(config.strategy, &problem);
        info!(
            "{} n={} solved={} expansions={} time={}ms",
            config.strategy.label(),
            run.size,
            run.solved,
            run.expansions,
            run.elapsed_ms
        );

        let over_budget = run.expansions >= config.expansion_budget;
        runs.push(run);
        if over_budget {
            break;
        }
        // boards too small for the fixed queens cannot be solved
        size = (size + 1).max(problem.smallest_fitting_size());
    }

    runs
}
