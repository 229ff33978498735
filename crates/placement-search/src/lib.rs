//! Best-first search kernel for constraint placement problems.
//!
//! The engine explores sequences of placements until a caller-supplied stop
//! test is satisfied or the state space is exhausted. The same loop runs
//! Uniform-Cost, A*, Greedy, breadth-first and depth-first search; only the
//! priority policy differs. N-Queens is provided as the reference problem.

pub mod benchmark;
pub mod frontier;
pub mod node;
pub mod queens;
pub mod search;
pub mod strategy;

// Re-export main types
pub use benchmark::{run_sweep, solve_board, BoardRun, SweepConfig};
pub use frontier::{CandidateFrontier, FrontierError, PriorityFrontier};
pub use node::{Coord, CoordParseError, Signature, SolutionNode};
pub use queens::{QueensProblem, CONFLICT_PENALTY};
pub use search::{search_with_policy, FnProblem, SearchEngine, SearchOutcome, SearchProblem};
pub use strategy::{
    AStar, Greedy, HeuristicFn, InsertionOrder, Order, PriorityPolicy, Strategy, UniformCost,
};
