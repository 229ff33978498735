//! Generic best-first search over placement sequences.
//!
//! The engine knows nothing about the problem or the exploration order.
//! A [`SearchProblem`] supplies the stop test, neighbor generator, edge
//! cost and optional heuristic; a [`PriorityPolicy`] ranks the candidates.
//!
//! Nodes are finalized when popped: their signature goes into the visited
//! index and any later child with the same signature is dropped, even if it
//! was reached more cheaply. The closed list is never reopened.

use fnv::FnvHashMap;
use log::{debug, trace};

use crate::frontier::{CandidateFrontier, PriorityFrontier};
use crate::node::{Coord, Signature, SolutionNode};
use crate::strategy::{PriorityPolicy, Strategy};

/// Policies supplied by the problem layer
pub trait SearchProblem {
    /// True once `node` is a complete, conflict-free placement
    fn is_goal(&self, node: &SolutionNode) -> bool;

    /// Candidate next placements from `node`
    fn neighbors(&self, node: &SolutionNode) -> Vec<Coord>;

    /// Non-negative cost of moving from `node` to `child`
    fn edge_cost(&self, node: &SolutionNode, child: &SolutionNode) -> i64;

    /// Estimated remaining cost; `None` when the problem has no heuristic
    fn heuristic(&self, _node: &SolutionNode) -> Option<i64> {
        None
    }
}

/// A [`SearchProblem`] assembled from closures
pub struct FnProblem<S, N, C> {
    stop: S,
    neighbors: N,
    edge_cost: C,
    heuristic: Option<Box<dyn Fn(&SolutionNode) -> i64>>,
}

impl<S, N, C> FnProblem<S, N, C>
where
    S: Fn(&SolutionNode) -> bool,
    N: Fn(&SolutionNode) -> Vec<Coord>,
    C: Fn(&SolutionNode, &SolutionNode) -> i64,
{
    pub fn new(stop: S, neighbors: N, edge_cost: C) -> Self {
        Self {
            stop,
            neighbors,
            edge_cost,
            heuristic: None,
        }
    }

    pub fn with_heuristic(
        mut self,
        heuristic: impl Fn(&SolutionNode) -> i64 + 'static,
    ) -> Self {
        self.heuristic = Some(Box::new(heuristic));
        self
    }
}

impl<S, N, C> SearchProblem for FnProblem<S, N, C>
where
    S: Fn(&SolutionNode) -> bool,
    N: Fn(&SolutionNode) -> Vec<Coord>,
    C: Fn(&SolutionNode, &SolutionNode) -> i64,
{
    fn is_goal(&self, node: &SolutionNode) -> bool {
        (self.stop)(node)
    }

    fn neighbors(&self, node: &SolutionNode) -> Vec<Coord> {
        (self.neighbors)(node)
    }

    fn edge_cost(&self, node: &SolutionNode, child: &SolutionNode) -> i64 {
        (self.edge_cost)(node, child)
    }

    fn heuristic(&self, node: &SolutionNode) -> Option<i64> {
        self.heuristic.as_ref().map(|h| h(node))
    }
}

/// Result of one search call
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The node that satisfied the stop test, if any
    pub solution: Option<SolutionNode>,
    /// Number of nodes popped from the frontier
    pub expansions: usize,
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Search engine bound to one strategy
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine {
    strategy: Strategy,
}

impl SearchEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run a search from `initial`. Every call gets its own frontier,
    /// visited index and policy state.
    pub fn search<P>(&self, initial: &[Coord], problem: &P) -> SearchOutcome
    where
        P: SearchProblem + ?Sized,
    {
        debug!(
            "{} search from [{}]",
            self.strategy.label(),
            SolutionNode::new(initial.iter().copied())
        );
        search_with_policy(initial, problem, self.strategy.policy())
    }
}

/// Run a best-first search with an explicit priority policy.
///
/// Exhaustion is a normal outcome and reported as `solution: None`.
pub fn search_with_policy<P, Q>(initial: &[Coord], problem: &P, mut policy: Q) -> SearchOutcome
where
    P: SearchProblem + ?Sized,
    Q: PriorityPolicy,
{
    let heuristic = |node: &SolutionNode| problem.heuristic(node);

    let mut frontier = PriorityFrontier::new();
    let mut visited: FnvHashMap<Signature, i64> = FnvHashMap::default();
    let mut expansions = 0usize;

    let root = SolutionNode::new(initial.iter().copied());
    let root_priority = policy.priority(&root, &heuristic);
    frontier.insert(root, root_priority);

    while !frontier.is_empty() {
        // is_empty() was checked, so the frontier has a live entry
        let Ok(current) = frontier.pop_best() else {
            break;
        };
        let _ = visited.insert(current.signature(), current.cost);
        expansions += 1;
        trace!("expand #{expansions} [{current}] cost {}", current.cost);

        if problem.is_goal(&current) {
            debug!(
                "solution [{current}] cost {} after {expansions} expansions",
                current.cost
            );
            return SearchOutcome {
                solution: Some(current),
                expansions,
            };
        }

        for coord in problem.neighbors(&current) {
            let mut child = current.child(coord);
            if visited.contains_key(&child.signature()) {
                continue;
            }
            child.cost = current
                .cost
                .saturating_add(problem.edge_cost(&current, &child));
            let priority = policy.priority(&child, &heuristic);
            frontier.insert(child, priority);
        }
    }

    debug!("frontier exhausted after {expansions} expansions");
    SearchOutcome {
        solution: None,
        expansions,
    }
}
