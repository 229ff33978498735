//! Priority policies that turn the one engine into different searches.
//!
//! The engine only ever asks a [`PriorityPolicy`] for a number; lower pops
//! first. Which number is handed back decides the exploration order.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::node::SolutionNode;

/// Optional estimate of the cost still to go from a node
pub type HeuristicFn<'a> = &'a dyn Fn(&SolutionNode) -> Option<i64>;

pub trait PriorityPolicy {
    fn priority(&mut self, node: &SolutionNode, heuristic: HeuristicFn<'_>) -> i64;
}

impl<P: PriorityPolicy + ?Sized> PriorityPolicy for Box<P> {
    fn priority(&mut self, node: &SolutionNode, heuristic: HeuristicFn<'_>) -> i64 {
        (**self).priority(node, heuristic)
    }
}

/// Path cost only
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCost;

impl PriorityPolicy for UniformCost {
    fn priority(&mut self, node: &SolutionNode, _heuristic: HeuristicFn<'_>) -> i64 {
        node.cost
    }
}

/// Path cost plus the heuristic estimate. Falls back to path cost when no
/// estimate is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl PriorityPolicy for AStar {
    fn priority(&mut self, node: &SolutionNode, heuristic: HeuristicFn<'_>) -> i64 {
        match heuristic(node) {
            Some(estimate) => node.cost.saturating_add(estimate),
            None => node.cost,
        }
    }
}

/// Heuristic estimate only
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl PriorityPolicy for Greedy {
    fn priority(&mut self, node: &SolutionNode, heuristic: HeuristicFn<'_>) -> i64 {
        heuristic(node).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// First in, first out (breadth-first)
    Fifo,
    /// Last in, first out (depth-first)
    Lifo,
}

/// Priority from a call counter; ignores cost and heuristic entirely.
#[derive(Debug, Clone, Copy)]
pub struct InsertionOrder {
    order: Order,
    counter: i64,
}

impl InsertionOrder {
    pub fn new(order: Order) -> Self {
        Self { order, counter: 0 }
    }

    pub fn fifo() -> Self {
        Self::new(Order::Fifo)
    }

    pub fn lifo() -> Self {
        Self::new(Order::Lifo)
    }
}

impl PriorityPolicy for InsertionOrder {
    fn priority(&mut self, _node: &SolutionNode, _heuristic: HeuristicFn<'_>) -> i64 {
        self.counter += 1;
        match self.order {
            Order::Fifo => self.counter,
            Order::Lifo => -self.counter,
        }
    }
}

/// Strategy selector exposed to callers and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    UniformCost,
    #[value(name = "astar", alias = "a-star")]
    #[serde(rename = "astar")]
    AStar,
    Greedy,
    BreadthFirst,
    DepthFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::UniformCost,
        Strategy::AStar,
        Strategy::Greedy,
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
    ];

    /// A fresh policy for one search call
    pub fn policy(self) -> Box<dyn PriorityPolicy> {
        match self {
            Strategy::UniformCost => Box::new(UniformCost),
            Strategy::AStar => Box::new(AStar),
            Strategy::Greedy => Box::new(Greedy),
            Strategy::BreadthFirst => Box::new(InsertionOrder::fifo()),
            Strategy::DepthFirst => Box::new(InsertionOrder::lifo()),
        }
    }

    /// Whether the first solution found has minimal path cost, given an
    /// admissible heuristic.
    pub fn is_cost_optimal(self) -> bool {
        matches!(self, Strategy::UniformCost | Strategy::AStar)
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::UniformCost => "uniform-cost",
            Strategy::AStar => "astar",
            Strategy::Greedy => "greedy",
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Coord;

    fn node_with_cost(cost: i64) -> SolutionNode {
        SolutionNode::with_cost(vec![Coord::new(0, 0)], cost)
    }

    fn no_heuristic(_: &SolutionNode) -> Option<i64> {
        None
    }

    fn three(_: &SolutionNode) -> Option<i64> {
        Some(3)
    }

    #[test]
    fn test_cost_based_policies() {
        let node = node_with_cost(5);

        assert_eq!(UniformCost.priority(&node, &three), 5);
        assert_eq!(AStar.priority(&node, &three), 8);
        assert_eq!(AStar.priority(&node, &no_heuristic), 5);
        assert_eq!(Greedy.priority(&node, &three), 3);
        assert_eq!(Greedy.priority(&node, &no_heuristic), 0);
    }

    #[test]
    fn test_astar_saturates() {
        let node = node_with_cost(i64::MAX - 1);
        assert_eq!(AStar.priority(&node, &three), i64::MAX);
    }

    #[test]
    fn test_insertion_order() {
        let node = node_with_cost(0);

        let mut fifo = InsertionOrder::fifo();
        let a = fifo.priority(&node, &no_heuristic);
        let b = fifo.priority(&node, &no_heuristic);
        assert!(a < b);

        let mut lifo = InsertionOrder::lifo();
        let a = lifo.priority(&node, &no_heuristic);
        let b = lifo.priority(&node, &no_heuristic);
        assert!(a > b);
    }

    #[test]
    fn test_strategy_policy_is_fresh() {
        let node = node_with_cost(0);
        let first = Strategy::BreadthFirst.policy().priority(&node, &no_heuristic);
        let second = Strategy::BreadthFirst.policy().priority(&node, &no_heuristic);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strategy_from_cli_name() {
        assert_eq!(Strategy::from_str("astar", true), Ok(Strategy::AStar));
        assert_eq!(Strategy::from_str("a-star", true), Ok(Strategy::AStar));
        assert_eq!(
            Strategy::from_str("uniform-cost", true),
            Ok(Strategy::UniformCost)
        );
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_str(strategy.label(), false), Ok(strategy));
        }
    }
}
