//! End-to-end N-Queens runs through the public API.

use placement_search::{
    search_with_policy, AStar, Coord, FnProblem, QueensProblem, SearchEngine, SearchProblem,
    SolutionNode, Strategy, UniformCost,
};

fn coords(pairs: &[(usize, usize)]) -> Vec<Coord> {
    pairs.iter().copied().map(Coord::from).collect()
}

/// Brute-force check of the stop test, independent of `QueensProblem`
fn no_two_attack(node: &SolutionNode) -> bool {
    let queens = node.coords();
    for i in 0..queens.len() {
        for j in i + 1..queens.len() {
            let (a, b) = (queens[i], queens[j]);
            if a.col == b.col || a.row.abs_diff(b.row) == a.col.abs_diff(b.col) {
                return false;
            }
        }
    }
    true
}

#[test]
fn four_queens_uniform_cost_unit_cost() {
    let n = 4;
    let problem = FnProblem::new(
        move |node: &SolutionNode| node.len() == n && no_two_attack(node),
        move |node: &SolutionNode| {
            let next_row = node.last().map_or(0, |c| c.row + 1);
            if next_row < n {
                (0..n).map(|col| Coord::new(next_row, col)).collect()
            } else {
                Vec::new()
            }
        },
        |_: &SolutionNode, _: &SolutionNode| 1,
    )
    .with_heuristic(|_| 0);

    let outcome = search_with_policy(&[], &problem, UniformCost);

    assert!(outcome.expansions >= 4);
    let solution = outcome.solution.expect("4-queens has a solution");
    assert_eq!(solution.len(), 4);
    assert!(no_two_attack(&solution));
    assert_eq!(solution.cost, 4);

    let known = [
        coords(&[(0, 1), (1, 3), (2, 0), (3, 2)]),
        coords(&[(0, 2), (1, 0), (2, 3), (3, 1)]),
    ];
    assert!(known.iter().any(|k| k.as_slice() == solution.coords()));
}

#[test]
fn every_strategy_solves_six_queens() {
    let problem = QueensProblem::new(6);

    for strategy in Strategy::ALL {
        let outcome = SearchEngine::new(strategy).search(&problem.initial_placement(), &problem);
        let solution = outcome
            .solution
            .unwrap_or_else(|| panic!("{} found no solution", strategy.label()));

        assert!(problem.is_solution(solution.coords()), "{}", strategy.label());
        assert!(no_two_attack(&solution));
    }
}

#[test]
fn optimal_strategies_return_minimal_cost() {
    // every complete placement costs exactly `size`, so optimal means `size`
    let problem = QueensProblem::new(5);

    for strategy in Strategy::ALL.into_iter().filter(|s| s.is_cost_optimal()) {
        let outcome = SearchEngine::new(strategy).search(&[], &problem);
        assert_eq!(outcome.solution.map(|s| s.cost), Some(5));
    }
}

#[test]
fn conflict_penalty_steers_astar_away_from_attacks() {
    // neighbors are not filtered; conflicts are only priced
    let n = 5;
    let queens = QueensProblem::new(n);
    let problem = FnProblem::new(
        move |node: &SolutionNode| node.len() == n && no_two_attack(node),
        move |node: &SolutionNode| {
            let next_row = node.len();
            if next_row < n {
                (0..n).map(|col| Coord::new(next_row, col)).collect()
            } else {
                Vec::new()
            }
        },
        move |node: &SolutionNode, child: &SolutionNode| queens.edge_cost(node, child),
    );

    let outcome = search_with_policy(&[], &problem, AStar);
    let solution = outcome.solution.expect("5-queens has a solution");

    assert!(no_two_attack(&solution));
    assert_eq!(solution.cost, 5);
}

#[test]
fn fixed_queen_off_the_board_has_no_solution() {
    let problem = QueensProblem::with_fixed(4, coords(&[(0, 3), (2, 4)]));

    for strategy in Strategy::ALL {
        let outcome = SearchEngine::new(strategy).search(&problem.initial_placement(), &problem);

        assert!(outcome.solution.is_none());
        assert_eq!(outcome.expansions, 1);
    }
}

#[test]
fn fixed_queens_are_kept_in_the_solution() {
    let fixed = coords(&[(0, 3), (2, 4)]);
    let problem = QueensProblem::with_fixed(5, fixed.clone());

    let outcome = SearchEngine::new(Strategy::AStar).search(&problem.initial_placement(), &problem);
    let solution = outcome.solution.expect("5-queens with these queens is solvable");

    assert!(problem.is_solution(solution.coords()));
    assert_eq!(&solution.coords()[..2], fixed.as_slice());
    // only the three searched queens carry cost
    assert_eq!(solution.cost, 3);
}

#[test]
fn satisfied_start_returns_after_one_pop() {
    let problem = QueensProblem::new(4);
    let start = coords(&[(0, 1), (1, 3), (2, 0), (3, 2)]);

    let outcome = SearchEngine::new(Strategy::Greedy).search(&start, &problem);

    assert_eq!(outcome.expansions, 1);
    assert_eq!(outcome.solution.map(|s| s.coords().to_vec()), Some(start));
}

#[test]
fn infeasible_board_is_exhausted() {
    // 3x3 has no solution; the search must still terminate
    let problem = QueensProblem::new(3);

    for strategy in Strategy::ALL {
        let outcome = SearchEngine::new(strategy).search(&[], &problem);
        assert!(outcome.solution.is_none());
        assert!(outcome.expansions > 1);
    }
}
