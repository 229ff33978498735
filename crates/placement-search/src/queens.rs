//! The N-Queens problem expressed as search policies.
//!
//! Queens are placed one row at a time, always in the first row that has
//! no queen yet. Some queens may be fixed up front; the search only fills
//! the remaining rows.

use smallvec::{smallvec, SmallVec};

use crate::node::{Coord, SolutionNode};
use crate::search::SearchProblem;

/// Cost charged for a move that puts a queen under attack
pub const CONFLICT_PENALTY: i64 = 1 << 30;

/// Column scratch space that stays on the stack for boards up to 32 wide
type ColumnMask = SmallVec<[bool; 32]>;

#[derive(Debug, Clone)]
pub struct QueensProblem {
    size: usize,
    fixed: Vec<Coord>,
}

impl QueensProblem {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            fixed: Vec::new(),
        }
    }

    /// A board with queens already placed. Fixed queens are not validated
    /// here; an out-of-board or conflicting set simply has no solution.
    pub fn with_fixed(size: usize, fixed: impl IntoIterator<Item = Coord>) -> Self {
        let mut fixed: Vec<Coord> = fixed.into_iter().collect();
        fixed.sort();
        Self { size, fixed }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fixed(&self) -> &[Coord] {
        &self.fixed
    }

    /// Placements the search starts from
    pub fn initial_placement(&self) -> Vec<Coord> {
        self.fixed.clone()
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// First row without a queen, or `size` when every row is taken
    pub fn first_free_row(&self, node: &SolutionNode) -> usize {
        let coords = node.coords();
        (0..self.size)
            .find(|&row| coords.iter().all(|c| c.row != row))
            .unwrap_or(self.size)
    }

    /// Smallest board that holds every fixed queen
    pub fn smallest_fitting_size(&self) -> usize {
        self.fixed
            .iter()
            .map(|c| c.row.max(c.col) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Whether `coord` can join the placement without being attacked
    pub fn is_safe(&self, node: &SolutionNode, coord: &Coord) -> bool {
        node.coords().iter().all(|queen| !queen.attacks(coord))
    }

    /// Whether no two queens of the placement attack each other
    pub fn is_conflict_free(coords: &[Coord]) -> bool {
        coords
            .iter()
            .enumerate()
            .all(|(i, a)| coords[i + 1..].iter().all(|b| !a.attacks(b)))
    }

    /// Check a placement against the board without searching
    pub fn is_solution(&self, coords: &[Coord]) -> bool {
        coords.len() == self.size
            && coords.iter().all(|c| self.in_bounds(c))
            && Self::is_conflict_free(coords)
    }
}

impl SearchProblem for QueensProblem {
    fn is_goal(&self, node: &SolutionNode) -> bool {
        self.is_solution(node.coords())
    }

    fn neighbors(&self, node: &SolutionNode) -> Vec<Coord> {
        if node.coords().iter().any(|c| !self.in_bounds(c)) {
            return Vec::new();
        }

        let row = self.first_free_row(node);
        if row >= self.size {
            return Vec::new();
        }

        (0..self.size)
            .map(|col| Coord::new(row, col))
            .filter(|coord| self.is_safe(node, coord))
            .collect()
    }

    /// One per queen, or the conflict penalty when the newest queen is
    /// attacked by an earlier one.
    fn edge_cost(&self, node: &SolutionNode, child: &SolutionNode) -> i64 {
        match child.last() {
            Some(queen) if !self.is_safe(node, queen) => CONFLICT_PENALTY,
            _ => 1,
        }
    }

    /// Queens still to place, or the conflict penalty when every column of
    /// the next free row is already attacked.
    fn heuristic(&self, node: &SolutionNode) -> Option<i64> {
        let placed = node.len();
        if placed >= self.size {
            return Some(0);
        }

        let row = self.first_free_row(node);
        let mut attacked: ColumnMask = smallvec![false; self.size];
        for queen in node.coords() {
            let distance = row.abs_diff(queen.row);
            for col in [
                Some(queen.col),
                queen.col.checked_add(distance),
                queen.col.checked_sub(distance),
            ]
            .into_iter()
            .flatten()
            {
                if col < self.size {
                    attacked[col] = true;
                }
            }
        }

        if attacked.iter().all(|&a| a) {
            Some(CONFLICT_PENALTY)
        } else {
            Some((self.size - placed) as i64)
        }
    }
}
