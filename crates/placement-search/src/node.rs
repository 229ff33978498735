//! Placement coordinates and the solution node explored by the search.
//!
//! A node is an ordered sequence of placements plus the cost accumulated
//! along the path that produced it. Identity is the placement sequence
//! alone; cost never takes part in equality or hashing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Inline capacity for placement sequences. Boards up to this many rows
/// keep their placements on the stack.
pub const INLINE_PLACEMENTS: usize = 16;

/// Placement sequence storage shared by nodes and signatures
pub type Placements = SmallVec<[Coord; INLINE_PLACEMENTS]>;

/// A single placement on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if two placements attack each other along a column or diagonal.
    /// Placements on the same row are also reported as attacking.
    pub fn attacks(&self, other: &Coord) -> bool {
        self.row == other.row
            || self.col == other.col
            || self.row.abs_diff(other.row) == self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("expected `row,col`, got `{0}`")]
    Shape(String),
    #[error("invalid number `{0}` in coordinate")]
    Number(String),
}

impl FromStr for Coord {
    type Err = CoordParseError;

    /// Parse `row,col`, optionally wrapped in parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| CoordParseError::Shape(s.to_string()))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| CoordParseError::Number(part.trim().to_string()))
        };

        Ok(Coord::new(parse(row)?, parse(col)?))
    }
}

/// Canonical identity of a node: its placement sequence, order-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(Placements);

impl Signature {
    pub fn coords(&self) -> &[Coord] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coord) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{coord}")?;
        }
        Ok(())
    }
}

/// A partial or complete placement together with its accumulated cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionNode {
    coords: Placements,
    pub cost: i64,
}

impl SolutionNode {
    pub fn new(coords: impl IntoIterator<Item = Coord>) -> Self {
        Self::with_cost(coords, 0)
    }

    pub fn with_cost(coords: impl IntoIterator<Item = Coord>, cost: i64) -> Self {
        Self {
            coords: coords.into_iter().collect(),
            cost,
        }
    }

    /// The placement sequence, in placement order
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn last(&self) -> Option<&Coord> {
        self.coords.last()
    }

    /// Build the successor reached by appending one placement. The child
    /// starts at cost 0; the engine records its path cost afterwards.
    pub fn child(&self, coord: Coord) -> SolutionNode {
        let mut coords = Placements::with_capacity(self.coords.len() + 1);
        coords.extend_from_slice(&self.coords);
        coords.push(coord);
        SolutionNode { coords, cost: 0 }
    }

    pub fn signature(&self) -> Signature {
        Signature(self.coords.clone())
    }
}

impl PartialEq for SolutionNode {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl Eq for SolutionNode {}

impl fmt::Display for SolutionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}
