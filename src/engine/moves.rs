//! Single diagonal step descriptor.
//!
//! A `Move` never fails to construct. Bad input yields a move whose
//! `is_valid()` is false, with the reason logged, so generation code can skip
//! it without error plumbing.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::coords::Geometry;
use crate::engine::types::{Coord, Direction, Square};

/// One step from `start` along `direction`. For a capture the step's landing
/// square is the jumped square and the double landing is where the piece ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    #[serde(skip)]
    geometry: Geometry,
    start: Coord,
    direction: Direction,
    valid: bool,
}

impl Move {
    /// Build a move from a start coordinate.
    pub fn new(geometry: Geometry, start: Coord, direction: Direction) -> Self {
        let mut valid = true;
        if !geometry.contains(start) {
            warn!(file = start.file, rank = start.rank, "invalid start square");
            valid = false;
        }
        if !direction.is_diagonal_unit() {
            warn!(
                file = direction.file,
                rank = direction.rank,
                "direction is not a diagonal unit step"
            );
            valid = false;
        }
        if valid && !geometry.contains(start.offset(direction, 1)) {
            debug!(
                file = start.file,
                rank = start.rank,
                %direction,
                "move lands off the board"
            );
            valid = false;
        }
        Move {
            geometry,
            start,
            direction,
            valid,
        }
    }

    /// Build a move from a start index.
    pub fn from_square(geometry: Geometry, start: Square, direction: Direction) -> Self {
        Self::new(geometry, geometry.to_coords(start), direction)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn start_index(&self) -> Square {
        self.geometry.to_index(self.start)
    }

    /// Square one step away; `None` for an invalid move.
    pub fn landing_index(&self) -> Option<Square> {
        if !self.valid {
            return None;
        }
        self.geometry.index_of(self.start.offset(self.direction, 1))
    }

    /// Square two steps away, where a capturing piece lands. `None` when the
    /// move is invalid or the double step leaves the board.
    pub fn double_landing_index(&self) -> Option<Square> {
        if !self.valid {
            return None;
        }
        self.geometry.index_of(self.start.offset(self.direction, 2))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.landing_index() {
            Some(landing) => write!(f, "{}-{}", self.start_index(), landing),
            None => write!(f, "{} {} (invalid)", self.start, self.direction),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
