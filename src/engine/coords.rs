//! Board geometry: mapping between dense playable-square indices and
//! (file, rank) coordinates.
//!
//! Only the dark squares of an N×N board are addressable. Index 0 is the
//! bottom-left square (0, 0); indices run along each rank, then upward:
//!
//! ```text
//!   rank 1:    4   5   6   7      files 1, 3, 5, 7
//!   rank 0:  0   1   2   3        files 0, 2, 4, 6
//! ```

use serde::Serialize;
use tracing::warn;

use crate::engine::types::{Color, Coord, DamaError, Square};

/// Standard Italian draughts board breadth.
pub const STANDARD_SIZE: u8 = 8;

/// Largest supported breadth: keeps every index within `Square`'s range.
pub const MAX_SIZE: u8 = 254;

/// Size of an N×N board and the conversions that depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Geometry {
    size: u8,
}

impl Geometry {
    pub const STANDARD: Geometry = Geometry {
        size: STANDARD_SIZE,
    };

    /// Validate an even, non-zero board breadth.
    pub fn new(size: u8) -> Result<Self, DamaError> {
        if size == 0 || size % 2 == 1 || size > MAX_SIZE {
            return Err(DamaError::InvalidBoardSize(size));
        }
        Ok(Geometry { size })
    }

    #[inline]
    pub fn size(self) -> u8 {
        self.size
    }

    /// Playable squares per rank.
    #[inline]
    fn half(self) -> u16 {
        self.size as u16 / 2
    }

    /// Largest playable index, `(N/2)·N − 1`.
    #[inline]
    pub fn max_index(self) -> Square {
        Square(self.half() * self.size as u16 - 1)
    }

    /// Number of playable squares.
    #[inline]
    pub fn square_count(self) -> usize {
        self.max_index().index() + 1
    }

    /// Iterate over every playable square in index order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..=self.max_index().0).map(Square)
    }

    #[inline]
    pub fn contains(self, coord: Coord) -> bool {
        let n = self.size as i16;
        (0..n).contains(&coord.file) && (0..n).contains(&coord.rank)
    }

    /// Whether `coord` is a playable (dark) square.
    #[inline]
    pub fn is_playable(self, coord: Coord) -> bool {
        (coord.file + coord.rank.rem_euclid(2)).rem_euclid(2) == 0
    }

    /// Index → (file, rank). Indices past `max_index` map to ranks off the
    /// top of the board.
    pub fn to_coords(self, sq: Square) -> Coord {
        let half = self.half();
        let rank = sq.0 / half;
        let file = 2 * (sq.0 % half) + rank % 2;
        Coord::new(file as i16, rank as i16)
    }

    /// (file, rank) → index.
    ///
    /// A light-square coordinate is logged and resolved to an adjacent
    /// playable square on the same rank (`floor(file / 2)` on that rank).
    pub fn to_index(self, coord: Coord) -> Square {
        if !self.is_playable(coord) {
            warn!(
                file = coord.file,
                rank = coord.rank,
                "coordinate names a light square; using the adjacent dark square on that rank"
            );
        }
        let index = self.half() as i32 * coord.rank as i32 + (coord.file / 2) as i32;
        Square(index.clamp(0, u16::MAX as i32) as u16)
    }

    /// Index of an on-board coordinate, `None` when off the board.
    #[inline]
    pub fn index_of(self, coord: Coord) -> Option<Square> {
        self.contains(coord).then(|| self.to_index(coord))
    }

    /// Farthest rank from `color`'s home side: where its men promote.
    #[inline]
    pub fn promotion_rank(self, color: Color) -> i16 {
        match color {
            Color::White => self.size as i16 - 1,
            Color::Black => 0,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::STANDARD
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
