//! Board state: one optional occupant per playable square.
//!
//! `BoardState` is an immutable snapshot. Applying a move produces a new
//! snapshot and leaves the original untouched, so capture search can branch
//! freely from a shared ancestor.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::engine::coords::Geometry;
use crate::engine::moves::Move;
use crate::engine::types::{Color, Coord, DamaError, Piece, Square};

/// Occupancy of every playable square of a board.
///
/// Invariant: exactly `geometry.square_count()` entries, one per index in
/// `0..=max_index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardState {
    geometry: Geometry,
    squares: Vec<Option<Piece>>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl BoardState {
    /// A board with no pieces.
    pub fn empty(geometry: Geometry) -> Self {
        BoardState {
            geometry,
            squares: vec![None; geometry.square_count()],
        }
    }

    /// Initial setup: men on the first `N/2 - 1` ranks of each side, ids
    /// assigned in index order.
    pub fn starting(geometry: Geometry) -> Self {
        let rows = geometry.size() as i16 / 2 - 1;
        let top = geometry.size() as i16 - rows;
        let mut board = Self::empty(geometry);
        let mut next_id = 0u16;
        for sq in geometry.squares() {
            let rank = geometry.to_coords(sq).rank;
            let color = if rank < rows {
                Color::White
            } else if rank >= top {
                Color::Black
            } else {
                continue;
            };
            board.squares[sq.index()] = Some(Piece::man(next_id, color));
            next_id += 1;
        }
        board
    }

    /// Build from a full square → occupant mapping. The keys must be exactly
    /// `0..=max_index`.
    pub fn from_setting(
        geometry: Geometry,
        setting: BTreeMap<Square, Option<Piece>>,
    ) -> Result<Self, DamaError> {
        if setting.len() != geometry.square_count() {
            return Err(DamaError::InvalidSetting(format!(
                "expected {} squares, got {}",
                geometry.square_count(),
                setting.len()
            )));
        }
        // Sorted keys of the right count cover the domain iff the last one is max_index.
        if let Some((&last, _)) = setting.last_key_value()
            && last != geometry.max_index()
        {
            return Err(DamaError::InvalidSetting(format!(
                "square {last} is outside 0..={}",
                geometry.max_index()
            )));
        }
        Ok(BoardState {
            geometry,
            squares: setting.into_values().collect(),
        })
    }

    /// Build from a sparse list of placements; every other square is empty.
    pub fn from_placements(
        geometry: Geometry,
        placements: impl IntoIterator<Item = (Square, Piece)>,
    ) -> Result<Self, DamaError> {
        let mut board = Self::empty(geometry);
        for (sq, piece) in placements {
            let slot = board.squares.get_mut(sq.index()).ok_or_else(|| {
                DamaError::InvalidSetting(format!(
                    "square {sq} is outside 0..={}",
                    geometry.max_index()
                ))
            })?;
            if slot.is_some() {
                return Err(DamaError::InvalidSetting(format!(
                    "square {sq} is occupied twice"
                )));
            }
            *slot = Some(piece);
        }
        Ok(board)
    }

    /// Drop every square from `len` on, breaking the domain invariant.
    #[cfg(test)]
    pub(crate) fn truncate_domain(&mut self, len: usize) {
        self.squares.truncate(len);
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl BoardState {
    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Whether `sq` belongs to this board's domain.
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        sq.index() < self.squares.len()
    }

    /// Occupant of `sq`, or `MissingSquare` when `sq` is outside the domain.
    pub fn occupant(&self, sq: Square) -> Result<Option<Piece>, DamaError> {
        self.squares
            .get(sq.index())
            .copied()
            .ok_or(DamaError::MissingSquare(sq))
    }

    /// Piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares.get(sq.index()).copied().flatten()
    }

    /// True for an unoccupied square of this board.
    #[inline]
    pub fn empty_at(&self, sq: Square) -> bool {
        matches!(self.squares.get(sq.index()), Some(None))
    }

    /// All occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (Square(i as u16), p)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color() == color).count()
    }
}

// ---------------------------------------------------------------------------
// Move application
// ---------------------------------------------------------------------------

impl BoardState {
    /// The state after playing `mv`. A simple move lands on the landing
    /// square; a capture removes the jumped piece and lands on the double
    /// landing square. A man reaching its promotion rank becomes a king.
    pub fn with_move_applied(&self, mv: &Move, is_capture: bool) -> Result<Self, DamaError> {
        if !mv.is_valid() {
            return Err(DamaError::InvalidMove(format!("{mv} is not a valid move")));
        }
        if mv.geometry() != self.geometry {
            return Err(DamaError::InvalidMove(format!(
                "{mv} was built for a {n}x{n} board",
                n = mv.geometry().size()
            )));
        }
        if !self.geometry.is_playable(mv.start()) {
            return Err(DamaError::InvalidMove(format!(
                "{mv} starts on light square {}",
                mv.start()
            )));
        }
        let start = mv.start_index();
        let piece = self
            .occupant(start)?
            .ok_or_else(|| DamaError::InvalidMove(format!("no piece on square {start}")))?;

        let landing = mv
            .landing_index()
            .ok_or_else(|| DamaError::InvalidMove(format!("{mv} has no landing square")))?;
        let dest = if is_capture {
            mv.double_landing_index().ok_or_else(|| {
                DamaError::InvalidMove(format!("capture {mv} would land off the board"))
            })?
        } else {
            landing
        };
        if self.occupant(dest)?.is_some() {
            return Err(DamaError::InvalidMove(format!(
                "destination square {dest} is occupied"
            )));
        }
        if is_capture {
            match self.occupant(landing)? {
                Some(victim) if victim.color() != piece.color() => {}
                _ => {
                    return Err(DamaError::InvalidMove(format!(
                        "no opposing piece on square {landing} to capture"
                    )));
                }
            }
        }

        let dest_rank = self.geometry.to_coords(dest).rank;
        let placed = if dest_rank == self.geometry.promotion_rank(piece.color()) {
            piece.promoted()
        } else {
            piece
        };

        let mut next = self.clone();
        next.squares[start.index()] = None;
        if is_capture {
            next.squares[landing.index()] = None;
        }
        next.squares[dest.index()] = Some(placed);
        Ok(next)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl BoardState {
    /// Text diagram, highest rank first. `m`/`k` are white, `M`/`K` black,
    /// `.` an empty playable square.
    pub fn board_string(&self) -> String {
        let n = self.geometry.size() as i16;
        let mut s = String::new();
        for rank in (0..n).rev() {
            let row: Vec<String> = (0..n)
                .map(|file| {
                    let coord = Coord::new(file, rank);
                    if !self.geometry.is_playable(coord) {
                        return " ".to_string();
                    }
                    match self.piece_at(self.geometry.to_index(coord)) {
                        Some(p) => p.to_char().to_string(),
                        None => ".".to_string(),
                    }
                })
                .collect();
            s.push_str(format!("{rank:>2} {}", row.join(" ")).trim_end());
            s.push('\n');
        }
        let files: Vec<String> = (0..n).map(|f| (f % 10).to_string()).collect();
        s.push_str(&format!("   {}", files.join(" ")));
        s
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
