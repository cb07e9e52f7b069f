//! Single-step legality: which directions a piece may use, and whether one
//! step in one direction is a simple move, a capture, or neither.

use tracing::error;

use crate::engine::board::BoardState;
use crate::engine::moves::Move;
use crate::engine::types::{Color, DamaError, Direction, Piece, Rank, Square};

const WHITE_MAN: [Direction; 2] = [
    Direction::new(-1, Color::White.forward()),
    Direction::new(1, Color::White.forward()),
];
const BLACK_MAN: [Direction; 2] = [
    Direction::new(1, Color::Black.forward()),
    Direction::new(-1, Color::Black.forward()),
];
const KING: [Direction; 4] = [
    Direction::UP_LEFT,
    Direction::UP_RIGHT,
    Direction::DOWN_RIGHT,
    Direction::DOWN_LEFT,
];

/// A step that passed the preliminary checks: the mover owns the start
/// square and the move lands on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub mv: Move,
    pub mover: Piece,
    /// Occupant of the landing square.
    pub target: Option<Piece>,
}

/// Directions `piece` may move or capture in: forward diagonals for a man,
/// all four for a king.
pub fn movable_directions(piece: &Piece) -> &'static [Direction] {
    match (piece.rank(), piece.color()) {
        (Rank::King, _) => &KING,
        (Rank::Man, Color::White) => &WHITE_MAN,
        (Rank::Man, Color::Black) => &BLACK_MAN,
    }
}

/// Preliminary check of one step for `color` from `sq` along `dir`.
///
/// `Ok(None)` when the square is empty, holds the other color's piece, or the
/// move is invalid. `Err(MissingSquare)` when the landing square is missing
/// from the board's domain, which means the board itself is corrupt.
pub fn check_step(
    color: Color,
    board: &BoardState,
    sq: Square,
    dir: Direction,
) -> Result<Option<Step>, DamaError> {
    let Some(mover) = board.piece_at(sq) else {
        return Ok(None);
    };
    if mover.color() != color {
        return Ok(None);
    }
    let mv = Move::from_square(board.geometry(), sq, dir);
    let Some(landing) = mv.landing_index() else {
        return Ok(None);
    };
    let target = board.occupant(landing).inspect_err(|e| {
        error!(square = %sq, landing = %landing, "data integrity: {e}");
    })?;
    Ok(Some(Step { mv, mover, target }))
}

/// Whether `step` captures: the landing square holds an opposing piece that
/// a man is allowed to take (men never capture kings), and the square
/// beyond it is on the board and empty. Conditions are checked in that
/// order; the first failure disqualifies.
pub fn is_capture(color: Color, board: &BoardState, step: &Step) -> bool {
    let Some(victim) = step.target else {
        return false;
    };
    if victim.color() != !color {
        return false;
    }
    if step.mover.rank() == Rank::Man && victim.rank() == Rank::King {
        return false;
    }
    let Some(beyond) = step.mv.double_landing_index() else {
        return false;
    };
    match board.occupant(beyond) {
        Ok(occupant) => occupant.is_none(),
        Err(e) => {
            error!(start = %step.mv.start_index(), "data integrity: {e}");
            false
        }
    }
}

/// Whether a step onto a square holding `target` is a simple move.
#[inline]
pub fn is_simple_move(target: Option<Piece>) -> bool {
    target.is_none()
}

/// Every capture the piece on `sq` can make right now. Empty when `sq` is
/// empty. Steps that fail integrity checks are logged and skipped.
pub fn captures_from(board: &BoardState, sq: Square) -> Vec<Move> {
    let Some(piece) = board.piece_at(sq) else {
        return Vec::new();
    };
    let color = piece.color();
    movable_directions(&piece)
        .iter()
        .filter_map(|&dir| check_step(color, board, sq, dir).ok().flatten())
        .filter(|step| is_capture(color, board, step))
        .map(|step| step.mv)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
