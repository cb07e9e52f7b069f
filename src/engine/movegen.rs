//! Turn-level move generation.
//!
//! Pipeline:
//!   1. Classify every step of every piece of the side to move as a capture,
//!      a simple move, or neither.
//!   2. Filter: if any capture exists anywhere on the board, drop all simple
//!      moves (captures are mandatory).

use serde::Serialize;
use tracing::info;

use crate::engine::board::BoardState;
use crate::engine::coords::Geometry;
use crate::engine::moves::Move;
use crate::engine::rules::{self, check_step, is_capture, is_simple_move, movable_directions};
use crate::engine::types::{Color, Direction, Piece, Square};

// =========================================================================
// Public API
// =========================================================================

/// Legal single-step actions for one side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalActions {
    pub captures: Vec<Move>,
    /// Always empty when `captures` is not.
    pub simple_moves: Vec<Move>,
}

impl LegalActions {
    #[inline]
    pub fn must_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty() && self.simple_moves.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.captures.len() + self.simple_moves.len()
    }

    /// Squares holding at least one capturing piece, in index order.
    pub fn capturing_squares(&self) -> Vec<Square> {
        let mut squares: Vec<Square> = self.captures.iter().map(|m| m.start_index()).collect();
        squares.dedup();
        squares
    }
}

/// All legal actions for `color` on `board`.
pub fn legal_actions(board: &BoardState, color: Color) -> LegalActions {
    let mut actions = LegalActions::default();
    for (sq, piece) in board.pieces() {
        if piece.color() == color {
            classify_square(board, color, sq, &piece, &mut actions);
        }
    }
    enforce_mandatory_capture(&mut actions);
    actions
}

/// Legal actions of the piece on `sq`. Simple moves are dropped if its side
/// has a capture anywhere on the board.
pub fn legal_actions_from(board: &BoardState, sq: Square) -> LegalActions {
    let Some(piece) = board.piece_at(sq) else {
        return LegalActions::default();
    };
    let color = piece.color();
    let mut actions = LegalActions::default();
    classify_square(board, color, sq, &piece, &mut actions);
    if !actions.must_capture()
        && !actions.simple_moves.is_empty()
        && board
            .pieces()
            .any(|(other, p)| p.color() == color && !rules::captures_from(board, other).is_empty())
    {
        actions.simple_moves.clear();
    }
    actions
}

/// Every valid `(square, direction)` move on an empty board of `geometry`,
/// in square order then `Direction::ALL` order.
pub fn action_space(geometry: Geometry) -> Vec<Move> {
    let moves: Vec<Move> = geometry
        .squares()
        .flat_map(|sq| Direction::ALL.map(|dir| Move::from_square(geometry, sq, dir)))
        .filter(Move::is_valid)
        .collect();
    info!(size = geometry.size(), moves = moves.len(), "action space built");
    moves
}

// =========================================================================
// Internals
// =========================================================================

fn classify_square(
    board: &BoardState,
    color: Color,
    sq: Square,
    piece: &Piece,
    actions: &mut LegalActions,
) {
    for &dir in movable_directions(piece) {
        // Integrity errors are logged by check_step; skip the direction.
        let Ok(Some(step)) = check_step(color, board, sq, dir) else {
            continue;
        };
        if is_capture(color, board, &step) {
            actions.captures.push(step.mv);
        } else if is_simple_move(step.target) {
            actions.simple_moves.push(step.mv);
        }
    }
}

fn enforce_mandatory_capture(actions: &mut LegalActions) {
    if actions.must_capture() {
        actions.simple_moves.clear();
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const G: Geometry = Geometry::STANDARD;

    fn board(placements: &[(u16, Piece)]) -> BoardState {
        BoardState::from_placements(G, placements.iter().map(|&(s, p)| (Square(s), p))).unwrap()
    }

    fn wm(id: u16) -> Piece {
        Piece::man(id, Color::White)
    }

    fn bm(id: u16) -> Piece {
        Piece::man(id, Color::Black)
    }

    fn landings(moves: &[Move]) -> Vec<(Square, Square)> {
        moves
            .iter()
            .map(|m| (m.start_index(), m.landing_index().unwrap()))
            .collect()
    }

    // -------------------------------------------------------------------
    // Starting position
    // -------------------------------------------------------------------

    #[test]
    fn starting_position_seven_moves_each() {
        let b = BoardState::starting(G);
        for color in [Color::White, Color::Black] {
            let actions = legal_actions(&b, color);
            assert!(actions.captures.is_empty());
            assert_eq!(actions.simple_moves.len(), 7, "{color}");
        }
    }

    #[test]
    fn starting_position_only_front_rank_moves() {
        let b = BoardState::starting(G);
        let actions = legal_actions(&b, Color::White);
        assert!(
            actions
                .simple_moves
                .iter()
                .all(|m| (8..12).contains(&m.start_index().0))
        );
    }

    // -------------------------------------------------------------------
    // Captures
    // -------------------------------------------------------------------

    #[test]
    fn two_captures_no_simple_moves() {
        let b = board(&[(1, wm(0)), (4, bm(1)), (5, bm(2))]);
        let actions = legal_actions(&b, Color::White);
        assert_eq!(actions.captures.len(), 2);
        assert!(actions.simple_moves.is_empty());
        let mut doubles: Vec<Square> = actions
            .captures
            .iter()
            .filter_map(|m| m.double_landing_index())
            .collect();
        doubles.sort();
        assert_eq!(doubles, vec![Square(8), Square(10)]);
    }

    #[test]
    fn capture_found_late_drops_earlier_simple_moves() {
        // Square 0 can step simply and is scanned first; square 13 (3, 3)
        // captures the black man on 18 (4, 4) later in the scan.
        let b = board(&[(0, wm(0)), (13, wm(1)), (18, bm(2))]);
        let actions = legal_actions(&b, Color::White);
        assert_eq!(landings(&actions.captures), vec![(Square(13), Square(18))]);
        assert!(actions.simple_moves.is_empty());
        assert_eq!(actions.capturing_squares(), vec![Square(13)]);
    }

    #[test]
    fn man_facing_king_moves_simply() {
        let b = board(&[(1, wm(0)), (5, Piece::king(1, Color::Black))]);
        let actions = legal_actions(&b, Color::White);
        assert!(actions.captures.is_empty());
        assert_eq!(landings(&actions.simple_moves), vec![(Square(1), Square(4))]);
    }

    #[test]
    fn other_color_is_ignored() {
        let b = board(&[(1, wm(0)), (4, bm(1)), (5, bm(2))]);
        let actions = legal_actions(&b, Color::Black);
        // Black men on 4 and 5 step down to rank 0; square 1 is taken and
        // there is no room to jump it.
        assert!(actions.captures.is_empty());
        assert_eq!(
            landings(&actions.simple_moves),
            vec![(Square(4), Square(0)), (Square(5), Square(2))]
        );
    }

    #[test]
    fn blocked_side_has_no_actions() {
        let b = board(&[(28, wm(0))]);
        // (1, 7) is the last rank; a white man there has nowhere to go.
        let actions = legal_actions(&b, Color::White);
        assert!(actions.is_empty());
        assert_eq!(actions.len(), 0);
    }

    // -------------------------------------------------------------------
    // legal_actions_from
    // -------------------------------------------------------------------

    #[test]
    fn legal_actions_from_respects_global_capture() {
        let b = board(&[(0, wm(0)), (13, wm(1)), (18, bm(2))]);
        let quiet = legal_actions_from(&b, Square(0));
        assert!(quiet.is_empty());
        let capturing = legal_actions_from(&b, Square(13));
        assert_eq!(capturing.captures.len(), 1);
    }

    #[test]
    fn legal_actions_from_empty_square() {
        let b = BoardState::starting(G);
        assert!(legal_actions_from(&b, Square(14)).is_empty());
        assert_eq!(legal_actions_from(&b, Square(9)).simple_moves.len(), 2);
    }

    // -------------------------------------------------------------------
    // Action space
    // -------------------------------------------------------------------

    #[test]
    fn action_space_standard_board() {
        let space = action_space(G);
        assert_eq!(space.len(), 98);
        assert!(space.iter().all(Move::is_valid));
        assert_eq!(space[0].start_index(), Square(0));
        assert_eq!(space[0].direction(), Direction::UP_RIGHT);
    }

    #[test]
    fn action_space_counts_diagonal_neighbours() {
        // Each playable square has one directed step per on-board diagonal
        // neighbour: 2 * (N - 1)^2 in total.
        for size in [4u8, 10] {
            let g = Geometry::new(size).unwrap();
            let n = size as usize;
            assert_eq!(action_space(g).len(), 2 * (n - 1) * (n - 1));
        }
    }
}
