//! Multi-jump capture search.
//!
//! From a piece's square, every available capture is applied to a fresh
//! board snapshot and the search recurses from the landing square. Each
//! capture is prepended to every continuation found below it, so branching
//! chains fan out into the full set of maximal sequences.
//!
//! A man stops after `MAN_CHAIN_LIMIT` captures; a king is limited only by
//! the pieces left to capture. A man promoted mid-chain continues as a king.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::engine::board::BoardState;
use crate::engine::movegen::legal_actions;
use crate::engine::moves::Move;
use crate::engine::rules::captures_from;
use crate::engine::types::{Color, Piece, Rank, Square};

/// Most captures a man may chain in one turn.
pub const MAN_CHAIN_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Capture & CaptureSequence
// ---------------------------------------------------------------------------

/// One jump of a capture sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    pub mv: Move,
    pub from: Square,
    pub jumped: Square,
    pub landing: Square,
    pub captured: Piece,
    /// The mover was promoted to king by this landing.
    pub promoted: bool,
}

/// A non-empty, ordered chain of captures made by one piece in one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CaptureSequence(Vec<Capture>);

impl CaptureSequence {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a sequence returned by the search.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn captures(&self) -> &[Capture] {
        &self.0
    }

    /// Square the piece starts from.
    pub fn start(&self) -> Square {
        self.0[0].from
    }

    /// Square the piece ends on.
    pub fn end(&self) -> Square {
        self.0[self.0.len() - 1].landing
    }

    /// Squares of the captured pieces, in capture order.
    pub fn captured_squares(&self) -> Vec<Square> {
        self.0.iter().map(|c| c.jumped).collect()
    }

    /// Whether `self` is a strict prefix of `other`.
    pub fn is_prefix_of(&self, other: &CaptureSequence) -> bool {
        self.len() < other.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for CaptureSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start())?;
        for capture in &self.0 {
            write!(f, "x{}", capture.landing)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// All maximal capture sequences for the piece on `sq`. Empty when the
/// square is empty or the piece has no capture.
pub fn capture_sequences(board: &BoardState, sq: Square) -> Vec<CaptureSequence> {
    capture_continuations(board, sq, 0)
}

/// Like `capture_sequences`, for a piece that has already made
/// `chain_depth` captures this turn.
pub fn capture_continuations(
    board: &BoardState,
    sq: Square,
    chain_depth: usize,
) -> Vec<CaptureSequence> {
    continuations(board, sq, chain_depth)
        .into_iter()
        .filter(|chain| !chain.is_empty())
        .map(CaptureSequence)
        .collect()
}

/// Every maximal capture sequence available to `color`: the search run from
/// each square that has a capture this turn.
pub fn capture_menu(board: &BoardState, color: Color) -> Vec<CaptureSequence> {
    legal_actions(board, color)
        .capturing_squares()
        .into_iter()
        .flat_map(|sq| capture_sequences(board, sq))
        .collect()
}

/// The sequences of greatest length.
pub fn longest(sequences: &[CaptureSequence]) -> Vec<CaptureSequence> {
    let max = sequences.iter().map(CaptureSequence::len).max().unwrap_or(0);
    sequences.iter().filter(|s| s.len() == max).cloned().collect()
}

/// Continuations from `sq` after `depth` captures. A terminal node yields a
/// single empty continuation so that the caller's prefix survives.
fn continuations(board: &BoardState, sq: Square, depth: usize) -> Vec<Vec<Capture>> {
    let Some(piece) = board.piece_at(sq) else {
        return vec![Vec::new()];
    };
    if piece.rank() == Rank::Man && depth >= MAN_CHAIN_LIMIT {
        return vec![Vec::new()];
    }

    let mut chains = Vec::new();
    for mv in captures_from(board, sq) {
        let (Some(jumped), Some(landing)) = (mv.landing_index(), mv.double_landing_index()) else {
            continue;
        };
        let Some(captured) = board.piece_at(jumped) else {
            continue;
        };
        let next = match board.with_move_applied(&mv, true) {
            Ok(next) => next,
            Err(e) => {
                warn!(square = %sq, "skipping capture {mv}: {e}");
                continue;
            }
        };
        let promoted = !piece.is_king() && next.piece_at(landing).is_some_and(|p| p.is_king());
        let capture = Capture {
            mv,
            from: sq,
            jumped,
            landing,
            captured,
            promoted,
        };
        for tail in continuations(&next, landing, depth + 1) {
            let mut chain = Vec::with_capacity(tail.len() + 1);
            chain.push(capture);
            chain.extend(tail);
            chains.push(chain);
        }
    }

    if chains.is_empty() {
        chains.push(Vec::new());
    }
    chains
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
