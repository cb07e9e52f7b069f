//! Diagnostic records: lossy conversions, rejected moves and refused piece
//! changes must show up as tracing events at the right level.

use std::io;
use std::sync::{Arc, Mutex};

use rust_dama::engine::{Color, Coord, Direction, Geometry, Move, Piece, Rank, Square};

/// Shared buffer the subscriber writes formatted events into.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

/// Run `f` under a subscriber that records every event, and return the
/// formatted lines.
fn capture<F: FnOnce()>(f: F) -> Vec<String> {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.lines()
}

fn find<'a>(lines: &'a [String], level: &str, message: &str) -> Option<&'a String> {
    lines
        .iter()
        .find(|l| l.contains(level) && l.contains(message))
}

// =====================================================================
// Coordinates
// =====================================================================

#[test]
fn light_square_conversion_warns() {
    let g = Geometry::STANDARD;
    let mut sq = Square(99);
    let lines = capture(|| sq = g.to_index(Coord::new(1, 0)));
    assert_eq!(sq, Square(0));
    let line = find(&lines, "WARN", "light square").expect("no warning for a light square");
    assert!(line.contains("file=1") && line.contains("rank=0"), "{line}");
}

#[test]
fn dark_square_conversion_is_silent() {
    let g = Geometry::STANDARD;
    let lines = capture(|| {
        for s in g.squares() {
            g.to_index(g.to_coords(s));
        }
    });
    assert!(find(&lines, "WARN", "light square").is_none(), "{lines:?}");
}

// =====================================================================
// Moves
// =====================================================================

#[test]
fn non_unit_direction_warns() {
    let lines = capture(|| {
        let mv = Move::from_square(Geometry::STANDARD, Square(13), Direction::new(0, 1));
        assert!(!mv.is_valid());
    });
    let line = find(&lines, "WARN", "direction is not a diagonal unit step")
        .expect("no warning for a bad direction");
    assert!(line.contains("file=0") && line.contains("rank=1"), "{line}");
}

#[test]
fn off_board_start_warns() {
    let lines = capture(|| {
        Move::new(Geometry::STANDARD, Coord::new(-1, 3), Direction::UP_RIGHT);
    });
    assert!(find(&lines, "WARN", "invalid start square").is_some(), "{lines:?}");
}

#[test]
fn off_board_landing_is_debug() {
    let lines = capture(|| {
        Move::from_square(Geometry::STANDARD, Square(0), Direction::DOWN_LEFT);
    });
    assert!(find(&lines, "DEBUG", "move lands off the board").is_some(), "{lines:?}");
    assert!(find(&lines, "WARN", "").is_none(), "{lines:?}");
}

// =====================================================================
// Pieces
// =====================================================================

#[test]
fn demotion_warns() {
    let lines = capture(|| {
        let mut king = Piece::king(7, Color::White);
        assert!(king.set_rank(Rank::Man).is_err());
    });
    let line = find(&lines, "WARN", "refused to demote king to man").expect("no demotion warning");
    assert!(line.contains("id=7"), "{line}");
}

#[test]
fn unknown_piece_names_warn() {
    let lines = capture(|| {
        assert!(Piece::from_names(1, "rook", "white").is_err());
        assert!(Piece::from_names(2, "man", "green").is_err());
    });
    assert!(find(&lines, "WARN", "unknown rank").is_some(), "{lines:?}");
    assert!(find(&lines, "WARN", "unknown color").is_some(), "{lines:?}");
}
