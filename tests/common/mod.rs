//! Shared helpers for the integration tests.
#![allow(dead_code)]

use rust_dama::engine::{BoardState, Color, Coord, Geometry, Piece, Square};

/// Install a test-writer subscriber once per test binary. `RUST_LOG`
/// overrides the default filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_dama=warn".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn geometry(size: u8) -> Geometry {
    Geometry::new(size).unwrap()
}

/// Index of (file, rank) on `g`.
pub fn sq(g: Geometry, file: i16, rank: i16) -> Square {
    g.to_index(Coord::new(file, rank))
}

/// Board from (file, rank) placements. Ids follow slice order.
pub fn board(g: Geometry, placements: &[((i16, i16), Color, bool)]) -> BoardState {
    let pieces = placements
        .iter()
        .enumerate()
        .map(|(id, &((file, rank), color, king))| {
            let piece = if king {
                Piece::king(id as u16, color)
            } else {
                Piece::man(id as u16, color)
            };
            (sq(g, file, rank), piece)
        });
    BoardState::from_placements(g, pieces).unwrap()
}

pub const WHITE_MAN: (Color, bool) = (Color::White, false);
pub const WHITE_KING: (Color, bool) = (Color::White, true);
pub const BLACK_MAN: (Color, bool) = (Color::Black, false);
pub const BLACK_KING: (Color, bool) = (Color::Black, true);

/// Shorthand for a placement entry.
pub fn at(file: i16, rank: i16, kind: (Color, bool)) -> ((i16, i16), Color, bool) {
    ((file, rank), kind.0, kind.1)
}
