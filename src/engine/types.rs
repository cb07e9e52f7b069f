use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides. White starts on rank 0 and moves up the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Rank delta of a forward step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Parse from string (case-insensitive). Accepts the light/dark aliases.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "white" | "light" => Some(Color::White),
            "black" | "dark" => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// Piece rank. A man is only ever promoted to king, never the reverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}

impl Rank {
    /// Parse from string (case-insensitive). Accepts "pawn" and "queen".
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "man" | "pawn" => Some(Rank::Man),
            "king" | "queen" => Some(Rank::King),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Man => write!(f, "man"),
            Rank::King => write!(f, "king"),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece on the board: fixed id and color, promotable rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: u16,
    color: Color,
    rank: Rank,
}

impl Piece {
    pub const fn new(id: u16, color: Color, rank: Rank) -> Self {
        Piece { id, color, rank }
    }

    pub const fn man(id: u16, color: Color) -> Self {
        Self::new(id, color, Rank::Man)
    }

    pub const fn king(id: u16, color: Color) -> Self {
        Self::new(id, color, Rank::King)
    }

    /// Build a piece from external names, e.g. `("pawn", "white")`.
    pub fn from_names(id: u16, rank: &str, color: &str) -> Result<Self, DamaError> {
        let rank = Rank::from_str_loose(rank).ok_or_else(|| {
            warn!(id, rank, "piece construction refused: unknown rank");
            DamaError::InvalidRank(rank.to_string())
        })?;
        let color = Color::from_str_loose(color).ok_or_else(|| {
            warn!(id, color, "piece construction refused: unknown color");
            DamaError::InvalidColor(color.to_string())
        })?;
        Ok(Self::new(id, color, rank))
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// Change the rank. Demotion is refused and leaves the piece unchanged.
    pub fn set_rank(&mut self, rank: Rank) -> Result<(), DamaError> {
        if self.rank == Rank::King && rank == Rank::Man {
            warn!(id = self.id, "refused to demote king to man");
            return Err(DamaError::Demotion { id: self.id });
        }
        self.rank = rank;
        Ok(())
    }

    /// Copy of this piece with king rank.
    #[inline]
    pub fn promoted(self) -> Self {
        Self {
            rank: Rank::King,
            ..self
        }
    }

    /// Board glyph: lowercase for white, uppercase for black.
    pub fn to_char(self) -> char {
        let c = match self.rank {
            Rank::Man => 'm',
            Rank::King => 'k',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_uppercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} #{}", self.color, self.rank, self.id)
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// Dense index of a playable square, `0..=max_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square(pub u16);

impl Square {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Coord & Direction
// ---------------------------------------------------------------------------

/// A (file, rank) pair. Signed so that off-board steps stay representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub file: i16,
    pub rank: i16,
}

impl Coord {
    #[inline]
    pub const fn new(file: i16, rank: i16) -> Self {
        Coord { file, rank }
    }

    /// The coordinate `steps` steps away along `dir`.
    #[inline]
    pub fn offset(self, dir: Direction, steps: i16) -> Coord {
        Coord::new(
            self.file + dir.file as i16 * steps,
            self.rank + dir.rank as i16 * steps,
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

/// A (file, rank) step. Only the four diagonal unit steps are legal; other
/// values can be held so that move construction can reject them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub file: i8,
    pub rank: i8,
}

impl Direction {
    pub const UP_RIGHT: Direction = Direction::new(1, 1);
    pub const DOWN_RIGHT: Direction = Direction::new(1, -1);
    pub const DOWN_LEFT: Direction = Direction::new(-1, -1);
    pub const UP_LEFT: Direction = Direction::new(-1, 1);

    /// The four diagonals, in action-space order.
    pub const ALL: [Direction; 4] = [
        Direction::UP_RIGHT,
        Direction::DOWN_RIGHT,
        Direction::DOWN_LEFT,
        Direction::UP_LEFT,
    ];

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Direction { file, rank }
    }

    #[inline]
    pub fn is_diagonal_unit(self) -> bool {
        self.file.abs() == 1 && self.rank.abs() == 1
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.file, self.rank)
    }
}

// ---------------------------------------------------------------------------
// DamaError
// ---------------------------------------------------------------------------

/// Domain errors for the draughts engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DamaError {
    #[error("invalid piece rank: {0}")]
    InvalidRank(String),

    #[error("invalid piece color: {0}")]
    InvalidColor(String),

    #[error("piece {id}: a king cannot be demoted to man")]
    Demotion { id: u16 },

    #[error("invalid board size: {0}")]
    InvalidBoardSize(u8),

    #[error("invalid board setting: {0}")]
    InvalidSetting(String),

    #[error("square {0} is not part of the board")]
    MissingSquare(Square),

    #[error("invalid move: {0}")]
    InvalidMove(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
