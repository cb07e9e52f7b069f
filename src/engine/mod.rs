pub mod board;
pub mod capture;
pub mod coords;
pub mod movegen;
pub mod moves;
pub mod rules;
pub mod types;

pub use board::BoardState;
pub use capture::{Capture, CaptureSequence, capture_menu, capture_sequences, longest};
pub use coords::Geometry;
pub use movegen::{LegalActions, action_space, legal_actions, legal_actions_from};
pub use moves::Move;
pub use types::*;
