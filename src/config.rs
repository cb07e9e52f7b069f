use crate::engine::coords::{Geometry, STANDARD_SIZE};
use crate::engine::types::DamaError;

/// Engine configuration parsed from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Board breadth N of an N×N board.
    pub board_size: u8,
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        EngineConfig {
            board_size: std::env::var("DAMA_BOARD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(STANDARD_SIZE),
        }
    }

    /// Validated board geometry.
    pub fn geometry(&self) -> Result<Geometry, DamaError> {
        Geometry::new(self.board_size)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            board_size: STANDARD_SIZE,
        }
    }
}
