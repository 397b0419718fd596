//! Airport model.

use serde::{Deserialize, Serialize};

use super::Position;

/// Airport identifier (dense, `0..airport_count`).
pub type AirportId = usize;

/// A fixed departure/arrival location on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// Unique airport identifier.
    pub id: AirportId,
    /// Grid cell occupied by the airport.
    pub position: Position,
}

impl Airport {
    /// Creates an airport.
    pub fn new(id: AirportId, position: Position) -> Self {
        Self { id, position }
    }
}
