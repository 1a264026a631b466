//! Grid position type

use serde::{Deserialize, Serialize};

use crate::GRID_SIZE;

/// Active cell on the grid
///
/// Values are passed through exactly as the server sent them. Nothing here
/// clamps or rejects coordinates outside the grid; renderers check
/// [`Position::is_on_grid`] themselves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    /// Create position from coordinates
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Both coordinates lie in `[0, GRID_SIZE)`
    pub fn is_on_grid(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}
