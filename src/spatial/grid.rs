//! Grid bounds primitives
//!
//! The grid owns no entities; it only answers validity, clamping, and edge
//! questions. Nearest-entity queries scan the world's arenas linearly,
//! which is fine at the documented population cap. A spatial index could
//! replace those scans behind the same interface without touching callers.

use serde::{Deserialize, Serialize};

use crate::core::types::Position;

/// Immutable world bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A position is valid iff it lies inside the bounds
    #[inline]
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Clamp a position into bounds
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.max(0).min(self.width - 1),
            pos.y.max(0).min(self.height - 1),
        )
    }

    /// True for cells on the outer edge (where boundary walls live)
    pub fn is_edge(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }
}
