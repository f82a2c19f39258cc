//! Collectible lettered resources

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, ResourceId};

/// A single collectible resource on the grid
///
/// Collected resources stay in the arena (flagged) so the respawn pass can
/// relocate them later; nothing is ever removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub position: Position,
    /// One of the 52 ASCII letters
    pub kind: char,
    pub collected: bool,
}

impl Resource {
    pub fn new(id: ResourceId, position: Position, kind: char) -> Self {
        Self {
            id,
            position,
            kind,
            collected: false,
        }
    }

    /// Relocate and make collectible again
    pub fn respawn(&mut self, position: Position) {
        self.position = position;
        self.collected = false;
    }
}
