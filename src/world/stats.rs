//! Aggregate world statistics

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Snapshot of the world's headline numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldStats {
    pub tick: Tick,
    pub population: usize,
    pub resources_available: usize,
    pub resources_collected: usize,
    pub buildings_built: u64,
    pub births: u64,
    pub governments: usize,
    pub detained: usize,
    /// Births per tick since the world started
    pub growth_rate: f64,
}
