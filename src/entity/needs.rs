//! Universal needs that drive citizen behavior

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;

/// Per-citizen needs, each in [0, 100]
///
/// High is satisfied, low is desperate: hunger below 30 sends a citizen
/// after food, energy below 20 sends it to shelter, social below 30 makes
/// it seek company. The stamina field that gates breeding and building
/// lives on the citizen itself, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Needs {
    /// 100 = fed, 0 = starving
    pub hunger: f32,
    /// 100 = rested, 0 = exhausted (drives shelter-seeking)
    pub energy: f32,
    /// 100 = socially satisfied, 0 = isolated
    pub social: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            hunger: 100.0,
            energy: 100.0,
            social: 100.0,
        }
    }
}

impl Needs {
    /// Decay needs over one tick
    pub fn decay(&mut self, config: &WorldConfig) {
        self.hunger = (self.hunger - config.hunger_decay).max(0.0);
        self.energy = (self.energy - config.rest_decay).max(0.0);
        self.social = (self.social - config.social_decay).max(0.0);
    }

    /// Restore hunger, clamped to 100
    pub fn feed(&mut self, amount: f32) {
        self.hunger = (self.hunger + amount).min(100.0);
    }

    /// Restore energy, clamped to 100
    pub fn rest(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(100.0);
    }

    /// Restore social, clamped to 100
    pub fn socialize(&mut self, amount: f32) {
        self.social = (self.social + amount).min(100.0);
    }

    /// True while either survival need forces its way past routine logic
    pub fn is_critical(&self) -> bool {
        self.hunger < 20.0 || self.energy < 20.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_floors_at_zero() {
        let mut needs = Needs {
            hunger: 0.1,
            energy: 0.05,
            social: 0.0,
        };
        let config = WorldConfig::default();
        for _ in 0..10 {
            needs.decay(&config);
        }
        assert!(needs.hunger >= 0.0);
        assert!(needs.energy >= 0.0);
        assert!(needs.social >= 0.0);
    }

    #[test]
    fn test_feed_clamps_at_hundred() {
        let mut needs = Needs::default();
        needs.feed(50.0);
        assert!((needs.hunger - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_critical_thresholds() {
        let mut needs = Needs::default();
        assert!(!needs.is_critical());
        needs.energy = 19.0;
        assert!(needs.is_critical());
        needs.energy = 50.0;
        needs.hunger = 19.0;
        assert!(needs.is_critical());
    }
}
