//! Simulation configuration with documented constants
//!
//! All tuning numbers are collected here with explanations of their purpose.
//! The session layer constructs one of these and hands it to the world; the
//! core never loads configuration itself.

/// Configuration consumed by the world at construction
///
/// These values have been tuned to produce good emergent behavior.
/// Changing them will affect pacing and feel.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    // === GRID ===
    /// World width in cells
    pub width: i32,
    /// World height in cells
    pub height: i32,

    /// Seed for the world's random number generator
    ///
    /// All randomness flows through one ChaCha8 stream, so two worlds built
    /// from the same config replay identically.
    pub seed: u64,

    // === CITIZENS ===
    /// Citizens spawned at initialization
    pub initial_citizens: usize,

    /// Hard population cap; breeding stops at this count
    pub max_population: usize,

    /// Glyph pool for the people category
    pub people_glyphs: Vec<char>,
    /// Glyph pool for the animal category
    pub animal_glyphs: Vec<char>,
    /// Glyph pool for the food category
    pub food_glyphs: Vec<char>,

    /// Ticks the movement counter must accumulate before a citizen steps
    ///
    /// Halved (floor 0.5) while standing on a road, so road networks
    /// genuinely speed traffic up.
    pub move_speed: f32,

    /// How far citizens can see other entities (cells)
    pub vision_range: f32,

    // === NEED DECAY (per tick) ===
    /// Hunger drain; at 0.2 a fed citizen goes hungry (< 30) in ~350 ticks
    pub hunger_decay: f32,
    /// Rest drain on `needs.energy`; drives shelter-seeking below 20
    pub rest_decay: f32,
    /// Social drain; builds gradual pressure to seek company
    pub social_decay: f32,
    /// Stamina drain on the separate `energy` field that gates
    /// breeding and building; halved while on a road
    pub stamina_decay: f32,

    // === LANDMARKS ===
    /// Non-boundary landmarks placed at initialization
    pub initial_landmarks: usize,

    /// Citizens stop choosing new constructions once this many homes exist
    pub max_homes: usize,

    // === RESOURCES ===
    /// The letters resources can spawn as
    pub resource_alphabet: Vec<char>,
    /// Resources scattered at initialization
    pub initial_resources: usize,
    /// Chance per tick that one collected resource relocates and respawns
    pub resource_respawn_chance: f64,
    /// Maximum live resources per letter
    pub resource_cap_per_kind: usize,

    // === CRIME & POLICING ===
    /// Ticks between crime evaluation sweeps
    pub crime_check_interval: u64,
    /// Ticks between patrol waypoint re-rolls
    pub patrol_change_interval: u64,
    /// Radius of the patrol octagon around a station (cells)
    pub patrol_radius: i32,
    /// How far officers notice crimes and fleeing criminals (cells)
    pub detection_range: f32,
    /// Contact distance that converts a pursuit into an arrest (cells)
    pub arrest_range: f32,

    // === DAILY ROUTINE ===
    /// Ticks per simulated hour; 24 * this = one simulated day
    pub ticks_per_hour: u64,

    // === JOBS ===
    /// Starter jobs assigned at initialization (capped by available
    /// workplaces and unemployed citizens)
    pub starter_jobs: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 30,
            seed: 12345,
            initial_citizens: 20,
            max_population: 100,
            people_glyphs: vec!['@', '&', '%', '?'],
            animal_glyphs: vec!['d', 'c', 'b', 'r'],
            food_glyphs: vec!['*', '+'],
            move_speed: 2.0,
            vision_range: 8.0,
            hunger_decay: 0.2,
            rest_decay: 0.15,
            social_decay: 0.25,
            stamina_decay: 0.1,
            initial_landmarks: 10,
            max_homes: 15,
            resource_alphabet: ('a'..='z').chain('A'..='Z').collect(),
            initial_resources: 60,
            resource_respawn_chance: 0.02,
            resource_cap_per_kind: 10,
            crime_check_interval: 25,
            patrol_change_interval: 50,
            patrol_radius: 4,
            detection_range: 6.0,
            arrest_range: 1.5,
            ticks_per_hour: 10,
            starter_jobs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet_is_52_letters() {
        let config = WorldConfig::default();
        assert_eq!(config.resource_alphabet.len(), 52);
    }

    #[test]
    fn test_default_grid_is_positive() {
        let config = WorldConfig::default();
        assert!(config.width > 0 && config.height > 0);
    }
}
