//! Citizens: the autonomous agents of the simulation
//!
//! A citizen is a bundle of needs, a movement target, and a state machine.
//! The per-tick decision ladder lives in `systems::behavior`; this module
//! holds the data and the small behavioral methods that operate on one
//! citizen in isolation (movement stepping, inventory, clamped scores).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::types::{CitizenId, GovernmentId, Position, Tick};
use crate::entity::government::GovernmentRole;
use crate::entity::job::Job;
use crate::entity::landmark::LandmarkKind;
use crate::entity::needs::Needs;
use crate::spatial::Grid;

/// Maximum inventory slots per citizen
pub const INVENTORY_CAPACITY: usize = 10;

/// Citizen category (decides glyph pool and little else)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    People,
    Animal,
    Food,
}

/// What a citizen is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CitizenState {
    Wandering,
    SeekingResource,
    SeekingShelter,
    Resting,
    Socializing,
    /// Walking the map collecting recipe letters
    GatheringMaterials,
    /// Immobile on-site construction
    Building,
    SeekingMate,
    Working,
    Commuting,
    Fleeing,
    Detained,
    Sleeping,
}

/// An in-progress construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingProject {
    pub kind: LandmarkKind,
    /// Ticks spent in the building state so far
    pub progress: u32,
    /// Whether the recipe has been consumed and on-site work started
    pub started: bool,
}

impl BuildingProject {
    pub fn new(kind: LandmarkKind) -> Self {
        Self {
            kind,
            progress: 0,
            started: false,
        }
    }
}

/// One autonomous agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citizen {
    pub id: CitizenId,
    pub glyph: char,
    pub category: Category,
    pub position: Position,
    pub state: CitizenState,
    pub needs: Needs,
    /// Stamina, 0-100: gates breeding and building, distinct from
    /// `needs.energy`; its decay is halved while standing on a road
    pub energy: f32,
    /// Collected resource letters, oldest first
    pub inventory: Vec<char>,
    /// Where the citizen is currently headed
    pub target: Option<Position>,
    /// Ticks the move counter must accumulate before a step fires
    pub move_speed: f32,
    move_counter: f32,
    pub vision_range: f32,
    /// Current construction, if any
    pub building: Option<BuildingProject>,
    /// Ticks alive
    pub age: Tick,
    pub last_breed_tick: Tick,
    pub breeding_partner: Option<CitizenId>,
    pub offspring: u32,
    pub government: Option<GovernmentId>,
    pub role: GovernmentRole,
    /// Inventory items handed over in taxes, lifetime total
    pub taxes_paid: u32,
    /// 0-100
    pub satisfaction: f32,
    /// 0-100
    pub loyalty: f32,
    pub last_tax_tick: Tick,
    /// 0-1000; criminal below 200, model citizen above 800
    pub social_credit: f32,
    pub is_criminal: bool,
    pub detained: bool,
    pub detention_end_tick: Tick,
    pub job: Option<Job>,
}

impl Citizen {
    pub fn new(
        id: CitizenId,
        glyph: char,
        category: Category,
        position: Position,
        config: &WorldConfig,
    ) -> Self {
        Self {
            id,
            glyph,
            category,
            position,
            state: CitizenState::Wandering,
            needs: Needs::default(),
            energy: 100.0,
            inventory: Vec::new(),
            target: None,
            move_speed: config.move_speed,
            move_counter: 0.0,
            vision_range: config.vision_range,
            building: None,
            age: 0,
            last_breed_tick: 0,
            breeding_partner: None,
            offspring: 0,
            government: None,
            role: GovernmentRole::Independent,
            taxes_paid: 0,
            satisfaction: 70.0,
            loyalty: 50.0,
            last_tax_tick: 0,
            social_credit: 500.0,
            is_criminal: false,
            detained: false,
            detention_end_tick: 0,
            job: None,
        }
    }

    // === needs & scores ===

    /// Age one tick and decay needs and stamina
    pub fn decay(&mut self, config: &WorldConfig, on_road: bool) {
        self.age += 1;
        self.needs.decay(config);
        let stamina_drain = if on_road {
            config.stamina_decay * 0.5
        } else {
            config.stamina_decay
        };
        self.energy = (self.energy - stamina_drain).max(0.0);
    }

    pub fn restore_stamina(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(100.0);
    }

    pub fn adjust_satisfaction(&mut self, delta: f32) {
        self.satisfaction = (self.satisfaction + delta).clamp(0.0, 100.0);
    }

    pub fn adjust_loyalty(&mut self, delta: f32) {
        self.loyalty = (self.loyalty + delta).clamp(0.0, 100.0);
    }

    pub fn adjust_credit(&mut self, delta: f32) {
        self.social_credit = (self.social_credit + delta).clamp(0.0, 1000.0);
    }

    /// Below 200 credit a citizen counts as criminal for gating purposes
    pub fn has_criminal_credit(&self) -> bool {
        self.social_credit < 200.0
    }

    /// Above 800 credit a citizen counts as a model citizen
    pub fn is_model_citizen(&self) -> bool {
        self.social_credit > 800.0
    }

    // === inventory ===

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= INVENTORY_CAPACITY
    }

    /// Append a resource letter; false when the inventory is full
    pub fn push_item(&mut self, kind: char) -> bool {
        if self.inventory_full() {
            return false;
        }
        self.inventory.push(kind);
        true
    }

    /// Recipe letters not yet covered by the inventory (multiset diff)
    pub fn missing_materials(&self, kind: LandmarkKind) -> Vec<char> {
        let mut pool = self.inventory.clone();
        let mut missing = Vec::new();
        for &letter in kind.recipe() {
            if let Some(i) = pool.iter().position(|&c| c == letter) {
                pool.swap_remove(i);
            } else {
                missing.push(letter);
            }
        }
        missing
    }

    pub fn has_materials(&self, kind: LandmarkKind) -> bool {
        self.missing_materials(kind).is_empty()
    }

    /// Remove the recipe from the inventory, oldest copies first
    ///
    /// Callers must check `has_materials` first; letters not present are
    /// silently skipped.
    pub fn consume_recipe(&mut self, kind: LandmarkKind) {
        for &letter in kind.recipe() {
            if let Some(i) = self.inventory.iter().position(|&c| c == letter) {
                self.inventory.remove(i);
            }
        }
    }

    // === breeding ===

    /// The per-citizen gates on seeking a mate (population gate is the
    /// world's to check)
    pub fn mate_ready(&self, tick: Tick) -> bool {
        self.age >= 100
            && self.energy >= 60.0
            && tick.saturating_sub(self.last_breed_tick) >= 200
            && !self.detained
    }

    // === movement ===

    /// Advance toward the target by at most one grid step
    ///
    /// The move counter accumulates 1.0 per call; a step fires when it
    /// reaches the effective speed (halved on roads, floor 0.5). Diagonal
    /// steps are taken with 50% probability when both axes differ, else the
    /// larger-magnitude axis is stepped. Steps into invalid or blocked cells
    /// are dropped. Returns true when standing on the target afterward.
    pub fn advance_movement<R: Rng, F: Fn(Position) -> bool>(
        &mut self,
        rng: &mut R,
        grid: &Grid,
        on_road: bool,
        blocked: F,
    ) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        if self.position == target {
            return true;
        }

        let threshold = if on_road {
            (self.move_speed / 2.0).max(0.5)
        } else {
            self.move_speed
        };
        self.move_counter += 1.0;
        if self.move_counter < threshold {
            return false;
        }
        self.move_counter -= threshold;

        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let step = if dx != 0 && dy != 0 {
            if rng.gen_bool(0.5) {
                (dx.signum(), dy.signum())
            } else if dx.abs() >= dy.abs() {
                (dx.signum(), 0)
            } else {
                (0, dy.signum())
            }
        } else if dx != 0 {
            (dx.signum(), 0)
        } else {
            (0, dy.signum())
        };

        let next = Position::new(self.position.x + step.0, self.position.y + step.1);
        if grid.is_valid(next) && !blocked(next) {
            self.position = next;
        }
        self.position == target
    }

    /// Drop the current destination and reset the step accumulator
    pub fn clear_target(&mut self) {
        self.target = None;
        self.move_counter = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn citizen_at(x: i32, y: i32) -> Citizen {
        Citizen::new(
            CitizenId(0),
            '@',
            Category::People,
            Position::new(x, y),
            &WorldConfig::default(),
        )
    }

    #[test]
    fn test_inventory_capacity() {
        let mut c = citizen_at(0, 0);
        for _ in 0..INVENTORY_CAPACITY {
            assert!(c.push_item('w'));
        }
        assert!(!c.push_item('w'));
        assert_eq!(c.inventory.len(), INVENTORY_CAPACITY);
    }

    #[test]
    fn test_missing_materials_multiset() {
        let mut c = citizen_at(0, 0);
        c.inventory = vec!['w', 's'];
        // Home needs w, w, s
        assert_eq!(c.missing_materials(LandmarkKind::Home), vec!['w']);
        c.inventory = vec!['w', 'w', 's'];
        assert!(c.has_materials(LandmarkKind::Home));
    }

    #[test]
    fn test_consume_recipe_removes_oldest_first() {
        let mut c = citizen_at(0, 0);
        c.inventory = vec!['w', 'g', 'w', 's', 'w'];
        c.consume_recipe(LandmarkKind::Home);
        assert_eq!(c.inventory, vec!['g', 'w']);
    }

    #[test]
    fn test_movement_steps_toward_target() {
        let grid = Grid::new(20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut c = citizen_at(0, 0);
        c.target = Some(Position::new(5, 5));
        let mut guard = 0;
        loop {
            let arrived = c.advance_movement(&mut rng, &grid, false, |_| false);
            if arrived {
                break;
            }
            guard += 1;
            assert!(guard < 200, "never arrived");
        }
        assert_eq!(c.position, Position::new(5, 5));
    }

    #[test]
    fn test_movement_respects_blocked_cells() {
        let grid = Grid::new(20, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut c = citizen_at(0, 0);
        c.target = Some(Position::new(3, 0));
        for _ in 0..50 {
            c.advance_movement(&mut rng, &grid, false, |_| true);
        }
        assert_eq!(c.position, Position::new(0, 0));
    }

    #[test]
    fn test_road_halves_step_interval() {
        let grid = Grid::new(30, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut on_road = citizen_at(0, 0);
        let mut off_road = citizen_at(0, 0);
        on_road.target = Some(Position::new(10, 0));
        off_road.target = Some(Position::new(10, 0));
        for _ in 0..6 {
            on_road.advance_movement(&mut rng, &grid, true, |_| false);
            off_road.advance_movement(&mut rng, &grid, false, |_| false);
        }
        assert!(on_road.position.x > off_road.position.x);
    }

    #[test]
    fn test_mate_gates() {
        let mut c = citizen_at(0, 0);
        assert!(!c.mate_ready(500), "too young");
        c.age = 150;
        assert!(c.mate_ready(500));
        c.energy = 50.0;
        assert!(!c.mate_ready(500), "too tired");
        c.energy = 80.0;
        c.last_breed_tick = 400;
        assert!(!c.mate_ready(500), "cooldown");
    }

    #[test]
    fn test_credit_clamps() {
        let mut c = citizen_at(0, 0);
        c.adjust_credit(10_000.0);
        assert!((c.social_credit - 1000.0).abs() < f32::EPSILON);
        c.adjust_credit(-10_000.0);
        assert!(c.social_credit.abs() < f32::EPSILON);
    }
}
