//! World initialization: boundaries, landmarks, resources, citizens, jobs
//!
//! Everything is seeded from the world's own RNG, so two worlds built from
//! the same config start identical.

use rand::Rng;

use crate::core::error::{CivitasError, Result};
use crate::core::types::Position;
use crate::entity::citizen::Category;
use crate::entity::job::Job;
use crate::entity::landmark::LandmarkKind;
use crate::world::{World, WorldEvent};

/// Landmark kinds scattered at startup (one town hall is placed separately)
const STARTER_LANDMARKS: &[LandmarkKind] = &[
    LandmarkKind::Home,
    LandmarkKind::Market,
    LandmarkKind::Park,
    LandmarkKind::Farm,
    LandmarkKind::Storage,
    LandmarkKind::Meeting,
];

impl World {
    /// Populate the world from its configuration
    ///
    /// Must be called exactly once before the first `tick()`.
    pub fn initialize(&mut self) -> Result<()> {
        if self.is_initialized() {
            return Err(CivitasError::AlreadyInitialized);
        }
        if self.grid.width < 5 || self.grid.height < 5 {
            return Err(CivitasError::InvalidGrid(format!(
                "{}x{} is too small",
                self.grid.width, self.grid.height
            )));
        }

        self.place_boundaries();
        self.place_initial_landmarks();
        self.place_initial_resources();
        self.spawn_initial_citizens();
        self.assign_starter_jobs();
        self.mark_initialized();

        tracing::info!(
            citizens = self.citizens.len(),
            landmarks = self.landmarks.len(),
            resources = self.resources.len(),
            "world initialized"
        );
        Ok(())
    }

    fn place_boundaries(&mut self) {
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let pos = Position::new(x, y);
                if self.grid.is_edge(pos) {
                    self.add_landmark(LandmarkKind::Boundary, pos);
                }
            }
        }
    }

    fn place_initial_landmarks(&mut self) {
        // One town hall near the center so a government can eventually form
        let center = Position::new(self.grid.width / 2, self.grid.height / 2);
        let hall_pos = if self.landmark_at(center).is_none() {
            Some(center)
        } else {
            self.free_neighbor_cell(center)
        };
        if let Some(pos) = hall_pos {
            self.add_landmark(LandmarkKind::TownHall, pos);
        }

        for _ in 0..self.config.initial_landmarks {
            let kind = STARTER_LANDMARKS[self.rng.gen_range(0..STARTER_LANDMARKS.len())];
            if let Some(pos) = self.random_empty_cell() {
                self.add_landmark(kind, pos);
            }
        }
    }

    fn place_initial_resources(&mut self) {
        for _ in 0..self.config.initial_resources {
            // Respect the per-letter cap with a bounded number of re-picks
            let mut kind = None;
            for _ in 0..10 {
                let candidate = self.config.resource_alphabet
                    [self.rng.gen_range(0..self.config.resource_alphabet.len())];
                let live = self
                    .resources
                    .iter()
                    .filter(|r| r.kind == candidate)
                    .count();
                if live < self.config.resource_cap_per_kind {
                    kind = Some(candidate);
                    break;
                }
            }
            let Some(kind) = kind else { continue };
            if let Some(pos) = self.random_empty_cell() {
                self.add_resource(kind, pos);
            }
        }
    }

    fn spawn_initial_citizens(&mut self) {
        for _ in 0..self.config.initial_citizens {
            let roll: f64 = self.rng.gen();
            let category = if roll < 0.7 {
                Category::People
            } else if roll < 0.9 {
                Category::Animal
            } else {
                Category::Food
            };
            let pool = match category {
                Category::People => &self.config.people_glyphs,
                Category::Animal => &self.config.animal_glyphs,
                Category::Food => &self.config.food_glyphs,
            };
            let glyph = pool[self.rng.gen_range(0..pool.len())];
            let Some(pos) = self.random_empty_cell() else {
                continue;
            };
            self.spawn_citizen(glyph, category, pos);
        }
    }

    /// Hand out starter jobs against job-capable landmarks
    fn assign_starter_jobs(&mut self) {
        let mut assigned = 0;
        while assigned < self.config.starter_jobs && !self.open_jobs.is_empty() {
            let (workplace, kind) = self.open_jobs.remove(0);
            let Some(idx) = self
                .citizens
                .iter()
                .position(|c| c.job.is_none() && c.category == Category::People)
            else {
                self.open_jobs.insert(0, (workplace, kind));
                break;
            };
            self.citizens[idx].job = Some(Job::new(kind, workplace));
            let citizen = self.citizens[idx].id;
            self.push_event(WorldEvent::JobAssigned {
                citizen,
                kind,
                workplace,
            });
            assigned += 1;
        }
    }
}
