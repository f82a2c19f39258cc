//! World orchestrator - owns every arena and runs the tick
//!
//! All entity collections live here; subsystems borrow them for the
//! duration of one sweep and hold nothing across ticks except stable ids.
//! `tick()` runs the sweeps in a fixed order and isolates failures: a bad
//! citizen is skipped, a bad subsystem is logged, and only structural
//! corruption aborts the tick.

pub mod events;
pub mod init;
pub mod stats;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::WorldConfig;
use crate::core::error::{CivitasError, Result};
use crate::core::types::{
    CitizenId, CrimeId, GovernmentId, LandmarkId, Position, ResourceId, Tick,
};
use crate::entity::citizen::{Category, Citizen};
use crate::entity::crime::{Crime, CrimeKind};
use crate::entity::government::Government;
use crate::entity::job::{Job, JobKind};
use crate::entity::landmark::{Landmark, LandmarkKind};
use crate::entity::resource::Resource;
use crate::spatial::Grid;
use crate::systems;
use crate::systems::police::PoliceLedger;

pub use events::{Event, EventQueue, WorldEvent};
pub use stats::WorldStats;

/// The simulation world
pub struct World {
    pub grid: Grid,
    pub config: WorldConfig,
    pub citizens: Vec<Citizen>,
    pub resources: Vec<Resource>,
    pub landmarks: Vec<Landmark>,
    pub governments: Vec<Government>,
    pub crimes: Vec<Crime>,
    pub tick_count: Tick,
    pub(crate) events: EventQueue,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) police: PoliceLedger,
    /// Workplaces with an unfilled position
    pub(crate) open_jobs: Vec<(LandmarkId, JobKind)>,
    pub(crate) births: u64,
    pub(crate) buildings_built: u64,
    next_citizen_id: u32,
    next_resource_id: u32,
    next_landmark_id: u32,
    next_government_id: u32,
    next_crime_id: u32,
    initialized: bool,
}

impl World {
    /// Build an empty world; call `initialize` before ticking
    pub fn new(config: WorldConfig) -> Self {
        let grid = Grid::new(config.width, config.height);
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            grid,
            config,
            citizens: Vec::new(),
            resources: Vec::new(),
            landmarks: Vec::new(),
            governments: Vec::new(),
            crimes: Vec::new(),
            tick_count: 0,
            events: EventQueue::new(),
            rng,
            police: PoliceLedger::default(),
            open_jobs: Vec::new(),
            births: 0,
            buildings_built: 0,
            next_citizen_id: 0,
            next_resource_id: 0,
            next_landmark_id: 0,
            next_government_id: 0,
            next_crime_id: 0,
            initialized: false,
        }
    }

    /// Advance the simulation one step
    ///
    /// Sweep order is load-bearing: citizen updates (with per-citizen
    /// isolation), government formation, government processing, routine,
    /// crime, police, detention release, resource respawn.
    pub fn tick(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(CivitasError::NotInitialized);
        }
        self.validate()?;
        self.tick_count += 1;

        // Per-citizen phase; newborns appended this tick wait for the next
        let citizen_count = self.citizens.len();
        for idx in 0..citizen_count {
            if let Err(e) = systems::behavior::update_citizen(self, idx) {
                tracing::warn!(citizen = idx, error = %e, "citizen update failed, skipping");
            }
        }

        if let Err(e) = systems::government::formation_sweep(self) {
            tracing::warn!(error = %e, "government formation sweep failed");
        }
        if let Err(e) = systems::government::processing_sweep(self) {
            tracing::warn!(error = %e, "government processing sweep failed");
        }
        if let Err(e) = systems::routine::routine_sweep(self) {
            tracing::warn!(error = %e, "routine sweep failed");
        }
        if let Err(e) = systems::crime::crime_sweep(self) {
            tracing::warn!(error = %e, "crime sweep failed");
        }
        if let Err(e) = systems::police::police_sweep(self) {
            tracing::warn!(error = %e, "police sweep failed");
        }
        systems::police::release_sweep(self);
        self.respawn_resources();

        Ok(())
    }

    /// Structural sanity check run at the top of every tick
    ///
    /// Failure here is fatal for the tick; the caller decides what to do.
    fn validate(&self) -> Result<()> {
        if self.grid.width <= 0 || self.grid.height <= 0 {
            return Err(CivitasError::InvalidGrid(format!(
                "{}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.citizens.len() > self.next_citizen_id as usize {
            return Err(CivitasError::Corrupted(
                "citizen arena larger than issued ids".into(),
            ));
        }
        for gov in &self.governments {
            if self.landmark_index(gov.town_hall).is_none() {
                return Err(CivitasError::Corrupted(format!(
                    "government {:?} references missing town hall {:?}",
                    gov.id, gov.town_hall
                )));
            }
        }
        Ok(())
    }

    // === queries ===

    pub fn width(&self) -> i32 {
        self.grid.width
    }

    pub fn height(&self) -> i32 {
        self.grid.height
    }

    /// Current hour on the wrapping 24-hour clock
    pub fn current_hour(&self) -> u8 {
        ((self.tick_count / self.config.ticks_per_hour) % 24) as u8
    }

    pub fn citizen_index(&self, id: CitizenId) -> Option<usize> {
        self.citizens.iter().position(|c| c.id == id)
    }

    pub fn landmark_index(&self, id: LandmarkId) -> Option<usize> {
        self.landmarks.iter().position(|l| l.id == id)
    }

    pub fn landmark_at(&self, pos: Position) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.position == pos)
    }

    /// A cell is blocked iff a non-walkable landmark sits on it
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.landmark_at(pos)
            .map(|l| !l.kind.is_walkable())
            .unwrap_or(false)
    }

    pub fn on_road(&self, pos: Position) -> bool {
        self.landmark_at(pos)
            .map(|l| l.kind.is_road())
            .unwrap_or(false)
    }

    /// Nearest landmark satisfying the predicate, first-found wins ties
    pub fn nearest_landmark<F: Fn(&Landmark) -> bool>(
        &self,
        from: Position,
        pred: F,
    ) -> Option<(LandmarkId, Position)> {
        let mut best: Option<(LandmarkId, Position, f32)> = None;
        for lm in self.landmarks.iter().filter(|l| pred(l)) {
            let d = from.distance(&lm.position);
            if best.map(|(_, _, bd)| d < bd).unwrap_or(true) {
                best = Some((lm.id, lm.position, d));
            }
        }
        best.map(|(id, pos, _)| (id, pos))
    }

    /// Nearest resource satisfying the predicate
    pub fn nearest_resource<F: Fn(&Resource) -> bool>(
        &self,
        from: Position,
        pred: F,
    ) -> Option<(ResourceId, Position)> {
        let mut best: Option<(ResourceId, Position, f32)> = None;
        for res in self.resources.iter().filter(|r| pred(r)) {
            let d = from.distance(&res.position);
            if best.map(|(_, _, bd)| d < bd).unwrap_or(true) {
                best = Some((res.id, res.position, d));
            }
        }
        best.map(|(id, pos, _)| (id, pos))
    }

    /// Nearest other citizen satisfying the predicate
    pub fn nearest_citizen<F: Fn(&Citizen) -> bool>(
        &self,
        from: Position,
        exclude: CitizenId,
        pred: F,
    ) -> Option<(CitizenId, Position)> {
        let mut best: Option<(CitizenId, Position, f32)> = None;
        for c in self.citizens.iter().filter(|c| c.id != exclude && pred(c)) {
            let d = from.distance(&c.position);
            if best.map(|(_, _, bd)| d < bd).unwrap_or(true) {
                best = Some((c.id, c.position, d));
            }
        }
        best.map(|(id, pos, _)| (id, pos))
    }

    pub fn home_count(&self) -> usize {
        self.landmarks
            .iter()
            .filter(|l| l.kind == LandmarkKind::Home)
            .count()
    }

    pub fn government_mut(&mut self, id: GovernmentId) -> Option<&mut Government> {
        self.governments.iter_mut().find(|g| g.id == id)
    }

    pub fn government(&self, id: GovernmentId) -> Option<&Government> {
        self.governments.iter().find(|g| g.id == id)
    }

    /// First free walkable 8-neighbor of a cell
    pub fn free_neighbor_cell(&self, pos: Position) -> Option<Position> {
        pos.neighbors8()
            .into_iter()
            .find(|&p| self.grid.is_valid(p) && !self.is_blocked(p))
    }

    /// Random landmark-free interior cell; None after bounded retries
    pub(crate) fn random_empty_cell(&mut self) -> Option<Position> {
        for _ in 0..200 {
            let x = self.rng.gen_range(1..self.grid.width - 1);
            let y = self.rng.gen_range(1..self.grid.height - 1);
            let pos = Position::new(x, y);
            if self.landmark_at(pos).is_none() {
                return Some(pos);
            }
        }
        None
    }

    // === spawning ===

    pub fn spawn_citizen(
        &mut self,
        glyph: char,
        category: Category,
        position: Position,
    ) -> CitizenId {
        let id = CitizenId(self.next_citizen_id);
        self.next_citizen_id += 1;
        let citizen = Citizen::new(id, glyph, category, position, &self.config);
        self.citizens.push(citizen);
        id
    }

    /// Place a landmark; job-capable kinds open one position
    pub fn add_landmark(&mut self, kind: LandmarkKind, position: Position) -> LandmarkId {
        let id = LandmarkId(self.next_landmark_id);
        self.next_landmark_id += 1;
        self.landmarks.push(Landmark::new(id, position, kind));
        if let Some(job_kind) = kind.job() {
            self.open_jobs.push((id, job_kind));
        }
        id
    }

    pub fn add_resource(&mut self, kind: char, position: Position) -> ResourceId {
        let id = ResourceId(self.next_resource_id);
        self.next_resource_id += 1;
        self.resources.push(Resource::new(id, position, kind));
        id
    }

    pub(crate) fn next_government_id(&mut self) -> GovernmentId {
        let id = GovernmentId(self.next_government_id);
        self.next_government_id += 1;
        id
    }

    pub(crate) fn record_crime(
        &mut self,
        kind: CrimeKind,
        perpetrator: CitizenId,
        location: Position,
    ) -> CrimeId {
        let id = CrimeId(self.next_crime_id);
        self.next_crime_id += 1;
        self.crimes
            .push(Crime::new(id, kind, perpetrator, location, self.tick_count));
        id
    }

    pub(crate) fn push_event(&mut self, event: WorldEvent) {
        self.events.push(event, self.tick_count);
    }

    // === maintenance ===

    /// Probabilistic respawn: relocate one random collected resource
    fn respawn_resources(&mut self) {
        if !self.rng.gen_bool(self.config.resource_respawn_chance) {
            return;
        }
        let collected: Vec<usize> = self
            .resources
            .iter()
            .enumerate()
            .filter(|(_, r)| r.collected)
            .map(|(i, _)| i)
            .collect();
        if collected.is_empty() {
            return;
        }
        let pick = collected[self.rng.gen_range(0..collected.len())];
        if let Some(pos) = self.random_empty_cell() {
            self.resources[pick].respawn(pos);
            tracing::debug!(kind = %self.resources[pick].kind, ?pos, "resource respawned");
        }
    }

    // === external interface ===

    /// Events accumulated since the last drain
    pub fn events(&self) -> &[Event] {
        self.events.pending()
    }

    /// Drain the event queue
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Employment roster: every citizen currently holding a job
    pub fn jobs(&self) -> impl Iterator<Item = (CitizenId, &Job)> {
        self.citizens
            .iter()
            .filter_map(|c| c.job.as_ref().map(|j| (c.id, j)))
    }

    /// Workplaces still waiting for a hire
    pub fn open_jobs(&self) -> &[(LandmarkId, JobKind)] {
        &self.open_jobs
    }

    /// Headline numbers for the session layer
    pub fn stats(&self) -> WorldStats {
        let resources_collected = self.resources.iter().filter(|r| r.collected).count();
        WorldStats {
            tick: self.tick_count,
            population: self.citizens.len(),
            resources_available: self.resources.len() - resources_collected,
            resources_collected,
            buildings_built: self.buildings_built,
            births: self.births,
            governments: self.governments.len(),
            detained: self.citizens.iter().filter(|c| c.detained).count(),
            growth_rate: if self.tick_count == 0 {
                0.0
            } else {
                self.births as f64 / self.tick_count as f64
            },
        }
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
