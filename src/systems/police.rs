//! Police patrol, pursuit, arrest, detention, and credit drift
//!
//! Officers are ordinary citizens whose job is policing. Off pursuit they
//! walk an octagonal waypoint loop around their nearest station; a detected
//! crime or fleeing criminal inside detection range flips them into pursuit
//! until contact converts it into an arrest.

use ahash::AHashMap;
use rand::Rng;

use crate::core::error::Result;
use crate::core::types::{CitizenId, Position, Tick};
use crate::entity::citizen::CitizenState;
use crate::entity::job::JobKind;
use crate::entity::landmark::LandmarkKind;
use crate::world::{World, WorldEvent};

/// How far a fleeing criminal projects its escape target (cells)
const FLEE_DISTANCE: i32 = 6;
/// Proximity at which a patrol waypoint counts as reached (cells)
const WAYPOINT_REACH: f32 = 1.5;
/// Extra social-credit penalty applied on arrest
const ARREST_CREDIT_PENALTY: f32 = 50.0;

/// Per-officer patrol state, keyed by stable citizen id
///
/// This is the only cross-tick subsystem state; it holds ids, never
/// references into the arenas.
#[derive(Debug, Clone, Default)]
pub struct PoliceLedger {
    pub patrols: AHashMap<CitizenId, Patrol>,
}

/// One officer's patrol loop
#[derive(Debug, Clone)]
pub struct Patrol {
    pub waypoints: Vec<Position>,
    pub current: usize,
    pub last_change: Tick,
    pub pursuing: Option<CitizenId>,
}

pub fn police_sweep(world: &mut World) -> Result<()> {
    let officers: Vec<(usize, CitizenId, Position)> = world
        .citizens
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            !c.detained && c.job.as_ref().map(|j| j.kind) == Some(JobKind::PoliceOfficer)
        })
        .map(|(i, c)| (i, c.id, c.position))
        .collect();

    detect_crimes(world, &officers);

    for &(officer_idx, officer_id, officer_pos) in &officers {
        if let Some(criminal_idx) = find_pursuit_target(world, officer_id, officer_pos) {
            pursue(world, officer_idx, officer_id, criminal_idx)?;
        } else {
            if let Some(patrol) = world.police.patrols.get_mut(&officer_id) {
                patrol.pursuing = None;
            }
            patrol_step(world, officer_idx, officer_id)?;
        }
    }

    if world.tick_count % 100 == 0 {
        credit_drift(world);
    }
    Ok(())
}

/// Crimes become detected once any officer comes within detection range
fn detect_crimes(world: &mut World, officers: &[(usize, CitizenId, Position)]) {
    let range = world.config.detection_range;
    for crime in world.crimes.iter_mut().filter(|c| !c.resolved && !c.detected) {
        if officers
            .iter()
            .any(|&(_, _, pos)| pos.distance(&crime.location) <= range)
        {
            crime.detected = true;
        }
    }
}

/// Nearest criminal worth chasing within detection range, if any
fn find_pursuit_target(
    world: &World,
    officer_id: CitizenId,
    officer_pos: Position,
) -> Option<usize> {
    let range = world.config.detection_range;
    let mut best: Option<(usize, f32)> = None;
    for (idx, c) in world.citizens.iter().enumerate() {
        if c.id == officer_id || c.detained || !c.is_criminal {
            continue;
        }
        let chaseable = c.state == CitizenState::Fleeing
            || world
                .crimes
                .iter()
                .any(|cr| cr.perpetrator == c.id && cr.detected && !cr.resolved);
        if !chaseable {
            continue;
        }
        let d = officer_pos.distance(&c.position);
        if d > range {
            continue;
        }
        if best.map(|(_, bd)| d < bd).unwrap_or(true) {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Chase: the officer tracks the criminal, the criminal is pushed away
fn pursue(
    world: &mut World,
    officer_idx: usize,
    officer_id: CitizenId,
    criminal_idx: usize,
) -> Result<()> {
    let officer_pos = world.citizens[officer_idx].position;
    let criminal_pos = world.citizens[criminal_idx].position;
    let criminal_id = world.citizens[criminal_idx].id;

    if officer_pos.distance(&criminal_pos) <= world.config.arrest_range {
        return arrest(world, officer_idx, criminal_idx);
    }

    world.citizens[officer_idx].target = Some(criminal_pos);
    world.citizens[officer_idx].state = CitizenState::Working;

    let flee_target = world.grid.clamp(Position::new(
        criminal_pos.x + (criminal_pos.x - officer_pos.x).signum() * FLEE_DISTANCE,
        criminal_pos.y + (criminal_pos.y - officer_pos.y).signum() * FLEE_DISTANCE,
    ));
    world.citizens[criminal_idx].state = CitizenState::Fleeing;
    world.citizens[criminal_idx].target = Some(flee_target);

    let patrol = world
        .police
        .patrols
        .entry(officer_id)
        .or_insert_with(|| Patrol {
            waypoints: Vec::new(),
            current: 0,
            last_change: 0,
            pursuing: None,
        });
    patrol.pursuing = Some(criminal_id);
    Ok(())
}

/// Contact: detain with a credit-tiered sentence and resolve the case file
fn arrest(world: &mut World, officer_idx: usize, criminal_idx: usize) -> Result<()> {
    let tick = world.tick_count;
    let officer_id = world.citizens[officer_idx].id;
    let criminal_id = world.citizens[criminal_idx].id;

    let credit = world.citizens[criminal_idx].social_credit;
    let duration = if credit < 100.0 {
        200
    } else if credit < 200.0 {
        150
    } else {
        100
    };
    let release_tick = tick + duration;

    let criminal = &mut world.citizens[criminal_idx];
    criminal.detained = true;
    criminal.detention_end_tick = release_tick;
    criminal.state = CitizenState::Detained;
    criminal.is_criminal = false;
    criminal.breeding_partner = None;
    criminal.clear_target();
    criminal.adjust_credit(-ARREST_CREDIT_PENALTY);

    for crime in world
        .crimes
        .iter_mut()
        .filter(|c| c.perpetrator == criminal_id && !c.resolved)
    {
        crime.resolved = true;
    }

    world.citizens[officer_idx].clear_target();
    world.citizens[officer_idx].state = CitizenState::Working;
    if let Some(patrol) = world.police.patrols.get_mut(&officer_id) {
        patrol.pursuing = None;
    }

    world.push_event(WorldEvent::Arrest {
        officer: officer_id,
        criminal: criminal_id,
        release_tick,
    });
    tracing::info!(officer = ?officer_id, criminal = ?criminal_id, release_tick, "arrest made");
    Ok(())
}

/// Walk the octagonal loop, re-rolling it on schedule
fn patrol_step(world: &mut World, officer_idx: usize, officer_id: CitizenId) -> Result<()> {
    let tick = world.tick_count;
    let interval = world.config.patrol_change_interval;
    let officer_pos = world.citizens[officer_idx].position;

    let needs_reroll = match world.police.patrols.get(&officer_id) {
        Some(p) => p.waypoints.is_empty() || tick.saturating_sub(p.last_change) >= interval,
        None => true,
    };
    if needs_reroll {
        let Some((_, station)) = world.nearest_landmark(officer_pos, |l| {
            l.kind == LandmarkKind::PoliceStation
        }) else {
            // No station anywhere; the officer falls back to plain routine
            return Ok(());
        };
        let waypoints = octagon_waypoints(world, station);
        let start = world.rng.gen_range(0..waypoints.len());
        world.police.patrols.insert(
            officer_id,
            Patrol {
                waypoints,
                current: start,
                last_change: tick,
                pursuing: None,
            },
        );
    }

    let Some(patrol) = world.police.patrols.get_mut(&officer_id) else {
        return Ok(());
    };
    let waypoint = patrol.waypoints[patrol.current];
    if officer_pos.distance(&waypoint) <= WAYPOINT_REACH {
        patrol.current = (patrol.current + 1) % patrol.waypoints.len();
    }
    let next = patrol.waypoints[patrol.current];
    world.citizens[officer_idx].state = CitizenState::Working;
    world.citizens[officer_idx].target = Some(next);
    Ok(())
}

/// Eight points around the station, clamped into bounds
fn octagon_waypoints(world: &World, station: Position) -> Vec<Position> {
    let r = world.config.patrol_radius;
    let d = ((r as f32) * 0.7).round() as i32;
    [
        (r, 0),
        (d, d),
        (0, r),
        (-d, d),
        (-r, 0),
        (-d, -d),
        (0, -r),
        (d, -d),
    ]
    .into_iter()
    .map(|(dx, dy)| world.grid.clamp(Position::new(station.x + dx, station.y + dy)))
    .collect()
}

/// Free everyone whose sentence is up
pub fn release_sweep(world: &mut World) {
    let tick = world.tick_count;
    for citizen in world.citizens.iter_mut() {
        if citizen.detained && tick >= citizen.detention_end_tick {
            citizen.detained = false;
            citizen.state = CitizenState::Wandering;
            citizen.clear_target();
            tracing::debug!(citizen = ?citizen.id, "released from detention");
        }
    }
}

/// Slow credit recovery: good behavior and rehabilitation both pay
fn credit_drift(world: &mut World) {
    for citizen in world.citizens.iter_mut() {
        if citizen.detained {
            citizen.adjust_credit(0.5);
        } else if !citizen.is_criminal && citizen.satisfaction > 50.0 {
            citizen.adjust_credit(1.0);
        }
        if citizen.is_model_citizen() {
            citizen.adjust_satisfaction(1.0);
        }
    }
}
