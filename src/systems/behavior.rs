//! Per-citizen update: the decision ladder, movement, building, breeding
//!
//! Each tick a citizen picks exactly one concern, in strict priority order:
//! shelter, food, an in-flight construction, a mate, a new construction,
//! company, wandering. The ladder is re-run from the top every tick, so a
//! builder who gets exhausted drops the trowel and goes home.

use rand::Rng;

use crate::core::error::{CivitasError, Result};
use crate::core::types::{CitizenId, Position};
use crate::entity::citizen::{BuildingProject, CitizenState};
use crate::entity::landmark::LandmarkKind;
use crate::world::{World, WorldEvent};

/// Full update for one citizen: decay, decision, movement, post-move effects
///
/// Errors are isolated by the caller; a failure here skips this citizen for
/// the rest of the tick and nothing else.
pub fn update_citizen(world: &mut World, idx: usize) -> Result<()> {
    if idx >= world.citizens.len() {
        return Err(CivitasError::Corrupted(format!(
            "citizen index {idx} out of range"
        )));
    }

    let on_road = world.on_road(world.citizens[idx].position);
    world.citizens[idx].decay(&world.config, on_road);

    // Detained citizens sit out everything below; release is a later sweep
    if world.citizens[idx].detained {
        return Ok(());
    }

    decide(world, idx);

    if world.citizens[idx].state == CitizenState::Building {
        // On-site construction is immobile
        progress_building(world, idx)?;
        return Ok(());
    }

    let old_pos = world.citizens[idx].position;
    let arrived = {
        let landmarks = &world.landmarks;
        world.citizens[idx].advance_movement(&mut world.rng, &world.grid, on_road, |p| {
            landmarks
                .iter()
                .any(|l| l.position == p && !l.kind.is_walkable())
        })
    };
    let new_pos = world.citizens[idx].position;
    if new_pos != old_pos {
        let id = world.citizens[idx].id;
        vacate_landmark(world, id, old_pos);
    }

    if arrived {
        apply_arrival(world, idx);
    }

    collect_at_cell(world, idx);
    try_breed(world, idx)?;
    Ok(())
}

/// The strict-priority decision ladder
///
/// Every lookup here models perception, so it is bounded by the citizen's
/// vision range; purposeful navigation (routine, patrols) is not.
fn decide(world: &mut World, idx: usize) {
    let pos = world.citizens[idx].position;
    let vision = world.citizens[idx].vision_range;
    let tick = world.tick_count;

    // 1. Exhaustion beats everything
    if world.citizens[idx].needs.energy < 20.0 {
        if let Some((_, shelter)) = world.nearest_landmark(pos, |l| {
            l.kind.is_shelter() && pos.distance(&l.position) <= vision
        }) {
            world.citizens[idx].state = CitizenState::SeekingShelter;
            world.citizens[idx].target = Some(shelter);
        }
        return;
    }

    // 2. Hunger
    if world.citizens[idx].needs.hunger < 30.0 {
        if let Some((_, food)) = world.nearest_resource(pos, |r| {
            !r.collected && pos.distance(&r.position) <= vision
        }) {
            world.citizens[idx].state = CitizenState::SeekingResource;
            world.citizens[idx].target = Some(food);
        }
        return;
    }

    // 3. An in-flight construction is a commitment, not a whim
    if world.citizens[idx].building.is_some() {
        continue_gathering(world, idx);
        return;
    }

    // 3b. Keep tracking an agreed mate
    if world.citizens[idx].state == CitizenState::SeekingMate {
        if track_partner(world, idx) {
            return;
        }
        world.citizens[idx].state = CitizenState::Wandering;
        world.citizens[idx].clear_target();
    }

    // 4. Mate gate
    let population = world.citizens.len();
    if world.citizens[idx].mate_ready(tick)
        && population < world.config.max_population
        && world.rng.gen_bool(0.10)
    {
        seek_mate(world, idx);
        return;
    }

    // 5. Build gate
    if world.citizens[idx].energy >= 40.0
        && world.home_count() < world.config.max_homes
        && world.rng.gen_bool(0.05)
    {
        let kind = choose_building_kind(world);
        world.citizens[idx].building = Some(BuildingProject::new(kind));
        continue_gathering(world, idx);
        return;
    }

    // 6. Company
    if world.citizens[idx].needs.social < 30.0 {
        let id = world.citizens[idx].id;
        if let Some((_, other)) = world.nearest_citizen(pos, id, |c| {
            !c.detained && pos.distance(&c.position) <= vision
        }) {
            world.citizens[idx].state = CitizenState::Socializing;
            world.citizens[idx].target = Some(other);
        }
        return;
    }

    // 7. Idle wander refresh
    if world.citizens[idx].target.is_none() && world.rng.gen_bool(0.05) {
        let x = world.rng.gen_range(1..world.grid.width - 1);
        let y = world.rng.gen_range(1..world.grid.height - 1);
        world.citizens[idx].state = CitizenState::Wandering;
        world.citizens[idx].target = Some(Position::new(x, y));
    }
}

/// 70% common (roads included), 25% intersection, 5% government building
fn choose_building_kind(world: &mut World) -> LandmarkKind {
    let roll: f64 = world.rng.gen();
    if roll < 0.70 {
        let common = LandmarkKind::common_buildable();
        common[world.rng.gen_range(0..common.len())]
    } else if roll < 0.95 {
        LandmarkKind::Intersection
    } else {
        let gov = LandmarkKind::government_buildable();
        gov[world.rng.gen_range(0..gov.len())]
    }
}

/// Walk the map collecting missing recipe letters; start building when done
///
/// A started project already paid its recipe: if a shelter or hunger errand
/// pulled the builder off site, it goes straight back to work here.
fn continue_gathering(world: &mut World, idx: usize) {
    let Some(project) = world.citizens[idx].building.clone() else {
        return;
    };
    if project.started {
        world.citizens[idx].state = CitizenState::Building;
        world.citizens[idx].clear_target();
        return;
    }
    let missing = world.citizens[idx].missing_materials(project.kind);
    if missing.is_empty() {
        world.citizens[idx].consume_recipe(project.kind);
        if let Some(p) = world.citizens[idx].building.as_mut() {
            p.started = true;
        }
        world.citizens[idx].state = CitizenState::Building;
        world.citizens[idx].clear_target();
        return;
    }

    let pos = world.citizens[idx].position;
    let vision = world.citizens[idx].vision_range;
    let wanted = missing[0];
    match world.nearest_resource(pos, |r| {
        !r.collected && r.kind == wanted && pos.distance(&r.position) <= vision
    }) {
        Some((_, target)) => {
            world.citizens[idx].state = CitizenState::GatheringMaterials;
            world.citizens[idx].target = Some(target);
        }
        None => {
            // Nothing of that letter in sight; give the project up
            tracing::debug!(kind = ?project.kind, letter = %wanted, "abandoning build, material unavailable");
            world.citizens[idx].building = None;
            world.citizens[idx].state = CitizenState::Wandering;
            world.citizens[idx].clear_target();
        }
    }
}

/// One tick of immobile on-site work; place the landmark on completion
fn progress_building(world: &mut World, idx: usize) -> Result<()> {
    let Some(project) = world.citizens[idx].building.as_mut() else {
        return Ok(());
    };
    project.progress += 1;
    if project.progress < project.kind.build_time() {
        return Ok(());
    }

    let kind = project.kind;
    let pos = world.citizens[idx].position;
    let site = if world.landmark_at(pos).is_none() {
        Some(pos)
    } else {
        world.free_neighbor_cell(pos)
    };
    let Some(site) = site else {
        // Hemmed in on all sides; nothing to do but drop the project
        tracing::debug!(?kind, ?pos, "no free cell for completed building");
        world.citizens[idx].building = None;
        world.citizens[idx].state = CitizenState::Wandering;
        return Ok(());
    };

    let landmark = world.add_landmark(kind, site);
    world.buildings_built += 1;
    let builder = world.citizens[idx].id;

    // Built government infrastructure attaches to the builder's government
    if let Some(gov_id) = world.citizens[idx].government {
        if let Some(gov) = world.government_mut(gov_id) {
            if kind.is_government() {
                gov.buildings.insert(landmark);
            } else if kind.is_road() {
                gov.roads.insert(landmark);
            }
        }
    }

    world.citizens[idx].building = None;
    world.citizens[idx].state = CitizenState::Wandering;
    world.citizens[idx].restore_stamina(10.0);
    world.push_event(WorldEvent::BuildingCompleted {
        builder,
        landmark,
        kind,
    });
    tracing::debug!(?kind, ?site, "building completed");
    Ok(())
}

/// Keep the target glued to an agreed partner; false when the pairing died
fn track_partner(world: &mut World, idx: usize) -> bool {
    let me = world.citizens[idx].id;
    let Some(partner_id) = world.citizens[idx].breeding_partner else {
        return false;
    };
    let Some(p_idx) = world.citizen_index(partner_id) else {
        world.citizens[idx].breeding_partner = None;
        return false;
    };
    let (their_partner, their_detained, partner_pos) = {
        let p = &world.citizens[p_idx];
        (p.breeding_partner, p.detained, p.position)
    };
    let still_interested = their_partner.is_none() || their_partner == Some(me);
    if !still_interested || their_detained {
        world.citizens[idx].breeding_partner = None;
        return false;
    }
    world.citizens[idx].target = Some(partner_pos);
    true
}

/// Pick the nearest willing candidate, preferring one already pointing at us
fn seek_mate(world: &mut World, idx: usize) {
    let me = world.citizens[idx].id;
    let pos = world.citizens[idx].position;
    let tick = world.tick_count;

    let vision = world.citizens[idx].vision_range;

    let pick = world
        .nearest_citizen(pos, me, |c| {
            c.mate_ready(tick)
                && c.breeding_partner == Some(me)
                && pos.distance(&c.position) <= vision
        })
        .or_else(|| {
            world.nearest_citizen(pos, me, |c| {
                c.mate_ready(tick)
                    && c.breeding_partner.is_none()
                    && pos.distance(&c.position) <= vision
            })
        });

    if let Some((candidate, candidate_pos)) = pick {
        world.citizens[idx].breeding_partner = Some(candidate);
        world.citizens[idx].state = CitizenState::SeekingMate;
        world.citizens[idx].target = Some(candidate_pos);
    }
}

/// Consummate a mutual pairing within proximity 2
fn try_breed(world: &mut World, idx: usize) -> Result<()> {
    let me = world.citizens[idx].id;
    let Some(partner_id) = world.citizens[idx].breeding_partner else {
        return Ok(());
    };
    let Some(p_idx) = world.citizen_index(partner_id) else {
        world.citizens[idx].breeding_partner = None;
        return Ok(());
    };
    // Mutual consent, validated by id each tick
    if world.citizens[p_idx].breeding_partner != Some(me) {
        return Ok(());
    }
    let my_pos = world.citizens[idx].position;
    let partner_pos = world.citizens[p_idx].position;
    if my_pos.distance(&partner_pos) > 2.0 {
        return Ok(());
    }
    if world.citizens.len() >= world.config.max_population {
        return Ok(());
    }

    let Some(child_pos) = world
        .free_neighbor_cell(my_pos)
        .or_else(|| world.free_neighbor_cell(partner_pos))
    else {
        return Ok(());
    };

    // Offspring inherits a randomly chosen parent's glyph and category
    let from_me = world.rng.gen_bool(0.5);
    let donor = if from_me { idx } else { p_idx };
    let glyph = world.citizens[donor].glyph;
    let category = world.citizens[donor].category;

    let child = world.spawn_citizen(glyph, category, child_pos);
    world.births += 1;

    let tick = world.tick_count;
    for i in [idx, p_idx] {
        let parent = &mut world.citizens[i];
        parent.energy = (parent.energy - 20.0).max(0.0);
        parent.needs.hunger = (parent.needs.hunger - 30.0).max(0.0);
        parent.last_breed_tick = tick;
        parent.breeding_partner = None;
        parent.offspring += 1;
        parent.state = CitizenState::Wandering;
        parent.clear_target();
    }

    world.push_event(WorldEvent::Birth {
        parent_a: me,
        parent_b: partner_id,
        child,
    });
    tracing::debug!(?me, partner = ?partner_id, ?child, "offspring born");
    Ok(())
}

/// Apply the reached-target reward for the current state
fn apply_arrival(world: &mut World, idx: usize) {
    let state = world.citizens[idx].state;
    let pos = world.citizens[idx].position;
    let id = world.citizens[idx].id;
    match state {
        CitizenState::SeekingShelter => {
            world.citizens[idx].needs.rest(30.0);
            world.citizens[idx].state = CitizenState::Resting;
            occupy_landmark(world, id, pos);
        }
        CitizenState::SeekingResource => {
            world.citizens[idx].needs.feed(20.0);
            world.citizens[idx].state = CitizenState::Wandering;
        }
        CitizenState::Socializing => {
            world.citizens[idx].needs.socialize(15.0);
            world.citizens[idx].state = CitizenState::Wandering;
        }
        CitizenState::Commuting => {
            world.citizens[idx].state = CitizenState::Working;
        }
        CitizenState::Sleeping => {
            occupy_landmark(world, id, pos);
        }
        _ => {}
    }
    world.citizens[idx].clear_target();
}

/// Pick up an uncollected resource on the current cell, inventory permitting
fn collect_at_cell(world: &mut World, idx: usize) {
    let pos = world.citizens[idx].position;
    if world.citizens[idx].inventory_full() {
        return;
    }
    let Some(r_idx) = world
        .resources
        .iter()
        .position(|r| !r.collected && r.position == pos)
    else {
        return;
    };
    let kind = world.resources[r_idx].kind;
    world.resources[r_idx].collected = true;
    world.citizens[idx].push_item(kind);
}

fn occupy_landmark(world: &mut World, citizen: CitizenId, pos: Position) {
    if let Some(l_idx) = world.landmarks.iter().position(|l| l.position == pos) {
        world.landmarks[l_idx].enter(citizen);
    }
}

fn vacate_landmark(world: &mut World, citizen: CitizenId, pos: Position) {
    if let Some(l_idx) = world.landmarks.iter().position(|l| l.position == pos) {
        world.landmarks[l_idx].leave(citizen);
    }
}
