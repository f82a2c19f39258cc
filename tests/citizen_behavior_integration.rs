//! Integration tests for the citizen decision ladder
//!
//! Worlds here start nearly empty (no random citizens, landmarks, or
//! resources beyond the boundary ring and the central town hall) so each
//! scenario controls exactly what a citizen can see.

use civitas::core::types::Position;
use civitas::entity::citizen::{BuildingProject, Category, CitizenState};
use civitas::entity::landmark::LandmarkKind;
use civitas::world::WorldEvent;
use civitas::{World, WorldConfig};

fn bare_config(seed: u64) -> WorldConfig {
    WorldConfig {
        seed,
        initial_citizens: 0,
        initial_landmarks: 0,
        initial_resources: 0,
        starter_jobs: 0,
        ..WorldConfig::default()
    }
}

#[test]
fn test_exhaustion_outranks_hunger() {
    let mut world = World::new(bare_config(1));
    world.initialize().unwrap();
    let shelter = Position::new(10, 10);
    world.add_landmark(LandmarkKind::Home, shelter);
    world.spawn_citizen('@', Category::People, Position::new(16, 10));
    world.citizens[0].needs.energy = 15.0;
    world.citizens[0].needs.hunger = 10.0;

    world.tick().unwrap();

    assert_eq!(world.citizens[0].state, CitizenState::SeekingShelter);
    assert_eq!(world.citizens[0].target, Some(shelter));
}

#[test]
fn test_hungry_citizen_ignores_food_beyond_vision() {
    let mut world = World::new(bare_config(12));
    world.initialize().unwrap();
    // 30 cells away, well past the default vision range of 8
    world.add_resource('f', Position::new(40, 10));
    world.spawn_citizen('@', Category::People, Position::new(10, 10));
    world.citizens[0].needs.hunger = 25.0;

    world.tick().unwrap();

    assert_ne!(world.citizens[0].state, CitizenState::SeekingResource);
    assert_eq!(world.citizens[0].target, None);
}

#[test]
fn test_hunger_seeks_nearest_resource() {
    let mut world = World::new(bare_config(2));
    world.initialize().unwrap();
    world.add_resource('f', Position::new(5, 5));
    let near = Position::new(18, 10);
    world.add_resource('f', near);
    world.spawn_citizen('@', Category::People, Position::new(20, 10));
    world.citizens[0].needs.hunger = 25.0;

    world.tick().unwrap();

    assert_eq!(world.citizens[0].state, CitizenState::SeekingResource);
    assert_eq!(world.citizens[0].target, Some(near));
}

#[test]
fn test_resource_collected_on_contact() {
    let mut world = World::new(bare_config(3));
    world.initialize().unwrap();
    let pos = Position::new(10, 10);
    world.add_resource('w', pos);
    world.spawn_citizen('@', Category::People, pos);

    world.tick().unwrap();

    assert!(world.resources[0].collected);
    assert_eq!(world.citizens[0].inventory, vec!['w']);
}

#[test]
fn test_full_inventory_leaves_resource_in_place() {
    let mut world = World::new(bare_config(4));
    world.initialize().unwrap();
    let pos = Position::new(10, 10);
    world.add_resource('w', pos);
    world.spawn_citizen('@', Category::People, pos);
    for _ in 0..10 {
        world.citizens[0].push_item('x');
    }

    world.tick().unwrap();

    assert!(!world.resources[0].collected);
    assert_eq!(world.citizens[0].inventory.len(), 10);
}

#[test]
fn test_mutual_breeding_produces_offspring() {
    let mut world = World::new(bare_config(5));
    world.initialize().unwrap();
    let a = world.spawn_citizen('@', Category::People, Position::new(10, 10));
    let b = world.spawn_citizen('&', Category::People, Position::new(11, 10));
    world.citizens[0].age = 300;
    world.citizens[1].age = 300;
    world.citizens[0].breeding_partner = Some(b);
    world.citizens[1].breeding_partner = Some(a);

    world.tick().unwrap();

    assert_eq!(world.citizens.len(), 3, "offspring should have been born");
    assert!(world.citizens[0].breeding_partner.is_none());
    assert!(world.citizens[1].breeding_partner.is_none());
    assert_eq!(world.citizens[0].offspring, 1);
    assert_eq!(world.citizens[0].last_breed_tick, world.tick_count);
    assert!(world.citizens[0].energy < 81.0, "breeding should cost stamina");
    assert!(
        world.grid.is_valid(world.citizens[2].position),
        "child placed off-grid at {:?}",
        world.citizens[2].position
    );
    let born = world
        .events()
        .iter()
        .any(|e| matches!(e.kind, WorldEvent::Birth { .. }));
    assert!(born, "birth should emit an event");
}

#[test]
fn test_breeding_requires_mutual_consent() {
    let mut world = World::new(bare_config(6));
    world.initialize().unwrap();
    let b = world.spawn_citizen('&', Category::People, Position::new(11, 10));
    world.spawn_citizen('@', Category::People, Position::new(10, 10));
    world.citizens[1].age = 300;
    world.citizens[1].breeding_partner = Some(b);
    // b never reciprocates

    for _ in 0..5 {
        world.tick().unwrap();
    }
    assert_eq!(world.citizens.len(), 2);
}

#[test]
fn test_breeding_respects_population_cap() {
    let mut config = bare_config(7);
    config.max_population = 2;
    let mut world = World::new(config);
    world.initialize().unwrap();
    let a = world.spawn_citizen('@', Category::People, Position::new(10, 10));
    let b = world.spawn_citizen('&', Category::People, Position::new(11, 10));
    world.citizens[0].age = 300;
    world.citizens[1].age = 300;
    world.citizens[0].breeding_partner = Some(b);
    world.citizens[1].breeding_partner = Some(a);

    for _ in 0..5 {
        world.tick().unwrap();
    }
    assert_eq!(world.citizens.len(), 2, "cap should block the birth");
}

#[test]
fn test_building_pipeline_places_landmark() {
    let mut world = World::new(bare_config(8));
    world.initialize().unwrap();
    let site = Position::new(10, 10);
    world.spawn_citizen('@', Category::People, site);
    world.citizens[0].inventory = vec!['w', 'w', 's'];
    world.citizens[0].building = Some(BuildingProject::new(LandmarkKind::Home));

    // One tick flips into Building, then the build time runs down
    let ticks = LandmarkKind::Home.build_time() + 2;
    for _ in 0..ticks {
        world.tick().unwrap();
    }

    let home = world
        .landmarks
        .iter()
        .find(|l| l.kind == LandmarkKind::Home)
        .expect("home should have been placed");
    assert_eq!(home.position, site);
    assert!(world.citizens[0].building.is_none());
    assert!(world.citizens[0].inventory.is_empty(), "recipe consumed");
    assert_eq!(world.stats().buildings_built, 1);
    let completed = world
        .events()
        .iter()
        .any(|e| matches!(e.kind, WorldEvent::BuildingCompleted { .. }));
    assert!(completed);
}

#[test]
fn test_interrupted_build_resumes_without_repaying() {
    let mut world = World::new(bare_config(11));
    world.initialize().unwrap();
    let shelter = Position::new(12, 10);
    world.add_landmark(LandmarkKind::Home, shelter);
    world.spawn_citizen('@', Category::People, Position::new(10, 10));
    world.citizens[0].inventory = vec!['s', 's'];
    world.citizens[0].building = Some(BuildingProject::new(LandmarkKind::Wall));

    // First tick consumes the recipe and starts on-site work
    world.tick().unwrap();
    assert_eq!(world.citizens[0].state, CitizenState::Building);
    assert!(world.citizens[0].inventory.is_empty());

    // Exhaustion pulls the builder off site but must not kill the project
    world.citizens[0].needs.energy = 10.0;
    world.tick().unwrap();
    assert_eq!(world.citizens[0].state, CitizenState::SeekingShelter);
    assert!(
        world.citizens[0].building.is_some(),
        "a started project survives preemption"
    );

    // Rested at the shelter, the builder returns straight to the site:
    // the recipe was already paid, so gathering must never restart
    for _ in 0..60 {
        world.tick().unwrap();
        assert_ne!(
            world.citizens[0].state,
            CitizenState::GatheringMaterials,
            "started project must not re-gather its recipe"
        );
    }

    assert!(world
        .landmarks
        .iter()
        .any(|l| l.kind == LandmarkKind::Wall));
    assert!(world.citizens[0].building.is_none());
    assert_eq!(world.stats().buildings_built, 1);
}

#[test]
fn test_gathering_targets_missing_letter() {
    let mut world = World::new(bare_config(9));
    world.initialize().unwrap();
    let stone = Position::new(15, 10);
    world.add_resource('s', stone);
    world.spawn_citizen('@', Category::People, Position::new(10, 10));
    world.citizens[0].inventory = vec!['w', 'w'];
    world.citizens[0].building = Some(BuildingProject::new(LandmarkKind::Home));

    world.tick().unwrap();

    assert_eq!(world.citizens[0].state, CitizenState::GatheringMaterials);
    assert_eq!(world.citizens[0].target, Some(stone));
}

#[test]
fn test_project_abandoned_when_material_unavailable() {
    let mut world = World::new(bare_config(10));
    world.initialize().unwrap();
    world.spawn_citizen('@', Category::People, Position::new(10, 10));
    world.citizens[0].building = Some(BuildingProject::new(LandmarkKind::Home));

    world.tick().unwrap();

    assert!(world.citizens[0].building.is_none());
    assert_eq!(world.citizens[0].state, CitizenState::Wandering);
}
