//! Integration tests for world lifecycle and global invariants
//!
//! These tests verify the outer contract of the world:
//! - Initialization populates citizens, landmarks, and resources
//! - Ticking an uninitialized or corrupted world fails loudly
//! - Population never shrinks (there is no death)
//! - Bounded scores stay bounded over long runs

use civitas::entity::citizen::INVENTORY_CAPACITY;
use civitas::{CivitasError, World, WorldConfig};

#[test]
fn test_initialize_populates_world() {
    let config = WorldConfig::default();
    let initial_citizens = config.initial_citizens;
    let mut world = World::new(config);
    world.initialize().unwrap();

    assert!(world.is_initialized());
    assert_eq!(world.citizens.len(), initial_citizens);
    assert!(!world.resources.is_empty());
    // Boundaries ring the grid: 2 full rows plus 2 partial columns
    let boundary_cells = (2 * world.width() + 2 * (world.height() - 2)) as usize;
    assert!(
        world.landmarks.len() > boundary_cells,
        "expected landmarks beyond the boundary ring, got {}",
        world.landmarks.len()
    );

    let stats = world.stats();
    assert_eq!(stats.population, world.citizens.len());
    assert_eq!(stats.tick, 0);
}

#[test]
fn test_tick_requires_initialization() {
    let mut world = World::new(WorldConfig::default());
    let err = world.tick().unwrap_err();
    assert!(matches!(err, CivitasError::NotInitialized));
}

#[test]
fn test_double_initialize_rejected() {
    let mut world = World::new(WorldConfig::default());
    world.initialize().unwrap();
    let err = world.initialize().unwrap_err();
    assert!(matches!(err, CivitasError::AlreadyInitialized));
}

#[test]
fn test_corrupted_grid_is_fatal() {
    let mut world = World::new(WorldConfig::default());
    world.initialize().unwrap();
    world.grid.width = 0;
    let err = world.tick().unwrap_err();
    assert!(matches!(err, CivitasError::InvalidGrid(_)));
}

#[test]
fn test_population_never_shrinks() {
    let mut world = World::new(WorldConfig::default());
    world.initialize().unwrap();

    let mut previous = world.citizens.len();
    for _ in 0..600 {
        world.tick().unwrap();
        let current = world.citizens.len();
        assert!(
            current >= previous,
            "population shrank from {} to {} at tick {}",
            previous,
            current,
            world.tick_count
        );
        previous = current;
    }
}

#[test]
fn test_bounds_hold_over_long_run() {
    let mut world = World::new(WorldConfig::default());
    world.initialize().unwrap();

    for _ in 0..1000 {
        world.tick().unwrap();
    }

    for citizen in &world.citizens {
        assert!((0.0..=100.0).contains(&citizen.needs.hunger));
        assert!((0.0..=100.0).contains(&citizen.needs.energy));
        assert!((0.0..=100.0).contains(&citizen.needs.social));
        assert!((0.0..=100.0).contains(&citizen.energy));
        assert!((0.0..=100.0).contains(&citizen.satisfaction));
        assert!((0.0..=100.0).contains(&citizen.loyalty));
        assert!((0.0..=1000.0).contains(&citizen.social_credit));
        assert!(citizen.inventory.len() <= INVENTORY_CAPACITY);
        assert!(
            world.grid.is_valid(citizen.position),
            "citizen {:?} escaped the grid at {:?}",
            citizen.id,
            citizen.position
        );
    }

    println!(
        "1000 ticks: population {}, buildings {}, governments {}",
        world.citizens.len(),
        world.stats().buildings_built,
        world.governments.len()
    );
}

#[test]
fn test_take_events_drains_queue() {
    let mut world = World::new(WorldConfig::default());
    world.initialize().unwrap();
    for _ in 0..50 {
        world.tick().unwrap();
    }
    let _ = world.take_events();
    assert!(world.events().is_empty());
}

#[test]
fn test_same_seed_replays_identically() {
    let mut a = World::new(WorldConfig::default());
    let mut b = World::new(WorldConfig::default());
    a.initialize().unwrap();
    b.initialize().unwrap();

    for _ in 0..300 {
        a.tick().unwrap();
        b.tick().unwrap();
    }

    assert_eq!(a.citizens.len(), b.citizens.len());
    for (ca, cb) in a.citizens.iter().zip(&b.citizens) {
        assert_eq!(ca.position, cb.position);
        assert_eq!(ca.state, cb.state);
        assert_eq!(ca.inventory, cb.inventory);
    }
    assert_eq!(a.governments.len(), b.governments.len());
    assert_eq!(a.stats().buildings_built, b.stats().buildings_built);
}
