//! Property tests for cross-cutting world invariants
//!
//! Random seeds and run lengths, one shared set of assertions: bounded
//! scores stay bounded, population never shrinks, detention and crime
//! records stay internally consistent.

use civitas::entity::citizen::{CitizenState, INVENTORY_CAPACITY};
use civitas::{World, WorldConfig};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn simulation_preserves_invariants(seed in 0u64..10_000, ticks in 1usize..120) {
        let config = WorldConfig { seed, ..WorldConfig::default() };
        let mut world = World::new(config);
        world.initialize().unwrap();
        let initial_population = world.citizens.len();

        for _ in 0..ticks {
            world.tick().unwrap();
        }

        prop_assert!(world.citizens.len() >= initial_population);

        for citizen in &world.citizens {
            prop_assert!((0.0..=100.0).contains(&citizen.needs.hunger));
            prop_assert!((0.0..=100.0).contains(&citizen.needs.energy));
            prop_assert!((0.0..=100.0).contains(&citizen.needs.social));
            prop_assert!((0.0..=100.0).contains(&citizen.energy));
            prop_assert!((0.0..=100.0).contains(&citizen.satisfaction));
            prop_assert!((0.0..=100.0).contains(&citizen.loyalty));
            prop_assert!((0.0..=1000.0).contains(&citizen.social_credit));
            prop_assert!(citizen.inventory.len() <= INVENTORY_CAPACITY);
            prop_assert!(world.grid.is_valid(citizen.position));
            if citizen.detained {
                prop_assert_eq!(citizen.state, CitizenState::Detained);
            }
        }

        for gov in &world.governments {
            prop_assert!(gov.member_count() >= 1);
            prop_assert!(world.landmark_index(gov.town_hall).is_some());
        }

        for crime in &world.crimes {
            prop_assert!(world.citizen_index(crime.perpetrator).is_some());
            prop_assert!(world.grid.is_valid(crime.location));
        }
    }

    #[test]
    fn tick_count_tracks_calls(seed in 0u64..10_000, ticks in 0usize..60) {
        let config = WorldConfig { seed, ..WorldConfig::default() };
        let mut world = World::new(config);
        world.initialize().unwrap();
        for _ in 0..ticks {
            world.tick().unwrap();
        }
        prop_assert_eq!(world.tick_count as usize, ticks);
        prop_assert!(world.current_hour() < 24);
    }
}
