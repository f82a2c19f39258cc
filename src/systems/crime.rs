//! Crime evaluation sweep
//!
//! Every `crime_check_interval` ticks, each free citizen is tested against
//! five independent triggers. Each trigger needs a geometric precondition
//! plus a probability roll shaped by employment, satisfaction, and social
//! credit. A hit applies the kind's credit penalty and records the crime.

use rand::Rng;

use crate::core::error::Result;
use crate::entity::citizen::CitizenState;
use crate::entity::crime::CrimeKind;
use crate::world::{World, WorldEvent};

/// How close a resource or building must be to tempt a citizen (cells)
const OPPORTUNITY_RADIUS: f32 = 2.0;
/// How close a victim must be for assault (cells)
const ASSAULT_RADIUS: f32 = 1.5;
/// Resolved crimes older than this are forgotten
const CRIME_RETENTION_TICKS: u64 = 500;

pub fn crime_sweep(world: &mut World) -> Result<()> {
    prune_old_crimes(world);
    if world.tick_count % world.config.crime_check_interval != 0 {
        return Ok(());
    }

    for idx in 0..world.citizens.len() {
        let c = &world.citizens[idx];
        if c.detained || c.state == CitizenState::Fleeing {
            continue;
        }
        evaluate_citizen(world, idx);
    }
    Ok(())
}

/// Test one citizen against all five triggers independently
fn evaluate_citizen(world: &mut World, idx: usize) {
    let pos = world.citizens[idx].position;
    let employed = world.citizens[idx].job.is_some();
    let satisfaction = world.citizens[idx].satisfaction;
    let credit = world.citizens[idx].social_credit;
    let unaffiliated = world.citizens[idx].government.is_none();
    let id = world.citizens[idx].id;

    let theft_opportunity = world
        .nearest_resource(pos, |r| !r.collected)
        .map(|(_, p)| pos.distance(&p) <= OPPORTUNITY_RADIUS)
        .unwrap_or(false);
    let vandalism_opportunity = world
        .nearest_landmark(pos, |l| {
            !l.kind.is_government()
                && !l.kind.is_road()
                && l.kind != crate::entity::landmark::LandmarkKind::Boundary
        })
        .map(|(_, p)| pos.distance(&p) <= OPPORTUNITY_RADIUS)
        .unwrap_or(false);
    let assault_opportunity = world
        .nearest_citizen(pos, id, |c| !c.detained)
        .map(|(_, p)| pos.distance(&p) <= ASSAULT_RADIUS)
        .unwrap_or(false);
    let trespassing_opportunity = unaffiliated
        && world
            .landmark_at(pos)
            .map(|l| l.kind.is_government())
            .unwrap_or(false);
    let evasion_opportunity = !unaffiliated && satisfaction < 30.0;

    let triggers = [
        (CrimeKind::Theft, theft_opportunity),
        (CrimeKind::Vandalism, vandalism_opportunity),
        (CrimeKind::Assault, assault_opportunity),
        (CrimeKind::Trespassing, trespassing_opportunity),
        (CrimeKind::TaxEvasion, evasion_opportunity),
    ];

    for (kind, opportunity) in triggers {
        if !opportunity {
            continue;
        }
        let chance = crime_chance(kind, employed, satisfaction, credit);
        if !world.rng.gen_bool(chance) {
            continue;
        }
        commit(world, idx, kind);
    }
}

/// Base chance shaped by the citizen's situation
///
/// Unemployment doubles it, employment halves it; dissatisfaction raises
/// it; criminal credit doubles it again; model citizens barely offend.
fn crime_chance(kind: CrimeKind, employed: bool, satisfaction: f32, credit: f32) -> f64 {
    let mut chance = kind.base_chance();
    chance *= if employed { 0.5 } else { 2.0 };
    if satisfaction < 30.0 {
        chance *= 1.5;
    }
    if credit < 200.0 {
        chance *= 2.0;
    } else if credit > 800.0 {
        chance *= 0.2;
    }
    chance.min(1.0)
}

fn commit(world: &mut World, idx: usize, kind: CrimeKind) {
    let id = world.citizens[idx].id;
    let pos = world.citizens[idx].position;
    world.citizens[idx].adjust_credit(-kind.credit_penalty());
    world.citizens[idx].is_criminal = true;
    let crime = world.record_crime(kind, id, pos);
    world.push_event(WorldEvent::CrimeCommitted {
        crime,
        kind,
        perpetrator: id,
    });
    tracing::debug!(?kind, perpetrator = ?id, "crime committed");
}

/// Forget resolved crimes past the retention window
fn prune_old_crimes(world: &mut World) {
    let tick = world.tick_count;
    world
        .crimes
        .retain(|c| !(c.resolved && tick.saturating_sub(c.tick) > CRIME_RETENTION_TICKS));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance_modifiers() {
        let base = CrimeKind::Theft.base_chance();
        let unemployed = crime_chance(CrimeKind::Theft, false, 50.0, 500.0);
        let employed = crime_chance(CrimeKind::Theft, true, 50.0, 500.0);
        assert!((unemployed - base * 2.0).abs() < 1e-9);
        assert!((employed - base * 0.5).abs() < 1e-9);
        let model = crime_chance(CrimeKind::Theft, true, 90.0, 900.0);
        assert!(model < employed);
    }

    #[test]
    fn test_chance_never_exceeds_one() {
        let c = crime_chance(CrimeKind::Trespassing, false, 10.0, 50.0);
        assert!(c <= 1.0);
    }
}
