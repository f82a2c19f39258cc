//! Daily routine sweep
//!
//! The tick count maps onto a wrapping 24-hour clock; four phases drive
//! default behavior for citizens that are not otherwise occupied. Critical
//! hunger or exhaustion bypasses routine entirely (the decision ladder
//! already claimed those citizens upstream).

use rand::Rng;

use crate::core::error::Result;
use crate::core::types::Position;
use crate::entity::citizen::CitizenState;
use crate::entity::job::Job;
use crate::world::{World, WorldEvent};

/// Phase of the simulated day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// 22:00-06:00
    Night,
    /// 06:00-09:00
    Morning,
    /// 09:00-17:00
    Work,
    /// 17:00-22:00
    Evening,
}

impl DayPhase {
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            6..=8 => DayPhase::Morning,
            9..=16 => DayPhase::Work,
            17..=21 => DayPhase::Evening,
            _ => DayPhase::Night,
        }
    }
}

/// States routine is allowed to redirect; purposeful states are left alone
fn overridable(state: CitizenState) -> bool {
    matches!(
        state,
        CitizenState::Wandering
            | CitizenState::Resting
            | CitizenState::Socializing
            | CitizenState::Sleeping
            | CitizenState::Commuting
            | CitizenState::Working
    )
}

pub fn routine_sweep(world: &mut World) -> Result<()> {
    let hour = world.current_hour();
    let phase = DayPhase::from_hour(hour);

    for idx in 0..world.citizens.len() {
        let citizen = &world.citizens[idx];
        if citizen.detained || citizen.needs.is_critical() || !overridable(citizen.state) {
            continue;
        }
        match phase {
            DayPhase::Night => night(world, idx),
            DayPhase::Morning => morning(world, idx),
            DayPhase::Work => work(world, idx, hour),
            DayPhase::Evening => evening(world, idx),
        }
    }

    fill_open_jobs(world);
    Ok(())
}

/// Head home and sleep; sleeping at a shelter slowly restores rest
fn night(world: &mut World, idx: usize) {
    let pos = world.citizens[idx].position;
    let at_shelter = world
        .landmark_at(pos)
        .map(|l| l.kind.is_shelter())
        .unwrap_or(false);
    if at_shelter {
        world.citizens[idx].state = CitizenState::Sleeping;
        world.citizens[idx].clear_target();
        world.citizens[idx].needs.rest(1.0);
        return;
    }
    if let Some((_, home)) = world.nearest_landmark(pos, |l| l.kind.is_shelter()) {
        world.citizens[idx].state = CitizenState::Sleeping;
        world.citizens[idx].target = Some(home);
    }
}

/// Breakfast if peckish, then the employed start their commute
fn morning(world: &mut World, idx: usize) {
    let pos = world.citizens[idx].position;
    if world.citizens[idx].needs.hunger < 70.0 {
        if let Some((_, food)) = world.nearest_resource(pos, |r| !r.collected) {
            world.citizens[idx].state = CitizenState::SeekingResource;
            world.citizens[idx].target = Some(food);
        }
        return;
    }
    if world.citizens[idx].job.is_some() {
        commute(world, idx);
    }
}

/// On shift: be at the workplace and do the job; off shift or unemployed:
/// simplified wander/socialize
fn work(world: &mut World, idx: usize, hour: u8) {
    let on_shift = world.citizens[idx]
        .job
        .as_ref()
        .map(|j| j.on_shift(hour))
        .unwrap_or(false);
    if !on_shift {
        idle_about(world, idx);
        return;
    }
    let Some(workplace_pos) = workplace_position(world, idx) else {
        idle_about(world, idx);
        return;
    };
    let pos = world.citizens[idx].position;
    if pos == workplace_pos {
        world.citizens[idx].state = CitizenState::Working;
        world.citizens[idx].clear_target();
        let nudge: f32 = world.rng.gen_range(-1.0..1.0);
        if let Some(job) = world.citizens[idx].job.as_mut() {
            job.performance = (job.performance + nudge).clamp(0.0, 100.0);
        }
    } else {
        world.citizens[idx].state = CitizenState::Commuting;
        world.citizens[idx].target = Some(workplace_pos);
    }
}

/// Wind down: see people or head home
fn evening(world: &mut World, idx: usize) {
    let pos = world.citizens[idx].position;
    let id = world.citizens[idx].id;
    if world.rng.gen_bool(0.5) {
        if let Some((_, other)) = world.nearest_citizen(pos, id, |c| !c.detained) {
            world.citizens[idx].state = CitizenState::Socializing;
            world.citizens[idx].target = Some(other);
            return;
        }
    }
    if let Some((_, home)) = world.nearest_landmark(pos, |l| l.kind.is_shelter()) {
        world.citizens[idx].state = CitizenState::Wandering;
        world.citizens[idx].target = Some(home);
    }
}

fn commute(world: &mut World, idx: usize) {
    let Some(workplace_pos) = workplace_position(world, idx) else {
        return;
    };
    if world.citizens[idx].position == workplace_pos {
        world.citizens[idx].state = CitizenState::Working;
        world.citizens[idx].clear_target();
    } else {
        world.citizens[idx].state = CitizenState::Commuting;
        world.citizens[idx].target = Some(workplace_pos);
    }
}

fn workplace_position(world: &World, idx: usize) -> Option<Position> {
    let workplace = world.citizens[idx].job.as_ref()?.workplace;
    let li = world.landmark_index(workplace)?;
    Some(world.landmarks[li].position)
}

/// The unemployed drift: half wander, half socialize
fn idle_about(world: &mut World, idx: usize) {
    if world.rng.gen_bool(0.5) {
        let x = world.rng.gen_range(1..world.grid.width - 1);
        let y = world.rng.gen_range(1..world.grid.height - 1);
        world.citizens[idx].state = CitizenState::Wandering;
        world.citizens[idx].target = Some(Position::new(x, y));
    } else {
        let pos = world.citizens[idx].position;
        let id = world.citizens[idx].id;
        if let Some((_, other)) = world.nearest_citizen(pos, id, |c| !c.detained) {
            world.citizens[idx].state = CitizenState::Socializing;
            world.citizens[idx].target = Some(other);
        }
    }
}

/// Hand each open position to the nearest unemployed citizen
fn fill_open_jobs(world: &mut World) {
    let mut remaining = Vec::new();
    let open = std::mem::take(&mut world.open_jobs);
    for (workplace, kind) in open {
        let Some(li) = world.landmark_index(workplace) else {
            continue;
        };
        let workplace_pos = world.landmarks[li].position;
        let candidate = world
            .citizens
            .iter()
            .enumerate()
            .filter(|(_, c)| c.job.is_none() && !c.detained)
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance(&workplace_pos)
                    .total_cmp(&b.position.distance(&workplace_pos))
            })
            .map(|(i, _)| i);
        match candidate {
            Some(ci) => {
                world.citizens[ci].job = Some(Job::new(kind, workplace));
                let citizen = world.citizens[ci].id;
                world.push_event(WorldEvent::JobAssigned {
                    citizen,
                    kind,
                    workplace,
                });
                tracing::debug!(?citizen, ?kind, "job assigned");
            }
            None => remaining.push((workplace, kind)),
        }
    }
    world.open_jobs = remaining;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(DayPhase::from_hour(5), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(6), DayPhase::Morning);
        assert_eq!(DayPhase::from_hour(9), DayPhase::Work);
        assert_eq!(DayPhase::from_hour(16), DayPhase::Work);
        assert_eq!(DayPhase::from_hour(17), DayPhase::Evening);
        assert_eq!(DayPhase::from_hour(22), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(0), DayPhase::Night);
    }
}
