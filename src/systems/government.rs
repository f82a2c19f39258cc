//! Government formation and processing sweeps
//!
//! Formation turns a crowd around an unclaimed town hall into a government;
//! processing runs the modulo-scheduled civic machinery: taxation,
//! satisfaction, rebellion, recruitment. Schedules are explicit tick-modulo
//! predicates so replays stay deterministic.

use ahash::AHashSet;
use rand::Rng;

use crate::core::error::Result;
use crate::core::types::{CitizenId, LandmarkId, Position};
use crate::entity::government::{Government, GovernmentKind, GovernmentRole};
use crate::entity::landmark::LandmarkKind;
use crate::world::{World, WorldEvent};

/// Citizens this close to a town hall count toward formation
const FORMATION_RADIUS: f32 = 5.0;
/// Members needed to form a government
const FORMATION_QUORUM: usize = 5;
/// Recruitment reach around attached government buildings
const RECRUITMENT_RADIUS: f32 = 3.0;

/// Form a government around every unclaimed town hall with a quorum
///
/// A town hall is claimed by at most one government, ever.
pub fn formation_sweep(world: &mut World) -> Result<()> {
    let claimed: AHashSet<LandmarkId> =
        world.governments.iter().map(|g| g.town_hall).collect();
    let halls: Vec<(LandmarkId, Position)> = world
        .landmarks
        .iter()
        .filter(|l| l.kind == LandmarkKind::TownHall && !claimed.contains(&l.id))
        .map(|l| (l.id, l.position))
        .collect();

    for (hall_id, hall_pos) in halls {
        let nearby: Vec<CitizenId> = world
            .citizens
            .iter()
            .filter(|c| {
                c.government.is_none()
                    && !c.detained
                    && c.position.distance(&hall_pos) <= FORMATION_RADIUS
            })
            .map(|c| c.id)
            .collect();
        if nearby.len() < FORMATION_QUORUM {
            continue;
        }

        let kinds = [
            GovernmentKind::Democracy,
            GovernmentKind::Monarchy,
            GovernmentKind::Council,
        ];
        let kind = kinds[world.rng.gen_range(0..kinds.len())];
        let gov_id = world.next_government_id();
        let leader = nearby[0];
        let mut gov = Government::new(gov_id, kind, leader, hall_id);
        for &official in &nearby[1..3] {
            gov.officials.insert(official);
        }
        for &member in &nearby[3..] {
            gov.citizens.insert(member);
        }

        for (rank, &cid) in nearby.iter().enumerate() {
            if let Some(ci) = world.citizen_index(cid) {
                world.citizens[ci].government = Some(gov_id);
                world.citizens[ci].role = match rank {
                    0 => GovernmentRole::Leader,
                    1 | 2 => GovernmentRole::Official,
                    _ => GovernmentRole::Citizen,
                };
            }
        }

        let members = gov.member_count();
        tracing::info!(?gov_id, ?kind, members, "government formed");
        world.governments.push(gov);
        world.push_event(WorldEvent::GovernmentFormed {
            government: gov_id,
            kind,
            leader,
            members,
        });
    }
    Ok(())
}

/// Run the scheduled civic passes for this tick
pub fn processing_sweep(world: &mut World) -> Result<()> {
    let tick = world.tick_count;
    if tick % 100 == 0 {
        collect_taxes(world);
    }
    if tick % 50 == 0 {
        adjust_satisfaction(world);
    }
    rebellion_check(world);
    if tick % 200 == 0 {
        recruit(world);
    }
    Ok(())
}

/// Move `floor(inventory × tax_rate)` oldest items per member into the treasury
fn collect_taxes(world: &mut World) {
    let tick = world.tick_count;
    for g in 0..world.governments.len() {
        let rate = world.governments[g].tax_rate;
        let members = world.governments[g].member_ids();
        let mut total = 0u32;
        for member in members {
            let Some(ci) = world.citizen_index(member) else {
                continue;
            };
            let take = (world.citizens[ci].inventory.len() as f32 * rate).floor() as usize;
            if take == 0 {
                continue;
            }
            let items: Vec<char> = world.citizens[ci].inventory.drain(..take).collect();
            world.citizens[ci].taxes_paid += items.len() as u32;
            world.citizens[ci].last_tax_tick = tick;
            for kind in items {
                world.governments[g].deposit(kind, 1);
                total += 1;
            }
        }
        if total > 0 {
            let government = world.governments[g].id;
            world.push_event(WorldEvent::TaxCollected {
                government,
                items: total,
            });
            tracing::debug!(?government, items = total, "taxes collected");
        }
    }
}

/// Treasury health and road access shape member satisfaction and loyalty
fn adjust_satisfaction(world: &mut World) {
    for g in 0..world.governments.len() {
        let per_member = world.governments[g].treasury_per_member();
        let delta = if per_member > 5.0 {
            2.0
        } else if per_member < 1.0 {
            -2.0
        } else {
            0.0
        };
        let members = world.governments[g].member_ids();
        let mut sum = 0.0;
        let mut counted = 0usize;
        for member in members {
            let Some(ci) = world.citizen_index(member) else {
                continue;
            };
            world.citizens[ci].adjust_satisfaction(delta);
            if world.on_road(world.citizens[ci].position) {
                world.citizens[ci].adjust_satisfaction(1.0);
                world.citizens[ci].adjust_loyalty(0.5);
            }
            sum += world.citizens[ci].satisfaction;
            counted += 1;
        }
        if counted > 0 {
            world.governments[g].satisfaction = sum / counted as f32;
        }
    }
}

/// Deeply dissatisfied, disloyal members have a 1% per-tick rebellion chance
///
/// Leaders are exempt; a government never loses its founder.
fn rebellion_check(world: &mut World) {
    for idx in 0..world.citizens.len() {
        let Some(gov_id) = world.citizens[idx].government else {
            continue;
        };
        if world.citizens[idx].role == GovernmentRole::Leader {
            continue;
        }
        if world.citizens[idx].satisfaction >= 20.0 || world.citizens[idx].loyalty >= 20.0 {
            continue;
        }
        if !world.rng.gen_bool(0.01) {
            continue;
        }
        let citizen = world.citizens[idx].id;
        world.citizens[idx].government = None;
        world.citizens[idx].role = GovernmentRole::Rebel;
        if let Some(gov) = world.government_mut(gov_id) {
            gov.remove_member(citizen);
        }
        world.push_event(WorldEvent::Rebellion {
            government: gov_id,
            citizen,
        });
        tracing::info!(?citizen, government = ?gov_id, "member rebelled");
    }
}

/// Unaffiliated citizens near government buildings may be swept in
fn recruit(world: &mut World) {
    let reach: Vec<(usize, Vec<Position>)> = world
        .governments
        .iter()
        .enumerate()
        .map(|(g, gov)| {
            let positions = gov
                .buildings
                .iter()
                .filter_map(|&id| world.landmark_index(id))
                .map(|li| world.landmarks[li].position)
                .collect();
            (g, positions)
        })
        .collect();

    for idx in 0..world.citizens.len() {
        if world.citizens[idx].government.is_some() || world.citizens[idx].detained {
            continue;
        }
        let pos = world.citizens[idx].position;
        let Some(g) = reach
            .iter()
            .find(|(_, buildings)| {
                buildings
                    .iter()
                    .any(|b| b.distance(&pos) <= RECRUITMENT_RADIUS)
            })
            .map(|(g, _)| *g)
        else {
            continue;
        };
        if !world.rng.gen_bool(0.30) {
            continue;
        }
        let gov_id = world.governments[g].id;
        let citizen = world.citizens[idx].id;
        world.citizens[idx].government = Some(gov_id);
        world.citizens[idx].role = GovernmentRole::Citizen;
        world.governments[g].citizens.insert(citizen);
        tracing::debug!(?citizen, government = ?gov_id, "citizen recruited");
    }
}
