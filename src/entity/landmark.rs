//! Landmarks: fixed structures with walkability and occupancy rules
//!
//! Every per-kind attribute (glyph, capacity, recipe, build time) is a
//! lookup method on `LandmarkKind`, so adding a kind touches one file.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{CitizenId, LandmarkId, Position};
use crate::entity::job::JobKind;

/// Kind of landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandmarkKind {
    Home,
    Market,
    Park,
    Boundary,
    Storage,
    Meeting,
    Farm,
    Wall,
    RoadHorizontal,
    RoadVertical,
    Intersection,
    TownHall,
    Courthouse,
    Treasury,
    PoliceStation,
    PublicWorks,
}

impl LandmarkKind {
    /// Display glyph
    pub fn glyph(&self) -> char {
        match self {
            LandmarkKind::Home => 'H',
            LandmarkKind::Market => 'M',
            LandmarkKind::Park => 'P',
            LandmarkKind::Boundary => '#',
            LandmarkKind::Storage => 'S',
            LandmarkKind::Meeting => 'G',
            LandmarkKind::Farm => 'F',
            LandmarkKind::Wall => 'W',
            LandmarkKind::RoadHorizontal => '-',
            LandmarkKind::RoadVertical => '|',
            LandmarkKind::Intersection => '+',
            LandmarkKind::TownHall => 'T',
            LandmarkKind::Courthouse => 'C',
            LandmarkKind::Treasury => '$',
            LandmarkKind::PoliceStation => 'O',
            LandmarkKind::PublicWorks => 'U',
        }
    }

    /// Occupancy capacity (boundaries hold nobody)
    pub fn capacity(&self) -> usize {
        match self {
            LandmarkKind::Boundary => 0,
            _ => 5,
        }
    }

    /// Citizens can stand on anything but a boundary
    pub fn is_walkable(&self) -> bool {
        !matches!(self, LandmarkKind::Boundary)
    }

    pub fn is_road(&self) -> bool {
        matches!(
            self,
            LandmarkKind::RoadHorizontal | LandmarkKind::RoadVertical | LandmarkKind::Intersection
        )
    }

    pub fn is_government(&self) -> bool {
        matches!(
            self,
            LandmarkKind::TownHall
                | LandmarkKind::Courthouse
                | LandmarkKind::Treasury
                | LandmarkKind::PoliceStation
                | LandmarkKind::PublicWorks
        )
    }

    /// Landmarks that count as shelter for exhausted citizens
    pub fn is_shelter(&self) -> bool {
        matches!(self, LandmarkKind::Home | LandmarkKind::Storage)
    }

    /// Resource letters a citizen must hold (exact multiset) to build this
    pub fn recipe(&self) -> &'static [char] {
        match self {
            LandmarkKind::Home => &['w', 'w', 's'],
            LandmarkKind::Market => &['w', 's', 'g'],
            LandmarkKind::Park => &['t', 'f'],
            LandmarkKind::Storage => &['w', 'w'],
            LandmarkKind::Meeting => &['w', 's', 's'],
            LandmarkKind::Farm => &['s', 'g', 'g'],
            LandmarkKind::Wall => &['s', 's'],
            LandmarkKind::RoadHorizontal | LandmarkKind::RoadVertical => &['s'],
            LandmarkKind::Intersection => &['s', 'g'],
            LandmarkKind::TownHall => &['w', 's', 'g', 'm'],
            LandmarkKind::Courthouse => &['s', 's', 'm'],
            LandmarkKind::Treasury => &['s', 'm', 'm'],
            LandmarkKind::PoliceStation => &['w', 's', 'm'],
            LandmarkKind::PublicWorks => &['w', 'w', 'm'],
            LandmarkKind::Boundary => &[],
        }
    }

    /// Ticks spent immobile in the building state before completion
    pub fn build_time(&self) -> u32 {
        match self {
            LandmarkKind::RoadHorizontal | LandmarkKind::RoadVertical => 10,
            LandmarkKind::Intersection => 15,
            LandmarkKind::Wall => 15,
            LandmarkKind::Park => 20,
            LandmarkKind::Storage => 25,
            LandmarkKind::Home => 30,
            LandmarkKind::Farm => 30,
            LandmarkKind::Meeting => 35,
            LandmarkKind::Market => 40,
            LandmarkKind::PoliceStation => 50,
            LandmarkKind::PublicWorks => 50,
            LandmarkKind::Courthouse => 60,
            LandmarkKind::Treasury => 60,
            LandmarkKind::TownHall => 80,
            LandmarkKind::Boundary => 0,
        }
    }

    /// Job opened by a workplace of this kind, if any
    pub fn job(&self) -> Option<JobKind> {
        match self {
            LandmarkKind::PoliceStation => Some(JobKind::PoliceOfficer),
            LandmarkKind::Farm => Some(JobKind::Farmer),
            LandmarkKind::Market => Some(JobKind::Merchant),
            LandmarkKind::PublicWorks => Some(JobKind::Builder),
            LandmarkKind::TownHall => Some(JobKind::Clerk),
            _ => None,
        }
    }

    /// Common construction choices (the 70% bucket, roads included)
    pub fn common_buildable() -> &'static [LandmarkKind] {
        &[
            LandmarkKind::Home,
            LandmarkKind::Market,
            LandmarkKind::Park,
            LandmarkKind::Storage,
            LandmarkKind::Meeting,
            LandmarkKind::Farm,
            LandmarkKind::Wall,
            LandmarkKind::RoadHorizontal,
            LandmarkKind::RoadVertical,
        ]
    }

    /// Government construction choices (the 5% bucket)
    pub fn government_buildable() -> &'static [LandmarkKind] {
        &[
            LandmarkKind::TownHall,
            LandmarkKind::Courthouse,
            LandmarkKind::Treasury,
            LandmarkKind::PoliceStation,
            LandmarkKind::PublicWorks,
        ]
    }
}

/// A placed landmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Landmark {
    pub id: LandmarkId,
    pub position: Position,
    pub kind: LandmarkKind,
    pub glyph: char,
    pub capacity: usize,
    pub occupants: AHashSet<CitizenId>,
}

impl Landmark {
    pub fn new(id: LandmarkId, position: Position, kind: LandmarkKind) -> Self {
        Self {
            id,
            position,
            kind,
            glyph: kind.glyph(),
            capacity: kind.capacity(),
            occupants: AHashSet::new(),
        }
    }

    pub fn has_space(&self) -> bool {
        self.occupants.len() < self.capacity
    }

    /// Admit a citizen if there is room
    pub fn enter(&mut self, citizen: CitizenId) -> bool {
        if self.has_space() || self.occupants.contains(&citizen) {
            self.occupants.insert(citizen);
            true
        } else {
            false
        }
    }

    pub fn leave(&mut self, citizen: CitizenId) {
        self.occupants.remove(&citizen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_blocks_and_holds_nobody() {
        assert!(!LandmarkKind::Boundary.is_walkable());
        assert_eq!(LandmarkKind::Boundary.capacity(), 0);
        assert_eq!(LandmarkKind::Home.capacity(), 5);
    }

    #[test]
    fn test_road_and_government_tags() {
        assert!(LandmarkKind::Intersection.is_road());
        assert!(!LandmarkKind::Home.is_road());
        assert!(LandmarkKind::Treasury.is_government());
        assert!(!LandmarkKind::Park.is_government());
    }

    #[test]
    fn test_every_buildable_has_recipe_and_time() {
        for kind in LandmarkKind::common_buildable()
            .iter()
            .chain(LandmarkKind::government_buildable())
            .chain(&[LandmarkKind::Intersection])
        {
            assert!(!kind.recipe().is_empty(), "{kind:?} has no recipe");
            assert!(kind.build_time() > 0, "{kind:?} has no build time");
        }
    }

    #[test]
    fn test_occupancy() {
        let mut lm = Landmark::new(LandmarkId(0), Position::new(1, 1), LandmarkKind::Home);
        for i in 0..5 {
            assert!(lm.enter(CitizenId(i)));
        }
        assert!(!lm.enter(CitizenId(9)));
        lm.leave(CitizenId(0));
        assert!(lm.enter(CitizenId(9)));
    }
}
