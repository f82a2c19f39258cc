//! Government entities: membership, treasury, and civic mood

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::types::{CitizenId, GovernmentId, LandmarkId};

/// Form of government, chosen at formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernmentKind {
    Democracy,
    Monarchy,
    Council,
    Anarchy,
}

impl GovernmentKind {
    pub fn name(&self) -> &'static str {
        match self {
            GovernmentKind::Democracy => "Democracy",
            GovernmentKind::Monarchy => "Monarchy",
            GovernmentKind::Council => "Council",
            GovernmentKind::Anarchy => "Anarchy",
        }
    }
}

/// Role a citizen holds relative to governments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernmentRole {
    Leader,
    Official,
    Citizen,
    Rebel,
    /// Never joined (or left) any government
    Independent,
}

/// A government formed around a town hall
///
/// Exactly one government may ever claim a given town hall. Governments are
/// never dissolved; members may leave or rebel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Government {
    pub id: GovernmentId,
    pub name: String,
    pub kind: GovernmentKind,
    pub leader: CitizenId,
    pub officials: AHashSet<CitizenId>,
    pub citizens: AHashSet<CitizenId>,
    /// Taxed resources by letter
    pub treasury: AHashMap<char, u32>,
    /// Fraction of inventory taxed each tax tick
    pub tax_rate: f32,
    /// Civic mood, 0-100 (mirrors the member average)
    pub satisfaction: f32,
    /// 0-100; currently a recorded trait, not yet a behavior driver
    pub corruption: f32,
    pub policies: Vec<String>,
    pub laws: Vec<String>,
    /// The town hall this government formed around
    pub town_hall: LandmarkId,
    /// Government buildings attached to this government
    pub buildings: AHashSet<LandmarkId>,
    /// Roads attached to this government
    pub roads: AHashSet<LandmarkId>,
}

impl Government {
    pub fn new(
        id: GovernmentId,
        kind: GovernmentKind,
        leader: CitizenId,
        town_hall: LandmarkId,
    ) -> Self {
        let mut buildings = AHashSet::new();
        buildings.insert(town_hall);
        Self {
            id,
            name: format!("{} {}", kind.name(), id.0 + 1),
            kind,
            leader,
            officials: AHashSet::new(),
            citizens: AHashSet::new(),
            treasury: AHashMap::new(),
            tax_rate: 0.15,
            satisfaction: 70.0,
            corruption: 10.0,
            policies: Vec::new(),
            laws: Vec::new(),
            town_hall,
            buildings,
            roads: AHashSet::new(),
        }
    }

    /// All members: leader, officials, citizens
    pub fn member_ids(&self) -> Vec<CitizenId> {
        let mut ids = Vec::with_capacity(1 + self.officials.len() + self.citizens.len());
        ids.push(self.leader);
        ids.extend(self.officials.iter().copied());
        ids.extend(self.citizens.iter().copied());
        ids
    }

    pub fn member_count(&self) -> usize {
        1 + self.officials.len() + self.citizens.len()
    }

    pub fn is_member(&self, id: CitizenId) -> bool {
        self.leader == id || self.officials.contains(&id) || self.citizens.contains(&id)
    }

    /// Remove a member (leaders stay on the books; there is no succession)
    pub fn remove_member(&mut self, id: CitizenId) {
        self.officials.remove(&id);
        self.citizens.remove(&id);
    }

    pub fn deposit(&mut self, kind: char, amount: u32) {
        *self.treasury.entry(kind).or_insert(0) += amount;
    }

    pub fn treasury_total(&self) -> u32 {
        self.treasury.values().sum()
    }

    /// Treasury units per member, the input to the satisfaction pass
    pub fn treasury_per_member(&self) -> f32 {
        self.treasury_total() as f32 / self.member_count() as f32
    }
}
