//! Outward event queue
//!
//! Everything noteworthy a tick produces lands here as a tagged event. The
//! session layer drains the queue once per tick and relays it; the core
//! never looks back at past events.

use serde::{Deserialize, Serialize};

use crate::core::types::{CitizenId, CrimeId, GovernmentId, LandmarkId, Tick};
use crate::entity::crime::CrimeKind;
use crate::entity::government::GovernmentKind;
use crate::entity::job::JobKind;
use crate::entity::landmark::LandmarkKind;

/// Payload of a world event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldEvent {
    BuildingCompleted {
        builder: CitizenId,
        landmark: LandmarkId,
        kind: LandmarkKind,
    },
    Birth {
        parent_a: CitizenId,
        parent_b: CitizenId,
        child: CitizenId,
    },
    GovernmentFormed {
        government: GovernmentId,
        kind: GovernmentKind,
        leader: CitizenId,
        members: usize,
    },
    TaxCollected {
        government: GovernmentId,
        items: u32,
    },
    Rebellion {
        government: GovernmentId,
        citizen: CitizenId,
    },
    CrimeCommitted {
        crime: CrimeId,
        kind: CrimeKind,
        perpetrator: CitizenId,
    },
    Arrest {
        officer: CitizenId,
        criminal: CitizenId,
        release_tick: Tick,
    },
    JobAssigned {
        citizen: CitizenId,
        kind: JobKind,
        workplace: LandmarkId,
    },
}

/// A world event stamped with when it happened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub tick: Tick,
    pub kind: WorldEvent,
}

/// FIFO queue of events awaiting the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<Event>,
    next_event_id: u32,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: WorldEvent, tick: Tick) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;
        self.events.push(Event { id, tick, kind });
        id
    }

    /// Peek at pending events without draining them
    pub fn pending(&self) -> &[Event] {
        &self.events
    }

    /// Drain all pending events
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains() {
        let mut queue = EventQueue::new();
        queue.push(
            WorldEvent::TaxCollected {
                government: GovernmentId(0),
                items: 3,
            },
            10,
        );
        assert_eq!(queue.len(), 1);
        let drained = queue.take();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].tick, 10);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_ids_monotonic() {
        let mut queue = EventQueue::new();
        let a = queue.push(
            WorldEvent::JobAssigned {
                citizen: CitizenId(0),
                kind: JobKind::Farmer,
                workplace: LandmarkId(0),
            },
            1,
        );
        let b = queue.push(
            WorldEvent::JobAssigned {
                citizen: CitizenId(1),
                kind: JobKind::Clerk,
                workplace: LandmarkId(1),
            },
            1,
        );
        assert!(b > a);
    }
}
