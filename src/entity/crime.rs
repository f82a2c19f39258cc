//! Crime records and per-kind attributes

use serde::{Deserialize, Serialize};

use crate::core::types::{CitizenId, CrimeId, Position, Tick};

/// Kind of crime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrimeKind {
    Theft,
    Vandalism,
    Assault,
    Trespassing,
    TaxEvasion,
}

impl CrimeKind {
    /// Social-credit penalty applied when the crime is committed
    pub fn credit_penalty(&self) -> f32 {
        match self {
            CrimeKind::Theft => 30.0,
            CrimeKind::Vandalism => 25.0,
            CrimeKind::Assault => 50.0,
            CrimeKind::Trespassing => 20.0,
            CrimeKind::TaxEvasion => 40.0,
        }
    }

    /// Base per-evaluation probability before situational modifiers
    pub fn base_chance(&self) -> f64 {
        match self {
            CrimeKind::Theft => 0.02,
            CrimeKind::Vandalism => 0.01,
            CrimeKind::Assault => 0.005,
            CrimeKind::Trespassing => 0.03,
            CrimeKind::TaxEvasion => 0.02,
        }
    }
}

/// A committed crime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crime {
    pub id: CrimeId,
    pub kind: CrimeKind,
    pub perpetrator: CitizenId,
    pub location: Position,
    pub tick: Tick,
    /// Set once a patrolling officer has come within detection range
    pub detected: bool,
    /// Set by an arrest
    pub resolved: bool,
}

impl Crime {
    pub fn new(
        id: CrimeId,
        kind: CrimeKind,
        perpetrator: CitizenId,
        location: Position,
        tick: Tick,
    ) -> Self {
        Self {
            id,
            kind,
            perpetrator,
            location,
            tick,
            detected: false,
            resolved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trespassing_penalty_is_twenty() {
        assert!((CrimeKind::Trespassing.credit_penalty() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_new_crime_is_open() {
        let c = Crime::new(
            CrimeId(0),
            CrimeKind::Theft,
            CitizenId(1),
            Position::new(2, 2),
            10,
        );
        assert!(!c.detected);
        assert!(!c.resolved);
    }
}
