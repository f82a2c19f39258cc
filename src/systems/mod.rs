//! Per-tick sweeps applied across the citizen population

pub mod behavior;
pub mod crime;
pub mod government;
pub mod police;
pub mod routine;
