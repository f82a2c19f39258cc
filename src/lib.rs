//! Civitas - emergent artificial-society simulation
//!
//! A population of autonomous grid-dwelling citizens satisfies needs,
//! builds infrastructure, reproduces, forms governments, commits and
//! polices crime, and follows daily schedules, advanced one synchronous
//! `tick()` at a time. The session layer owns lifecycle and rendering;
//! this crate owns the world.

pub mod core;
pub mod entity;
pub mod spatial;
pub mod systems;
pub mod world;

pub use crate::core::config::WorldConfig;
pub use crate::core::error::{CivitasError, Result};
pub use crate::world::World;
