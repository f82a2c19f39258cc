pub mod citizen;
pub mod crime;
pub mod government;
pub mod job;
pub mod landmark;
pub mod needs;
pub mod resource;

pub use citizen::{Category, Citizen, CitizenState};
pub use crime::{Crime, CrimeKind};
pub use government::{Government, GovernmentKind, GovernmentRole};
pub use job::{Job, JobKind};
pub use landmark::{Landmark, LandmarkKind};
pub use needs::Needs;
pub use resource::Resource;
