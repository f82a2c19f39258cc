use thiserror::Error;

use crate::core::types::{CitizenId, GovernmentId, LandmarkId, ResourceId};

#[derive(Error, Debug)]
pub enum CivitasError {
    #[error("Citizen not found: {0:?}")]
    CitizenNotFound(CitizenId),

    #[error("Resource not found: {0:?}")]
    ResourceNotFound(ResourceId),

    #[error("Landmark not found: {0:?}")]
    LandmarkNotFound(LandmarkId),

    #[error("Government not found: {0:?}")]
    GovernmentNotFound(GovernmentId),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("World state corrupted: {0}")]
    Corrupted(String),

    #[error("World not initialized")]
    NotInitialized,

    #[error("World already initialized")]
    AlreadyInitialized,

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CivitasError>;
