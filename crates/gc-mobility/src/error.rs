use gc_core::AgentId;
use gc_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("{0} is not in the roster")]
    UnknownAgent(AgentId),

    #[error("roster cannot hold more than {} agents", u32::MAX)]
    RosterFull,

    #[error("path search failed: {0}")]
    Search(#[from] SpatialError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
