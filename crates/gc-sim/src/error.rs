use gc_core::CoreError;
use gc_mobility::MobilityError;
use gc_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("invalid map request: {0}")]
    Spatial(#[from] SpatialError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("no free passable cell left: placed {placed} of {requested} random spawns")]
    NoSpawnCell { requested: usize, placed: usize },
}

pub type SimResult<T> = Result<T, SimError>;
