use thiserror::Error;
use trip_proto::{ModelError, PointId};

#[derive(Debug, Error)]
pub enum BoardError {
    /// The id has no registered point presenter.
    #[error("no rendered point with id {0}")]
    NotFound(PointId),

    #[error("trip presenter is already initialized")]
    AlreadyInitialized,

    #[error("cannot create a point: trip has no destinations")]
    NoDestinations,

    #[error(transparent)]
    Model(#[from] ModelError),
}
