use thiserror::Error;

use crate::point::PointId;

/// Failures raised by model mutations.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("point {0} does not exist")]
    PointNotFound(PointId),

    #[error("point {0} already exists")]
    DuplicatePoint(PointId),

    /// An observer rejected the change notification. The mutation itself has
    /// already been applied.
    #[error(transparent)]
    Observer(#[from] anyhow::Error),
}
