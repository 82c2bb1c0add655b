//! Change tags carried by model notifications.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// How much of the board a model change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    /// A single point changed in place.
    Patch,
    /// The point set changed; the list is rebuilt, sort kept.
    Minor,
    /// Everything is rebuilt and the sort goes back to its default.
    Major,
}

impl UpdateType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

/// Payload of a `PointsModel` notification.
#[derive(Debug, Clone, PartialEq)]
pub enum PointChange {
    Updated(Point),
    Added(Point),
    Deleted(Point),
}

impl PointChange {
    pub fn point(&self) -> &Point {
        match self {
            Self::Updated(p) | Self::Added(p) | Self::Deleted(p) => p,
        }
    }
}
