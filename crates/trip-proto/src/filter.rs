//! Time-based point filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Everything,
    Future,
    Present,
    Past,
}

impl FilterType {
    pub const ALL: [FilterType; 4] = [Self::Everything, Self::Future, Self::Present, Self::Past];

    pub fn label(self) -> &'static str {
        match self {
            Self::Everything => "everything",
            Self::Future => "future",
            Self::Present => "present",
            Self::Past => "past",
        }
    }

    /// Message shown in place of the list when nothing passes this filter.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Everything => "Click New Event to create your first point",
            Self::Future => "There are no future events now",
            Self::Present => "There are no present events now",
            Self::Past => "There are no past events now",
        }
    }

    pub fn matches(self, point: &Point, now: DateTime<Utc>) -> bool {
        match self {
            Self::Everything => true,
            Self::Future => point.date_from > now,
            Self::Present => point.date_from <= now && point.date_to >= now,
            Self::Past => point.date_to < now,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Everything => Self::Future,
            Self::Future => Self::Present,
            Self::Present => Self::Past,
            Self::Past => Self::Everything,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Everything => Self::Past,
            Self::Future => Self::Everything,
            Self::Present => Self::Future,
            Self::Past => Self::Present,
        }
    }
}
