//! Actions flowing from point views back to the trip presenter.

use trip_proto::{Point, PointId, UpdateType};

/// A model mutation requested by a view.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    UpdatePoint(Point),
    AddPoint(Point),
    DeletePoint(Point),
}

impl UserAction {
    pub fn point(&self) -> &Point {
        match self {
            Self::UpdatePoint(p) | Self::AddPoint(p) | Self::DeletePoint(p) => p,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpdatePoint(_) => "update",
            Self::AddPoint(_) => "add",
            Self::DeletePoint(_) => "delete",
        }
    }
}

/// Input aimed at a single point's presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointGesture {
    OpenEditor,
    CloseEditor,
    ToggleFavorite,
    SetPrice(u32),
    NextDestination,
    PrevDestination,
    /// Zero-based index into the offers available for the point's kind.
    ToggleOffer(usize),
    Submit,
    Delete,
}

/// What a point presenter asks the trip presenter to do.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    /// The point entered edit mode; every other point must leave it.
    ModeChanged(PointId),
    View(UserAction, UpdateType),
}
