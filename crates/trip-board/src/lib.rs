//! Trip board: the presenter that keeps a rendered, sorted point list in
//! step with the trip models, plus the views and render primitives it drives.

pub mod action;
pub mod error;
pub mod point_presenter;
pub mod render;
pub mod theme;
pub mod trip_presenter;
pub mod views;

pub use action::{BoardAction, PointGesture, UserAction};
pub use error::BoardError;
pub use point_presenter::{
    CardPresenter, CardPresenterFactory, Mode, PointPresenter, PointPresenterFactory,
};
pub use render::{Container, RenderContext, RenderPosition, View, ViewKind};
pub use trip_presenter::{ModelEvent, TripPresenter};
