//! Shared trip data model: points, reference data, update tags and the
//! observable models the board presenter subscribes to.

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod model;
pub mod platform;
pub mod point;
pub mod sort;

pub use error::ModelError;
pub use event::{PointChange, UpdateType};
pub use filter::FilterType;
pub use model::{FilterModel, Observable, PointsModel};
pub use point::{
    Destination, DestinationId, Offer, OfferGroup, OfferId, Picture, Point, PointId, PointKind,
    TripData,
};
pub use sort::SortField;
