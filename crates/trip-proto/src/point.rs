//! Itinerary data: points and the reference data they point at.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(PointId);
string_id!(DestinationId);
string_id!(OfferId);

impl PointId {
    /// Random id for a point created locally.
    pub fn generate() -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        Self(id)
    }
}

/// Transport or activity type of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointKind {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    #[default]
    Flight,
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl PointKind {
    pub const ALL: [PointKind; 9] = [
        Self::Taxi,
        Self::Bus,
        Self::Train,
        Self::Ship,
        Self::Drive,
        Self::Flight,
        Self::CheckIn,
        Self::Sightseeing,
        Self::Restaurant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Taxi => "Taxi",
            Self::Bus => "Bus",
            Self::Train => "Train",
            Self::Ship => "Ship",
            Self::Drive => "Drive",
            Self::Flight => "Flight",
            Self::CheckIn => "Check-in",
            Self::Sightseeing => "Sightseeing",
            Self::Restaurant => "Restaurant",
        }
    }
}

/// One itinerary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub base_price: u32,
    pub destination: DestinationId,
    #[serde(default)]
    pub offers: Vec<OfferId>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Point {
    pub fn duration(&self) -> Duration {
        self.date_to - self.date_from
    }

    pub fn has_offer(&self, id: &OfferId) -> bool {
        self.offers.contains(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub price: u32,
}

/// Offers available for one point kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferGroup {
    #[serde(rename = "type")]
    pub kind: PointKind,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

/// Offers selectable for `kind`; empty when the kind has no group.
pub fn offers_for(groups: &[OfferGroup], kind: PointKind) -> &[Offer] {
    groups
        .iter()
        .find(|g| g.kind == kind)
        .map(|g| g.offers.as_slice())
        .unwrap_or(&[])
}

pub fn find_destination<'a>(
    destinations: &'a [Destination],
    id: &DestinationId,
) -> Option<&'a Destination> {
    destinations.iter().find(|d| &d.id == id)
}

/// Seed document: everything the points model starts from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripData {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub offers: Vec<OfferGroup>,
}

impl TripData {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let data: Self = serde_json::from_str(content).context("invalid trip data")?;
        Ok(data)
    }

    /// Load a trip document; a missing file yields an empty trip.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!("trip data {} not found, starting empty", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "points": [{
                "id": "p1",
                "type": "check-in",
                "date_from": "2026-03-18T10:30:00Z",
                "date_to": "2026-03-18T12:00:00Z",
                "base_price": 120,
                "destination": "ams",
                "offers": ["o1"],
                "is_favorite": true
            }],
            "destinations": [{
                "id": "ams",
                "name": "Amsterdam",
                "description": "Canals.",
                "pictures": [{ "src": "https://example.test/ams.jpg" }]
            }],
            "offers": [{
                "type": "check-in",
                "offers": [{ "id": "o1", "title": "Add breakfast", "price": 50 }]
            }]
        })
    }

    #[test]
    fn test_parse_trip_data() {
        let data = TripData::from_json(&sample_json().to_string()).unwrap();
        assert_eq!(data.points.len(), 1);
        let point = &data.points[0];
        assert_eq!(point.kind, PointKind::CheckIn);
        assert_eq!(point.duration(), Duration::minutes(90));
        assert!(point.has_offer(&OfferId::from("o1")));
        assert_eq!(data.destinations[0].pictures[0].description, "");
        assert_eq!(data.offers[0].offers[0].price, 50);
    }

    #[test]
    fn test_point_defaults() {
        let json = serde_json::json!({
            "id": "p2",
            "type": "taxi",
            "date_from": "2026-03-18T10:30:00Z",
            "date_to": "2026-03-18T11:00:00Z",
            "base_price": 20,
            "destination": "ams"
        });
        let point: Point = serde_json::from_value(json).unwrap();
        assert!(point.offers.is_empty());
        assert!(!point.is_favorite);
    }

    #[test]
    fn test_lookup_helpers() {
        let data = TripData::from_json(&sample_json().to_string()).unwrap();
        assert_eq!(offers_for(&data.offers, PointKind::CheckIn).len(), 1);
        assert!(offers_for(&data.offers, PointKind::Ship).is_empty());
        let ams = find_destination(&data.destinations, &DestinationId::from("ams")).unwrap();
        assert_eq!(ams.name, "Amsterdam");
        assert!(find_destination(&data.destinations, &DestinationId::from("x")).is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = TripData::load(&dir.path().join("nope.json")).unwrap();
        assert!(data.points.is_empty());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(TripData::load(&path).is_err());
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = PointId::generate();
        let b = PointId::generate();
        assert_eq!(a.as_str().len(), 12);
        assert_ne!(a, b);
    }
}
