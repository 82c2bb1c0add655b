//! Sort order for the point list.

use serde::{Deserialize, Serialize};

use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Model order, which is already chronological.
    #[default]
    Day,
    Time,
    Price,
}

impl SortField {
    pub const ALL: [SortField; 3] = [Self::Day, Self::Time, Self::Price];

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Time => "time",
            Self::Price => "price",
        }
    }

    /// Order `points` in place. Stable, so equal keys keep model order.
    pub fn apply(self, points: &mut [Point]) {
        match self {
            Self::Day => {}
            Self::Time => points.sort_by_key(|p| p.date_from),
            Self::Price => points.sort_by_key(|p| p.base_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{DestinationId, PointId, PointKind};
    use chrono::{TimeZone, Utc};

    fn point(id: &str, price: u32, hour: u32) -> Point {
        let from = Utc.with_ymd_and_hms(2026, 3, 18, hour, 0, 0).unwrap();
        Point {
            id: PointId::from(id),
            kind: PointKind::Taxi,
            date_from: from,
            date_to: from + chrono::Duration::hours(1),
            base_price: price,
            destination: DestinationId::from("ams"),
            offers: Vec::new(),
            is_favorite: false,
        }
    }

    fn ids(points: &[Point]) -> Vec<&str> {
        points.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_price_ascending() {
        let mut points = vec![point("a", 200, 10), point("b", 50, 9), point("c", 120, 8)];
        SortField::Price.apply(&mut points);
        assert_eq!(ids(&points), ["b", "c", "a"]);
    }

    #[test]
    fn test_time_ascending() {
        let mut points = vec![point("a", 200, 10), point("b", 50, 9), point("c", 120, 8)];
        SortField::Time.apply(&mut points);
        assert_eq!(ids(&points), ["c", "b", "a"]);
    }

    #[test]
    fn test_day_keeps_model_order() {
        let mut points = vec![point("a", 200, 10), point("b", 50, 9)];
        SortField::Day.apply(&mut points);
        assert_eq!(ids(&points), ["a", "b"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut points = vec![point("a", 50, 10), point("b", 50, 9), point("c", 10, 8)];
        SortField::Price.apply(&mut points);
        assert_eq!(ids(&points), ["c", "a", "b"]);
    }
}
