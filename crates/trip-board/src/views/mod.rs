//! Board views. Each view renders itself into styled lines; hosting and
//! ordering are handled by `render::Container`.

pub mod empty_list;
pub mod point;
pub mod point_edit;
pub mod points_list;
pub mod sort;

pub use empty_list::EmptyListView;
pub use point::PointView;
pub use point_edit::PointEditView;
pub use points_list::PointsListView;
pub use sort::SortView;

use chrono::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Left margin under the date column.
pub(crate) const INDENT: &str = "        ";

/// `30M`, `02H 05M`, `01D 02H 05M`.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    let (days, hours, mins) = (minutes / (24 * 60), (minutes / 60) % 24, minutes % 60);
    if days > 0 {
        format!("{days:02}D {hours:02}H {mins:02}M")
    } else if hours > 0 {
        format!("{hours:02}H {mins:02}M")
    } else {
        format!("{mins:02}M")
    }
}

/// Cut `s` to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(30)), "30M");
        assert_eq!(format_duration(Duration::minutes(125)), "02H 05M");
        assert_eq!(format_duration(Duration::minutes(24 * 60 + 125)), "01D 02H 05M");
        assert_eq!(format_duration(Duration::minutes(-5)), "00M");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Amsterdam", 20), "Amsterdam");
        assert_eq!(truncate("Amsterdam", 5), "Amst…");
        assert_eq!(truncate("Amsterdam", 0), "");
    }
}
