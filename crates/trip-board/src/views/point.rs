//! One itinerary row.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use trip_proto::point::{find_destination, offers_for};
use trip_proto::{Destination, OfferGroup, Point, PointId};

use super::{format_duration, truncate, INDENT};
use crate::render::{RenderContext, View, ViewKind};
use crate::theme::{
    style_default, style_muted, style_secondary, style_selected, C_DESTINATION, C_FAVORITE,
    C_KIND, C_PRICE,
};

#[derive(Debug, Clone)]
pub struct PointView {
    id: PointId,
    date: String,
    title_kind: &'static str,
    destination: String,
    schedule: String,
    price: u32,
    offers: Vec<(String, u32)>,
    is_favorite: bool,
}

impl PointView {
    pub fn new(point: &Point, destinations: &[Destination], offers: &[OfferGroup]) -> Self {
        let destination = find_destination(destinations, &point.destination)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "—".to_string());
        let offers = offers_for(offers, point.kind)
            .iter()
            .filter(|o| point.has_offer(&o.id))
            .map(|o| (o.title.clone(), o.price))
            .collect();
        Self {
            id: point.id.clone(),
            date: point.date_from.format("%b %d").to_string().to_uppercase(),
            title_kind: point.kind.label(),
            destination,
            schedule: format!(
                "{} — {} ({})",
                point.date_from.format("%H:%M"),
                point.date_to.format("%H:%M"),
                format_duration(point.duration())
            ),
            price: point.base_price,
            offers,
            is_favorite: point.is_favorite,
        }
    }

    pub fn id(&self) -> &PointId {
        &self.id
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }
}

impl View for PointView {
    fn kind(&self) -> ViewKind {
        ViewKind::Point(self.id.clone())
    }

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let selected = ctx.is_selected(&self.id);
        let width = ctx.width as usize;
        let marker = if selected { "▶ " } else { "  " };
        let star = if self.is_favorite { " ★" } else { "" };
        let price = format!("€ {}", self.price);
        // marker + date + gap, then price and star on the right
        let fixed = 2 + 6 + 2 + price.chars().count() + star.chars().count() + 2;
        let title_room = width.saturating_sub(fixed);
        let title = truncate(
            &format!("{} {}", self.title_kind, self.destination),
            title_room,
        );
        let pad = title_room.saturating_sub(unicode_width::UnicodeWidthStr::width(title.as_str()));
        let (kind_part, dest_part) = match title.strip_prefix(self.title_kind) {
            Some(rest) => (self.title_kind, rest),
            None => (title.as_str(), ""),
        };

        let mut head = Line::from(vec![
            Span::styled(marker, style_default()),
            Span::styled(format!("{:<6}  ", self.date), style_secondary()),
            Span::styled(kind_part.to_string(), Style::default().fg(C_KIND)),
            Span::styled(dest_part.to_string(), Style::default().fg(C_DESTINATION)),
            Span::raw(" ".repeat(pad + 2)),
            Span::styled(price, Style::default().fg(C_PRICE)),
            Span::styled(star, Style::default().fg(C_FAVORITE)),
        ]);
        if selected {
            head = head.patch_style(style_selected());
        }

        let mut lines = vec![
            head,
            Line::from(Span::styled(
                format!("{INDENT}  {}", self.schedule),
                style_secondary(),
            )),
        ];
        for (title, price) in &self.offers {
            let text = format!("{INDENT}  + {title}  € {price}");
            lines.push(Line::from(Span::styled(truncate(&text, width), style_muted())));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use trip_proto::{Offer, OfferId, PointKind};

    fn fixture() -> (Point, Vec<Destination>, Vec<OfferGroup>) {
        let from = Utc.with_ymd_and_hms(2026, 3, 18, 10, 30, 0).unwrap();
        let point = Point {
            id: PointId::from("p1"),
            kind: PointKind::Taxi,
            date_from: from,
            date_to: from + chrono::Duration::minutes(30),
            base_price: 20,
            destination: "ams".into(),
            offers: vec![OfferId::from("o1")],
            is_favorite: true,
        };
        let destinations = vec![Destination {
            id: "ams".into(),
            name: "Amsterdam".into(),
            description: String::new(),
            pictures: Vec::new(),
        }];
        let offers = vec![OfferGroup {
            kind: PointKind::Taxi,
            offers: vec![
                Offer { id: "o1".into(), title: "Upgrade".into(), price: 120 },
                Offer { id: "o2".into(), title: "Radio".into(), price: 60 },
            ],
        }];
        (point, destinations, offers)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_row_content() {
        let (point, destinations, offers) = fixture();
        let view = PointView::new(&point, &destinations, &offers);
        let lines = view.lines(&RenderContext::new(60));

        assert_eq!(lines.len(), 3);
        let head = text(&lines[0]);
        assert!(head.contains("MAR 18"));
        assert!(head.contains("Taxi Amsterdam"));
        assert!(head.contains("€ 20"));
        assert!(head.ends_with('★'));
        assert!(text(&lines[1]).contains("10:30 — 11:00 (30M)"));
        assert!(text(&lines[2]).contains("Upgrade"));
    }

    #[test]
    fn test_unknown_destination_and_selection() {
        let (mut point, destinations, offers) = fixture();
        point.destination = "nowhere".into();
        let view = PointView::new(&point, &destinations, &offers);
        let ctx = RenderContext::new(60).with_selected(Some(PointId::from("p1")));
        let head = text(&view.lines(&ctx)[0]);
        assert!(head.starts_with("▶ "));
        assert!(head.contains("Taxi —"));
        assert_eq!(view.kind(), ViewKind::Point(PointId::from("p1")));
    }
}
