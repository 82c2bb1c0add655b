//! Inline edit form for one point.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use trip_proto::point::{find_destination, offers_for};
use trip_proto::{Destination, OfferGroup, Point, PointId};

use super::truncate;
use crate::render::{RenderContext, View, ViewKind};
use crate::theme::{
    style_editor, style_muted, style_secondary, C_DESTINATION, C_EDITOR_BORDER, C_PRICE,
};

const LABEL_WIDTH: usize = 13;

#[derive(Debug, Clone)]
pub struct PointEditView {
    id: PointId,
    kind: &'static str,
    destination: String,
    description: String,
    from: String,
    to: String,
    price: u32,
    /// (title, price, checked)
    offers: Vec<(String, u32, bool)>,
}

impl PointEditView {
    pub fn new(draft: &Point, destinations: &[Destination], offers: &[OfferGroup]) -> Self {
        let destination = find_destination(destinations, &draft.destination);
        Self {
            id: draft.id.clone(),
            kind: draft.kind.label(),
            destination: destination
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "—".to_string()),
            description: destination
                .map(|d| d.description.clone())
                .unwrap_or_default(),
            from: draft.date_from.format("%d/%m/%y %H:%M").to_string(),
            to: draft.date_to.format("%d/%m/%y %H:%M").to_string(),
            price: draft.base_price,
            offers: offers_for(offers, draft.kind)
                .iter()
                .map(|o| (o.title.clone(), o.price, draft.has_offer(&o.id)))
                .collect(),
        }
    }

    pub fn id(&self) -> &PointId {
        &self.id
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    fn field(label: &str, value: Span<'static>) -> Line<'static> {
        Line::from(vec![
            Span::styled("│ ", Style::default().fg(C_EDITOR_BORDER)),
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), style_secondary()),
            value,
        ])
        .style(style_editor())
    }
}

impl View for PointEditView {
    fn kind(&self) -> ViewKind {
        ViewKind::PointEditor(self.id.clone())
    }

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let width = ctx.width as usize;
        let border = Style::default().fg(C_EDITOR_BORDER);
        let rule = |corner: &str| {
            Line::styled(
                format!("{corner}{}", "─".repeat(width.saturating_sub(1))),
                border,
            )
        };
        let room = width.saturating_sub(LABEL_WIDTH + 2);

        let mut lines = vec![
            rule("┌"),
            Self::field("Type", Span::raw(self.kind)),
            Self::field(
                "Destination",
                Span::styled(
                    format!("‹ {} ›", self.destination),
                    Style::default().fg(C_DESTINATION),
                ),
            ),
        ];
        if !self.description.is_empty() {
            lines.push(Self::field(
                "",
                Span::styled(truncate(&self.description, room), style_muted()),
            ));
        }
        lines.push(Self::field("From", Span::raw(self.from.clone())));
        lines.push(Self::field("To", Span::raw(self.to.clone())));
        lines.push(Self::field(
            "Price",
            Span::styled(format!("€ {}", self.price), Style::default().fg(C_PRICE)),
        ));
        for (i, (title, price, checked)) in self.offers.iter().enumerate() {
            let label = if i == 0 { "Offers" } else { "" };
            let mark = if *checked { "[x]" } else { "[ ]" };
            let text = format!("{mark} {} {title}  +€ {price}", i + 1);
            lines.push(Self::field(label, Span::raw(truncate(&text, room))));
        }
        lines.push(Self::field(
            "",
            Span::styled(
                "enter save · esc cancel · x delete · $ price · [ ] destination",
                style_muted(),
            ),
        ));
        lines.push(rule("└"));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use trip_proto::{Offer, OfferId, PointKind};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_form_fields() {
        let from = Utc.with_ymd_and_hms(2026, 3, 18, 12, 25, 0).unwrap();
        let draft = Point {
            id: PointId::from("p1"),
            kind: PointKind::Flight,
            date_from: from,
            date_to: from + chrono::Duration::minutes(70),
            base_price: 160,
            destination: "cha".into(),
            offers: vec![OfferId::from("lug")],
            is_favorite: false,
        };
        let destinations = vec![Destination {
            id: "cha".into(),
            name: "Chamonix".into(),
            description: "Alpine town.".into(),
            pictures: Vec::new(),
        }];
        let offers = vec![OfferGroup {
            kind: PointKind::Flight,
            offers: vec![
                Offer { id: "lug".into(), title: "Add luggage".into(), price: 30 },
                Offer { id: "meal".into(), title: "Add meal".into(), price: 15 },
            ],
        }];

        let view = PointEditView::new(&draft, &destinations, &offers);
        let all: Vec<String> = view.lines(&RenderContext::new(70)).iter().map(text).collect();

        assert!(all[0].starts_with('┌'));
        assert!(all.iter().any(|l| l.contains("‹ Chamonix ›")));
        assert!(all.iter().any(|l| l.contains("Alpine town.")));
        assert!(all.iter().any(|l| l.contains("18/03/26 12:25")));
        assert!(all.iter().any(|l| l.contains("€ 160")));
        assert!(all.iter().any(|l| l.contains("[x] 1 Add luggage")));
        assert!(all.iter().any(|l| l.contains("[ ] 2 Add meal")));
        assert_eq!(view.kind(), ViewKind::PointEditor(PointId::from("p1")));
    }
}
