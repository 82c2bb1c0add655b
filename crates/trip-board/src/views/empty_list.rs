use ratatui::text::{Line, Span};
use trip_proto::FilterType;

use crate::render::{RenderContext, View, ViewKind};
use crate::theme::style_secondary;

/// Placeholder shown when no point passes the active filter.
#[derive(Debug)]
pub struct EmptyListView {
    filter: FilterType,
}

impl EmptyListView {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn message(&self) -> &'static str {
        self.filter.empty_message()
    }
}

impl View for EmptyListView {
    fn kind(&self) -> ViewKind {
        ViewKind::EmptyList
    }

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let message = super::truncate(self.message(), ctx.width as usize);
        vec![
            Line::raw(""),
            Line::from(Span::styled(message, style_secondary())).centered(),
        ]
    }
}
