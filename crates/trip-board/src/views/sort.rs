//! Sort control shown above the point list.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::text::{Line, Span};
use trip_proto::SortField;

use crate::render::{RenderContext, View, ViewKind};
use crate::theme::{style_active_tab, style_muted, style_secondary, C_SEPARATOR};

type SortHandler = Rc<dyn Fn(SortField)>;

pub struct SortView {
    current: SortField,
    handler: RefCell<Option<SortHandler>>,
}

impl SortView {
    pub fn new(current: SortField) -> Self {
        Self {
            current,
            handler: RefCell::new(None),
        }
    }

    pub fn current(&self) -> SortField {
        self.current
    }

    pub fn set_sort_type_handler(&self, handler: impl Fn(SortField) + 'static) {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    /// The user picked `field` on this control.
    pub fn select(&self, field: SortField) {
        let handler = self.handler.borrow().clone();
        match handler {
            Some(handler) => handler(field),
            None => tracing::debug!("sort {} selected with no handler", field.label()),
        }
    }
}

impl View for SortView {
    fn kind(&self) -> ViewKind {
        ViewKind::Sort
    }

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let mut spans = vec![Span::styled("SORT ", style_muted())];
        for field in SortField::ALL {
            let (mark, style) = if field == self.current {
                ("●", style_active_tab())
            } else {
                ("○", style_secondary())
            };
            spans.push(Span::styled(format!("  {mark} {}", field.label()), style));
        }
        vec![
            Line::from(spans),
            Line::styled(
                "─".repeat(ctx.width as usize),
                ratatui::style::Style::default().fg(C_SEPARATOR),
            ),
        ]
    }
}
