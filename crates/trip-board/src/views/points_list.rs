use ratatui::text::Line;

use crate::render::{Container, RenderContext, View, ViewKind};

/// Host for the per-point views.
#[derive(Debug, Default)]
pub struct PointsListView {
    element: Container,
}

impl PointsListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container the per-point presenters render into.
    pub fn element(&self) -> &Container {
        &self.element
    }
}

impl View for PointsListView {
    fn kind(&self) -> ViewKind {
        ViewKind::PointsList
    }

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        self.element.lines(ctx)
    }

    fn offset_of(&self, ctx: &RenderContext, kind: &ViewKind) -> Option<usize> {
        if *kind == ViewKind::PointsList {
            return Some(0);
        }
        self.element.offset_of(ctx, kind)
    }
}
