//! Attach/detach primitives for views.
//!
//! A `Container` is an ordered list of mounted views behind a shared handle;
//! cloning it yields another handle to the same list. Views that host other
//! views (the point list) own a container of their own, so the board forms a
//! small tree that is flattened into lines at draw time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ratatui::text::Line;
use trip_proto::PointId;

/// What a mounted view is, for lookups and assertions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Sort,
    PointsList,
    EmptyList,
    Point(PointId),
    PointEditor(PointId),
}

/// Per-frame drawing parameters.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub width: u16,
    pub selected: Option<PointId>,
}

impl RenderContext {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            selected: None,
        }
    }

    pub fn with_selected(mut self, selected: Option<PointId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_selected(&self, id: &PointId) -> bool {
        self.selected.as_ref() == Some(id)
    }
}

/// Anything that can be mounted into a container.
pub trait View {
    fn kind(&self) -> ViewKind;

    fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>>;

    /// Line offset of the first view of `kind` inside this view's output.
    fn offset_of(&self, _ctx: &RenderContext, kind: &ViewKind) -> Option<usize> {
        (self.kind() == *kind).then_some(0)
    }
}

pub type ViewRef = Rc<dyn View>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPosition {
    /// First child of the container.
    BeforeContent,
    /// Last child of the container.
    #[default]
    Append,
}

#[derive(Clone, Default)]
pub struct Container {
    children: Rc<RefCell<Vec<ViewRef>>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    pub fn kinds(&self) -> Vec<ViewKind> {
        self.children.borrow().iter().map(|v| v.kind()).collect()
    }

    pub fn contains<V: View + ?Sized>(&self, view: &Rc<V>) -> bool {
        self.position(view).is_some()
    }

    pub fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        self.snapshot()
            .iter()
            .flat_map(|child| child.lines(ctx))
            .collect()
    }

    pub fn offset_of(&self, ctx: &RenderContext, kind: &ViewKind) -> Option<usize> {
        let mut offset = 0;
        for child in self.snapshot() {
            if let Some(inner) = child.offset_of(ctx, kind) {
                return Some(offset + inner);
            }
            offset += child.lines(ctx).len();
        }
        None
    }

    fn snapshot(&self) -> Vec<ViewRef> {
        self.children.borrow().clone()
    }

    fn position<V: View + ?Sized>(&self, view: &Rc<V>) -> Option<usize> {
        let target = Rc::as_ptr(view).cast::<()>();
        self.children
            .borrow()
            .iter()
            .position(|child| Rc::as_ptr(child).cast::<()>() == target)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

/// Mount `view` into `container`.
pub fn render(view: ViewRef, container: &Container, position: RenderPosition) {
    let mut children = container.children.borrow_mut();
    match position {
        RenderPosition::BeforeContent => children.insert(0, view),
        RenderPosition::Append => children.push(view),
    }
}

/// Detach `view`. Returns false if it was not mounted there.
pub fn remove<V: View + ?Sized>(view: &Rc<V>, container: &Container) -> bool {
    match container.position(view) {
        Some(idx) => {
            container.children.borrow_mut().remove(idx);
            true
        }
        None => false,
    }
}

/// Swap `old` for `new` at the same position. Returns false (and mounts
/// nothing) if `old` is not mounted there.
pub fn replace<V: View + ?Sized>(new: ViewRef, old: &Rc<V>, container: &Container) -> bool {
    match container.position(old) {
        Some(idx) => {
            container.children.borrow_mut()[idx] = new;
            true
        }
        None => false,
    }
}
