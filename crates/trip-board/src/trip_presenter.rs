//! Trip presenter — owns the board.
//!
//! Data flows one way: point presenters produce `BoardAction`s, the trip
//! presenter turns them into model mutations, the models notify their
//! observers, and the trip presenter re-renders from those notifications.
//!
//! Interior state lives in a `RefCell`. No borrow of it is held across a call
//! into a model, because the model calls straight back into
//! `handle_model_event`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Duration, DurationRound, Utc};
use tracing::{debug, info};
use trip_proto::{
    Destination, FilterModel, FilterType, ModelError, OfferGroup, Point, PointChange, PointId,
    PointKind, PointsModel, SortField, UpdateType,
};

use crate::action::{BoardAction, PointGesture, UserAction};
use crate::error::BoardError;
use crate::point_presenter::{Mode, PointPresenter, PointPresenterFactory};
use crate::render::{remove, render, Container, RenderPosition};
use crate::views::{EmptyListView, PointsListView, SortView};

/// A model notification, reduced to what the board needs to do about it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelEvent<'a> {
    /// Re-render one point in place.
    Patch(&'a Point),
    /// Rebuild the list, keeping the sort.
    Minor,
    /// Rebuild the list and reset the sort.
    Major,
}

impl<'a> ModelEvent<'a> {
    pub fn from_point_change(update: UpdateType, change: &'a PointChange) -> Self {
        match update {
            UpdateType::Patch => Self::Patch(change.point()),
            UpdateType::Minor => Self::Minor,
            UpdateType::Major => Self::Major,
        }
    }

    /// A filter change has no single point to patch, so `Patch` is promoted
    /// to `Major`.
    pub fn from_filter_change(update: UpdateType) -> ModelEvent<'static> {
        match update {
            UpdateType::Minor => ModelEvent::Minor,
            UpdateType::Patch | UpdateType::Major => ModelEvent::Major,
        }
    }
}

#[derive(Default)]
struct BoardState {
    initialized: bool,
    destinations: Vec<Destination>,
    offers: Vec<OfferGroup>,
    presenters: HashMap<PointId, Box<dyn PointPresenter>>,
    /// Registry keys in render order.
    order: Vec<PointId>,
    current_sort: SortField,
    current_filter: FilterType,
    sort_view: Option<Rc<SortView>>,
    empty_view: Option<Rc<EmptyListView>>,
}

pub struct TripPresenter {
    container: Container,
    points_model: Rc<PointsModel>,
    filter_model: Rc<FilterModel>,
    factory: Box<dyn PointPresenterFactory>,
    list_view: Rc<PointsListView>,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
    this: Weak<TripPresenter>,
    state: RefCell<BoardState>,
}

impl TripPresenter {
    pub fn new(
        container: Container,
        points_model: Rc<PointsModel>,
        filter_model: Rc<FilterModel>,
        factory: impl PointPresenterFactory + 'static,
    ) -> Rc<Self> {
        Self::with_clock(container, points_model, filter_model, factory, Utc::now)
    }

    /// Like `new`, with `clock` used to evaluate time filters.
    pub fn with_clock(
        container: Container,
        points_model: Rc<PointsModel>,
        filter_model: Rc<FilterModel>,
        factory: impl PointPresenterFactory + 'static,
        clock: impl Fn() -> DateTime<Utc> + 'static,
    ) -> Rc<Self> {
        let presenter = Rc::new_cyclic(|this| Self {
            container,
            points_model,
            filter_model,
            factory: Box::new(factory),
            list_view: Rc::new(PointsListView::new()),
            clock: Box::new(clock),
            this: this.clone(),
            state: RefCell::new(BoardState::default()),
        });

        let weak = Rc::downgrade(&presenter);
        presenter.points_model.add_observer(move |update, change| {
            if let Some(presenter) = weak.upgrade() {
                presenter.handle_model_event(ModelEvent::from_point_change(update, change))?;
            }
            Ok(())
        });

        let weak = Rc::downgrade(&presenter);
        presenter.filter_model.add_observer(move |update, _filter| {
            if let Some(presenter) = weak.upgrade() {
                presenter.handle_model_event(ModelEvent::from_filter_change(update))?;
            }
            Ok(())
        });

        presenter
    }

    /// Snapshot reference data and draw the board. Valid once per presenter.
    pub fn initialize(&self) -> Result<(), BoardError> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if state.initialized {
            return Err(BoardError::AlreadyInitialized);
        }
        state.initialized = true;
        state.destinations = self.points_model.destinations().to_vec();
        state.offers = self.points_model.offers().to_vec();
        state.current_filter = self.filter_model.filter();
        info!(
            "trip board init: {} points, filter {}",
            self.points_model.len(),
            state.current_filter.label()
        );
        self.render_board(state);
        Ok(())
    }

    /// Model points passing the active filter, in active sort order.
    pub fn sorted_points(&self) -> Vec<Point> {
        let (sort, filter) = {
            let state = self.state.borrow();
            (state.current_sort, state.current_filter)
        };
        self.visible_points(sort, filter)
    }

    pub fn handle_sort_type_change(&self, field: SortField) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if !state.initialized {
            debug!("sort {} before initialize, ignored", field.label());
            return;
        }
        if state.current_sort == field {
            return;
        }
        debug!("sort {} -> {}", state.current_sort.label(), field.label());
        state.current_sort = field;
        self.clear_board(state);
        self.render_board(state);
    }

    pub fn handle_model_event(&self, event: ModelEvent<'_>) -> Result<(), BoardError> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if !state.initialized {
            debug!("model event {:?} before initialize, ignored", event);
            return Ok(());
        }
        match event {
            ModelEvent::Patch(point) => {
                let presenter = state
                    .presenters
                    .get_mut(&point.id)
                    .ok_or_else(|| BoardError::NotFound(point.id.clone()))?;
                presenter.init(point, &state.destinations, &state.offers);
                debug!("patched point {}", point.id);
            }
            ModelEvent::Minor => {
                state.current_filter = self.filter_model.filter();
                self.clear_board(state);
                self.render_board(state);
            }
            ModelEvent::Major => {
                state.current_sort = SortField::Day;
                state.current_filter = self.filter_model.filter();
                self.clear_board(state);
                self.render_board(state);
            }
        }
        Ok(())
    }

    /// Forward a view's request to the model. The board itself changes only
    /// when the model's notification comes back.
    pub fn handle_view_action(
        &self,
        action: UserAction,
        update: UpdateType,
    ) -> Result<(), BoardError> {
        info!(
            "{} point {} ({})",
            action.label(),
            action.point().id,
            update.label()
        );
        match action {
            UserAction::UpdatePoint(point) => self.points_model.update_point(update, point)?,
            UserAction::AddPoint(point) => self.points_model.add_point(update, point)?,
            UserAction::DeletePoint(point) => self.points_model.delete_point(update, point)?,
        }
        Ok(())
    }

    /// `id` entered edit mode: every other point leaves it.
    pub fn handle_mode_change(&self, id: &PointId) -> Result<(), BoardError> {
        let mut state = self.state.borrow_mut();
        if !state.presenters.contains_key(id) {
            return Err(BoardError::NotFound(id.clone()));
        }
        for (other, presenter) in state.presenters.iter_mut() {
            if other != id {
                presenter.reset_view();
            }
        }
        Ok(())
    }

    /// Route a gesture to the presenter for `id` and carry out what it asks.
    pub fn handle_gesture(&self, id: &PointId, gesture: PointGesture) -> Result<(), BoardError> {
        let actions = {
            let mut state = self.state.borrow_mut();
            let presenter = state
                .presenters
                .get_mut(id)
                .ok_or_else(|| BoardError::NotFound(id.clone()))?;
            presenter.handle_gesture(gesture)
        };
        for action in actions {
            match action {
                BoardAction::ModeChanged(id) => self.handle_mode_change(&id)?,
                BoardAction::View(action, update) => self.handle_view_action(action, update)?,
            }
        }
        Ok(())
    }

    /// Click on the mounted sort control.
    pub fn select_sort(&self, field: SortField) {
        let view = self.state.borrow().sort_view.clone();
        match view {
            Some(view) => view.select(field),
            None => debug!("no sort control mounted"),
        }
    }

    /// Add a fresh point at the top of an unfiltered, day-sorted board.
    pub fn create_point(&self) -> Result<PointId, BoardError> {
        let destination = self
            .points_model
            .destinations()
            .first()
            .map(|d| d.id.clone())
            .ok_or(BoardError::NoDestinations)?;

        if self.filter_model.filter() != FilterType::Everything {
            self.filter_model
                .set_filter(UpdateType::Major, FilterType::Everything)?;
        }

        let now = (self.clock)();
        let now = now.duration_trunc(Duration::minutes(1)).unwrap_or(now);
        let start = now + Duration::hours(1);
        let point = Point {
            id: PointId::generate(),
            kind: PointKind::Flight,
            date_from: start,
            date_to: start + Duration::hours(1),
            base_price: 0,
            destination,
            offers: Vec::new(),
            is_favorite: false,
        };
        let id = point.id.clone();

        // The Minor rebuild triggered by the add renders with this sort.
        let previous =
            std::mem::replace(&mut self.state.borrow_mut().current_sort, SortField::Day);
        let result = self.handle_view_action(UserAction::AddPoint(point), UpdateType::Minor);
        if let Err(BoardError::Model(err)) = &result {
            if !matches!(err, ModelError::Observer(_)) {
                // Rejected before any notification: the board still shows `previous`.
                self.state.borrow_mut().current_sort = previous;
            }
        }
        result.map(|()| id)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    pub fn presenter_count(&self) -> usize {
        self.state.borrow().presenters.len()
    }

    /// Ids of the rendered points, top to bottom.
    pub fn rendered_ids(&self) -> Vec<PointId> {
        self.state.borrow().order.clone()
    }

    pub fn current_sort(&self) -> SortField {
        self.state.borrow().current_sort
    }

    pub fn current_filter(&self) -> FilterType {
        self.state.borrow().current_filter
    }

    pub fn mode_of(&self, id: &PointId) -> Option<Mode> {
        self.state.borrow().presenters.get(id).map(|p| p.mode())
    }

    fn visible_points(&self, sort: SortField, filter: FilterType) -> Vec<Point> {
        let now = (self.clock)();
        let mut points: Vec<Point> = self
            .points_model
            .points()
            .into_iter()
            .filter(|p| filter.matches(p, now))
            .collect();
        sort.apply(&mut points);
        points
    }

    fn render_board(&self, state: &mut BoardState) {
        let sort_view = Rc::new(SortView::new(state.current_sort));
        let weak = self.this.clone();
        sort_view.set_sort_type_handler(move |field| {
            if let Some(presenter) = weak.upgrade() {
                presenter.handle_sort_type_change(field);
            }
        });
        render(sort_view.clone(), &self.container, RenderPosition::BeforeContent);
        state.sort_view = Some(sort_view);

        let points = self.visible_points(state.current_sort, state.current_filter);
        if points.is_empty() {
            let empty = Rc::new(EmptyListView::new(state.current_filter));
            render(empty.clone(), &self.container, RenderPosition::Append);
            state.empty_view = Some(empty);
            debug!("board empty (filter {})", state.current_filter.label());
            return;
        }

        for point in &points {
            self.render_point(state, point);
        }
        render(self.list_view.clone(), &self.container, RenderPosition::Append);
        debug!(
            "rendered {} points (sort {}, filter {})",
            points.len(),
            state.current_sort.label(),
            state.current_filter.label()
        );
    }

    fn render_point(&self, state: &mut BoardState, point: &Point) {
        let mut presenter = self.factory.create(self.list_view.element());
        presenter.init(point, &state.destinations, &state.offers);
        state.order.push(point.id.clone());
        if let Some(mut stale) = state.presenters.insert(point.id.clone(), presenter) {
            stale.destroy();
        }
    }

    fn clear_board(&self, state: &mut BoardState) {
        for (_, mut presenter) in state.presenters.drain() {
            presenter.destroy();
        }
        state.order.clear();
        if let Some(sort_view) = state.sort_view.take() {
            remove(&sort_view, &self.container);
        }
        if let Some(empty) = state.empty_view.take() {
            remove(&empty, &self.container);
        }
        remove(&self.list_view, &self.container);
    }
}
