//! Per-point presenters.
//!
//! The trip presenter owns one `PointPresenter` per rendered point and only
//! talks to it through this trait. Presenters never touch the model: anything
//! that should change data comes back as a `BoardAction`.

use std::rc::Rc;

use tracing::debug;
use trip_proto::point::offers_for;
use trip_proto::{Destination, OfferGroup, Point, UpdateType};

use crate::action::{BoardAction, PointGesture, UserAction};
use crate::render::{remove, render, replace, Container, RenderPosition};
use crate::views::{PointEditView, PointView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Default,
    Editing,
}

pub trait PointPresenter {
    /// Render `point`, or re-render it in place if already shown.
    fn init(&mut self, point: &Point, destinations: &[Destination], offers: &[OfferGroup]);

    /// Unmount everything this presenter rendered.
    fn destroy(&mut self);

    /// Leave edit mode, discarding unsaved changes.
    fn reset_view(&mut self);

    fn mode(&self) -> Mode {
        Mode::Default
    }

    fn handle_gesture(&mut self, _gesture: PointGesture) -> Vec<BoardAction> {
        Vec::new()
    }
}

/// Builds the presenter for one point, rendering into `list`.
pub trait PointPresenterFactory {
    fn create(&self, list: &Container) -> Box<dyn PointPresenter>;
}

/// Row view plus inline editor.
pub struct CardPresenter {
    list: Container,
    point: Option<Point>,
    draft: Option<Point>,
    destinations: Vec<Destination>,
    offers: Vec<OfferGroup>,
    card: Option<Rc<PointView>>,
    editor: Option<Rc<PointEditView>>,
    mode: Mode,
}

impl CardPresenter {
    pub fn new(list: Container) -> Self {
        Self {
            list,
            point: None,
            draft: None,
            destinations: Vec::new(),
            offers: Vec::new(),
            card: None,
            editor: None,
            mode: Mode::Default,
        }
    }

    pub fn draft(&self) -> Option<&Point> {
        self.draft.as_ref()
    }

    fn open_editor(&mut self) -> Vec<BoardAction> {
        let (Some(point), Some(card)) = (&self.point, &self.card) else {
            return Vec::new();
        };
        if self.mode == Mode::Editing {
            return Vec::new();
        }
        let id = point.id.clone();
        let editor = Rc::new(PointEditView::new(point, &self.destinations, &self.offers));
        replace(editor.clone(), card, &self.list);
        self.draft = Some(point.clone());
        self.editor = Some(editor);
        self.mode = Mode::Editing;
        debug!("point {id}: editor open");
        vec![BoardAction::ModeChanged(id)]
    }

    fn close_editor(&mut self) {
        if let (Some(editor), Some(card)) = (self.editor.take(), &self.card) {
            replace(card.clone(), &editor, &self.list);
        }
        self.draft = None;
        self.mode = Mode::Default;
    }

    /// Apply `edit` to the draft and redraw the editor.
    fn edit_draft(&mut self, edit: impl FnOnce(&mut Point, &[Destination], &[OfferGroup])) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        edit(draft, &self.destinations, &self.offers);
        let editor = Rc::new(PointEditView::new(draft, &self.destinations, &self.offers));
        if let Some(prev) = self.editor.replace(editor.clone()) {
            replace(editor, &prev, &self.list);
        }
    }

    fn submit(&mut self) -> Vec<BoardAction> {
        let (Some(point), Some(draft)) = (self.point.clone(), self.draft.clone()) else {
            return Vec::new();
        };
        // Date and price changes move the point under the active sort.
        let update = if draft.date_from != point.date_from
            || draft.date_to != point.date_to
            || draft.base_price != point.base_price
        {
            UpdateType::Minor
        } else {
            UpdateType::Patch
        };
        self.close_editor();
        vec![BoardAction::View(UserAction::UpdatePoint(draft), update)]
    }
}

impl PointPresenter for CardPresenter {
    fn init(&mut self, point: &Point, destinations: &[Destination], offers: &[OfferGroup]) {
        self.point = Some(point.clone());
        self.destinations = destinations.to_vec();
        self.offers = offers.to_vec();

        let card = Rc::new(PointView::new(point, destinations, offers));
        let prev_card = self.card.replace(card.clone());

        match (prev_card, self.mode) {
            (None, _) => render(card, &self.list, RenderPosition::Append),
            (Some(prev), Mode::Default) => {
                replace(card, &prev, &self.list);
            }
            (Some(_), Mode::Editing) => {
                let editor = Rc::new(PointEditView::new(point, destinations, offers));
                self.draft = Some(point.clone());
                if let Some(prev) = self.editor.replace(editor.clone()) {
                    replace(editor, &prev, &self.list);
                }
            }
        }
    }

    fn destroy(&mut self) {
        if let Some(card) = self.card.take() {
            remove(&card, &self.list);
        }
        if let Some(editor) = self.editor.take() {
            remove(&editor, &self.list);
        }
        self.draft = None;
        self.mode = Mode::Default;
    }

    fn reset_view(&mut self) {
        if self.mode == Mode::Editing {
            self.close_editor();
        }
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn handle_gesture(&mut self, gesture: PointGesture) -> Vec<BoardAction> {
        let Some(point) = self.point.clone() else {
            return Vec::new();
        };
        debug!("point {}: {:?}", point.id, gesture);
        match gesture {
            PointGesture::OpenEditor => self.open_editor(),
            PointGesture::CloseEditor => {
                self.reset_view();
                Vec::new()
            }
            PointGesture::ToggleFavorite => {
                let mut update = point;
                update.is_favorite = !update.is_favorite;
                vec![BoardAction::View(
                    UserAction::UpdatePoint(update),
                    UpdateType::Patch,
                )]
            }
            PointGesture::SetPrice(price) => {
                self.edit_draft(|draft, _, _| draft.base_price = price);
                Vec::new()
            }
            PointGesture::NextDestination | PointGesture::PrevDestination => {
                let forward = gesture == PointGesture::NextDestination;
                self.edit_draft(|draft, destinations, _| {
                    if destinations.is_empty() {
                        return;
                    }
                    let len = destinations.len();
                    let current = destinations
                        .iter()
                        .position(|d| d.id == draft.destination);
                    let next = match (current, forward) {
                        (Some(i), true) => (i + 1) % len,
                        (Some(i), false) => (i + len - 1) % len,
                        (None, _) => 0,
                    };
                    draft.destination = destinations[next].id.clone();
                });
                Vec::new()
            }
            PointGesture::ToggleOffer(idx) => {
                self.edit_draft(|draft, _, offers| {
                    let Some(offer) = offers_for(offers, draft.kind).get(idx) else {
                        return;
                    };
                    match draft.offers.iter().position(|id| *id == offer.id) {
                        Some(pos) => {
                            draft.offers.remove(pos);
                        }
                        None => draft.offers.push(offer.id.clone()),
                    }
                });
                Vec::new()
            }
            PointGesture::Submit => self.submit(),
            PointGesture::Delete => {
                self.reset_view();
                vec![BoardAction::View(
                    UserAction::DeletePoint(point),
                    UpdateType::Minor,
                )]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CardPresenterFactory;

impl PointPresenterFactory for CardPresenterFactory {
    fn create(&self, list: &Container) -> Box<dyn PointPresenter> {
        Box::new(CardPresenter::new(list.clone()))
    }
}
