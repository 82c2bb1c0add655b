//! App — terminal shell around the trip presenter.
//!
//! The loop is synchronous: read a terminal event, turn it into `AppAction`s,
//! dispatch each one to the presenter or the filter model, redraw. Errors the
//! presenter reports are logged and shown in the status line.

use std::io;
use std::rc::Rc;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, error, info};

use trip_board::theme::C_BG;
use trip_board::{BoardError, Mode, PointGesture, RenderContext, TripPresenter, ViewKind};
use trip_proto::{FilterModel, PointId, SortField, UpdateType};

use crate::widgets::price_input::{PriceAction, PriceInput};
use crate::widgets::status_bar::{draw_header, draw_keys_bar, draw_status, InputMode};

/// Lines kept visible under the selected row when scrolling.
const SCROLL_MARGIN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppAction {
    Quit,
    SelectUp,
    SelectDown,
    SelectFirst,
    SelectLast,
    Sort(SortField),
    NextFilter,
    PrevFilter,
    Gesture(PointGesture),
    NewPoint,
    OpenPriceInput,
    ToggleKeys,
}

pub struct App {
    trip: Rc<TripPresenter>,
    filter_model: Rc<FilterModel>,
    total_points: Box<dyn Fn() -> usize>,
    selected: usize,
    scroll: usize,
    price_input: PriceInput,
    status: Option<(String, bool)>,
    show_keys: bool,
    should_quit: bool,
}

impl App {
    pub fn new(
        trip: Rc<TripPresenter>,
        filter_model: Rc<FilterModel>,
        total_points: impl Fn() -> usize + 'static,
        show_keys: bool,
    ) -> Self {
        Self {
            trip,
            filter_model,
            total_points: Box::new(total_points),
            selected: 0,
            scroll: 0,
            price_input: PriceInput::default(),
            status: None,
            show_keys,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal);

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if self.should_quit {
                info!("trip board closing");
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    for action in self.handle_key(key) {
                        self.dispatch(action);
                    }
                }
                _ => {}
            }
        }
    }

    fn selected_id(&self) -> Option<PointId> {
        self.trip.rendered_ids().get(self.selected).cloned()
    }

    fn input_mode(&self) -> InputMode {
        if self.price_input.is_active() {
            return InputMode::Price;
        }
        match self.selected_id().and_then(|id| self.trip.mode_of(&id)) {
            Some(Mode::Editing) => InputMode::Editing,
            _ => InputMode::Normal,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<AppAction> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![AppAction::Quit];
        }

        match self.input_mode() {
            InputMode::Price => match self.price_input.handle_key(key) {
                PriceAction::Confirmed(price) => {
                    vec![AppAction::Gesture(PointGesture::SetPrice(price))]
                }
                PriceAction::Cancelled | PriceAction::Invalid | PriceAction::None => Vec::new(),
            },
            InputMode::Editing => match key.code {
                KeyCode::Esc => vec![AppAction::Gesture(PointGesture::CloseEditor)],
                KeyCode::Enter => vec![AppAction::Gesture(PointGesture::Submit)],
                KeyCode::Char('x') => vec![AppAction::Gesture(PointGesture::Delete)],
                KeyCode::Char('$') => vec![AppAction::OpenPriceInput],
                KeyCode::Char('[') => vec![AppAction::Gesture(PointGesture::PrevDestination)],
                KeyCode::Char(']') => vec![AppAction::Gesture(PointGesture::NextDestination)],
                KeyCode::Char(c @ '1'..='9') => {
                    let idx = c as usize - '1' as usize;
                    vec![AppAction::Gesture(PointGesture::ToggleOffer(idx))]
                }
                _ => Vec::new(),
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => vec![AppAction::Quit],
                KeyCode::Down | KeyCode::Char('j') => vec![AppAction::SelectDown],
                KeyCode::Up | KeyCode::Char('k') => vec![AppAction::SelectUp],
                KeyCode::Home | KeyCode::Char('g') => vec![AppAction::SelectFirst],
                KeyCode::End | KeyCode::Char('G') => vec![AppAction::SelectLast],
                KeyCode::Char('d') => vec![AppAction::Sort(SortField::Day)],
                KeyCode::Char('t') => vec![AppAction::Sort(SortField::Time)],
                KeyCode::Char('p') => vec![AppAction::Sort(SortField::Price)],
                KeyCode::Char('f') => vec![AppAction::NextFilter],
                KeyCode::Char('F') => vec![AppAction::PrevFilter],
                KeyCode::Char('e') | KeyCode::Enter => {
                    vec![AppAction::Gesture(PointGesture::OpenEditor)]
                }
                KeyCode::Char('*') => vec![AppAction::Gesture(PointGesture::ToggleFavorite)],
                KeyCode::Char('x') => vec![AppAction::Gesture(PointGesture::Delete)],
                KeyCode::Char('n') => vec![AppAction::NewPoint],
                KeyCode::Char('K') => vec![AppAction::ToggleKeys],
                _ => Vec::new(),
            },
        }
    }

    fn dispatch(&mut self, action: AppAction) {
        let keep = self.selected_id();
        let result: Result<(), BoardError> = match action {
            AppAction::Quit => {
                self.should_quit = true;
                Ok(())
            }
            AppAction::SelectUp => {
                self.selected = self.selected.saturating_sub(1);
                return;
            }
            AppAction::SelectDown => {
                self.selected += 1;
                self.clamp_selection();
                return;
            }
            AppAction::SelectFirst => {
                self.selected = 0;
                return;
            }
            AppAction::SelectLast => {
                self.selected = self.trip.presenter_count().saturating_sub(1);
                return;
            }
            AppAction::Sort(field) => {
                self.trip.select_sort(field);
                Ok(())
            }
            AppAction::NextFilter | AppAction::PrevFilter => {
                let current = self.filter_model.filter();
                let next = if action == AppAction::NextFilter {
                    current.next()
                } else {
                    current.prev()
                };
                self.filter_model
                    .set_filter(UpdateType::Major, next)
                    .map_err(BoardError::from)
            }
            AppAction::Gesture(gesture) => match &keep {
                Some(id) => self.trip.handle_gesture(id, gesture),
                None => Ok(()),
            },
            AppAction::NewPoint => self.trip.create_point().map(|id| {
                self.status = Some((format!("added point {id}"), false));
                self.select(&id);
            }),
            AppAction::OpenPriceInput => {
                if let Some(price) = self.selected_price() {
                    self.price_input.activate(price);
                }
                Ok(())
            }
            AppAction::ToggleKeys => {
                self.show_keys = !self.show_keys;
                Ok(())
            }
        };

        if let Err(e) = result {
            error!("{:?} failed: {}", action, e);
            self.status = Some((e.to_string(), true));
        } else if action != AppAction::NewPoint {
            // Follow the selected point through re-renders.
            if let Some(id) = keep {
                self.select(&id);
            }
        }
        self.clamp_selection();
    }

    fn selected_price(&self) -> Option<u32> {
        let id = self.selected_id()?;
        self.trip
            .sorted_points()
            .into_iter()
            .find(|p| p.id == id)
            .map(|p| p.base_price)
    }

    fn select(&mut self, id: &PointId) {
        if let Some(pos) = self.trip.rendered_ids().iter().position(|x| x == id) {
            self.selected = pos;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.trip.presenter_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ];
        if self.show_keys {
            constraints.push(Constraint::Length(1));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        draw_header(
            frame,
            chunks[0],
            self.trip.current_filter(),
            self.trip.presenter_count(),
            (self.total_points)(),
        );
        self.draw_board(frame, chunks[1]);

        if self.price_input.is_active() {
            self.price_input.draw(frame, chunks[2]);
        } else {
            let (message, is_error) = match &self.status {
                Some((m, e)) => (Some(m.as_str()), *e),
                None => (None, false),
            };
            draw_status(frame, chunks[2], message, is_error);
        }

        if self.show_keys {
            draw_keys_bar(frame, chunks[3], self.input_mode());
        }
    }

    fn draw_board(&mut self, frame: &mut Frame, area: Rect) {
        let selected = self.selected_id();
        let ctx = RenderContext::new(area.width).with_selected(selected.clone());
        let lines = self.trip.container().lines(&ctx);

        let offset = selected.and_then(|id| {
            let container = self.trip.container();
            container
                .offset_of(&ctx, &ViewKind::Point(id.clone()))
                .or_else(|| container.offset_of(&ctx, &ViewKind::PointEditor(id)))
        });
        let height = area.height as usize;
        match offset {
            Some(offset) if offset < self.scroll => self.scroll = offset.saturating_sub(2),
            Some(offset) if offset + SCROLL_MARGIN > self.scroll + height => {
                self.scroll = offset + SCROLL_MARGIN - height.min(offset + SCROLL_MARGIN);
            }
            None => self.scroll = 0,
            _ => {}
        }

        let paragraph = Paragraph::new(lines).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }
}
