//! PriceInput — wraps tui-input for the editor's price field.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use trip_board::theme::{style_error, C_EDITOR_BG, C_MUTED, C_PRICE};

pub enum PriceAction {
    Confirmed(u32),
    Cancelled,
    Invalid,
    None,
}

#[derive(Default)]
pub struct PriceInput {
    input: Input,
    active: bool,
    invalid: bool,
}

impl PriceInput {
    pub fn activate(&mut self, current: u32) {
        self.input = Input::new(current.to_string());
        self.active = true;
        self.invalid = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Enter parses and closes, Esc closes, digits and editing keys go to
    /// the input. Anything else is swallowed.
    pub fn handle_key(&mut self, key: KeyEvent) -> PriceAction {
        match key.code {
            KeyCode::Esc => {
                self.active = false;
                PriceAction::Cancelled
            }
            KeyCode::Enter => match self.input.value().trim().parse::<u32>() {
                Ok(price) => {
                    self.active = false;
                    PriceAction::Confirmed(price)
                }
                Err(_) => {
                    self.invalid = true;
                    PriceAction::Invalid
                }
            },
            KeyCode::Char(c) if !c.is_ascii_digit() => PriceAction::None,
            _ => {
                self.invalid = false;
                self.input.handle_event(&Event::Key(key));
                PriceAction::None
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let value = self.value();
        let mut spans = vec![
            Span::styled(" price € ", Style::default().fg(C_MUTED)),
            Span::styled(value.to_string(), Style::default().fg(C_PRICE)),
        ];
        if self.invalid {
            spans.push(Span::styled("  not a price", style_error()));
        }
        let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(C_EDITOR_BG));
        frame.render_widget(paragraph, area);

        if self.active {
            let cursor_x = area.x + 9 + self.input.visual_cursor() as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_and_confirm() {
        let mut input = PriceInput::default();
        input.activate(20);
        input.handle_key(key(KeyCode::Char('5')));
        input.handle_key(key(KeyCode::Char('x')));
        assert_eq!(input.value(), "205");
        assert!(matches!(
            input.handle_key(key(KeyCode::Enter)),
            PriceAction::Confirmed(205)
        ));
        assert!(!input.is_active());
    }

    #[test]
    fn test_empty_is_invalid() {
        let mut input = PriceInput::default();
        input.activate(7);
        input.handle_key(key(KeyCode::Backspace));
        assert!(matches!(input.handle_key(key(KeyCode::Enter)), PriceAction::Invalid));
        assert!(input.is_active());
        assert!(matches!(input.handle_key(key(KeyCode::Esc)), PriceAction::Cancelled));
    }
}
