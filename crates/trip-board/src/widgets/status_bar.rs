//! Header, status line and keybindings footer.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use trip_proto::FilterType;

use trip_board::theme::{
    style_active_tab, style_error, style_secondary, C_ACCENT, C_KIND, C_MUTED, C_PRICE,
    C_SECONDARY,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Price,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "BOARD",
            Self::Editing => "EDIT",
            Self::Price => "PRICE",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_SECONDARY,
            Self::Editing => C_KIND,
            Self::Price => C_PRICE,
        }
    }
}

/// Title plus filter tabs, point count on the right.
pub fn draw_header(frame: &mut Frame, area: Rect, active: FilterType, shown: usize, total: usize) {
    let mut spans = vec![Span::styled(
        " TRIP ",
        Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
    )];
    for filter in FilterType::ALL {
        let style = if filter == active {
            style_active_tab()
        } else {
            style_secondary()
        };
        spans.push(Span::styled(format!("  {}", filter.label()), style));
    }
    let count = format!("{shown}/{total} points ");
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let pad = (area.width as usize).saturating_sub(used + count.len());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(count, Style::default().fg(C_MUTED)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Last message, red when it reports a failure.
pub fn draw_status(frame: &mut Frame, area: Rect, message: Option<&str>, is_error: bool) {
    let style = if is_error {
        style_error()
    } else {
        style_secondary()
    };
    let line = Line::from(Span::styled(format!(" {}", message.unwrap_or("")), style));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let keys = match mode {
        InputMode::Normal => {
            " ↑↓/jk select  d/t/p sort  f/F filter  e edit  * favorite  x delete  n new  K keys  q quit"
        }
        InputMode::Editing => {
            " enter save  esc cancel  $ price  [/] destination  1-9 offers  x delete"
        }
        InputMode::Price => " digits  enter set  esc cancel",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
