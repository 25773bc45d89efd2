//! Main layout with 3 regions.
//!
//! Regions:
//! 1. Conversation pane (top, expands)
//! 2. Input bar (grows with its content)
//! 3. Footer hints (bottom, 1 line)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::conversation::ConversationPane;
use crate::widgets::{hints_for_mode, text_width, FooterHints, InputBar};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 30;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 8;

/// Render the whole app.
pub fn render_app(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let message = Paragraph::new(format!(
            "Fönstret är för litet ({}x{}, minst {MIN_WIDTH}x{MIN_HEIGHT})",
            area.width, area.height
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.theme.warning));
        frame.render_widget(message, area);
        return;
    }

    let busy = app.is_busy();
    let input_rows = match app.mode {
        InputMode::Message => app
            .input
            .visible_rows(text_width(area.width, app.mode), app.input_max_lines),
        InputMode::PickFile => 1,
    };

    // Divide into: Conversation | Input | Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                 // Conversation (expands)
            Constraint::Length(input_rows + 2), // Input with borders
            Constraint::Length(1),              // Footer hints
        ])
        .split(area);

    let pane = ConversationPane::new(app.session.conversation(), &app.theme, &app.icons)
        .busy(busy, app.tick);
    frame.render_stateful_widget(pane, chunks[0], &mut app.view);

    let input_bar = InputBar::new(app.active_input(), &app.theme, &app.icons)
        .mode(app.mode)
        .busy(busy);
    frame.render_widget(input_bar, chunks[1]);

    let hints = hints_for_mode(app.mode, busy, app.keyboard_enhanced);
    let footer =
        FooterHints::new(&hints, &app.theme, &app.icons).notice(app.notice.as_deref());
    frame.render_widget(footer, chunks[2]);
}
