//! Full-width input bar widget.
//!
//! Always visible under the conversation. In message mode it grows with
//! its content, long lines soft-wrapped (Shift+Enter or Ctrl+J for
//! newlines); in file mode it is a one-line path prompt.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::TextInputState;
use crate::app::InputMode;
use crate::conversation::input_placeholder;
use crate::theme::{IconSet, Theme};

const CURSOR: &str = "█";

/// Full-width input bar for text entry.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    icons: &'a IconSet,
    mode: InputMode,
    busy: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            input,
            theme,
            icons,
            mode: InputMode::Message,
            busy: false,
        }
    }

    /// Set the input mode.
    #[must_use]
    pub fn mode(mut self, mode: InputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether a request is in flight.
    #[must_use]
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    /// Build Lines for the soft-wrapped input, `width` columns wide.
    /// Returns the lines to display and which line index contains the cursor.
    fn build_input_lines(&self, width: usize) -> (Vec<Line<'static>>, usize) {
        let prompt = prompt(self.mode);

        if self.input.is_empty() {
            let placeholder = input_placeholder(self.mode, self.busy);
            let line = Line::from(vec![
                Span::styled(prompt, Style::default().fg(self.theme.primary)),
                Span::styled(CURSOR, Style::default().fg(self.theme.text)),
                Span::styled(placeholder, Style::default().fg(self.theme.muted)),
            ]);
            return (vec![line], 0);
        }

        let wrapped = self.input.wrap(width);
        let indent = " ".repeat(prompt.len());
        let mut lines = Vec::with_capacity(wrapped.rows.len());

        for (idx, text) in wrapped.rows.into_iter().enumerate() {
            let prefix = if idx == 0 {
                Span::styled(prompt, Style::default().fg(self.theme.primary))
            } else {
                Span::raw(indent.clone())
            };
            let mut spans = vec![prefix];

            if idx == wrapped.cursor_row {
                let before: String = text.chars().take(wrapped.cursor_col).collect();
                let after: String = text.chars().skip(wrapped.cursor_col).collect();
                spans.push(Span::raw(before));
                spans.push(Span::styled(CURSOR, Style::default().fg(self.theme.text)));
                spans.push(Span::raw(after));
            } else {
                spans.push(Span::raw(text));
            }
            lines.push(Line::from(spans));
        }

        (lines, wrapped.cursor_row)
    }
}

fn prompt(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Message => "> ",
        InputMode::PickFile => "fil> ",
    }
}

/// Columns left for text in an input bar `total_width` wide, after the
/// borders and the prompt.
pub fn text_width(total_width: u16, mode: InputMode) -> usize {
    usize::from(total_width.saturating_sub(2)).saturating_sub(prompt(mode).len())
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.mode {
            InputMode::Message => " Meddelande ",
            InputMode::PickFile => " Ladda upp fil ",
        };
        let border_style = if self.busy {
            Style::default().fg(self.theme.border)
        } else {
            Style::default().fg(self.theme.border_focused)
        };

        let mut block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        if self.busy {
            block = block.title(
                Line::from(Span::styled(
                    format!(" {} väntar på svar ", self.icons.busy()),
                    Style::default().fg(self.theme.warning),
                ))
                .right_aligned(),
            );
        }

        let inner_height = usize::from(area.height.saturating_sub(2));
        let (lines, cursor_line) = self.build_input_lines(text_width(area.width, self.mode));

        // Keep the cursor line visible
        let scroll_offset = if lines.len() <= inner_height {
            0
        } else {
            cursor_line.saturating_sub(inner_height.saturating_sub(1))
        };

        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(self.theme.text))
            .scroll((u16::try_from(scroll_offset).unwrap_or(u16::MAX), 0))
            .render(area, buf);
    }
}
