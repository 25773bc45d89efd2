//! Conversation pane widget.
//!
//! ```text
//! ┌─ Mentor ─────────────────────────────┐
//! │ 🧑 Du  14:02                         │
//! │    Jag känner mig stressad inför     │
//! │    veckan.                           │
//! │                                      │
//! │ 🐝 Mentor  14:02                     │
//! │    Vad är det som känns tyngst?      │
//! │                                      │
//! │ 🐝 ⠙ Mentorn tänker...               │
//! └──────────────────────────────────────┘
//! ```

use mentor_engine::{Conversation, Message, Sender};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use super::placeholder::WELCOME_LINES;
use super::state::ConversationView;
use crate::text::wrap_text;
use crate::theme::{IconSet, Theme};

/// Indentation of message text under the header.
const TEXT_INDENT: usize = 3;

/// Conversation pane widget.
pub struct ConversationPane<'a> {
    conversation: &'a Conversation,
    theme: &'a Theme,
    icons: &'a IconSet,
    busy: bool,
    tick: usize,
}

impl<'a> ConversationPane<'a> {
    /// Create a new conversation pane.
    pub fn new(conversation: &'a Conversation, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            conversation,
            theme,
            icons,
            busy: false,
            tick: 0,
        }
    }

    /// Show the waiting indicator, animated by `tick`.
    #[must_use]
    pub fn busy(mut self, busy: bool, tick: usize) -> Self {
        self.busy = busy;
        self.tick = tick;
        self
    }

    fn render_welcome(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(Span::styled(
            self.icons.avatar(Sender::Bot),
            Style::default().fg(self.theme.secondary),
        ))];
        lines.push(Line::default());
        for (i, text) in WELCOME_LINES.iter().enumerate() {
            let style = if i == 0 {
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            lines.push(Line::from(Span::styled(*text, style)));
        }

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let top = area.y + area.height.saturating_sub(height) / 2;
        let welcome_area = Rect::new(area.x, top, area.width, height.min(area.height));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(welcome_area, buf);
    }
}

/// Build the display lines for every message, plus the waiting indicator.
pub fn conversation_lines(
    conversation: &Conversation,
    busy: Option<usize>,
    width: usize,
    theme: &Theme,
    icons: &IconSet,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, message) in conversation.messages().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        push_message(&mut lines, message, width, theme, icons);
    }

    if let Some(tick) = busy {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(vec![
            Span::styled(
                icons.avatar(Sender::Bot),
                Style::default().fg(theme.secondary),
            ),
            Span::raw(" "),
            Span::styled(icons.spinner(tick), Style::default().fg(theme.secondary)),
            Span::styled(" Mentorn tänker...", Style::default().fg(theme.muted)),
        ]));
    }

    lines
}

fn push_message(
    lines: &mut Vec<Line<'static>>,
    message: &Message,
    width: usize,
    theme: &Theme,
    icons: &IconSet,
) {
    let accent = match message.sender {
        Sender::User => theme.primary,
        Sender::Bot => theme.secondary,
    };

    lines.push(Line::from(vec![
        Span::styled(icons.avatar(message.sender), Style::default().fg(accent)),
        Span::raw(" "),
        Span::styled(
            message.sender.label(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            message.timestamp.format("%H:%M").to_string(),
            Style::default().fg(theme.subtext),
        ),
    ]));

    let indent = " ".repeat(TEXT_INDENT);
    for text_line in wrap_text(&message.text, width.saturating_sub(TEXT_INDENT)) {
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(text_line, Style::default().fg(theme.text)),
        ]));
    }
}

impl StatefulWidget for ConversationPane<'_> {
    type State = ConversationView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let mut block = Block::default()
            .title(" Mentor ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);

        if self.conversation.welcome_visible() {
            block.render(area, buf);
            if inner.height > 0 && inner.width > 0 {
                self.render_welcome(inner, buf);
            }
            return;
        }

        let busy = self.busy.then_some(self.tick);
        let lines = conversation_lines(
            self.conversation,
            busy,
            usize::from(inner.width),
            self.theme,
            self.icons,
        );

        // Sync before drawing the border so the scroll hint is current
        let viewport = usize::from(inner.height);
        state.sync(self.conversation.len(), lines.len(), viewport);
        let first = state.first_visible_line(lines.len(), viewport);

        if !state.is_following() {
            block = block.title(
                Line::from(Span::styled(
                    " ↓ PgDn ",
                    Style::default().fg(self.theme.warning),
                ))
                .right_aligned(),
            );
        }
        block.render(area, buf);

        let visible: Vec<Line<'static>> = lines.into_iter().skip(first).take(viewport).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::IconMode;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(conversation: &Conversation, view: &mut ConversationView, busy: bool) -> String {
        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();

        terminal
            .draw(|frame| {
                let pane = ConversationPane::new(conversation, &theme, &icons).busy(busy, 0);
                frame.render_stateful_widget(pane, frame.area(), view);
            })
            .unwrap();

        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn test_welcome_shown_when_empty() {
        let conversation = Conversation::new();
        let screen = render(&conversation, &mut ConversationView::new(), false);
        assert!(screen.contains("Mentor"));
        assert!(screen.contains("Välkommen!"));
    }

    #[test]
    fn test_welcome_hidden_after_message() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("Hej mentor"));

        let screen = render(&conversation, &mut ConversationView::new(), false);
        assert!(!screen.contains("Välkommen!"));
        assert!(screen.contains("[du] Du"));
        assert!(screen.contains("Hej mentor"));
    }

    #[test]
    fn test_busy_indicator() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("Hej"));

        let screen = render(&conversation, &mut ConversationView::new(), true);
        assert!(screen.contains("Mentorn tänker..."));
    }

    #[test]
    fn test_newest_entry_visible() {
        let mut conversation = Conversation::new();
        for i in 0..10 {
            conversation.push(Message::user(format!("fråga {i}")));
            conversation.push(Message::bot(format!("svar {i}")));
        }

        let mut view = ConversationView::new();
        let screen = render(&conversation, &mut view, false);
        assert!(screen.contains("svar 9"));
        assert!(!screen.contains("fråga 0"));

        // Scrolled up, the latest entry leaves the viewport
        view.scroll_up(20);
        let screen = render(&conversation, &mut view, false);
        assert!(!screen.contains("svar 9"));
        assert!(screen.contains("PgDn"));

        // A new message snaps back to the bottom
        conversation.push(Message::bot("svar 10"));
        let screen = render(&conversation, &mut view, false);
        assert!(screen.contains("svar 10"));
        assert!(view.is_following());
    }

    #[test]
    fn test_lines_keep_order_and_wrap() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("kort"));
        conversation.push(Message::bot("en lite längre mening som måste brytas"));

        let theme = Theme::default();
        let icons = IconSet::new(IconMode::Ascii);
        let lines = conversation_lines(&conversation, None, 20, &theme, &icons);
        let text: Vec<String> = lines.iter().map(ToString::to_string).collect();

        assert!(text[0].starts_with("[du] Du"));
        assert_eq!(text[1], "   kort");
        assert_eq!(text[2], "");
        assert!(text[3].starts_with("[mentor] Mentor"));
        assert!(text.len() > 5, "long reply should wrap: {text:?}");
        assert!(text.iter().all(|l| crate::text::visual_width(l) <= 20 + 10));
    }

    #[test]
    fn test_minimum_size() {
        let conversation = Conversation::new();
        let theme = Theme::default();
        let icons = IconSet::default();
        let mut view = ConversationView::new();
        let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();

        terminal
            .draw(|frame| {
                let pane = ConversationPane::new(&conversation, &theme, &icons);
                frame.render_stateful_widget(pane, frame.area(), &mut view);
            })
            .unwrap();
    }
}
