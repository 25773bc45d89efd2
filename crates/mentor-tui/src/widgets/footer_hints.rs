//! Footer status bar widget.
//!
//! Minimal status bar format: `Kunde inte ...            [Enter] skicka │ [Ctrl+O] fil`
//!
//! The left side shows a transient notice (if any), the right side the
//! keybindings that apply to the current input mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::InputMode;
use crate::text::visual_width;
use crate::theme::{IconSet, Theme};

/// A single keybinding hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Enter", "Ctrl+O").
    pub key: String,
    /// The action description (e.g., "skicka").
    pub action: String,
    /// Disabled hints are drawn dimmed.
    pub enabled: bool,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
            enabled: true,
        }
    }

    /// Mark the hint as unavailable.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.enabled = !disabled;
        self
    }
}

/// Get hints for the current input mode.
///
/// `keyboard_enhanced` indicates whether the terminal reports Shift+Enter;
/// the hint falls back to Ctrl+J otherwise.
#[must_use]
pub fn hints_for_mode(mode: InputMode, busy: bool, keyboard_enhanced: bool) -> Vec<KeyHint> {
    match mode {
        InputMode::Message => {
            let newline_hint = if keyboard_enhanced {
                KeyHint::new("Shift+Enter", "ny rad")
            } else {
                KeyHint::new("Ctrl+J", "ny rad")
            };
            vec![
                KeyHint::new("Enter", "skicka").disabled(busy),
                newline_hint,
                KeyHint::new("Ctrl+O", "fil").disabled(busy),
                KeyHint::new("PgUp/PgDn", "bläddra"),
                KeyHint::new("Ctrl+C", "avsluta"),
            ]
        }
        InputMode::PickFile => vec![
            KeyHint::new("Enter", "ladda upp").disabled(busy),
            KeyHint::new("Esc", "avbryt"),
            KeyHint::new("Ctrl+C", "avsluta"),
        ],
    }
}

/// Rendered width of a hint: `[key] action`.
fn hint_width(hint: &KeyHint) -> usize {
    visual_width(&hint.key) + visual_width(&hint.action) + 3
}

/// How many leading hints fit in `available` columns.
fn fitting_hints(hints: &[KeyHint], separator_width: usize, available: usize) -> usize {
    let mut used = 0;
    for (i, hint) in hints.iter().enumerate() {
        let width = hint_width(hint) + if i > 0 { separator_width } else { 0 };
        if used + width > available {
            return i;
        }
        used += width;
    }
    hints.len()
}

/// Footer status bar widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    icons: &'a IconSet,
    notice: Option<&'a str>,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            hints,
            theme,
            icons,
            notice: None,
        }
    }

    /// Set a notice to display on the left.
    #[must_use]
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some(notice) = self.notice {
            left_spans.push(Span::styled(
                notice.to_string(),
                Style::default().fg(self.theme.warning),
            ));
        }

        let left_width: usize = left_spans.iter().map(|s| visual_width(&s.content)).sum();
        let total_width = usize::from(area.width);

        // Hints yield to the notice; trailing hints that do not fit are
        // dropped whole
        let separator = format!(" {} ", self.icons.separator());
        let available = if self.notice.is_some() {
            total_width.saturating_sub(left_width + 1)
        } else {
            total_width
        };
        let shown = fitting_hints(self.hints, visual_width(&separator), available);

        for (i, hint) in self.hints[..shown].iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(
                    separator.clone(),
                    Style::default().fg(self.theme.muted),
                ));
            }

            let (key_color, action_color) = if hint.enabled {
                (self.theme.primary, self.theme.subtext)
            } else {
                (self.theme.muted, self.theme.muted)
            };
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(hint.key.clone(), Style::default().fg(key_color)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(
                hint.action.clone(),
                Style::default().fg(action_color),
            ));
        }
        let right_width: usize = right_spans.iter().map(|s| visual_width(&s.content)).sum();

        let padding = total_width.saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
