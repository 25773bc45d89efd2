//! Scroll state for the conversation pane.
//!
//! Offsets count lines up from the bottom, so zero means the newest entry
//! is visible. Any new message snaps the view back to the bottom.

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Conversation pane scroll state.
#[derive(Debug, Default)]
pub struct ConversationView {
    /// Lines scrolled up from the bottom.
    offset: usize,
    /// Largest useful offset, from the last render.
    max_offset: usize,
    /// Viewport height from the last render.
    viewport: usize,
    /// Message count at the last render.
    seen: usize,
}

impl ConversationView {
    /// Create a view pinned to the bottom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines scrolled up from the bottom.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the newest entry is in view.
    pub fn is_following(&self) -> bool {
        self.offset == 0
    }

    /// Scroll towards older entries.
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = (self.offset + lines).min(self.max_offset);
    }

    /// Scroll towards newer entries.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Scroll up by one screen.
    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    /// Scroll down by one screen.
    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    /// Jump to the newest entry.
    pub fn follow_latest(&mut self) {
        self.offset = 0;
    }

    fn page_size(&self) -> usize {
        self.viewport.saturating_sub(1).max(1)
    }

    /// Record the rendered extent. Snaps to the bottom when the message
    /// count changed since the last render.
    pub fn sync(&mut self, message_count: usize, total_lines: usize, viewport: usize) {
        if message_count != self.seen {
            self.seen = message_count;
            self.follow_latest();
        }
        self.viewport = viewport;
        self.max_offset = total_lines.saturating_sub(viewport);
        self.offset = self.offset.min(self.max_offset);
    }

    /// Index of the first line to draw.
    pub fn first_visible_line(&self, total_lines: usize, viewport: usize) -> usize {
        total_lines
            .saturating_sub(viewport)
            .saturating_sub(self.offset)
    }
}
