//! Editable text buffer behind the input bar.
//!
//! The cursor is a character index; byte offsets are derived on demand so
//! multi-byte text (å, ä, ö, emoji) edits safely.

use unicode_width::UnicodeWidthChar;

/// Content soft-wrapped to a fixed width, with the cursor's place in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedInput {
    /// Visual rows, without the newlines that separated logical lines.
    pub rows: Vec<String>,
    /// Row holding the cursor.
    pub cursor_row: usize,
    /// Cursor column within that row, as a character index.
    pub cursor_col: usize,
}

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Submitted entries for up/down navigation.
    history: Vec<String>,
    /// Position in history while navigating, counted from the newest entry.
    history_index: Option<usize>,
    /// Current input saved while navigating history.
    saved_input: String,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
            saved_input: String::new(),
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of lines in the content (at least one).
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Rows the input area should occupy when wrapped to `width` columns,
    /// growing with content up to `max`.
    pub fn visible_rows(&self, width: usize, max: u16) -> u16 {
        let rows = u16::try_from(self.wrap(width).rows.len()).unwrap_or(u16::MAX);
        rows.clamp(1, max.max(1))
    }

    /// Soft-wrap the content to `width` display columns.
    ///
    /// Rows break at the column limit rather than at words so every
    /// character keeps its place and the cursor maps exactly. The cursor
    /// needs a cell of its own: at the end of a full row it moves to a
    /// new empty row.
    pub fn wrap(&self, width: usize) -> WrappedInput {
        let width = width.max(1);
        let mut rows = Vec::new();
        let mut cursor = (0, 0);
        let mut index = 0;

        for line in self.content.split('\n') {
            let mut row = String::new();
            let mut row_width = 0;

            for ch in line.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if row_width + ch_width > width && !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                if index == self.cursor {
                    cursor = (rows.len(), row.chars().count());
                }
                row.push(ch);
                row_width += ch_width;
                index += 1;
            }

            if index == self.cursor {
                if row_width >= width {
                    rows.push(std::mem::take(&mut row));
                }
                cursor = (rows.len(), row.chars().count());
            }
            rows.push(row);
            // The newline itself
            index += 1;
        }

        WrappedInput {
            rows,
            cursor_row: cursor.0,
            cursor_col: cursor.1,
        }
    }

    /// Line and column (both character based) of the cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before: String = self.content.chars().take(self.cursor).collect();
        let line = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map_or(0, |last| last.chars().count());
        (line, col)
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Take the content, clearing the state.
    pub fn take(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        content
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Add current content to history and clear.
    pub fn submit(&mut self) -> String {
        let content = self.take();
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    fn load_history(&mut self, index: usize) {
        self.history_index = Some(index);
        self.content = self.history[self.history.len() - 1 - index].clone();
        self.cursor = self.char_len();
    }

    /// Navigate to previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                self.load_history(0);
            }
            Some(i) if i + 1 < self.history.len() => self.load_history(i + 1),
            Some(_) => {}
        }
    }

    /// Navigate to next history entry.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                self.content = std::mem::take(&mut self.saved_input);
                self.cursor = self.char_len();
            }
            Some(i) => self.load_history(i - 1),
        }
    }
}
