//! Test utilities for mentor-tui rendering and input tests.
//!
//! This module provides helpers for creating apps and test terminals,
//! converting buffers to strings, building key events, and a transport
//! with canned outcomes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mentor_engine::{Config, Transport, TransportError, UploadFile, UploadStatus};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use crate::app::App;
use crate::theme::{IconMode, IconSet, Theme};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 60;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 20;

/// Create a test terminal with the default dimensions.
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT)
}

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app with ASCII icons so rendered text is stable.
pub fn create_test_app() -> App {
    let mut app = App::new(&Config::default());
    app.theme = Theme::default();
    app.icons = IconSet::new(IconMode::Ascii);
    app
}

/// A plain key press.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// A Ctrl+letter key press.
pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// This produces a simple text representation of the buffer content,
/// suitable for snapshot comparison.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Transport with canned outcomes. Without an outcome every call fails.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    answer: Option<String>,
    upload_status: Option<&'static str>,
}

impl ScriptedTransport {
    /// Answers every question with `answer`.
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            ..Self::default()
        }
    }

    /// Acknowledges every upload with `status`.
    pub fn uploads(status: &'static str) -> Self {
        Self {
            upload_status: Some(status),
            ..Self::default()
        }
    }

    /// Fails every call.
    pub fn offline() -> Self {
        Self::default()
    }

    fn unreachable() -> TransportError {
        TransportError::Status(reqwest::StatusCode::BAD_GATEWAY)
    }
}

impl Transport for ScriptedTransport {
    async fn ask(&self, _message: &str) -> Result<String, TransportError> {
        self.answer.clone().ok_or_else(Self::unreachable)
    }

    async fn upload(&self, _file: &UploadFile) -> Result<UploadStatus, TransportError> {
        self.upload_status
            .map(UploadStatus::from_status)
            .ok_or_else(Self::unreachable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.icons.mode(), IconMode::Ascii);
        assert!(app.session.conversation().welcome_visible());
    }

    #[tokio::test]
    async fn test_offline_transport_fails_like_a_request() {
        let transport = ScriptedTransport::offline();
        let err = transport.ask("hej").await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Status(reqwest::StatusCode::BAD_GATEWAY)
        ));

        let file = UploadFile::new("rapport.pdf");
        let err = transport.upload(&file).await.unwrap_err();
        assert!(matches!(err, TransportError::Status(_)));
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}
