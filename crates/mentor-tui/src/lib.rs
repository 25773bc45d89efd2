//! mentor-tui: Terminal UI for the mentor chat client
//!
//! This crate provides the TUI layer for mentor, including:
//! - Conversation pane with avatars and scrollback
//! - Growing message input and file path prompt
//! - Drag-and-drop uploads via bracketed paste

mod app;
pub mod conversation;
mod event;
mod layout;
pub mod picker;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;
pub mod widgets;

pub use app::{App, InputMode, Request};
pub use event::{Action, Event, EventHandler};
pub use mentor_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use mentor_engine::{Config, HttpTransport, Reply};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// RAII guard for terminal state restoration.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let transport = Arc::new(HttpTransport::new(config)?);

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let mut guard = TerminalGuard {
        keyboard_enhanced: false,
    };

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Shift+Enter is only distinguishable with the kitty keyboard protocol
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        guard.keyboard_enhanced = true;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    app.keyboard_enhanced = guard.keyboard_enhanced;
    info!(
        base_url = transport.base_url(),
        keyboard_enhanced = app.keyboard_enhanced,
        "tui started"
    );

    // Create event handler (10 Hz tick rate = 100ms)
    let mut events = EventHandler::new(100);

    // Main loop
    let result = run_loop(&mut terminal, &mut app, &mut events, transport).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    transport: Arc<HttpTransport>,
) -> Result<(), Box<dyn std::error::Error>> {
    // At most one request is in flight; the session gate enforces it
    let mut in_flight: Option<JoinHandle<Reply>> = None;

    loop {
        terminal.draw(|frame| layout::render_app(frame, app))?;

        // Handle events
        let Some(event) = events.next().await else {
            break;
        };
        let request = match event {
            Event::Key(key) => app.handle_key(key),
            Event::Paste(text) => app.handle_paste(&text),
            Event::Mouse(mouse) => {
                app.handle_mouse(mouse);
                None
            }
            Event::Tick => {
                app.tick();
                None
            }
            // Terminal will handle resize automatically
            Event::Resize(_, _) => None,
        };

        if let Some(request) = request {
            let transport = Arc::clone(&transport);
            in_flight = Some(tokio::spawn(
                async move { request.run(transport.as_ref()).await },
            ));
        }

        // Check for a completed request (non-blocking)
        if in_flight.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = in_flight.take() {
                match handle.await {
                    Ok(reply) => app.apply(reply),
                    // The permit was dropped with the task, so the gate is open again
                    Err(e) => error!(error = %e, "request task failed"),
                }
            }
        }

        if app.should_quit {
            if let Some(handle) = in_flight.take() {
                handle.abort();
            }
            break;
        }
    }

    info!(messages = app.session.conversation().len(), "tui stopped");
    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
