//! Welcome text and input placeholders.

use crate::app::InputMode;

/// Lines of the welcome placeholder shown before the first message.
pub const WELCOME_LINES: [&str; 3] = [
    "Välkommen! Jag är din mentor.",
    "Skriv en fråga och tryck Enter, eller släpp en fil här.",
    "Ctrl+O väljer en fil att ladda upp.",
];

/// Get placeholder text for the input area.
#[must_use]
pub fn input_placeholder(mode: InputMode, busy: bool) -> &'static str {
    match (mode, busy) {
        (InputMode::Message, false) => "Skriv ett meddelande...",
        (InputMode::Message, true) => "Mentorn svarar...",
        (InputMode::PickFile, _) => "Sökväg till filen...",
    }
}
