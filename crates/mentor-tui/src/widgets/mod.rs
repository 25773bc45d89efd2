//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`InputBar`] - Bordered message composer / file path prompt
//! - [`FooterHints`] - Bottom keybinding hints and notices
//! - [`TextInputState`] - Editable buffer behind the input bar

mod footer_hints;
mod input_bar;
mod text_input;

pub use footer_hints::{hints_for_mode, FooterHints, KeyHint};
pub use input_bar::{text_width, InputBar};
pub use text_input::{TextInputState, WrappedInput};
