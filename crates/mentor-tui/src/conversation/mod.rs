//! Conversation pane module.
//!
//! The conversation pane fills the screen above the input bar:
//! - the welcome placeholder until the first message arrives
//! - one entry per message (avatar, sender, time, wrapped text)
//! - a waiting indicator while a request is outstanding

mod placeholder;
mod state;
mod widget;

pub use placeholder::{input_placeholder, WELCOME_LINES};
pub use state::{ConversationView, SCROLL_SPEED};
pub use widget::{conversation_lines, ConversationPane};
