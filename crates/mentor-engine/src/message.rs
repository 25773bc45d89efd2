//! Chat messages and the append-only conversation that holds them.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the client.
    User,
    /// The mentor service.
    Bot,
}

impl Sender {
    /// Short label shown in the entry header.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "Du",
            Sender::Bot => "Mentor",
        }
    }
}

/// A single chat entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message text, shown verbatim.
    pub text: String,
    /// Author of the message.
    pub sender: Sender,
    /// When the message was appended.
    pub timestamp: DateTime<Local>,
}

impl Message {
    /// Create a message written by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Create a message written by the mentor service.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Local::now(),
        }
    }
}

/// Ordered, append-only list of messages for one session.
///
/// Also tracks the welcome placeholder, which is visible only until the
/// first message is appended and never comes back.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    welcome_visible: bool,
}

impl Conversation {
    /// Create an empty conversation with the welcome placeholder showing.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            welcome_visible: true,
        }
    }

    /// Append a message at the end.
    pub fn push(&mut self, message: Message) {
        if self.welcome_visible {
            self.welcome_visible = false;
        }
        self.messages.push(message);
    }

    /// All messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The newest message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether the welcome placeholder should still be shown.
    pub fn welcome_visible(&self) -> bool {
        self.welcome_visible
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let user = Message::user("Hej");
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.text, "Hej");

        let bot = Message::bot("Hej själv");
        assert_eq!(bot.sender, Sender::Bot);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_conversation_preserves_order() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("one"));
        conversation.push(Message::bot("two"));
        conversation.push(Message::user("three"));

        let texts: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(conversation.last().unwrap().text, "three");
    }

    #[test]
    fn test_welcome_hidden_after_first_message() {
        let mut conversation = Conversation::new();
        assert!(conversation.welcome_visible());
        assert!(conversation.is_empty());

        // A bot message hides the placeholder just like a user message
        conversation.push(Message::bot("Laddar upp: a.pdf..."));
        assert!(!conversation.welcome_visible());

        conversation.push(Message::user("more"));
        assert!(!conversation.welcome_visible());
        assert_eq!(conversation.len(), 2);
    }
}
