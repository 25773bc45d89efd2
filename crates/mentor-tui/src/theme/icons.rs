//! Avatars and indicators with a Unicode or ASCII rendition.

use mentor_engine::Sender;

/// Braille spinner frames for the waiting indicator.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// ASCII spinner frames.
const SPINNER_ASCII: [&str; 4] = ["|", "/", "-", "\\"];

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Emoji avatars and Unicode symbols.
    #[default]
    Unicode,
    /// ASCII-only fallback (also used with `NO_COLOR`).
    Ascii,
}

impl IconMode {
    /// Mode for the current environment.
    pub fn from_env() -> Self {
        if super::no_color() {
            Self::Ascii
        } else {
            Self::Unicode
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Avatar glyph for a message author.
    pub fn avatar(&self, sender: Sender) -> &'static str {
        match (self.mode, sender) {
            (IconMode::Unicode, Sender::User) => "🧑",
            (IconMode::Unicode, Sender::Bot) => "🐝",
            (IconMode::Ascii, Sender::User) => "[du]",
            (IconMode::Ascii, Sender::Bot) => "[mentor]",
        }
    }

    /// Spinner frame for the given tick.
    pub fn spinner(&self, frame: usize) -> &'static str {
        match self.mode {
            IconMode::Unicode => SPINNER[frame % SPINNER.len()],
            IconMode::Ascii => SPINNER_ASCII[frame % SPINNER_ASCII.len()],
        }
    }

    /// Marker shown next to the input while a request is outstanding.
    pub fn busy(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "●",
            IconMode::Ascii => "*",
        }
    }

    /// Separator between footer hints.
    pub fn separator(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "│",
            IconMode::Ascii => "|",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatars_keyed_by_sender() {
        let icons = IconSet::new(IconMode::Unicode);
        assert_eq!(icons.avatar(Sender::User), "🧑");
        assert_eq!(icons.avatar(Sender::Bot), "🐝");
        assert_ne!(icons.avatar(Sender::User), icons.avatar(Sender::Bot));
    }

    #[test]
    fn test_ascii_icons_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        let all = [
            icons.avatar(Sender::User),
            icons.avatar(Sender::Bot),
            icons.spinner(0),
            icons.busy(),
            icons.separator(),
        ];
        for icon in all {
            assert!(icon.is_ascii(), "{icon:?} is not ASCII");
        }
    }

    #[test]
    fn test_spinner_wraps() {
        let icons = IconSet::default();
        assert_eq!(icons.spinner(0), icons.spinner(SPINNER.len()));
        assert_ne!(icons.spinner(0), icons.spinner(1));
    }
}
