//! Text wrapping utilities.

use unicode_width::UnicodeWidthStr;

/// Wrap a plain text string to the specified width.
/// Returns a vector of wrapped lines; explicit newlines are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Get the visual width of a string in terminal cells.
///
/// Accounts for wide characters (CJK, emoji) that take 2 cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        let wrapped = wrap_text("Det där är en fin tanke att fundera på", 12);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| visual_width(l) <= 12));
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        assert_eq!(wrap_text("rad ett\nrad två", 40), vec!["rad ett", "rad två"]);
    }

    #[test]
    fn test_wrap_zero_width() {
        assert_eq!(wrap_text("a\nb", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_visual_width_emoji() {
        assert_eq!(visual_width("hej"), 3);
        assert_eq!(visual_width("🐝"), 2);
    }
}
