//! File selection: the path prompt and drag-and-drop.
//!
//! Terminals deliver a file dropped onto the window as a bracketed paste
//! of its path. Depending on the terminal the path arrives plain, quoted,
//! with backslash-escaped spaces, or as a `file://` URI, and several files
//! are separated by spaces or newlines.

use std::path::{Path, PathBuf};

/// Split pasted text into path tokens, honoring quotes and backslash escapes.
pub fn split_paths(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') => {
                if let Some(next) = chars.next() {
                    if next != '"' && next != '\\' {
                        current.push('\\');
                    }
                    current.push(next);
                }
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                in_token = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_token = true;
                }
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}

/// Turn one token into a path: `file://` URIs are decoded, `~` is expanded.
pub fn token_to_path(token: &str) -> PathBuf {
    if token.starts_with("file://") {
        if let Some(path) = url::Url::parse(token)
            .ok()
            .and_then(|u| u.to_file_path().ok())
        {
            return path;
        }
    }
    PathBuf::from(shellexpand::tilde(token).into_owned())
}

/// Interpret a paste as a file drop.
///
/// Returns the first file when every token names an existing file, so
/// ordinary text that happens to contain a file name is still pasted as text.
pub fn dropped_file(text: &str) -> Option<PathBuf> {
    let paths: Vec<PathBuf> = split_paths(text).iter().map(|t| token_to_path(t)).collect();
    if paths.is_empty() || !paths.iter().all(|p| p.is_file()) {
        return None;
    }
    paths.into_iter().next()
}

/// Path typed into the file prompt, if any.
pub fn picked_path(text: &str) -> Option<PathBuf> {
    split_paths(text).first().map(|t| token_to_path(t))
}

/// Whether `path` can be uploaded.
pub fn is_uploadable(path: &Path) -> bool {
    path.is_file()
}
