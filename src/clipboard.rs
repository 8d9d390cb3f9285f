//! Clipboard collaborator.
//!
//! The editor never touches a platform clipboard directly. Hosts hand it a
//! [`Clipboard`] implementation at copy/cut/paste time; failures come back as
//! `None` / `false` and are never retried.

/// Text clipboard access supplied by the host.
pub trait Clipboard {
    /// Current clipboard text, or `None` if unavailable or not text.
    fn try_get_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents. Returns `false` on failure.
    fn try_set_text(&mut self, text: &str) -> bool;
}

/// In-process clipboard for headless hosts and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
        }
    }

    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn try_get_text(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn try_set_text(&mut self, text: &str) -> bool {
        self.contents = Some(text.to_string());
        true
    }
}

/// Fold `\r\n` and lone `\r` into `\n`.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            chars.next_if_eq(&'\n');
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    out
}
