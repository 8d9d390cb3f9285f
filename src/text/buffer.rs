//! Rope-backed character storage with a mutation counter.
//!
//! All offsets are char indices. Out-of-range arguments are clamped, so every
//! call is either a no-op or a bounded operation.

use ropey::Rope;

/// Mutable character storage.
///
/// `version` increases by one on every call that changes content and never
/// otherwise. Caches keyed on the version (line text, wrap layouts) become
/// stale as soon as it moves; keeping them in sync is the caller's job.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
    version: u64,
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial text at version 0.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            version: 0,
        }
    }

    /// Number of chars. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Current mutation counter.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Insert `text` at `index` (clamped to `len`).
    ///
    /// Returns the offset the text actually landed at, or `None` when nothing
    /// was inserted.
    pub fn insert(&mut self, index: usize, text: &str) -> Option<usize> {
        if text.is_empty() {
            return None;
        }
        let index = index.min(self.len());
        self.rope.insert(index, text);
        self.bump();
        Some(index)
    }

    /// Remove up to `length` chars starting at `index`, clamped to bounds.
    ///
    /// Returns the removed text, or `None` when the clamped range is empty.
    pub fn remove(&mut self, index: usize, length: usize) -> Option<(usize, String)> {
        let (start, end) = self.clamp_range(index, length);
        if start == end {
            return None;
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.bump();
        Some((start, removed))
    }

    /// Replace the whole content.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.bump();
    }

    /// Read up to `length` chars starting at `start`.
    #[must_use]
    pub fn get_text(&self, start: usize, length: usize) -> String {
        let (start, end) = self.clamp_range(start, length);
        self.rope.slice(start..end).to_string()
    }

    /// Char at `index`, if any.
    #[must_use]
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.rope.get_char(index)
    }

    /// Iterate chars from `index` forward.
    pub fn chars_from(&self, index: usize) -> ropey::iter::Chars<'_> {
        self.rope.chars_at(index.min(self.len()))
    }

    /// Full content as a `String`.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn clamp_range(&self, index: usize, length: usize) -> (usize, usize) {
        let len = self.len();
        let start = index.min(len);
        let end = start.saturating_add(length).min(len);
        (start, end)
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
