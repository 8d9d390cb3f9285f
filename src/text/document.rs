//! Text buffer paired with its line index.
//!
//! Every content mutation goes through [`Document`], so the line-start table
//! is patched in lockstep with the rope and never needs a full rescan.

use crate::text::buffer::TextBuffer;
use crate::text::history::Edit;
use crate::text::line_index::LineIndex;

/// Resolved line for an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineLocation {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Character storage plus incrementally maintained line starts.
#[derive(Clone, Debug, Default)]
pub struct Document {
    buffer: TextBuffer,
    lines: LineIndex,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::with_text(text),
            lines: LineIndex::from_chars(text.chars()),
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.buffer.version()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    #[must_use]
    pub fn get_text(&self, start: usize, length: usize) -> String {
        self.buffer.get_text(start, length)
    }

    #[must_use]
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.buffer.char_at(index)
    }

    /// Insert text, returning the edit that was actually applied.
    pub fn insert(&mut self, index: usize, text: &str) -> Option<Edit> {
        let index = self.buffer.insert(index, text)?;
        self.lines.on_insert(index, text, text.chars().count());
        Some(Edit::Insert {
            index,
            text: text.to_string(),
        })
    }

    /// Remove a clamped range, returning the edit that was actually applied.
    pub fn remove(&mut self, index: usize, length: usize) -> Option<Edit> {
        let (index, text) = self.buffer.remove(index, length)?;
        self.lines.on_remove(index, text.chars().count());
        Some(Edit::Delete { index, text })
    }

    /// Apply an edit record.
    pub fn apply(&mut self, edit: &Edit) -> Option<Edit> {
        match edit {
            Edit::Insert { index, text } => self.insert(*index, text),
            Edit::Delete { index, text } => self.remove(*index, text.chars().count()),
        }
    }

    /// Replace everything. Bumps the version once.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.replace_all(text);
        self.lines = LineIndex::from_chars(text.chars());
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Half-open range of `line` without its `'\n'`.
    #[must_use]
    pub fn line_span(&self, line: usize) -> (usize, usize) {
        self.lines.line_span(line, self.len())
    }

    /// Resolve an offset (clamped) to its containing line.
    #[must_use]
    pub fn line_from_index(&self, offset: usize) -> LineLocation {
        let line = self.lines.line_of(offset.min(self.len()));
        let (start, end) = self.line_span(line);
        LineLocation { line, start, end }
    }

    #[must_use]
    pub fn line_len(&self, line: usize) -> usize {
        let (start, end) = self.line_span(line);
        end - start
    }

    #[must_use]
    pub fn line_text(&self, line: usize) -> String {
        let (start, end) = self.line_span(line);
        self.buffer.get_text(start, end - start)
    }

    /// `(line, column)` of an offset.
    #[must_use]
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let location = self.line_from_index(offset);
        (location.line, offset.min(self.len()) - location.start)
    }

    /// Offset of `(line, column)`, with the column clamped to the line.
    #[must_use]
    pub fn line_col_to_offset(&self, line: usize, column: usize) -> usize {
        let (start, end) = self.line_span(line);
        start + column.min(end - start)
    }

    /// Line-start table rebuilt from scratch, for consistency checks.
    #[must_use]
    pub fn rebuild_line_starts(&self) -> LineIndex {
        LineIndex::from_chars(self.buffer.chars_from(0))
    }
}
