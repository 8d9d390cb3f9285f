//! Editable document with caret, selection and undo/redo.
//!
//! This module provides [`EditBuffer`], which wraps a [`Document`] with a
//! caret, a signed selection and a linear edit log. Every user-visible
//! operation records exactly one undo group, even when it is made of several
//! edits (replacing a selection is a delete plus an insert).
//!
//! # Examples
//!
//! ```
//! use wrapedit::EditBuffer;
//!
//! let mut buf = EditBuffer::with_text("foo bar ");
//! buf.set_caret(8);
//! buf.backspace(true);
//! assert_eq!(buf.text(), "foo ");
//! assert_eq!(buf.caret(), 4);
//!
//! buf.undo();
//! assert_eq!(buf.text(), "foo bar ");
//! assert_eq!(buf.caret(), 8);
//! ```

use crate::text::document::Document;
use crate::text::history::{Edit, EditGroup, History, Recording};

/// Direction of a caret move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Selection as an anchor plus a signed length.
///
/// The caret sits at `anchor + length`; a zero length means no selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub length: isize,
}

impl Selection {
    #[must_use]
    pub fn new(anchor: usize, length: isize) -> Self {
        Self { anchor, length }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The end opposite the anchor.
    #[must_use]
    pub fn head(&self) -> usize {
        self.anchor.saturating_add_signed(self.length)
    }

    /// Normalized half-open range.
    #[must_use]
    pub fn range(&self) -> (usize, usize) {
        let head = self.head();
        (self.anchor.min(head), self.anchor.max(head))
    }

    fn clamped(self, len: usize) -> Self {
        let anchor = self.anchor.min(len);
        let head = self.head().min(len);
        Self {
            anchor,
            length: head as isize - anchor as isize,
        }
    }
}

/// Skip backward over whitespace, then over the non-whitespace run before it.
#[must_use]
pub fn find_previous_word_boundary(doc: &Document, from: usize) -> usize {
    let from = from.min(doc.len());
    let mut chars = doc.buffer().chars_from(from);
    let mut idx = from;
    let mut skipping_space = true;
    while let Some(ch) = chars.prev() {
        if ch.is_whitespace() != skipping_space {
            if skipping_space {
                skipping_space = false;
            } else {
                break;
            }
        }
        idx -= 1;
    }
    idx
}

/// Skip forward over the current non-whitespace run, then the whitespace after.
#[must_use]
pub fn find_next_word_boundary(doc: &Document, from: usize) -> usize {
    let from = from.min(doc.len());
    let mut idx = from;
    let mut skipping_word = true;
    for ch in doc.buffer().chars_from(from) {
        if ch.is_whitespace() == skipping_word {
            if skipping_word {
                skipping_word = false;
            } else {
                break;
            }
        }
        idx += 1;
    }
    idx
}

/// Document with caret, selection and undo/redo.
#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    doc: Document,
    caret: usize,
    selection: Selection,
    preferred_column: Option<usize>,
    history: History,
}

impl EditBuffer {
    /// Create an empty edit buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an edit buffer with initial text and the caret at 0.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            doc: Document::with_text(text),
            ..Self::default()
        }
    }

    /// Create an empty edit buffer keeping at most `max_depth` undo groups.
    #[must_use]
    pub fn with_max_history_depth(max_depth: usize) -> Self {
        Self {
            history: History::with_max_depth(max_depth),
            ..Self::default()
        }
    }

    pub fn set_max_history_depth(&mut self, max_depth: usize) {
        self.history.set_max_depth(max_depth);
    }

    #[must_use]
    pub fn max_history_depth(&self) -> usize {
        self.history.max_depth()
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.doc.text()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.doc.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.doc.version()
    }

    /// Replace the whole text. Not undoable: both stacks are cleared.
    pub fn set_text(&mut self, text: &str) {
        self.doc.set_text(text);
        self.history.clear();
        self.caret = 0;
        self.selection = Selection::new(0, 0);
        self.preferred_column = None;
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Place the caret and drop any selection.
    pub fn set_caret(&mut self, offset: usize) {
        self.move_caret_to(offset, false);
    }

    /// Active selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        (!self.selection.is_empty()).then_some(self.selection)
    }

    /// Normalized range of the active selection.
    #[must_use]
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection().map(|selection| selection.range())
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Select `length` chars from `anchor` (negative selects backward). The
    /// caret goes to the head.
    pub fn set_selection(&mut self, anchor: usize, length: isize) {
        self.selection = Selection::new(anchor, length).clamped(self.doc.len());
        self.caret = self.selection.head();
        self.preferred_column = None;
    }

    pub fn select_all(&mut self) {
        self.set_selection(0, self.doc.len() as isize);
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::new(self.caret, 0);
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        Some(self.doc.get_text(start, end - start))
    }

    /// Move the caret to `target`, extending or dropping the selection.
    ///
    /// When extending without an active selection, the anchor is pinned to the
    /// caret before the move.
    pub fn move_caret_to(&mut self, target: usize, extend: bool) {
        let target = target.min(self.doc.len());
        if extend {
            if self.selection.is_empty() {
                self.selection.anchor = self.caret;
            }
            self.caret = target;
            self.selection.length = target as isize - self.selection.anchor as isize;
        } else {
            self.caret = target;
            self.selection = Selection::new(target, 0);
        }
    }

    /// Move one char (or one word) left or right.
    pub fn move_caret_horizontal(&mut self, direction: Direction, extend: bool, by_word: bool) {
        self.preferred_column = None;
        if !extend && !by_word {
            if let Some((start, end)) = self.selection_range() {
                let side = match direction {
                    Direction::Backward => start,
                    Direction::Forward => end,
                };
                self.move_caret_to(side, false);
                return;
            }
        }
        let target = match (direction, by_word) {
            (Direction::Backward, true) => find_previous_word_boundary(&self.doc, self.caret),
            (Direction::Forward, true) => find_next_word_boundary(&self.doc, self.caret),
            (Direction::Backward, false) => self.caret.saturating_sub(1),
            (Direction::Forward, false) => self.caret + 1,
        };
        self.move_caret_to(target, extend);
    }

    /// Move one logical line up or down, keeping a sticky column.
    pub fn move_caret_vertical(&mut self, direction: Direction, extend: bool) {
        let (line, column) = self.doc.offset_to_line_col(self.caret);
        let column = *self.preferred_column.get_or_insert(column);
        let target = match direction {
            Direction::Backward if line == 0 => 0,
            Direction::Backward => self.doc.line_col_to_offset(line - 1, column),
            Direction::Forward if line + 1 >= self.doc.line_count() => self.doc.len(),
            Direction::Forward => self.doc.line_col_to_offset(line + 1, column),
        };
        self.move_caret_to(target, extend);
    }

    /// Move to the start or end of the caret's line.
    pub fn move_to_line_edge(&mut self, direction: Direction, extend: bool) {
        self.preferred_column = None;
        let location = self.doc.line_from_index(self.caret);
        let target = match direction {
            Direction::Backward => location.start,
            Direction::Forward => location.end,
        };
        self.move_caret_to(target, extend);
    }

    /// Move to the start or end of the document.
    pub fn move_to_document_edge(&mut self, direction: Direction, extend: bool) {
        self.preferred_column = None;
        let target = match direction {
            Direction::Backward => 0,
            Direction::Forward => self.doc.len(),
        };
        self.move_caret_to(target, extend);
    }

    /// Forget the sticky column for vertical moves.
    pub fn reset_preferred_column(&mut self) {
        self.preferred_column = None;
    }

    /// Insert at the caret, replacing the selection. One undo group.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let caret_before = self.caret;
        let mut group = Vec::new();
        self.remove_selection_into(&mut group);
        let insert = Edit::Insert {
            index: self.caret,
            text: text.to_string(),
        };
        if let Some(edit) = self.apply(&insert, Recording::Record, &mut group) {
            self.caret = edit.caret_after();
        }
        self.commit(group, caret_before)
    }

    /// Delete the selection, or the char / word before the caret.
    pub fn backspace(&mut self, by_word: bool) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let start = if by_word {
            find_previous_word_boundary(&self.doc, self.caret)
        } else {
            self.caret.saturating_sub(1)
        };
        self.delete_range(start, self.caret)
    }

    /// Delete the selection, or the char / word after the caret.
    pub fn delete(&mut self, by_word: bool) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let end = if by_word {
            find_next_word_boundary(&self.doc, self.caret)
        } else {
            self.caret + 1
        };
        self.delete_range(self.caret, end)
    }

    /// Delete the selected range. One undo group.
    pub fn delete_selection(&mut self) -> bool {
        let caret_before = self.caret;
        let mut group = Vec::new();
        self.remove_selection_into(&mut group);
        self.commit(group, caret_before)
    }

    /// Apply a raw edit and record it as its own undo group.
    pub fn record_and_apply(&mut self, edit: &Edit) -> Option<Edit> {
        let caret_before = self.caret;
        let mut group = Vec::new();
        let applied = self.apply(edit, Recording::Record, &mut group)?;
        self.caret = applied.caret_after();
        self.commit(group, caret_before);
        Some(applied)
    }

    /// Undo the last group. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(group) = self.history.pop_undo() else {
            return false;
        };
        let mut replayed = Vec::new();
        for edit in group.edits.iter().rev() {
            self.apply(&edit.inverse(), Recording::Silent, &mut replayed);
        }
        self.restore_caret(group.undo_caret());
        self.history.push_undone(group);
        true
    }

    /// Redo the last undone group. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(group) = self.history.pop_redo() else {
            return false;
        };
        let mut replayed = Vec::new();
        for edit in &group.edits {
            self.apply(edit, Recording::Silent, &mut replayed);
        }
        self.restore_caret(group.redo_caret());
        self.history.push_redone(group);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        let caret_before = self.caret;
        let mut group = Vec::new();
        let end = end.min(self.doc.len());
        if start < end {
            let delete = Edit::Delete {
                index: start,
                text: self.doc.get_text(start, end - start),
            };
            if let Some(edit) = self.apply(&delete, Recording::Record, &mut group) {
                self.caret = edit.caret_after();
            }
        }
        self.commit(group, caret_before)
    }

    fn remove_selection_into(&mut self, group: &mut Vec<Edit>) {
        let Some((start, end)) = self.selection_range() else {
            return;
        };
        let delete = Edit::Delete {
            index: start,
            text: self.doc.get_text(start, end - start),
        };
        if let Some(edit) = self.apply(&delete, Recording::Record, group) {
            self.caret = edit.caret_after();
        }
        self.selection = Selection::new(self.caret, 0);
    }

    fn apply(&mut self, edit: &Edit, recording: Recording, group: &mut Vec<Edit>) -> Option<Edit> {
        let applied = self.doc.apply(edit)?;
        if recording == Recording::Record {
            group.push(applied.clone());
        }
        Some(applied)
    }

    fn commit(&mut self, group: Vec<Edit>, caret_before: usize) -> bool {
        self.restore_caret(self.caret);
        if group.is_empty() {
            return false;
        }
        self.history.push(EditGroup {
            edits: group,
            caret_before: Some(caret_before),
            caret_after: Some(self.caret),
        });
        true
    }

    fn restore_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.doc.len());
        self.selection = Selection::new(self.caret, 0);
        self.preferred_column = None;
    }
}
