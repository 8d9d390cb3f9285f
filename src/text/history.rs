//! Invertible edit records and the linear undo/redo log.

/// One invertible mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    Insert { index: usize, text: String },
    Delete { index: usize, text: String },
}

impl Edit {
    /// The edit that exactly undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert { index, text } => Self::Delete {
                index: *index,
                text: text.clone(),
            },
            Self::Delete { index, text } => Self::Insert {
                index: *index,
                text: text.clone(),
            },
        }
    }

    /// Offset where the edit starts.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Insert { index, .. } | Self::Delete { index, .. } => *index,
        }
    }

    /// Text carried by the edit.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Insert { text, .. } | Self::Delete { text, .. } => text,
        }
    }

    /// Where a caret naturally rests once this edit has been applied.
    #[must_use]
    pub fn caret_after(&self) -> usize {
        match self {
            Self::Insert { index, text } => index + text.chars().count(),
            Self::Delete { index, .. } => *index,
        }
    }
}

/// Whether an apply should land in the log.
///
/// Undo/redo replay passes `Silent` so replayed edits are not re-recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recording {
    Record,
    Silent,
}

/// One user-visible operation: the edits it made plus the caret around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditGroup {
    pub edits: Vec<Edit>,
    pub caret_before: Option<usize>,
    pub caret_after: Option<usize>,
}

impl EditGroup {
    /// Group with a single edit and no caret information.
    #[must_use]
    pub fn single(edit: Edit) -> Self {
        Self {
            edits: vec![edit],
            caret_before: None,
            caret_after: None,
        }
    }

    /// Caret to restore after undoing this group.
    #[must_use]
    pub fn undo_caret(&self) -> usize {
        self.caret_before
            .or_else(|| self.edits.first().map(|edit| edit.inverse().caret_after()))
            .unwrap_or(0)
    }

    /// Caret to restore after redoing this group.
    #[must_use]
    pub fn redo_caret(&self) -> usize {
        self.caret_after
            .or_else(|| self.edits.last().map(Edit::caret_after))
            .unwrap_or(0)
    }
}

/// Default maximum number of undo groups to retain.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 1000;

/// Undo/redo stacks with bounded depth.
#[derive(Clone, Debug)]
pub struct History {
    undo_stack: Vec<EditGroup>,
    redo_stack: Vec<EditGroup>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_MAX_HISTORY_DEPTH)
    }
}

impl History {
    /// Create a history that keeps at most `max_depth` undo groups.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Push a committed group. Clears redo: history is linear.
    pub fn push(&mut self, group: EditGroup) {
        if group.edits.is_empty() {
            return;
        }
        self.redo_stack.clear();
        self.undo_stack.push(group);
        self.trim();
    }

    pub fn pop_undo(&mut self) -> Option<EditGroup> {
        self.undo_stack.pop()
    }

    pub fn pop_redo(&mut self) -> Option<EditGroup> {
        self.redo_stack.pop()
    }

    /// Park an undone group on the redo stack.
    pub fn push_undone(&mut self, group: EditGroup) {
        self.redo_stack.push(group);
    }

    /// Return a group to the undo stack after redoing it, keeping redo intact.
    pub fn push_redone(&mut self, group: EditGroup) {
        self.undo_stack.push(group);
        self.trim();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        self.trim();
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }
}
