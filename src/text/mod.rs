//! Text storage, editing and wrap layout.
//!
//! Layers, leaves first:
//!
//! - [`TextBuffer`]: rope-backed chars with a version counter
//! - [`LineIndex`] / [`Document`]: buffer plus incrementally patched line starts
//! - [`History`]: grouped, invertible edits for undo/redo
//! - [`EditBuffer`]: caret, selection and word motion over a document
//! - [`WrapVirtualizer`]: lazy per-line wrap layouts with row anchors
//! - [`TextEditor`]: everything above plus viewport, scrolling and hit-testing
//!
//! # Examples
//!
//! ## Line index
//!
//! ```
//! use wrapedit::Document;
//!
//! let mut doc = Document::new();
//! doc.insert(0, "hello\nworld");
//! assert_eq!(doc.line_index().starts(), &[0, 6]);
//! assert_eq!(doc.line_text(1), "world");
//! ```
//!
//! ## Editable buffer with undo
//!
//! ```
//! use wrapedit::EditBuffer;
//!
//! let mut editor = EditBuffer::new();
//! editor.insert_text("Hello");
//! editor.insert_text(" World");
//! assert_eq!(editor.text(), "Hello World");
//!
//! // Each call is one undo step
//! editor.undo();
//! assert_eq!(editor.text(), "Hello");
//!
//! editor.redo();
//! assert_eq!(editor.text(), "Hello World");
//! ```

mod buffer;
mod document;
mod edit;
mod editor;
mod history;
mod line_index;
mod measure;
mod view;
mod wrap;

pub use buffer::TextBuffer;
pub use document::{Document, LineLocation};
pub use edit::{
    Direction, EditBuffer, Selection, find_next_word_boundary, find_previous_word_boundary,
};
pub use editor::{EditorOptions, TextEditor};
pub use history::{DEFAULT_MAX_HISTORY_DEPTH, Edit, EditGroup, History, Recording};
pub use line_index::LineIndex;
pub use measure::{MonospaceMeasurer, TextMeasurer};
pub use view::{ViewAnchor, ViewState, Viewport, clamp_scroll, column_at_x};
pub use wrap::{
    WrapAnchor, WrapLayout, WrapMode, WrapOptions, WrapVirtualizer, build_wrap_segments,
};
