//! `wrapedit` - editable-text engine with virtualized word wrap
//!
//! The engine behind a multi-line text control: a rope-backed buffer with an
//! incrementally patched line index, grouped undo/redo, caret and selection
//! motion, and a wrap virtualizer that maps visual rows to document lines
//! without re-wrapping the whole document on every edit or resize.

// Crate-level lint configuration
#![forbid(unsafe_code)] // Nothing here needs it
#![allow(clippy::cast_possible_truncation)] // Intentional row/pixel casts
#![allow(clippy::cast_sign_loss)] // Intentional row/pixel conversions
#![allow(clippy::cast_precision_loss)] // Row counts as f32 pixels
#![allow(clippy::cast_possible_wrap)] // Signed selection lengths
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::len_without_is_empty)] // Length queries on views
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::float_cmp)] // Exact pixel values in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod clipboard;
pub mod error;
pub mod event;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use clipboard::{Clipboard, MemoryClipboard};
pub use error::{Error, Result};
pub use event::{EditorEvent, EventSink};

// Re-export commonly used types
pub use text::{
    Direction, Document, Edit, EditBuffer, EditorOptions, LineIndex, MonospaceMeasurer,
    TextBuffer, TextEditor, TextMeasurer, Viewport, WrapMode, WrapVirtualizer,
};
pub use unicode::WidthMethod;
