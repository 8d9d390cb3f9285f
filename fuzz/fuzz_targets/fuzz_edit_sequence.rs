//! Fuzz target for edit sequences.
//!
//! Drives a document and an edit buffer through arbitrary inserts, removes,
//! caret moves and undo/redo, checking that the incrementally patched line
//! index always matches a full rescan and that every offset stays in bounds.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wrapedit::text::WrapOptions;
use wrapedit::{Direction, EditBuffer, MonospaceMeasurer, WrapMode, WrapVirtualizer};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { at: u16, text: String },
    Remove { at: u16, len: u8 },
    Type(String),
    Backspace { by_word: bool },
    Delete { by_word: bool },
    Move { forward: bool, extend: bool, by_word: bool },
    Vertical { forward: bool, extend: bool },
    Select { anchor: u16, len: i8 },
    Undo,
    Redo,
    MapRow(u16),
}

const MAX_OPS: usize = 256;

fuzz_target!(|ops: Vec<Op>| {
    let mut edit = EditBuffer::new();
    let mut wrap = WrapVirtualizer::new(
        WrapOptions {
            anchor_interval: 4,
            ..WrapOptions::default()
        },
        WrapMode::Word,
    );
    let measurer = MonospaceMeasurer::new(4.0);

    for op in ops.into_iter().take(MAX_OPS) {
        let len = edit.len();
        match op {
            Op::Insert { at, text } => {
                let at = usize::from(at) % (len + 1);
                edit.set_caret(at);
                edit.insert_text(&text);
            }
            Op::Remove { at, len: count } => {
                let at = usize::from(at) % (len + 1);
                edit.set_selection(at, isize::from(count));
                edit.delete_selection();
            }
            Op::Type(text) => {
                edit.insert_text(&text);
            }
            Op::Backspace { by_word } => {
                edit.backspace(by_word);
            }
            Op::Delete { by_word } => {
                edit.delete(by_word);
            }
            Op::Move { forward, extend, by_word } => {
                let direction = if forward { Direction::Forward } else { Direction::Backward };
                edit.move_caret_horizontal(direction, extend, by_word);
            }
            Op::Vertical { forward, extend } => {
                let direction = if forward { Direction::Forward } else { Direction::Backward };
                edit.move_caret_vertical(direction, extend);
            }
            Op::Select { anchor, len: count } => {
                edit.set_selection(usize::from(anchor), isize::from(count));
            }
            Op::Undo => {
                edit.undo();
            }
            Op::Redo => {
                edit.redo();
            }
            Op::MapRow(row) => {
                let (line, _) =
                    wrap.map_visual_row_to_line(edit.document(), usize::from(row), 40.0, &measurer);
                assert!(line < edit.document().line_count());
            }
        }

        let doc = edit.document();
        assert_eq!(doc.line_index(), &doc.rebuild_line_starts());
        assert!(edit.caret() <= edit.len());
        if let Some((start, end)) = edit.selection_range() {
            assert!(start < end && end <= edit.len());
        }
    }
});
