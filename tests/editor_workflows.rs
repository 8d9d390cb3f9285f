//! End-to-end editing workflows through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use wrapedit::text::build_wrap_segments;
use wrapedit::{
    Direction, Document, EditBuffer, EditorEvent, EditorOptions, MemoryClipboard, TextEditor,
    WrapMode,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn record_events(editor: &mut TextEditor) -> Rc<RefCell<Vec<EditorEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    editor.set_event_listener(move |event| sink.borrow_mut().push(event.clone()));
    events
}

// ============================================================================
// Line index
// ============================================================================

mod line_index {
    use super::*;

    #[test]
    fn test_insert_two_lines_into_empty_document() {
        let mut doc = Document::new();
        doc.insert(0, "hello\nworld");
        assert_eq!(doc.line_index().starts(), &[0, 6]);
        assert_eq!(doc.line_span(0), (0, 5));
        assert_eq!(doc.line_text(0), "hello");
        assert_eq!(doc.line_span(1), (6, 11));
        assert_eq!(doc.line_text(1), "world");
    }

    #[test]
    fn test_remove_across_one_newline_merges_lines() {
        let mut doc = Document::with_text("aaa\nbbb\nccc\nddd");
        assert_eq!(doc.line_index().starts(), &[0, 4, 8, 12]);
        doc.remove(2, 3);
        assert_eq!(doc.text(), "aabb\nccc\nddd");
        assert_eq!(doc.line_index().starts(), &[0, 5, 9]);
    }

    #[test]
    fn test_version_changes_only_with_content() {
        let mut doc = Document::with_text("abc");
        let version = doc.version();
        doc.insert(1, "");
        doc.remove(3, 5);
        assert_eq!(doc.version(), version);
        doc.insert(99, "d");
        assert_eq!(doc.text(), "abcd");
        assert!(doc.version() > version);
    }
}

// ============================================================================
// Editing
// ============================================================================

mod editing {
    use super::*;

    #[test]
    fn test_word_backspace_eats_trailing_space_and_word() {
        let mut edit = EditBuffer::with_text("foo bar ");
        edit.set_caret(8);
        assert!(edit.backspace(true));
        assert_eq!(edit.text(), "foo ");
        assert_eq!(edit.caret(), 4);
    }

    #[test]
    fn test_typing_session_undo_redo() {
        let mut edit = EditBuffer::new();
        edit.insert_text("The quick");
        edit.insert_text(" brown fox");
        edit.move_caret_horizontal(Direction::Backward, false, true);
        edit.move_caret_horizontal(Direction::Backward, true, true);
        assert_eq!(edit.selected_text().as_deref(), Some("brown "));
        edit.insert_text("red ");
        assert_eq!(edit.text(), "The quick red fox");

        assert!(edit.undo());
        assert_eq!(edit.text(), "The quick brown fox");
        assert!(edit.undo());
        assert_eq!(edit.text(), "The quick");
        assert!(edit.redo());
        assert!(edit.redo());
        assert_eq!(edit.text(), "The quick red fox");
        assert!(!edit.redo());
    }

    #[test]
    fn test_editor_selection_round_trip_through_clipboard() {
        let mut editor = TextEditor::new();
        let mut clipboard = MemoryClipboard::new();
        editor.set_text("alpha beta\ngamma");
        editor.move_to_document_edge(Direction::Forward, false);
        editor.move_caret_horizontal(Direction::Backward, true, true);
        assert!(editor.cut(&mut clipboard));
        assert_eq!(clipboard.contents(), Some("gamma"));

        editor.move_to_document_edge(Direction::Backward, false);
        assert!(editor.paste(&mut clipboard));
        assert_eq!(editor.caret(), 5);
        assert!(editor.text().starts_with("gammaalpha"));
    }
}

// ============================================================================
// Wrapping
// ============================================================================

mod wrapping {
    use super::*;

    #[test]
    fn test_ten_chars_at_two_px_wrap_into_two_rows() {
        let measure = |text: &str| text.chars().count() as f32 * 2.0;
        let (starts, truncated) =
            build_wrap_segments("abcdefghij", 10.0, &measure, WrapMode::Char, 2048);
        assert_eq!(starts, vec![0, 5]);
        assert!(!truncated);
    }

    #[test]
    fn test_toggle_wrap_keeps_reading_position() {
        init_tracing();
        let mut editor = TextEditor::new();
        editor.set_viewport(120.0, 200.0);
        let lines: Vec<String> = (0..500)
            .map(|i| format!("line {i:04} lorem ipsum dolor sit amet"))
            .collect();
        editor.set_text(&lines.join("\n"));

        let top = editor.line_span(300).0;
        editor.set_scroll_offset(0.0, 300.0 * editor.row_height());
        let events = record_events(&mut editor);

        editor.set_wrap_enabled(true);
        let (_, y) = editor.scroll_offset();
        let (_, top_y) = editor.offset_to_point(top);
        assert!((y - top_y).abs() <= editor.row_height());
        assert_eq!(editor.point_to_offset(0.0, y), top);

        editor.set_wrap_enabled(false);
        let (_, y) = editor.scroll_offset();
        assert!((y - 300.0 * editor.row_height()).abs() <= editor.row_height());

        assert_eq!(
            events.borrow().as_slice(),
            &[
                EditorEvent::WrapStateChanged { enabled: true },
                EditorEvent::WrapStateChanged { enabled: false },
            ]
        );
    }

    #[test]
    fn test_estimate_grows_as_rows_are_visited() {
        let mut editor = TextEditor::with_options(EditorOptions {
            wrap_enabled: true,
            anchor_interval: 16,
            ..EditorOptions::default()
        })
        .unwrap();
        editor.set_viewport(40.0, 100.0);
        let lines: Vec<&str> = std::iter::repeat_n("abcdefghij", 100).collect();
        editor.set_text(&lines.join("\n"));

        let cold = editor.total_visual_rows();
        assert!(cold >= 100);
        assert_eq!(editor.map_visual_row_to_line(199), (99, 1));
        assert_eq!(editor.total_visual_rows(), 200);
        assert!(
            editor
                .wrap_virtualizer()
                .anchors()
                .iter()
                .all(|anchor| anchor.line_index % 16 == 0)
        );
    }

    #[test]
    fn test_typing_newlines_past_line_cap_turns_wrap_off() {
        init_tracing();
        let mut editor = TextEditor::with_options(EditorOptions {
            wrap_enabled: true,
            max_wrap_lines: 3,
            ..EditorOptions::default()
        })
        .unwrap();
        editor.set_viewport(80.0, 80.0);
        let events = record_events(&mut editor);

        for word in ["one", "\n", "two", "\n", "three"] {
            editor.insert_text(word);
        }
        assert_eq!(editor.line_count(), 3);
        assert!(editor.is_wrapping());

        editor.insert_text("\n");
        assert_eq!(editor.line_count(), 4);
        assert!(!editor.is_wrap_enabled());
        assert_eq!(editor.total_visual_rows(), 4);

        // Back under the cap: wrapping stays off until the host asks again.
        assert!(editor.undo());
        assert!(!editor.is_wrap_enabled());

        let wrap_events: Vec<EditorEvent> = events
            .borrow()
            .iter()
            .filter(|event| matches!(event, EditorEvent::WrapStateChanged { .. }))
            .cloned()
            .collect();
        assert_eq!(
            wrap_events,
            vec![EditorEvent::WrapStateChanged { enabled: false }]
        );
    }

    #[test]
    fn test_giant_line_turns_wrap_off() {
        init_tracing();
        let mut editor = TextEditor::with_options(EditorOptions {
            wrap_enabled: true,
            max_wrap_line_chars: 64,
            ..EditorOptions::default()
        })
        .unwrap();
        editor.set_viewport(80.0, 80.0);
        let events = record_events(&mut editor);

        let mut clipboard = MemoryClipboard::with_text(&"z".repeat(100));
        assert!(editor.paste(&mut clipboard));
        assert!(!editor.is_wrap_enabled());
        assert!(
            events
                .borrow()
                .contains(&EditorEvent::WrapStateChanged { enabled: false })
        );
        assert_eq!(editor.total_visual_rows(), 1);
    }
}
