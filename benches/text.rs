//! Text buffer and edit buffer performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wrapedit::{Direction, Document, EditBuffer, TextBuffer};

fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("Line number {i} with some content\n"))
        .collect()
}

fn text_buffer_creation(c: &mut Criterion) {
    c.bench_function("textbuffer_new", |b| {
        b.iter(|| TextBuffer::new());
    });

    let long_text = "x".repeat(10_000);
    c.bench_function("textbuffer_with_text_10k", |b| {
        b.iter(|| TextBuffer::with_text(black_box(&long_text)));
    });
}

fn document_line_index(c: &mut Criterion) {
    let text = numbered_lines(10_000);

    c.bench_function("document_with_text_10k_lines", |b| {
        b.iter(|| Document::with_text(black_box(&text)));
    });

    // Typing a newline near the top of a large document: only line starts
    // after the caret shift.
    c.bench_function("document_insert_newline_10k_lines", |b| {
        let mut doc = Document::with_text(&text);
        b.iter(|| {
            doc.insert(black_box(40), "\n");
            doc.remove(black_box(40), 1);
        });
    });

    let doc = Document::with_text(&text);
    c.bench_function("document_line_from_index", |b| {
        b.iter(|| doc.line_from_index(black_box(200_000)));
    });

    c.bench_function("document_rebuild_line_starts", |b| {
        b.iter(|| doc.rebuild_line_starts());
    });
}

fn edit_buffer_insertion(c: &mut Criterion) {
    c.bench_function("editbuffer_insert_char", |b| {
        let mut editor = EditBuffer::new();
        b.iter(|| {
            editor.insert_text(black_box("x"));
        });
    });

    c.bench_function("editbuffer_insert_line", |b| {
        let mut editor = EditBuffer::new();
        b.iter(|| {
            editor.insert_text(black_box("This is a complete line of text.\n"));
        });
    });
}

fn edit_buffer_cursor_movement(c: &mut Criterion) {
    let mut editor = EditBuffer::with_text(&numbered_lines(100));
    editor.set_caret(50 * 33 + 10);

    c.bench_function("editbuffer_move_word", |b| {
        b.iter(|| {
            editor.move_caret_horizontal(Direction::Backward, false, true);
            editor.move_caret_horizontal(Direction::Forward, false, true);
        });
    });

    c.bench_function("editbuffer_move_up_down", |b| {
        b.iter(|| {
            editor.move_caret_vertical(Direction::Backward, false);
            editor.move_caret_vertical(Direction::Forward, false);
        });
    });

    c.bench_function("editbuffer_move_line_edges", |b| {
        b.iter(|| {
            editor.move_to_line_edge(Direction::Backward, false);
            editor.move_to_line_edge(Direction::Forward, false);
        });
    });
}

fn edit_buffer_undo_redo(c: &mut Criterion) {
    c.bench_function("editbuffer_undo_redo_cycle", |b| {
        let mut editor = EditBuffer::new();
        editor.insert_text("Hello");
        editor.insert_text(" World");
        b.iter(|| {
            editor.undo();
            editor.redo();
        });
    });
}

fn edit_buffer_deletion(c: &mut Criterion) {
    c.bench_function("editbuffer_backspace", |b| {
        let text = "x".repeat(10_000);
        let mut editor = EditBuffer::with_text(&text);
        editor.move_to_document_edge(Direction::Forward, false);
        b.iter(|| {
            if !editor.backspace(false) {
                editor.set_text(&text);
                editor.move_to_document_edge(Direction::Forward, false);
            }
        });
    });

    c.bench_function("editbuffer_backspace_word", |b| {
        let text = "word ".repeat(2_000);
        let mut editor = EditBuffer::with_text(&text);
        editor.move_to_document_edge(Direction::Forward, false);
        b.iter(|| {
            if !editor.backspace(true) {
                editor.set_text(&text);
                editor.move_to_document_edge(Direction::Forward, false);
            }
        });
    });
}

criterion_group!(
    benches,
    text_buffer_creation,
    document_line_index,
    edit_buffer_insertion,
    edit_buffer_cursor_movement,
    edit_buffer_undo_redo,
    edit_buffer_deletion
);
criterion_main!(benches);
