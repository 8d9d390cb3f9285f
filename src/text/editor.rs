//! Editor facade: edit buffer, wrap virtualizer and view state in one owner.
//!
//! [`TextEditor`] is what a host control talks to. It routes edits through
//! the [`EditBuffer`], resolves visual rows through the [`WrapVirtualizer`]
//! when wrapping is on, and keeps the reader's position stable across
//! reflows (wrap toggles, width changes, font changes) with a captured
//! [`ViewAnchor`].
//!
//! # Examples
//!
//! ```
//! use wrapedit::{EditorOptions, TextEditor};
//!
//! let mut editor = TextEditor::with_options(EditorOptions {
//!     wrap_enabled: true,
//!     ..EditorOptions::default()
//! })
//! .unwrap();
//! editor.set_viewport(40.0, 160.0);
//! editor.insert_text("abcdefghij");
//!
//! // 8px per char at 40px wide: two visual rows of five chars.
//! assert_eq!(editor.visual_row_span(1), (5, 10));
//! assert_eq!(editor.total_visual_rows(), 2);
//! ```

// if-let-else is clearer than map_or for the row lookups
#![allow(clippy::option_if_let_else)]

use std::fmt;

use crate::clipboard::{Clipboard, normalize_line_endings};
use crate::error::{Error, Result, check_measurement};
use crate::event::{EditorEvent, EventSink};
use crate::text::document::Document;
use crate::text::edit::{Direction, EditBuffer};
use crate::text::history::DEFAULT_MAX_HISTORY_DEPTH;
use crate::text::measure::{MonospaceMeasurer, TextMeasurer, measure_checked};
use crate::text::view::{ViewAnchor, ViewState, Viewport, column_at_x};
use crate::text::wrap::{WrapMode, WrapOptions, WrapVirtualizer};

/// Editor configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorOptions {
    /// Mode used while wrapping is enabled.
    pub wrap_mode: WrapMode,
    /// Initial wrap state.
    pub wrap_enabled: bool,
    /// Lines between recorded wrap anchors.
    pub anchor_interval: usize,
    /// Hard cap on visual rows produced for one line.
    pub max_segments_per_line: usize,
    /// Documents with more lines than this are never wrapped.
    pub max_wrap_lines: usize,
    /// Documents with a line longer than this are never wrapped.
    pub max_wrap_line_chars: usize,
    /// Wrap width changes at or below this do not reflow.
    pub width_epsilon: f32,
    /// Maximum number of undo groups kept.
    pub max_history_depth: usize,
    /// Height of one visual row.
    pub row_height: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        let wrap = WrapOptions::default();
        Self {
            wrap_mode: WrapMode::Word,
            wrap_enabled: false,
            anchor_interval: wrap.anchor_interval,
            max_segments_per_line: wrap.max_segments_per_line,
            max_wrap_lines: 1_000_000,
            max_wrap_line_chars: 1_000_000,
            width_epsilon: wrap.width_epsilon,
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
            row_height: 16.0,
        }
    }
}

impl EditorOptions {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.anchor_interval == 0 {
            return Err(Error::InvalidConfig {
                field: "anchor_interval",
                reason: "must be at least 1",
            });
        }
        if self.max_segments_per_line == 0 {
            return Err(Error::InvalidConfig {
                field: "max_segments_per_line",
                reason: "must be at least 1",
            });
        }
        if !self.width_epsilon.is_finite() || self.width_epsilon < 0.0 {
            return Err(Error::InvalidConfig {
                field: "width_epsilon",
                reason: "must be finite and non-negative",
            });
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "row_height",
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }

    fn wrap_options(&self) -> WrapOptions {
        WrapOptions {
            anchor_interval: self.anchor_interval,
            max_segments_per_line: self.max_segments_per_line,
            width_epsilon: self.width_epsilon,
        }
    }
}

/// Lines whose capacity must be rechecked after an edit.
#[derive(Clone, Copy, Debug)]
enum Touched {
    Between(usize, usize),
    All,
}

/// Editable multi-line text with wrapping, hit-testing and scroll state.
pub struct TextEditor {
    buffer: EditBuffer,
    wrap: WrapVirtualizer,
    wrap_enabled: bool,
    options: EditorOptions,
    measurer: Box<dyn TextMeasurer>,
    view: ViewState,
    preferred_x: Option<f32>,
    events: EventSink,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::build(EditorOptions::default())
    }
}

impl fmt::Debug for TextEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEditor")
            .field("buffer", &self.buffer)
            .field("wrap", &self.wrap)
            .field("wrap_enabled", &self.wrap_enabled)
            .field("options", &self.options)
            .field("view", &self.view)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl TextEditor {
    /// Create an empty editor with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty editor after validating `options`.
    pub fn with_options(options: EditorOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    fn build(options: EditorOptions) -> Self {
        Self {
            buffer: EditBuffer::with_max_history_depth(options.max_history_depth),
            wrap: WrapVirtualizer::new(options.wrap_options(), options.wrap_mode),
            wrap_enabled: options.wrap_enabled,
            options,
            measurer: Box::new(MonospaceMeasurer::default()),
            view: ViewState::new(options.row_height),
            preferred_x: None,
            events: EventSink::default(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Install the host listener, replacing any previous one.
    pub fn set_event_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&EditorEvent) + 'static,
    {
        self.events.set_listener(listener);
    }

    pub fn clear_event_listener(&mut self) {
        self.events.clear_listener();
    }

    /// Swap the measurement collaborator. Treated as a font change.
    pub fn set_measurer<M>(&mut self, measurer: M)
    where
        M: TextMeasurer + 'static,
    {
        self.capture_view_anchor();
        self.measurer = Box::new(measurer);
        self.drop_measurements();
        self.apply_view_anchor_if_pending();
    }

    /// Font or DPI changed: every measured layout is stale.
    pub fn font_changed(&mut self) {
        self.capture_view_anchor();
        self.drop_measurements();
        self.apply_view_anchor_if_pending();
    }

    fn drop_measurements(&mut self) {
        self.wrap.invalidate("font changed");
        self.view.reset_line_width();
        self.preferred_x = None;
    }

    /// Measure `text` with the current collaborator, rejecting unusable widths.
    pub fn measure(&self, text: &str) -> Result<f32> {
        check_measurement(self.measurer.measure(text))
    }

    // ---- content ----

    #[must_use]
    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        self.buffer.document()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
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
    pub fn line_count(&self) -> usize {
        self.buffer.document().line_count()
    }

    #[must_use]
    pub fn line_span(&self, line: usize) -> (usize, usize) {
        self.buffer.document().line_span(line)
    }

    #[must_use]
    pub fn line_text(&self, line: usize) -> String {
        self.buffer.document().line_text(line)
    }

    /// Replace the whole document. Not undoable.
    pub fn set_text(&mut self, text: &str) {
        let before = self.buffer.caret();
        self.buffer.set_text(text);
        self.view.reset_line_width();
        self.after_edit(true, before, Touched::All);
    }

    // ---- caret and selection ----

    #[must_use]
    pub fn caret(&self) -> usize {
        self.buffer.caret()
    }

    #[must_use]
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.buffer.selection_range()
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.buffer.has_selection()
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        self.buffer.selected_text()
    }

    pub fn set_caret(&mut self, offset: usize) {
        let before = self.buffer.caret();
        self.buffer.set_caret(offset);
        self.after_move(before);
    }

    pub fn set_selection(&mut self, anchor: usize, length: isize) {
        let before = self.buffer.caret();
        self.buffer.set_selection(anchor, length);
        self.after_move(before);
    }

    pub fn select_all(&mut self) {
        let before = self.buffer.caret();
        self.buffer.select_all();
        self.after_move(before);
    }

    pub fn clear_selection(&mut self) {
        self.buffer.clear_selection();
    }

    pub fn move_caret_horizontal(&mut self, direction: Direction, extend: bool, by_word: bool) {
        let before = self.buffer.caret();
        self.buffer.move_caret_horizontal(direction, extend, by_word);
        self.after_move(before);
    }

    /// Move one row up or down: a visual row when wrapping, a logical line
    /// otherwise. The x position (or column) is sticky across repeats.
    pub fn move_caret_vertical(&mut self, direction: Direction, extend: bool) {
        let before = self.buffer.caret();
        if self.is_wrapping() {
            let target = self.visual_vertical_target(direction);
            self.buffer.move_caret_to(target, extend);
        } else {
            self.buffer.move_caret_vertical(direction, extend);
        }
        self.emit_caret_if_moved(before);
    }

    /// Home / End. When wrapping these stop at the caret's visual row.
    pub fn move_to_line_edge(&mut self, direction: Direction, extend: bool) {
        let before = self.buffer.caret();
        if self.is_wrapping() {
            let row = self.visual_row_for_offset(before);
            let target = match direction {
                Direction::Backward => self.visual_row_span(row).0,
                Direction::Forward => self.row_caret_end(row),
            };
            self.buffer.move_caret_to(target, extend);
            self.buffer.reset_preferred_column();
        } else {
            self.buffer.move_to_line_edge(direction, extend);
        }
        self.after_move(before);
    }

    pub fn move_to_document_edge(&mut self, direction: Direction, extend: bool) {
        let before = self.buffer.caret();
        self.buffer.move_to_document_edge(direction, extend);
        self.after_move(before);
    }

    // ---- editing ----

    /// Insert at the caret, replacing any selection.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let before = self.buffer.caret();
        let from = self.buffer.selection_range().map_or(before, |(start, _)| start);
        let changed = self.buffer.insert_text(text);
        let caret = self.buffer.caret();
        self.after_edit(changed, before, Touched::Between(from, caret))
    }

    pub fn backspace(&mut self, by_word: bool) -> bool {
        let before = self.buffer.caret();
        let changed = self.buffer.backspace(by_word);
        let caret = self.buffer.caret();
        self.after_edit(changed, before, Touched::Between(caret, caret))
    }

    pub fn delete(&mut self, by_word: bool) -> bool {
        let before = self.buffer.caret();
        let changed = self.buffer.delete(by_word);
        let caret = self.buffer.caret();
        self.after_edit(changed, before, Touched::Between(caret, caret))
    }

    pub fn delete_selection(&mut self) -> bool {
        let before = self.buffer.caret();
        let changed = self.buffer.delete_selection();
        let caret = self.buffer.caret();
        self.after_edit(changed, before, Touched::Between(caret, caret))
    }

    pub fn undo(&mut self) -> bool {
        let before = self.buffer.caret();
        let changed = self.buffer.undo();
        self.after_edit(changed, before, Touched::All)
    }

    pub fn redo(&mut self) -> bool {
        let before = self.buffer.caret();
        let changed = self.buffer.redo();
        self.after_edit(changed, before, Touched::All)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.buffer.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.buffer.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.buffer.clear_history();
    }

    // ---- clipboard ----

    /// Copy the selection. `false` when nothing is selected or the clipboard
    /// refused the text.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> bool {
        self.buffer
            .selected_text()
            .is_some_and(|text| clipboard.try_set_text(&text))
    }

    /// Copy, then delete the selection if the copy succeeded.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        self.copy(clipboard) && self.delete_selection()
    }

    /// Insert clipboard text at the caret with line endings folded to `\n`.
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(text) = clipboard.try_get_text() else {
            return false;
        };
        self.insert_text(&normalize_line_endings(&text))
    }

    // ---- wrapping ----

    #[must_use]
    pub fn is_wrap_enabled(&self) -> bool {
        self.wrap_enabled
    }

    /// Whether rows are currently produced by the wrap virtualizer.
    #[must_use]
    pub fn is_wrapping(&self) -> bool {
        self.wrap_enabled && self.wrap.mode().is_wrapping()
    }

    #[must_use]
    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap.mode()
    }

    #[must_use]
    pub fn wrap_virtualizer(&self) -> &WrapVirtualizer {
        &self.wrap
    }

    /// Toggle wrapping, keeping the top visible text in place.
    ///
    /// Enabling is refused for documents over the wrap capacity; the host is
    /// told through `WrapStateChanged { enabled: false }`.
    pub fn set_wrap_enabled(&mut self, enabled: bool) {
        if enabled == self.wrap_enabled {
            return;
        }
        if enabled && self.exceeds_wrap_capacity(Touched::All) {
            self.warn_capacity();
            self.events
                .emit(EditorEvent::WrapStateChanged { enabled: false });
            return;
        }
        self.capture_view_anchor();
        self.wrap_enabled = enabled;
        self.wrap
            .invalidate(if enabled { "wrap enabled" } else { "wrap disabled" });
        self.apply_view_anchor_if_pending();
        self.events.emit(EditorEvent::WrapStateChanged { enabled });
    }

    /// Switch the wrap mode. Moving to or from `WrapMode::None` while wrapping
    /// is enabled turns wrapping off or on, and the host is told so.
    pub fn set_wrap_mode(&mut self, mode: WrapMode) {
        if mode == self.wrap.mode() {
            return;
        }
        let was_wrapping = self.is_wrapping();
        self.capture_view_anchor();
        self.wrap.set_mode(mode);
        self.options.wrap_mode = mode;
        let refused =
            !was_wrapping && self.is_wrapping() && self.exceeds_wrap_capacity(Touched::All);
        if refused {
            self.warn_capacity();
            self.wrap_enabled = false;
        }
        self.apply_view_anchor_if_pending();
        let wrapping = self.is_wrapping();
        if refused || wrapping != was_wrapping {
            self.events
                .emit(EditorEvent::WrapStateChanged { enabled: wrapping });
        }
    }

    // ---- viewport and scrolling ----

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.view.viewport()
    }

    /// Resize the viewport. A wrap-width change beyond the epsilon reflows
    /// with the reading position preserved.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        let reflow = self.is_wrapping()
            && (viewport.width - self.view.viewport().width).abs() > self.options.width_epsilon;
        if reflow {
            self.capture_view_anchor();
        }
        self.view.set_viewport(viewport);
        if !self.apply_view_anchor_if_pending() {
            let (x, y) = self.view.scroll();
            self.set_scroll_offset(x, y);
        }
    }

    #[must_use]
    pub fn row_height(&self) -> f32 {
        self.view.row_height()
    }

    #[must_use]
    pub fn scroll_offset(&self) -> (f32, f32) {
        self.view.scroll()
    }

    /// Scroll, clamped into the current extent.
    pub fn set_scroll_offset(&mut self, x: f32, y: f32) {
        let extent = self.extent();
        self.view.set_scroll_clamped(x, y, extent);
    }

    /// Content size for scrollbar ranges. Height uses the estimated row count;
    /// width is the wrap width, or the widest line measured so far.
    pub fn extent(&mut self) -> (f32, f32) {
        let height = self.total_visual_rows() as f32 * self.view.row_height();
        let width = match self.wrap_width() {
            Some(width) => width,
            None => {
                self.observe_visible_lines();
                self.view.max_line_width()
            }
        };
        (width, height)
    }

    /// Scroll the minimum needed to show the caret's row (and, unwrapped,
    /// its x position).
    pub fn scroll_caret_into_view(&mut self) {
        let caret = self.buffer.caret();
        let (x, y) = self.offset_to_point(caret);
        let viewport = self.view.viewport();
        let row_height = self.view.row_height();
        let (mut scroll_x, mut scroll_y) = self.view.scroll();

        if y < scroll_y {
            scroll_y = y;
        } else if y + row_height > scroll_y + viewport.height {
            scroll_y = y + row_height - viewport.height;
        }

        if self.is_wrapping() {
            scroll_x = 0.0;
        } else {
            let line = self.buffer.document().line_from_index(caret).line;
            self.observe_line(line);
            if x < scroll_x {
                scroll_x = x;
            } else if x > scroll_x + viewport.width {
                scroll_x = x - viewport.width;
            }
        }
        self.set_scroll_offset(scroll_x, scroll_y);
    }

    // ---- view anchor ----

    /// Record the text at the top of the viewport so a reflow can restore it.
    pub fn capture_view_anchor(&mut self) -> ViewAnchor {
        let (top_row, row_fraction) = self.view.top_row();
        let (offset, _) = self.visual_row_span(top_row);
        let horizontal = (!self.is_wrapping()).then(|| self.view.scroll().0);
        let anchor = ViewAnchor {
            offset,
            row_fraction,
            horizontal,
        };
        tracing::trace!(offset, row_fraction, top_row, "view anchor captured");
        self.view.set_pending_anchor(anchor);
        anchor
    }

    /// Scroll so the captured text sits at the same sub-row position as
    /// before. Returns `false` when nothing was pending.
    pub fn apply_view_anchor_if_pending(&mut self) -> bool {
        let Some(anchor) = self.view.take_pending_anchor() else {
            return false;
        };
        let row = self.visual_row_for_offset(anchor.offset);
        let y = row as f32 * self.view.row_height() + anchor.row_fraction;
        let x = if self.is_wrapping() {
            0.0
        } else {
            anchor.horizontal.unwrap_or(0.0)
        };
        self.set_scroll_offset(x, y);
        true
    }

    // ---- row mapping and hit-testing ----

    /// Estimated rows for the whole document. Never forces a full wrap.
    pub fn total_visual_rows(&mut self) -> usize {
        match self.wrap_width() {
            Some(width) => self
                .wrap
                .estimated_total_visual_rows(self.buffer.document(), width),
            None => self.buffer.document().line_count(),
        }
    }

    /// `(line, row_in_line)` for a visual row, clamped to the document.
    pub fn map_visual_row_to_line(&mut self, row: usize) -> (usize, usize) {
        let doc = self.buffer.document();
        match self.wrap_width() {
            Some(width) => self
                .wrap
                .map_visual_row_to_line(doc, row, width, &*self.measurer),
            None => (row.min(doc.line_count() - 1), 0),
        }
    }

    pub fn visual_row_for_offset(&mut self, offset: usize) -> usize {
        let doc = self.buffer.document();
        match self.wrap_width() {
            Some(width) => self
                .wrap
                .visual_row_for_offset(doc, offset, width, &*self.measurer),
            None => doc.line_from_index(offset).line,
        }
    }

    /// Document range `(start, end)` shown on a visual row.
    pub fn visual_row_span(&mut self, row: usize) -> (usize, usize) {
        let doc = self.buffer.document();
        match self.wrap_width() {
            Some(width) => self
                .wrap
                .visual_row_span(doc, row, width, &*self.measurer),
            None => doc.line_span(row.min(doc.line_count() - 1)),
        }
    }

    /// Content coordinates of the top-left of the caret slot at `offset`.
    pub fn offset_to_point(&mut self, offset: usize) -> (f32, f32) {
        let offset = offset.min(self.buffer.len());
        let row = self.visual_row_for_offset(offset);
        let (start, _) = self.visual_row_span(row);
        let prefix = self.buffer.document().get_text(start, offset - start);
        let x = measure_checked(&*self.measurer, &prefix);
        let x = if x.is_finite() { x } else { 0.0 };
        (x, row as f32 * self.view.row_height())
    }

    /// Offset nearest to the content point `(x, y)`.
    pub fn point_to_offset(&mut self, x: f32, y: f32) -> usize {
        let row = if y.is_finite() && y > 0.0 {
            (y / self.view.row_height()).floor() as usize
        } else {
            0
        };
        self.offset_in_row(row, x)
    }

    fn wrap_width(&self) -> Option<f32> {
        self.is_wrapping().then(|| self.view.viewport().width)
    }

    fn rows_in_line(&mut self, line: usize) -> usize {
        let doc = self.buffer.document();
        match self.wrap_width() {
            Some(width) => self.wrap.row_count(doc, line, width, &*self.measurer),
            None => 1,
        }
    }

    fn is_last_row_in_line(&mut self, row: usize) -> bool {
        let (line, row_in_line) = self.map_visual_row_to_line(row);
        row_in_line + 1 >= self.rows_in_line(line)
    }

    /// Rightmost caret slot on a row. A row that continues onto the next one
    /// stops a char short, since its end offset renders on the next row.
    fn row_caret_end(&mut self, row: usize) -> usize {
        let (start, end) = self.visual_row_span(row);
        if end > start && !self.is_last_row_in_line(row) {
            end - 1
        } else {
            end
        }
    }

    fn offset_in_row(&mut self, row: usize, x: f32) -> usize {
        let (start, end) = self.visual_row_span(row);
        let text = self.buffer.document().get_text(start, end - start);
        let column = column_at_x(&text, x, &*self.measurer);
        (start + column).min(self.row_caret_end(row))
    }

    fn visual_vertical_target(&mut self, direction: Direction) -> usize {
        let caret = self.buffer.caret();
        let row = self.visual_row_for_offset(caret);
        let x = match self.preferred_x {
            Some(x) => x,
            None => {
                let x = self.offset_to_point(caret).0;
                self.preferred_x = Some(x);
                x
            }
        };
        match direction {
            Direction::Backward if row == 0 => 0,
            Direction::Backward => self.offset_in_row(row - 1, x),
            Direction::Forward => {
                let (line, _) = self.map_visual_row_to_line(row);
                if line + 1 >= self.line_count() && self.is_last_row_in_line(row) {
                    self.buffer.len()
                } else {
                    self.offset_in_row(row + 1, x)
                }
            }
        }
    }

    fn observe_line(&mut self, line: usize) {
        let width = measure_checked(&*self.measurer, &self.buffer.document().line_text(line));
        self.view.observe_line_width(width);
    }

    fn observe_visible_lines(&mut self) {
        let (top, _) = self.view.top_row();
        let row_height = self.view.row_height();
        let visible = (self.view.viewport().height / row_height).ceil() as usize + 1;
        let end = top.saturating_add(visible).min(self.line_count());
        for line in top..end {
            self.observe_line(line);
        }
    }

    // ---- bookkeeping ----

    fn exceeds_wrap_capacity(&self, touched: Touched) -> bool {
        let doc = self.buffer.document();
        if doc.line_count() > self.options.max_wrap_lines {
            return true;
        }
        let (first, last) = match touched {
            Touched::Between(from, to) => (
                doc.line_from_index(from.min(to)).line,
                doc.line_from_index(from.max(to)).line,
            ),
            Touched::All => (0, doc.line_count() - 1),
        };
        (first..=last).any(|line| doc.line_len(line) > self.options.max_wrap_line_chars)
    }

    fn warn_capacity(&self) {
        tracing::warn!(
            lines = self.line_count(),
            max_wrap_lines = self.options.max_wrap_lines,
            max_wrap_line_chars = self.options.max_wrap_line_chars,
            "document exceeds wrap capacity; wrapping disabled"
        );
    }

    fn enforce_wrap_capacity(&mut self, touched: Touched) {
        if !self.is_wrapping() || !self.exceeds_wrap_capacity(touched) {
            return;
        }
        self.capture_view_anchor();
        self.wrap_enabled = false;
        self.wrap.invalidate("wrap capacity exceeded");
        self.warn_capacity();
        self.apply_view_anchor_if_pending();
        self.events
            .emit(EditorEvent::WrapStateChanged { enabled: false });
    }

    fn after_edit(&mut self, changed: bool, caret_before: usize, touched: Touched) -> bool {
        self.preferred_x = None;
        if changed {
            self.enforce_wrap_capacity(touched);
            self.clamp_scroll_to_content();
            self.events.emit_with(|| EditorEvent::TextChanged {
                text: self.buffer.text(),
            });
        }
        self.emit_caret_if_moved(caret_before);
        changed
    }

    /// Re-clamp scroll after an edit may have shrunk the extent. Rows down to
    /// the bottom of the viewport are laid out first so the lazy row estimate
    /// does not pull the view up.
    fn clamp_scroll_to_content(&mut self) {
        let (x, y) = self.view.scroll();
        if self.is_wrapping() {
            let bottom = y + self.view.viewport().height;
            let last_row = (bottom / self.view.row_height()).ceil() as usize;
            self.map_visual_row_to_line(last_row);
        }
        self.set_scroll_offset(x, y);
    }

    fn after_move(&mut self, caret_before: usize) {
        self.preferred_x = None;
        self.emit_caret_if_moved(caret_before);
    }

    fn emit_caret_if_moved(&mut self, caret_before: usize) {
        let offset = self.buffer.caret();
        if offset != caret_before {
            self.events.emit(EditorEvent::CaretMoved { offset });
        }
    }
}
