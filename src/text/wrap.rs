//! Lazy word-wrap layout with checkpointed visual-row mapping.
//!
//! Lines are wrapped on demand and cached per line. The cache is keyed on the
//! document version, the wrap width (within an epsilon) and the wrap mode;
//! any change to those drops every layout and every anchor at once.
//!
//! Mapping a visual row to a line walks forward from the nearest anchor, a
//! `(line, start_row)` checkpoint recorded every `anchor_interval` lines. Once
//! anchors are warm a lookup costs at most one interval of layouts, not a walk
//! of the whole document.

use std::collections::HashMap;

use crate::text::document::Document;
use crate::text::measure::{TextMeasurer, measure_checked};

/// Text wrapping mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// No wrapping: one visual row per line.
    #[default]
    None,
    /// Greedy longest fit at character boundaries.
    Char,
    /// Longest fit, backed off to just after the last whitespace when possible.
    Word,
}

impl WrapMode {
    #[must_use]
    pub fn is_wrapping(self) -> bool {
        self != Self::None
    }
}

/// Wrapped rows of one line.
#[derive(Clone, Debug, PartialEq)]
pub struct WrapLayout {
    pub version: u64,
    pub width: f32,
    /// Line-relative char offsets where each visual row begins; `[0] == 0`.
    pub segment_starts: Vec<usize>,
    /// The segment cap was hit and the tail was left as one unbroken row.
    pub truncated: bool,
}

impl WrapLayout {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.segment_starts.len().max(1)
    }

    /// Whether this layout may still be served for `version` / `width`.
    #[must_use]
    pub fn is_valid_for(&self, version: u64, width: f32, epsilon: f32) -> bool {
        self.version == version && (self.width - width).abs() <= epsilon
    }

    /// Row inside the line that holds `column`. A column sitting exactly on a
    /// segment boundary belongs to the row that starts there.
    #[must_use]
    pub fn row_for_column(&self, column: usize) -> usize {
        self.segment_starts
            .partition_point(|&start| start <= column)
            .saturating_sub(1)
    }

    /// Line-relative half-open range of `row`.
    #[must_use]
    pub fn segment_range(&self, row: usize, line_len: usize) -> (usize, usize) {
        let row = row.min(self.row_count() - 1);
        let start = self.segment_starts.get(row).copied().unwrap_or(0);
        let end = self
            .segment_starts
            .get(row + 1)
            .copied()
            .unwrap_or(line_len);
        (start, end.max(start))
    }
}

/// Checkpoint: `line_index` begins at visual row `start_row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapAnchor {
    pub line_index: usize,
    pub start_row: usize,
}

/// Tuning knobs for the virtualizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapOptions {
    /// Lines between recorded anchors.
    pub anchor_interval: usize,
    /// Hard cap on rows produced for a single line.
    pub max_segments_per_line: usize,
    /// Width changes at or below this are treated as no change.
    pub width_epsilon: f32,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            anchor_interval: 256,
            max_segments_per_line: 2048,
            width_epsilon: 0.5,
        }
    }
}

/// Split `text` into rows no wider than `width`.
///
/// Returns the char offsets where rows begin and whether the segment cap cut
/// the line short. A row that cannot fit even one char still advances by one.
#[must_use]
pub fn build_wrap_segments(
    text: &str,
    width: f32,
    measurer: &dyn TextMeasurer,
    mode: WrapMode,
    max_segments: usize,
) -> (Vec<usize>, bool) {
    let mut starts = vec![0];
    if text.is_empty() || !mode.is_wrapping() {
        return (starts, false);
    }

    // Byte offset of every char boundary, including the end.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = bounds.len() - 1;
    let fits =
        |s: usize, e: usize| measure_checked(measurer, &text[bounds[s]..bounds[e]]) <= width;
    let is_space = |i: usize| {
        text[bounds[i]..bounds[i + 1]]
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
    };

    let mut start = 0usize;
    let mut last_len = 1usize;
    let mut truncated = false;
    loop {
        let mut end = longest_fit(start, char_len, last_len, &fits);
        if end == start {
            end = start + 1;
        } else if mode == WrapMode::Word && end < char_len && !is_space(end) {
            // Whitespace at the row start is not a break: it would leave a
            // row holding nothing but that space.
            if let Some(brk) = (start + 2..end).rev().find(|&i| is_space(i - 1)) {
                end = brk;
            }
        }
        if end >= char_len {
            break;
        }
        if starts.len() >= max_segments.max(1) {
            truncated = true;
            break;
        }
        starts.push(end);
        last_len = end - start;
        start = end;
    }
    (starts, truncated)
}

/// Largest `e` in `[start, len]` with `fits(start, e)`, assuming `fits` is
/// monotone in `e`. Gallops from `hint` so each row costs about its own
/// length times a log factor; the full remainder is only measured once the
/// gallop runs past the end of the line.
fn longest_fit<F>(start: usize, len: usize, hint: usize, fits: &F) -> usize
where
    F: Fn(usize, usize) -> bool,
{
    // Invariant: fits(start, lo) (trivially for lo == start), !fits(start, hi)
    // whenever hi < len.
    let mut lo = start;
    let mut hi = len;
    let mut step = hint.max(1);
    loop {
        let probe = start.saturating_add(step);
        if probe >= len {
            if fits(start, len) {
                return len;
            }
            break;
        }
        if fits(start, probe) {
            lo = probe;
            step = step.saturating_mul(2);
        } else {
            hi = probe;
            break;
        }
    }
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if fits(start, mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CacheKey {
    version: u64,
    width: f32,
    mode: WrapMode,
}

/// Per-instance wrap cache plus anchor table.
#[derive(Clone, Debug, Default)]
pub struct WrapVirtualizer {
    options: WrapOptions,
    mode: WrapMode,
    key: Option<CacheKey>,
    layouts: HashMap<usize, WrapLayout>,
    anchors: Vec<WrapAnchor>,
    /// Sum of `row_count - 1` over cached layouts.
    extra_rows: usize,
}

impl WrapVirtualizer {
    #[must_use]
    pub fn new(options: WrapOptions, mode: WrapMode) -> Self {
        Self {
            options,
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn options(&self) -> WrapOptions {
        self.options
    }

    #[must_use]
    pub fn mode(&self) -> WrapMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: WrapMode) {
        if mode != self.mode {
            self.mode = mode;
            self.invalidate("wrap mode changed");
        }
    }

    /// Drop all layouts and anchors.
    pub fn invalidate(&mut self, reason: &'static str) {
        if self.key.is_some() || !self.layouts.is_empty() {
            tracing::debug!(
                reason,
                layouts = self.layouts.len(),
                anchors = self.anchors.len(),
                "wrap cache invalidated"
            );
        }
        self.key = None;
        self.layouts.clear();
        self.anchors.clear();
        self.extra_rows = 0;
    }

    /// Recorded anchors, ascending by line.
    #[must_use]
    pub fn anchors(&self) -> &[WrapAnchor] {
        &self.anchors
    }

    #[must_use]
    pub fn cached_line_count(&self) -> usize {
        self.layouts.len()
    }

    fn sync(&mut self, version: u64, width: f32) {
        let current = self.key;
        let stale = current.is_none_or(|key| {
            key.version != version
                || key.mode != self.mode
                || (key.width - width).abs() > self.options.width_epsilon
        });
        if stale {
            if let Some(key) = current {
                let reason = if key.version == version {
                    "wrap width changed"
                } else {
                    "document changed"
                };
                self.invalidate(reason);
            }
            self.key = Some(CacheKey {
                version,
                width,
                mode: self.mode,
            });
        }
    }

    /// Cached or freshly built layout for `line`.
    pub fn layout(
        &mut self,
        doc: &Document,
        line: usize,
        width: f32,
        measurer: &dyn TextMeasurer,
    ) -> &WrapLayout {
        self.sync(doc.version(), width);
        let line = line.min(doc.line_count() - 1);
        let version = doc.version();
        let epsilon = self.options.width_epsilon;
        let fresh = self
            .layouts
            .get(&line)
            .is_some_and(|layout| layout.is_valid_for(version, width, epsilon));
        if !fresh {
            tracing::trace!(line, width, "wrap layout miss");
            let text = doc.line_text(line);
            let (segment_starts, truncated) = build_wrap_segments(
                &text,
                width,
                measurer,
                self.mode,
                self.options.max_segments_per_line,
            );
            let layout = WrapLayout {
                version,
                width,
                segment_starts,
                truncated,
            };
            self.extra_rows += layout.row_count() - 1;
            if let Some(old) = self.layouts.insert(line, layout) {
                self.extra_rows -= old.row_count() - 1;
            }
        }
        &self.layouts[&line]
    }

    /// Rows occupied by `line`.
    pub fn row_count(
        &mut self,
        doc: &Document,
        line: usize,
        width: f32,
        measurer: &dyn TextMeasurer,
    ) -> usize {
        self.layout(doc, line, width, measurer).row_count()
    }

    fn record_anchor(&mut self, line_index: usize, start_row: usize) {
        let interval = self.options.anchor_interval.max(1);
        if line_index == 0 || line_index % interval != 0 {
            return;
        }
        let pos = self
            .anchors
            .partition_point(|anchor| anchor.line_index < line_index);
        if self
            .anchors
            .get(pos)
            .is_none_or(|anchor| anchor.line_index != line_index)
        {
            tracing::trace!(line_index, start_row, "wrap anchor recorded");
            self.anchors.insert(
                pos,
                WrapAnchor {
                    line_index,
                    start_row,
                },
            );
        }
    }

    /// Resolve a visual row to `(line, row_in_line)`. Rows past the end clamp
    /// to the last row of the last line.
    pub fn map_visual_row_to_line(
        &mut self,
        doc: &Document,
        visual_row: usize,
        width: f32,
        measurer: &dyn TextMeasurer,
    ) -> (usize, usize) {
        self.sync(doc.version(), width);
        let last_line = doc.line_count() - 1;
        let nearest = self
            .anchors
            .partition_point(|anchor| anchor.start_row <= visual_row);
        let (mut line, mut start_row) = nearest
            .checked_sub(1)
            .map_or((0, 0), |i| (self.anchors[i].line_index, self.anchors[i].start_row));
        loop {
            let rows = self.row_count(doc, line, width, measurer);
            if visual_row < start_row + rows || line >= last_line {
                return (line, (visual_row - start_row).min(rows - 1));
            }
            start_row += rows;
            line += 1;
            self.record_anchor(line, start_row);
        }
    }

    /// First visual row of `line` (clamped to the last line).
    pub fn visual_row_start_for_line(
        &mut self,
        doc: &Document,
        line: usize,
        width: f32,
        measurer: &dyn TextMeasurer,
    ) -> usize {
        self.sync(doc.version(), width);
        let target = line.min(doc.line_count() - 1);
        let nearest = self
            .anchors
            .partition_point(|anchor| anchor.line_index <= target);
        let (mut line, mut start_row) = nearest
            .checked_sub(1)
            .map_or((0, 0), |i| (self.anchors[i].line_index, self.anchors[i].start_row));
        while line < target {
            start_row += self.row_count(doc, line, width, measurer);
            line += 1;
            self.record_anchor(line, start_row);
        }
        start_row
    }

    /// Visual row holding `offset`.
    pub fn visual_row_for_offset(
        &mut self,
        doc: &Document,
        offset: usize,
        width: f32,
        measurer: &dyn TextMeasurer,
    ) -> usize {
        let location = doc.line_from_index(offset);
        let row_start = self.visual_row_start_for_line(doc, location.line, width, measurer);
        let column = offset.min(doc.len()) - location.start;
        row_start
            + self
                .layout(doc, location.line, width, measurer)
                .row_for_column(column)
    }

    /// Document range `(start, end)` shown on `visual_row`.
    pub fn visual_row_span(
        &mut self,
        doc: &Document,
        visual_row: usize,
        width: f32,
        measurer: &dyn TextMeasurer,
    ) -> (usize, usize) {
        let (line, row) = self.map_visual_row_to_line(doc, visual_row, width, measurer);
        let (line_start, line_end) = doc.line_span(line);
        let (start, end) = self
            .layout(doc, line, width, measurer)
            .segment_range(row, line_end - line_start);
        (line_start + start, line_start + end)
    }

    /// Total rows for scrollbar sizing: cached row counts, one row for every
    /// line not wrapped yet. Never forces a full wrap.
    pub fn estimated_total_visual_rows(&mut self, doc: &Document, width: f32) -> usize {
        self.sync(doc.version(), width);
        doc.line_count() + self.extra_rows
    }
}
