//! Viewport geometry, scroll state and hit-testing helpers.

use crate::text::measure::{TextMeasurer, measure_checked};

/// Visible area in device-independent units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a new viewport. Negative or NaN sizes collapse to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }
}

/// Logical reading position captured before a reflow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewAnchor {
    /// Document offset at the start of the topmost visible row.
    pub offset: usize,
    /// Pixels of that row scrolled out above the viewport.
    pub row_fraction: f32,
    /// Horizontal scroll, kept only when the view was not wrapping.
    pub horizontal: Option<f32>,
}

/// Scroll position plus lazily tracked content width.
#[derive(Clone, Debug)]
pub struct ViewState {
    viewport: Viewport,
    row_height: f32,
    scroll_x: f32,
    scroll_y: f32,
    max_line_width: f32,
    pending_anchor: Option<ViewAnchor>,
}

impl ViewState {
    #[must_use]
    pub fn new(row_height: f32) -> Self {
        Self {
            viewport: Viewport::default(),
            row_height,
            scroll_x: 0.0,
            scroll_y: 0.0,
            max_line_width: 0.0,
            pending_anchor: None,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    #[must_use]
    pub fn scroll(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    /// Set the scroll offsets, clamped into `[0, extent - viewport]`.
    pub fn set_scroll_clamped(&mut self, x: f32, y: f32, extent: (f32, f32)) {
        self.scroll_x = clamp_scroll(x, extent.0, self.viewport.width);
        self.scroll_y = clamp_scroll(y, extent.1, self.viewport.height);
    }

    /// Visual row at the top edge and how far into it the view is scrolled.
    #[must_use]
    pub fn top_row(&self) -> (usize, f32) {
        if self.row_height <= 0.0 {
            return (0, 0.0);
        }
        let row = (self.scroll_y / self.row_height).floor();
        (row as usize, self.scroll_y - row * self.row_height)
    }

    #[must_use]
    pub fn max_line_width(&self) -> f32 {
        self.max_line_width
    }

    /// Grow the tracked content width.
    pub fn observe_line_width(&mut self, width: f32) {
        if width.is_finite() && width > self.max_line_width {
            self.max_line_width = width;
        }
    }

    pub fn reset_line_width(&mut self) {
        self.max_line_width = 0.0;
    }

    pub fn set_pending_anchor(&mut self, anchor: ViewAnchor) {
        self.pending_anchor = Some(anchor);
    }

    pub fn take_pending_anchor(&mut self) -> Option<ViewAnchor> {
        self.pending_anchor.take()
    }
}

/// Clamp a scroll offset so the viewport stays inside the content.
#[must_use]
pub fn clamp_scroll(offset: f32, extent: f32, viewport: f32) -> f32 {
    let max = (extent - viewport).max(0.0);
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max)
}

/// Char column in `text` whose boundary lies nearest to `x`.
///
/// Prefix widths are assumed monotonic; the search measures `O(log n)`
/// prefixes.
#[must_use]
pub fn column_at_x(text: &str, x: f32, measurer: &dyn TextMeasurer) -> usize {
    if x <= 0.0 || text.is_empty() {
        return 0;
    }
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let prefix = |column: usize| measure_checked(measurer, &text[..boundaries[column]]);

    // Largest column whose prefix still fits in x.
    let (mut lo, mut hi) = (0, boundaries.len() - 1);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if prefix(mid) <= x {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    if lo + 1 < boundaries.len() {
        let before = x - prefix(lo);
        let after = prefix(lo + 1) - x;
        if after < before {
            return lo + 1;
        }
    }
    lo
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
