//! Display width calculation used by the built-in monospace measurer.

use unicode_width::UnicodeWidthStr;

/// Width policy for East Asian ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Display width of a string in cells.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    if s.is_ascii() {
        // Control characters (including tab) contribute nothing.
        return s.bytes().filter(|b| (b' '..=b'~').contains(b)).count();
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}
