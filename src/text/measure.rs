//! Text measurement collaborator.
//!
//! The engine treats measurement as a deterministic, possibly expensive pure
//! function for a fixed font and DPI. Callers signal font or DPI changes so
//! cached layouts can be dropped.

use crate::unicode::{WidthMethod, display_width_with_method};

/// Width of a run of text in device-independent units.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> f32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> f32,
{
    fn measure(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Fixed-advance measurer: display width in cells times `char_width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub char_width: f32,
    pub width_method: WidthMethod,
}

impl MonospaceMeasurer {
    #[must_use]
    pub fn new(char_width: f32) -> Self {
        Self {
            char_width,
            width_method: WidthMethod::WcWidth,
        }
    }

    #[must_use]
    pub fn width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> f32 {
        display_width_with_method(text, self.width_method) as f32 * self.char_width
    }
}

/// Measure and sanitize: NaN and negative widths become "does not fit".
pub(crate) fn measure_checked(measurer: &dyn TextMeasurer, text: &str) -> f32 {
    crate::error::check_measurement(measurer.measure(text)).unwrap_or(f32::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_measurer() {
        let measure = |text: &str| text.chars().count() as f32 * 2.0;
        assert!((measure.measure("abcde") - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_monospace_measurer_wide_chars() {
        let measurer = MonospaceMeasurer::new(10.0);
        assert!((measurer.measure("ab") - 20.0).abs() < f32::EPSILON);
        assert!((measurer.measure("漢") - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_measure_checked_rejects_nan() {
        let bad = |_: &str| f32::NAN;
        assert!(measure_checked(&bad, "x").is_infinite());
    }
}
