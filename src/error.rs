//! Error types for the editing core.
//!
//! Offsets and lengths are clamped rather than rejected, and collaborator
//! failures surface as `bool`. The only fallible entry points are the ones
//! that accept configuration or validate a measurement.

use std::fmt;

/// Result type alias for editing-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for editing-core operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A configuration field holds a value the engine cannot work with.
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    /// The measurement collaborator returned a NaN, infinite or negative width.
    InvalidMeasurement { width: f32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration for `{field}`: {reason}")
            }
            Self::InvalidMeasurement { width } => {
                write!(f, "measurement returned unusable width {width}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Reject widths that would poison the wrap cache.
pub fn check_measurement(width: f32) -> Result<f32> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(Error::InvalidMeasurement { width })
    }
}
