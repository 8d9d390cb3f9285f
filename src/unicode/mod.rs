//! Unicode display-width helpers.

mod width;

pub use width::{WidthMethod, display_width_with_method};
