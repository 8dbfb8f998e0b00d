//! Box geometry: the provider trait, fixed rectangles, and a taffy-backed
//! layout pass.

pub mod engine;
pub mod provider;
pub mod style;

pub use engine::{BoxLayout, LayoutError};
pub use provider::{BoxGeometry, FixedGeometry};
pub use style::{BoxStyle, Direction, Length};
