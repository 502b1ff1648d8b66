//! Geometry primitives for tag layout.
//!
//! All values are in abstract layout units. Renderers map layout units onto
//! their own surface (terminal cells, pixels) when drawing.

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Uniform padding applied to rectangles.
mod insets;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use insets::Insets;
pub use point::Point;
pub use rect::Rect;
