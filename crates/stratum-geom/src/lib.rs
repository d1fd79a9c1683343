//! Floating point geometry primitives used across stratum.
//!
//! Coordinates are screen-like: the origin is the top-left corner and `y`
//! grows downwards. Rectangles are stored as min/max corners so that
//! degenerate (zero or negative area) rectangles remain representable; those
//! are valid "invisible" states rather than errors.

#![warn(missing_docs)]

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;
/// One-dimensional spans.
mod span;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use point::Point;
pub use rect::Rect;
pub use span::Span;

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `v` from the range `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// A zero-width source range maps everything onto `to_min`.
pub fn map_range(from_min: f32, from_max: f32, to_min: f32, to_max: f32, v: f32) -> f32 {
    let span = from_max - from_min;
    if span.abs() <= f32::EPSILON {
        return to_min;
    }
    to_min + (v - from_min) / span * (to_max - to_min)
}

/// Layout axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}
