//! Containment and scroll clamping.
//!
//! A container's child content is measured in the container's local space,
//! whose origin is the container's top-left corner. When the content does not
//! fit, the excess on each side is the scrollable range and the container's
//! scroll offset is clamped into it. Clamping runs every frame, so content
//! that shrinks never leaves an out-of-range offset behind.

use crate::geom::{Expanse, Point, Rect};

/// Result of enforcing scroll bounds on one container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Containment {
    /// The clamped scroll offset.
    pub offset: Point,
    /// Scrollable range as `[-right, -below, left, above]`, or `None` when
    /// the content fits.
    pub bounds: Option<Rect>,
}

/// Clamp `offset` for a container of `size` holding `content`.
///
/// `content` is `None` when the container has no visible children.
/// `padding` is trailing space kept after the content on the right and
/// bottom edges.
pub fn enforce(size: Expanse, content: Option<Rect>, offset: Point, padding: f32) -> Containment {
    let inner = Rect::new(0.0, 0.0, size.w - padding, size.h - padding);
    let Some(content) = content else {
        return Containment {
            offset: Point::zero(),
            bounds: None,
        };
    };
    if inner.contains_rect(&content) {
        return Containment {
            offset: Point::zero(),
            bounds: None,
        };
    }

    let left = (inner.min_x - content.min_x).max(0.0);
    let right = (content.max_x - inner.max_x).max(0.0);
    let above = (inner.min_y - content.min_y).max(0.0);
    let below = (content.max_y - inner.max_y).max(0.0);

    Containment {
        offset: Point::new(offset.x.clamp(-right, left), offset.y.clamp(-below, above)),
        bounds: Some(Rect::new(-right, -below, left, above)),
    }
}

/// Shift `current` towards `target` at `rate` per second. A rate of zero
/// jumps straight to the target.
pub fn smooth_approach(current: Point, target: Point, rate: f32, dt: f32) -> Point {
    if rate <= 0.0 {
        return target;
    }
    let k = 1.0 - (-rate * dt).exp();
    current.lerp(target, k)
}
