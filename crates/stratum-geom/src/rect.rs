use serde::{Deserialize, Serialize};

use super::{Error, Expanse, Point, Result};

/// An axis-aligned rectangle stored as its min (top-left) and max
/// (bottom-right) corners.
///
/// A rectangle with `max <= min` on either axis has no area. Such rectangles
/// are legal and are how invisible states are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub min_x: f32,
    /// Top edge.
    pub min_y: f32,
    /// Right edge.
    pub max_x: f32,
    /// Bottom edge.
    pub max_y: f32,
}

impl Rect {
    /// Construct a rectangle from its edges.
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Construct a rectangle from its edges, rejecting non-finite values.
    pub fn try_new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Result<Self> {
        if [min_x, min_y, max_x, max_y].iter().any(|v| !v.is_finite()) {
            return Err(Error::Geometry(format!(
                "non-finite rect [{min_x}, {min_y}, {max_x}, {max_y}]"
            )));
        }
        Ok(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Construct a rectangle from an origin and a size.
    pub fn from_origin_size(origin: Point, size: Expanse) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.w, origin.y + size.h)
    }

    /// A zero rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Width, which is negative for inverted rectangles.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height, which is negative for inverted rectangles.
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Size of the rectangle, with negative dimensions clamped to zero.
    pub fn size(&self) -> Expanse {
        Expanse::new(self.width().max(0.0), self.height().max(0.0))
    }

    /// Area of the rectangle. Degenerate rectangles have zero area.
    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// True if this rectangle has no positive area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Top-left corner.
    pub fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Bottom-right corner.
    pub fn max(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Return this rectangle shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.min_x + dx,
            self.min_y + dy,
            self.max_x + dx,
            self.max_y + dy,
        )
    }

    /// Return this rectangle shifted by an offset.
    pub fn translate_by(&self, offset: Point) -> Self {
        self.translate(offset.x, offset.y)
    }

    /// Return a rectangle with the same origin and a new size.
    pub fn with_size(&self, size: Expanse) -> Self {
        Self::from_origin_size(self.min(), size)
    }

    /// Move the rectangle so that its top-left corner is at `origin`.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self::from_origin_size(origin, Expanse::new(self.width(), self.height()))
    }

    /// Grow the rectangle by `amount` on every side. Negative amounts shrink.
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Scale the rectangle around its center.
    pub fn scale_from_center(&self, factor: f32) -> Self {
        let c = self.center();
        let hw = self.width() * 0.5 * factor;
        let hh = self.height() * 0.5 * factor;
        Self::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh)
    }

    /// Intersection of two rectangles. If they do not overlap the result is
    /// an empty rectangle; it never has inverted edges.
    pub fn intersect(&self, other: &Self) -> Self {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x).max(min_x);
        let max_y = self.max_y.min(other.max_y).max(min_y);
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Smallest rectangle enclosing both rectangles.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// True if `other` lies completely inside this rectangle. Edges count as
    /// inside.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// True if the point lies inside the rectangle. The max edges are
    /// exclusive so adjacent rectangles never both contain a point.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x < self.max_x && p.y >= self.min_y && p.y < self.max_y
    }

    /// Edge-wise linear interpolation towards `other`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            crate::lerp(self.min_x, other.min_x, t),
            crate::lerp(self.min_y, other.min_y, t),
            crate::lerp(self.max_x, other.max_x, t),
            crate::lerp(self.max_y, other.max_y, t),
        )
    }
}
