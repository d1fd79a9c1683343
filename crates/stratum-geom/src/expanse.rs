use serde::{Deserialize, Serialize};

use super::{Error, Point, Rect, Result};

/// An `Expanse` is a size with no location. It's used for viewports and for
/// declared control sizes, where the position is resolved separately.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Expanse {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Expanse {
    /// Construct a new size.
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// Construct a size, rejecting negative or non-finite dimensions.
    pub fn try_new(w: f32, h: f32) -> Result<Self> {
        if !w.is_finite() || !h.is_finite() || w < 0.0 || h < 0.0 {
            return Err(Error::Geometry(format!("invalid size {w}x{h}")));
        }
        Ok(Self { w, h })
    }

    /// The area of this expanse.
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::zero(), *self)
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self {
            w: r.width(),
            h: r.height(),
        }
    }
}

impl From<(f32, f32)> for Expanse {
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
