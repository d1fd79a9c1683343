//! Per-node appear and disappear animations.
//!
//! Animations are driven by the node's normalised animation time `t`, which
//! rises from 0 to 1 while a node appears and falls back to 0 while it dies.
//! At `t == 1` every animation is the identity transform.

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    geom::{Point, Rect, lerp},
};

/// Easing curve applied to `t` before an animation reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    /// Quadratic ease in.
    In,
    /// Quadratic ease out.
    Out,
    /// Cubic ease in and out.
    InOut,
}

impl Easing {
    /// Apply the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::In => t * t,
            Self::Out => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// A single time-based transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Animation {
    /// Blend alpha from zero.
    Fade,
    /// Scale the rectangle around its center, from `from` up to 1.
    Shrink {
        /// Scale at `t == 0`.
        from: f32,
    },
    /// Translate the rectangle, from `offset` at `t == 0` to no offset.
    Slide {
        /// Offset at `t == 0`.
        offset: Point,
    },
    /// Blend the colour from `from`.
    Tint {
        /// Colour at `t == 0`.
        from: Color,
    },
}

impl Animation {
    /// Transform a rectangle.
    pub fn rect(&self, r: Rect, t: f32) -> Rect {
        match self {
            Self::Shrink { from } => r.scale_from_center(lerp(*from, 1.0, t)),
            Self::Slide { offset } => r.translate_by(*offset * (1.0 - t)),
            Self::Fade | Self::Tint { .. } => r,
        }
    }

    /// Transform a colour.
    pub fn colour(&self, c: Color, t: f32) -> Color {
        match self {
            Self::Fade => c.with_alpha(c.a * t),
            Self::Tint { from } => from.lerp(c, t),
            Self::Shrink { .. } | Self::Slide { .. } => c,
        }
    }
}

/// Ordered list of animations on a node. Replaced every time the node is
/// declared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationQueue {
    /// Queued animations in application order.
    items: Vec<Animation>,
    /// Curve shared by the queue.
    easing: Easing,
}

impl AnimationQueue {
    /// Append an animation.
    pub fn add(&mut self, animation: Animation) {
        self.items.push(animation);
    }

    /// Set the easing curve.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Remove all animations and reset the easing.
    pub fn clear(&mut self) {
        self.items.clear();
        self.easing = Easing::Linear;
    }

    /// Number of queued animations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queued animations.
    pub fn iter(&self) -> impl Iterator<Item = &Animation> {
        self.items.iter()
    }

    /// Run every rectangle transform in order.
    pub fn animate_rect(&self, r: Rect, t: f32) -> Rect {
        let t = self.easing.apply(t);
        self.items.iter().fold(r, |acc, a| a.rect(acc, t))
    }

    /// Run every colour transform in order.
    pub fn animate_colour(&self, c: Color, t: f32) -> Color {
        let t = self.easing.apply(t);
        self.items.iter().fold(c, |acc, a| a.colour(acc, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_at_full_time() {
        let mut q = AnimationQueue::default();
        q.add(Animation::Fade);
        q.add(Animation::Shrink { from: 0.5 });
        q.add(Animation::Slide {
            offset: Point::new(0.0, 20.0),
        });
        let r = Rect::new(10.0, 10.0, 30.0, 50.0);
        assert_eq!(q.animate_rect(r, 1.0), r);
        assert_eq!(q.animate_colour(Color::WHITE, 1.0), Color::WHITE);
    }

    #[test]
    fn start_of_animation() {
        let mut q = AnimationQueue::default();
        q.add(Animation::Fade);
        q.add(Animation::Shrink { from: 0.5 });
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert_eq!(q.animate_rect(r, 0.0), Rect::new(10.0, 5.0, 30.0, 15.0));
        assert_eq!(q.animate_colour(Color::WHITE, 0.0).a, 0.0);
        assert_eq!(q.animate_colour(Color::WHITE, 0.5).a, 0.5);
    }

    #[test]
    fn easing_endpoints() {
        for e in [Easing::Linear, Easing::In, Easing::Out, Easing::InOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
            assert_eq!(e.apply(2.0), 1.0);
        }
        assert!(Easing::In.apply(0.5) < 0.5);
        assert!(Easing::Out.apply(0.5) > 0.5);
    }

    #[test]
    fn clear_resets() {
        let mut q = AnimationQueue::default();
        q.add(Animation::Fade);
        q.set_easing(Easing::Out);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.animate_colour(Color::BLACK, 0.0), Color::BLACK);
    }
}
