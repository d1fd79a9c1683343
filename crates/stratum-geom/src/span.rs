use crate::{Error, Result};

/// A directionless one-dimensional extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    /// The offset of this span.
    pub off: f32,
    /// The length of this span.
    pub len: f32,
}

impl Span {
    /// Construct a new span.
    pub const fn new(off: f32, len: f32) -> Self {
        Self { off, len }
    }

    /// The far limit of the span.
    pub fn far(&self) -> f32 {
        self.off + self.len
    }

    /// True if `other` lies completely within this span.
    pub fn contains(&self, other: &Self) -> bool {
        other.off >= self.off && other.far() <= self.far()
    }

    /// Split this span into (pre, active, post) spans, based on the position
    /// of a window within a view. The main use is positioning a scrollbar
    /// thumb: `self` is the track, `window` is the visible part of the
    /// content and `view` is the whole content.
    pub fn split_active(&self, window: Self, view: Self) -> Result<(Self, Self, Self)> {
        if window.len <= 0.0 || view.len <= 0.0 {
            Err(Error::Geometry("window and view must have length".into()))
        } else if !view.contains(&window) {
            Err(Error::Geometry(format!(
                "view {view:?} does not contain window {window:?}",
            )))
        } else {
            let pref = (window.off - view.off) / view.len;
            let postf = (view.far() - window.far()) / view.len;
            let pre = pref * self.len;
            let post = postf * self.len;
            let active = self.len - pre - post;
            Ok((
                Self::new(self.off, pre),
                Self::new(self.off + pre, active),
                Self::new(self.off + pre + active, post),
            ))
        }
    }
}
