use crate::geom::Rect;

/// A stack of effective clip regions, one per open node during a traversal.
///
/// The bottom of the stack is implicit: with nothing pushed, the effective
/// bounds are the whole viewport.
#[derive(Debug, Clone)]
pub struct DrawBoundsStack {
    /// Pushed effective bounds, innermost last.
    stack: Vec<Rect>,
    /// Bounds used when nothing has been pushed.
    viewport: Rect,
}

impl DrawBoundsStack {
    /// Create an empty stack over a viewport.
    pub fn new(viewport: Rect) -> Self {
        Self {
            stack: Vec::new(),
            viewport,
        }
    }

    /// Effective bounds for a node.
    ///
    /// An explicit rectangle is intersected with the nearest ancestor's
    /// bounds, unless the node is always on top, in which case it stands
    /// alone. A node without an explicit rectangle inherits its ancestor's
    /// bounds, or the viewport at the top of the tree.
    pub fn resolve(&self, explicit: Option<Rect>, always_on_top: bool) -> Rect {
        match (explicit, self.stack.last()) {
            (Some(own), Some(parent)) if !always_on_top => own.intersect(parent),
            (Some(own), _) => own,
            (None, Some(parent)) => *parent,
            (None, None) => self.viewport,
        }
    }

    /// Push bounds for the duration of a node's subtree.
    pub fn push(&mut self, bounds: Rect) {
        self.stack.push(bounds);
    }

    /// Pop the innermost bounds.
    pub fn pop(&mut self) -> Option<Rect> {
        self.stack.pop()
    }

    /// Innermost bounds, if any were pushed.
    pub fn peek(&self) -> Option<Rect> {
        self.stack.last().copied()
    }

    /// Number of pushed bounds.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
