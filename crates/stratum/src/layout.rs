//! Layout rules.
//!
//! Two kinds of rule exist. A [`Constraint`] rewrites a node's own rectangle
//! in its parent's space. A [`ChildLayout`] belongs to a parent and positions
//! each of its visible children in turn. Both are pure functions of their
//! inputs and must be idempotent: re-applying a rule to its own output yields
//! the same rectangle.
//!
//! Per node and per frame the order is fixed. A parent's children layouts run
//! first, against the children's declared rectangles, and only then does each
//! child apply its own constraints and recurse.

use std::fmt::Debug;

use crate::geom::{Direction, Expanse, Point, Rect};

/// Inputs visible to a self-constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintContext {
    /// Size of the parent's intermediate rectangle.
    pub parent: Expanse,
    /// Theme padding.
    pub padding: f32,
}

/// A rule a node applies to its own rectangle.
pub trait Constraint: Debug {
    /// Compute the new rectangle.
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect;
}

/// Inputs visible to a children layout rule.
#[derive(Debug, Clone, Copy)]
pub struct ChildContext<'a> {
    /// Size of the parent's intermediate rectangle.
    pub parent: Expanse,
    /// Rectangles of every visible sibling, in sibling order, as they stood
    /// before this rule ran.
    pub siblings: &'a [Rect],
    /// Index of the child being positioned.
    pub index: usize,
    /// Theme padding.
    pub padding: f32,
}

/// A rule a parent applies to each of its visible children.
pub trait ChildLayout: Debug {
    /// Compute the new rectangle for the child at `cx.index`.
    fn apply(&self, child: Rect, cx: &ChildContext<'_>) -> Rect;
}

/// Move the left edge to `padding` from the parent's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickLeft;

impl Constraint for StickLeft {
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect {
        rect.translate(cx.padding - rect.min_x, 0.0)
    }
}

/// Move the right edge to `padding` from the parent's right edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickRight;

impl Constraint for StickRight {
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect {
        rect.translate(cx.parent.w - cx.padding - rect.max_x, 0.0)
    }
}

/// Move the top edge to `padding` from the parent's top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickTop;

impl Constraint for StickTop {
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect {
        rect.translate(0.0, cx.padding - rect.min_y)
    }
}

/// Move the bottom edge to `padding` from the parent's bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickBottom;

impl Constraint for StickBottom {
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect {
        rect.translate(0.0, cx.parent.h - cx.padding - rect.max_y)
    }
}

/// Stretch horizontally to fill the parent, minus padding on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitWidth;

impl Constraint for FitWidth {
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect {
        Rect::new(
            cx.padding,
            rect.min_y,
            (cx.parent.w - cx.padding).max(cx.padding),
            rect.max_y,
        )
    }
}

/// Stretch vertically to fill the parent, minus padding on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitHeight;

impl Constraint for FitHeight {
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect {
        Rect::new(
            rect.min_x,
            cx.padding,
            rect.max_x,
            (cx.parent.h - cx.padding).max(cx.padding),
        )
    }
}

/// Center within the parent along one axis, or both when `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Center(pub Option<Direction>);

impl Constraint for Center {
    fn apply(&self, rect: Rect, cx: &ConstraintContext) -> Rect {
        let dx = (cx.parent.w - rect.width()) / 2.0 - rect.min_x;
        let dy = (cx.parent.h - rect.height()) / 2.0 - rect.min_y;
        match self.0 {
            Some(Direction::Horizontal) => rect.translate(dx, 0.0),
            Some(Direction::Vertical) => rect.translate(0.0, dy),
            None => rect.translate(dx, dy),
        }
    }
}

/// Stack children top to bottom. Child `i` moves down by the summed height
/// plus padding of the visible children before it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalLayout;

impl ChildLayout for VerticalLayout {
    fn apply(&self, child: Rect, cx: &ChildContext<'_>) -> Rect {
        let offset: f32 = cx.siblings[..cx.index]
            .iter()
            .map(|r| r.height() + cx.padding)
            .sum();
        child.translate(0.0, offset)
    }
}

/// Stack children left to right. Child `i` moves right by the summed width
/// plus padding of the visible children before it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorizontalLayout;

impl ChildLayout for HorizontalLayout {
    fn apply(&self, child: Rect, cx: &ChildContext<'_>) -> Rect {
        let offset: f32 = cx.siblings[..cx.index]
            .iter()
            .map(|r| r.width() + cx.padding)
            .sum();
        child.translate(offset, 0.0)
    }
}

/// A batch of layout declarations for one node, applied with
/// `UiContext::apply`. Built-in controls take one so that callers can place
/// them without opening the node themselves.
#[derive(Debug, Default)]
pub struct Declaration {
    /// Local size.
    pub size: Option<Expanse>,
    /// Local origin.
    pub position: Option<Point>,
    /// Self-constraints, in order.
    pub constraints: Vec<Box<dyn Constraint>>,
    /// Children layouts, in order.
    pub children_layout: Vec<Box<dyn ChildLayout>>,
    /// Escape ancestor clipping.
    pub always_on_top: bool,
    /// Requested position among siblings.
    pub order: Option<i32>,
    /// Grace period override.
    pub dead_time: Option<f32>,
}

impl Declaration {
    /// An empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local size.
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Expanse::new(w, h));
        self
    }

    /// Set the local origin.
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Append a self-constraint.
    pub fn constraint(mut self, c: impl Constraint + 'static) -> Self {
        self.constraints.push(Box::new(c));
        self
    }

    /// Append a children layout.
    pub fn children(mut self, l: impl ChildLayout + 'static) -> Self {
        self.children_layout.push(Box::new(l));
        self
    }

    /// Paint above everything else, unclipped by ancestors.
    pub fn on_top(mut self) -> Self {
        self.always_on_top = true;
        self
    }

    /// Request a position among siblings.
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Override the grace period.
    pub fn dead_time(mut self, seconds: f32) -> Self {
        self.dead_time = Some(seconds);
        self
    }

    /// Shorthand for `size` then `position`.
    pub fn rect(self, r: Rect) -> Self {
        self.size(r.width(), r.height()).position(r.min_x, r.min_y)
    }
}

/// Apply a node's constraints in declaration order.
pub fn apply_constraints(
    constraints: &[Box<dyn Constraint>],
    rect: Rect,
    cx: &ConstraintContext,
) -> Rect {
    constraints.iter().fold(rect, |r, c| c.apply(r, cx))
}

/// Apply a parent's children layouts to the rectangles of its visible
/// children, in place. Each rule sees a snapshot of the rectangles as they
/// stood before it ran, and positions every child exactly once.
pub fn apply_children_layout(
    layouts: &[Box<dyn ChildLayout>],
    children: &mut [Rect],
    parent: Expanse,
    padding: f32,
) {
    for layout in layouts {
        let snapshot = children.to_vec();
        for (index, child) in children.iter_mut().enumerate() {
            let cx = ChildContext {
                parent,
                siblings: &snapshot,
                index,
                padding,
            };
            *child = layout.apply(*child, &cx);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn cx() -> ConstraintContext {
        ConstraintContext {
            parent: Expanse::new(200.0, 100.0),
            padding: 5.0,
        }
    }

    #[test]
    fn stick_edges() {
        let r = Rect::new(30.0, 30.0, 50.0, 40.0);
        assert_eq!(StickLeft.apply(r, &cx()), Rect::new(5.0, 30.0, 25.0, 40.0));
        assert_eq!(StickRight.apply(r, &cx()), Rect::new(175.0, 30.0, 195.0, 40.0));
        assert_eq!(StickTop.apply(r, &cx()), Rect::new(30.0, 5.0, 50.0, 15.0));
        assert_eq!(StickBottom.apply(r, &cx()), Rect::new(30.0, 85.0, 50.0, 95.0));
    }

    #[test]
    fn fit_and_center() {
        let r = Rect::new(30.0, 30.0, 50.0, 40.0);
        assert_eq!(FitWidth.apply(r, &cx()), Rect::new(5.0, 30.0, 195.0, 40.0));
        assert_eq!(FitHeight.apply(r, &cx()), Rect::new(30.0, 5.0, 50.0, 95.0));
        assert_eq!(Center(None).apply(r, &cx()), Rect::new(90.0, 45.0, 110.0, 55.0));
        assert_eq!(
            Center(Some(Direction::Vertical)).apply(r, &cx()),
            Rect::new(30.0, 45.0, 50.0, 55.0)
        );
    }

    #[test]
    fn vertical_stack_offsets() {
        let mut children = [
            Rect::new(0.0, 0.0, 50.0, 10.0),
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(0.0, 0.0, 50.0, 30.0),
        ];
        let layouts: Vec<Box<dyn ChildLayout>> = vec![Box::new(VerticalLayout)];
        apply_children_layout(&layouts, &mut children, Expanse::new(100.0, 100.0), 5.0);
        let ys: Vec<f32> = children.iter().map(|r| r.min_y).collect();
        assert_eq!(ys, vec![0.0, 15.0, 40.0]);
    }

    #[test]
    fn horizontal_stack_offsets() {
        let mut children = [
            Rect::new(0.0, 0.0, 10.0, 5.0),
            Rect::new(0.0, 0.0, 20.0, 5.0),
        ];
        let layouts: Vec<Box<dyn ChildLayout>> = vec![Box::new(HorizontalLayout)];
        apply_children_layout(&layouts, &mut children, Expanse::new(100.0, 100.0), 2.0);
        assert_eq!(children[1], Rect::new(12.0, 0.0, 32.0, 5.0));
    }

    fn all_constraints() -> Vec<Box<dyn Constraint>> {
        vec![
            Box::new(StickLeft),
            Box::new(StickRight),
            Box::new(StickTop),
            Box::new(StickBottom),
            Box::new(FitWidth),
            Box::new(FitHeight),
            Box::new(Center(None)),
            Box::new(Center(Some(Direction::Horizontal))),
        ]
    }

    proptest! {
        #[test]
        fn constraints_are_idempotent(
            x in -500i32..500, y in -500i32..500,
            w in 0i32..300, h in 0i32..300,
            pw in 0i32..800, ph in 0i32..800,
            pick in prop::collection::vec(0usize..8, 0..5),
        ) {
            let chosen: Vec<Box<dyn Constraint>> = pick
                .iter()
                .map(|i| all_constraints().swap_remove(*i))
                .collect();
            let cx = ConstraintContext {
                parent: Expanse::new(pw as f32, ph as f32),
                padding: 5.0,
            };
            let r = Rect::new(x as f32, y as f32, (x + w) as f32, (y + h) as f32);
            let settled = apply_constraints(&chosen, r, &cx);
            prop_assert_eq!(apply_constraints(&chosen, settled, &cx), settled);
        }
    }
}
