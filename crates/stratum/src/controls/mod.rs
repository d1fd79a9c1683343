//! Built-in controls.
//!
//! Every control here is built only on the public [`Control`] contract: it
//! reads and writes its node's [`Instance`] and the value store, and draws
//! through the painter. None of them touch the tree.

/// Clickable button.
mod button;
/// Draggable window.
mod drag_window;
/// Scrolling container.
mod scroll_view;
/// Value slider.
mod slider;

pub use button::Button;
pub use drag_window::DragWindow;
pub use scroll_view::ScrollView;
pub use slider::Slider;

use crate::{
    color::Color,
    config::Theme,
    control::{Control, ControlParams, RenderParams},
    geom::Rect,
    node::Instance,
    state::{CaptureFlags, ControlState},
};

/// The control attached to the root node. Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootContainer;

impl Control for RootContainer {}

/// Make the node hit-testable over its whole global rectangle.
fn claim(instance: &mut Instance, flags: CaptureFlags) {
    instance.rects.raycast = Some(instance.rects.computed_global);
    instance.capture_flags |= flags;
}

/// Reset the flags a control claims every frame.
fn reset_claims(p: &mut ControlParams<'_>) {
    p.instance.capture_flags = CaptureFlags::empty();
}

/// Draw a themed face with an outline and a focus box.
fn face(p: &mut RenderParams<'_>, rect: Rect, fill: Color) {
    let theme: &Theme = p.theme;
    let state = p.instance.state;
    if state.contains(ControlState::FOCUS) {
        let c = p.animated_colour(theme.focus_box);
        p.painter.quad(rect.expand(2.0), c, theme.rounding + 2.0);
    }
    let outline = theme.outline_width.get(state);
    if outline > 0.0 {
        let c = p.animated_colour(theme.outline.get(state));
        p.painter.quad(rect.expand(outline), c, theme.rounding + outline);
    }
    let fill = p.animated_colour(fill);
    p.painter.quad(rect, fill, theme.rounding);
}
