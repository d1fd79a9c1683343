use std::panic::Location;

use crate::{
    animation::Animation,
    context::UiContext,
    control::{Control, ControlParams, RenderParams},
    error::Result,
    geom::{Point, Rect},
    id::{CallSite, Identity},
    state::{CaptureFlags, ControlState},
};

use super::{claim, face, reset_claims};

/// Grace period for windows. Short, so a closed window disappears quickly.
const WINDOW_DEAD_TIME: f32 = 0.1;

/// Per-window drag state, kept in the value store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Drag {
    /// The primary button went down on the title bar and is still held.
    dragging: bool,
}

/// A window with a title bar that can be dragged around.
///
/// The window moves by shifting its own local rectangle, so the position
/// persists across frames without the caller tracking it. Children are
/// clipped to the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragWindow {
    /// Title bar text.
    title: String,
}

impl DragWindow {
    /// Construct a window control.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Declare a window and leave it open for its contents. `initial` is
    /// only applied when the window is created. The caller must `end` it.
    #[track_caller]
    pub fn start(
        ui: &mut UiContext,
        title: &str,
        initial: Rect,
        discriminator: i32,
    ) -> Result<Identity> {
        let id = ui.identity_at::<Self>(discriminator, CallSite::from_location(Location::caller()))?;
        let created = !ui.contains(id);
        ui.start(id, Self::new(title))?;
        if created {
            ui.rect(initial)?;
        }
        Ok(id)
    }

    /// The title bar of a window at `global`.
    fn title_bar(global: Rect, height: f32) -> Rect {
        Rect::new(
            global.min_x,
            global.min_y,
            global.max_x,
            (global.min_y + height).min(global.max_y),
        )
    }
}

impl Control for DragWindow {
    fn on_start(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
        p.instance.animations.add(Animation::Fade);
        p.instance.animations.add(Animation::Shrink { from: 0.8 });
        p.instance.allowed_dead_time = WINDOW_DEAD_TIME;
        Ok(())
    }

    fn on_process(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
        reset_claims(p);
        claim(p.instance, CaptureFlags::HOVER);
        let global = p.instance.rects.computed_global;
        p.instance.rects.draw_bounds = Some(global);

        let id = p.node.identity;
        let input = p.input;
        let mut drag = p.values.get_or(id, Drag::default());
        let title = Self::title_bar(global, p.theme.window_title_height);
        if input.primary_pressed
            && p.instance.has_state(ControlState::HOVER)
            && title.contains_point(input.mouse_position)
        {
            drag.dragging = true;
        }
        if !input.primary_held {
            drag.dragging = false;
        }
        if drag.dragging && !input.mouse_delta.is_zero() {
            let local = p.instance.rects.local;
            p.instance.rects.local = local.translate_by(input.mouse_delta);
        }
        p.values.store(id, drag);
        Ok(())
    }

    fn on_render(&mut self, p: &mut RenderParams<'_>) -> Result<()> {
        let rect = p.animated_rect();
        let state = p.instance.state;
        let background = p.theme.background.get(state);
        face(p, rect, background);

        let title = Self::title_bar(rect, p.theme.window_title_height);
        let bar = p.animated_colour(p.theme.foreground.get(state));
        let rounding = p.theme.rounding;
        p.painter.quad(title, bar, rounding);

        let size = p.theme.font_size.default;
        let color = p.animated_colour(p.theme.text.default);
        let pos = Point::new(
            title.min_x + p.theme.padding,
            title.center().y - size / 2.0,
        );
        p.painter.text(pos, &self.title, size, color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn window(h: &mut Harness) -> Result<Identity> {
        let mut id = Identity::ROOT;
        h.frame(|ui| {
            id = DragWindow::start(ui, "win", Rect::new(100.0, 100.0, 300.0, 250.0), 0)?;
            ui.end()
        })?;
        Ok(id)
    }

    #[test]
    fn title_bar_drag_moves_window() -> Result<()> {
        let mut h = Harness::new();
        h.move_to(Point::new(150.0, 110.0));
        let id = window(&mut h)?;
        h.press();
        window(&mut h)?;
        h.move_to(Point::new(170.0, 140.0));
        window(&mut h)?;
        h.release();
        window(&mut h)?;

        let local = h.ui().instance(id)?.rects.local;
        assert_eq!(local, Rect::new(120.0, 130.0, 320.0, 280.0));
        Ok(())
    }

    #[test]
    fn body_press_does_not_drag() -> Result<()> {
        let mut h = Harness::new();
        h.move_to(Point::new(150.0, 200.0));
        let id = window(&mut h)?;
        h.press();
        window(&mut h)?;
        h.move_to(Point::new(170.0, 230.0));
        window(&mut h)?;

        let local = h.ui().instance(id)?.rects.local;
        assert_eq!(local, Rect::new(100.0, 100.0, 300.0, 250.0));
        Ok(())
    }

    #[test]
    fn closed_window_fades_then_goes() -> Result<()> {
        let mut h = Harness::new().with_dt(0.05);
        let id = window(&mut h)?;
        h.frame(|_| Ok(()))?;
        assert!(h.ui().contains(id));
        assert!(!h.ui().node(id)?.is_alive());
        h.frame(|_| Ok(()))?;
        h.frame(|_| Ok(()))?;
        assert!(!h.ui().contains(id));
        Ok(())
    }
}
