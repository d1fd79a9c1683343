use std::panic::Location;

use crate::{
    context::UiContext,
    control::{Control, ControlParams, RenderParams},
    error::Result,
    geom::{Point, Rect, Span},
    id::{CallSite, Identity},
    layout::Declaration,
    scroll::smooth_approach,
    state::{CaptureFlags, ControlState},
};

use super::{claim, face, reset_claims};

/// Width of the scrollbar thumb.
const SCROLLBAR_WIDTH: f32 = 4.0;

/// Scroll offset the view is heading towards, kept in the value store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ScrollTarget(Point);

/// A container that clips its children and scrolls them with the wheel.
///
/// Vertical wheel movement scrolls vertically; holding shift scrolls
/// horizontally instead. With `smooth_scroll` configured the offset eases
/// towards its target rather than jumping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollView;

impl ScrollView {
    /// Declare a scroll view and leave it open for its contents. The caller
    /// must `end` it.
    #[track_caller]
    pub fn start(ui: &mut UiContext, layout: Declaration, discriminator: i32) -> Result<Identity> {
        let id = ui.identity_at::<Self>(discriminator, CallSite::from_location(Location::caller()))?;
        ui.start(id, Self)?;
        ui.apply(layout)?;
        Ok(id)
    }
}

/// Clamp a point into a scroll range.
fn clamp_into(p: Point, range: Option<Rect>) -> Point {
    match range {
        Some(r) => Point::new(p.x.clamp(r.min_x, r.max_x), p.y.clamp(r.min_y, r.max_y)),
        None => Point::zero(),
    }
}

impl Control for ScrollView {
    fn on_process(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
        reset_claims(p);
        claim(p.instance, CaptureFlags::SCROLL);
        let global = p.instance.rects.computed_global;
        p.instance.rects.draw_bounds = Some(global);

        let id = p.node.identity;
        let input = p.input;
        let ScrollTarget(mut target) = p
            .values
            .get_or(id, ScrollTarget(p.instance.inner_scroll));
        if p.instance.has_state(ControlState::SCROLL)
            && !input.ctrl_held
            && !input.scroll_delta.is_zero()
        {
            let mut delta = input.scroll_delta * p.config.scroll_sensitivity;
            if input.shift_held {
                delta = Point::new(delta.y, delta.x);
            }
            target += delta;
        }
        target = clamp_into(target, p.instance.rects.computed_scroll_bounds);
        p.instance.inner_scroll = smooth_approach(
            p.instance.inner_scroll,
            target,
            p.config.smooth_scroll,
            p.time.delta,
        );
        p.values.store(id, ScrollTarget(target));
        Ok(())
    }

    fn on_render(&mut self, p: &mut RenderParams<'_>) -> Result<()> {
        let rect = p.animated_rect();
        let state = p.instance.state;
        let background = p.theme.background.get(state);
        face(p, rect, background);

        let Some(range) = p.instance.rects.computed_scroll_bounds else {
            return Ok(());
        };
        if range.height() <= 0.0 {
            return Ok(());
        }
        let track = Span::new(rect.min_y, rect.height());
        let view = Span::new(0.0, rect.height() + range.height());
        let window = Span::new(range.max_y - p.instance.inner_scroll.y, rect.height());
        if let Ok((_, thumb, _)) = track.split_active(window, view) {
            let bar = Rect::new(
                rect.max_x - SCROLLBAR_WIDTH,
                thumb.off,
                rect.max_x,
                thumb.far(),
            );
            let c = p.animated_colour(p.theme.accent.get(state));
            p.painter.quad(bar, c, SCROLLBAR_WIDTH / 2.0);
        }
        Ok(())
    }
}
