use std::panic::Location;

use crate::{
    context::UiContext,
    control::{Control, ControlParams, RenderParams},
    error::Result,
    geom::{Point, Rect, map_range},
    id::CallSite,
    layout::Declaration,
    state::{CaptureFlags, ControlState},
};

use super::{claim, face, reset_claims};

/// A horizontal value slider.
///
/// The value lives in the value store under the slider's identity. Dragging
/// with the primary button or ctrl+scrolling while hovered writes an incoming
/// change, which the caller's variable picks up on its next declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    /// Value at the left edge.
    min: f32,
    /// Value at the right edge.
    max: f32,
    /// Quantisation step. `None` for a continuous slider.
    step: Option<f32>,
}

impl Slider {
    /// A continuous slider over `[min, max]`.
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    /// Snap values to multiples of `step` from `min`.
    pub fn step(mut self, step: f32) -> Self {
        self.step = (step > 0.0).then_some(step);
        self
    }

    /// Snap and clamp a raw value.
    fn quantize(&self, v: f32) -> f32 {
        let v = match self.step {
            Some(s) => self.min + ((v - self.min) / s).round() * s,
            None => v,
        };
        v.clamp(self.min.min(self.max), self.min.max(self.max))
    }

    /// The value under a horizontal position within `rect`.
    fn value_at(&self, rect: Rect, x: f32) -> f32 {
        self.quantize(map_range(rect.min_x, rect.max_x, self.min, self.max, x))
    }

    /// The increment applied per scroll notch.
    fn scroll_step(&self) -> f32 {
        self.step.unwrap_or((self.max - self.min).abs() / 100.0)
    }

    /// Declare a slider editing `value`. Returns true on the frame the
    /// caller's value was changed by the control.
    #[track_caller]
    pub fn float(
        ui: &mut UiContext,
        value: &mut f32,
        slider: Self,
        layout: Declaration,
        discriminator: i32,
    ) -> Result<bool> {
        let id = ui.identity_at::<Self>(discriminator, CallSite::from_location(Location::caller()))?;
        ui.start(id, slider)?;
        ui.apply(layout)?;
        let changed = ui.values_mut().update_for(id, value);
        ui.end()?;
        Ok(changed)
    }

    /// Declare an integer slider over `[min, max]` editing `value`.
    #[track_caller]
    pub fn int(
        ui: &mut UiContext,
        value: &mut i32,
        min: i32,
        max: i32,
        layout: Declaration,
        discriminator: i32,
    ) -> Result<bool> {
        let mut v = *value as f32;
        let slider = Self::new(min as f32, max as f32).step(1.0);
        let changed = Self::float(ui, &mut v, slider, layout, discriminator)?;
        *value = v.round() as i32;
        Ok(changed)
    }
}

impl Control for Slider {
    fn on_process(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
        reset_claims(p);
        claim(p.instance, CaptureFlags::HOVER);

        let id = p.node.identity;
        let rect = p.instance.rects.computed_global;
        let current = p.values.get_or(id, self.min);
        let input = p.input;
        let hovered = p.instance.has_state(ControlState::HOVER);

        let next = if (p.instance.has_state(ControlState::ACTIVE) && input.primary_held)
            || (hovered && input.primary_pressed)
        {
            self.value_at(rect, input.mouse_position.x)
        } else if hovered && input.ctrl_held && input.scroll_delta.y != 0.0 {
            self.quantize(current + self.scroll_step() * input.scroll_delta.y.signum())
        } else {
            current
        };
        if next != current {
            p.values.set(id, next);
        }
        Ok(())
    }

    fn on_render(&mut self, p: &mut RenderParams<'_>) -> Result<()> {
        let rect = p.animated_rect();
        let state = p.instance.state;
        let fill = p.theme.foreground.get(state);
        face(p, rect, fill);

        let value = p.values.get_or(p.node.identity, self.min);
        let frac = map_range(self.min, self.max, 0.0, 1.0, value).clamp(0.0, 1.0);
        let bar = Rect::new(
            rect.min_x,
            rect.min_y,
            rect.min_x + rect.width() * frac,
            rect.max_y,
        );
        let accent = p.animated_colour(p.theme.accent.get(state));
        let rounding = p.theme.rounding;
        p.painter.quad(bar, accent, rounding);

        let text = match self.step {
            Some(s) if s.fract() == 0.0 => format!("{value:.0}"),
            _ => format!("{value:.2}"),
        };
        let size = p.theme.font_size.get(state);
        let color = p.animated_colour(p.theme.text.get(state));
        let pos = Point::new(rect.min_x + p.theme.padding, rect.center().y - size / 2.0);
        p.painter.text(pos, &text, size, color);
        Ok(())
    }
}
