use std::panic::Location;

use crate::{
    animation::Animation,
    context::UiContext,
    control::{Control, ControlParams, RenderParams},
    error::Result,
    geom::Point,
    id::CallSite,
    layout::Declaration,
    state::{CaptureFlags, ControlState},
};

use super::{claim, face, reset_claims};

/// A push button. Reports a click on the frame after the primary button is
/// released over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Button label.
    label: String,
}

impl Button {
    /// Construct a new button with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declare a button and return whether it was clicked.
    #[track_caller]
    pub fn click(
        ui: &mut UiContext,
        label: &str,
        layout: Declaration,
        discriminator: i32,
    ) -> Result<bool> {
        let id = ui.identity_at::<Self>(discriminator, CallSite::from_location(Location::caller()))?;
        ui.start(id, Self::new(label))?;
        ui.apply(layout)?;
        let clicked = ui.instance(id)?.has_state(ControlState::TRIGGERED);
        ui.end()?;
        Ok(clicked)
    }
}

impl Control for Button {
    fn on_start(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
        p.instance.animations.add(Animation::Fade);
        Ok(())
    }

    fn on_process(&mut self, p: &mut ControlParams<'_>) -> Result<()> {
        reset_claims(p);
        claim(p.instance, CaptureFlags::HOVER);
        Ok(())
    }

    fn on_render(&mut self, p: &mut RenderParams<'_>) -> Result<()> {
        let rect = p.animated_rect();
        let state = p.instance.state;
        let fill = p.theme.foreground.get(state);
        face(p, rect, fill);

        let size = p.theme.font_size.get(state);
        let color = p.animated_colour(p.theme.text.get(state));
        let pos = Point::new(rect.min_x + p.theme.padding, rect.center().y - size / 2.0);
        p.painter.text(pos, &self.label, size, color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Rect, testing::Harness};

    fn layout() -> Declaration {
        Declaration::new().rect(Rect::new(10.0, 10.0, 60.0, 30.0))
    }

    #[test]
    fn click_reports_once() -> Result<()> {
        let mut h = Harness::new();
        let mut clicks = Vec::new();
        h.move_to(Point::new(20.0, 20.0));
        h.press();
        for step in 0..4 {
            if step == 1 {
                h.release();
            }
            h.frame(|ui| {
                clicks.push(Button::click(ui, "ok", layout(), 0)?);
                Ok(())
            })?;
        }
        assert_eq!(clicks, vec![false, false, true, false]);
        Ok(())
    }

    #[test]
    fn release_outside_is_not_a_click() -> Result<()> {
        let mut h = Harness::new();
        let mut clicks = Vec::new();
        h.move_to(Point::new(20.0, 20.0));
        h.press();
        for step in 0..3 {
            if step == 1 {
                h.move_to(Point::new(200.0, 200.0));
                h.release();
            }
            h.frame(|ui| {
                clicks.push(Button::click(ui, "ok", layout(), 0)?);
                Ok(())
            })?;
        }
        assert_eq!(clicks, vec![false, false, false]);
        Ok(())
    }

    #[test]
    fn renders_label() -> Result<()> {
        let mut h = Harness::new();
        h.frame(|ui| {
            Button::click(ui, "hello", layout(), 0)?;
            Ok(())
        })?;
        assert_eq!(h.sink().texts(), vec!["hello".to_string()]);
        Ok(())
    }
}
