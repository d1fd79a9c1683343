use crate::geom::{Expanse, Point};

/// Frame timing supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the host started.
    pub elapsed: f32,
}

impl FrameTime {
    /// Construct a frame time.
    pub fn new(delta: f32, elapsed: f32) -> Self {
        Self { delta, elapsed }
    }
}

/// Minimal polled input state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    /// Pointer position in viewport coordinates.
    pub mouse_position: Point,
    /// Pointer movement since the previous frame.
    pub mouse_delta: Point,
    /// Primary button is down.
    pub primary_held: bool,
    /// Primary button went down this frame.
    pub primary_pressed: bool,
    /// Primary button went up this frame.
    pub primary_released: bool,
    /// Scroll wheel movement this frame.
    pub scroll_delta: Point,
    /// Control modifier is held.
    pub ctrl_held: bool,
    /// Shift modifier is held.
    pub shift_held: bool,
}

impl InputState {
    /// Derive the next input state from raw polled values. Edge flags and the
    /// pointer delta are computed against `self`.
    pub fn poll(&self, position: Point, primary_held: bool, scroll_delta: Point) -> Self {
        Self {
            mouse_position: position,
            mouse_delta: position - self.mouse_position,
            primary_held,
            primary_pressed: primary_held && !self.primary_held,
            primary_released: !primary_held && self.primary_held,
            scroll_delta,
            ctrl_held: self.ctrl_held,
            shift_held: self.shift_held,
        }
    }

    /// Replace the modifier state.
    pub fn with_modifiers(mut self, ctrl: bool, shift: bool) -> Self {
        self.ctrl_held = ctrl;
        self.shift_held = shift;
        self
    }
}

/// Everything the host hands the context at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Frame timing.
    pub time: FrameTime,
    /// Polled input.
    pub input: InputState,
    /// Size of the drawable area.
    pub viewport: Expanse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_edges() {
        let idle = InputState::default();
        let down = idle.poll(Point::new(10.0, 5.0), true, Point::zero());
        assert!(down.primary_pressed && down.primary_held && !down.primary_released);
        assert_eq!(down.mouse_delta, Point::new(10.0, 5.0));

        let still = down.poll(Point::new(12.0, 5.0), true, Point::zero());
        assert!(!still.primary_pressed && still.primary_held);
        assert_eq!(still.mouse_delta, Point::new(2.0, 0.0));

        let up = still.poll(Point::new(12.0, 5.0), false, Point::zero());
        assert!(up.primary_released && !up.primary_held);
        assert!(up.mouse_delta.is_zero());
    }
}
