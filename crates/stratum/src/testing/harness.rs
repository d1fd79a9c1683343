use crate::{
    context::{FrameReport, UiContext},
    error::Result,
    geom::{Expanse, Point},
    input::{FrameInput, FrameTime, InputState},
};

use super::{RecordingSink, RecordingSounds};

/// Drives a [`UiContext`] frame by frame with a fixed time step and scripted
/// pointer input.
///
/// Pointer position and button state persist between frames; scroll delta
/// applies to the next frame only. Draw commands are recorded per frame,
/// sound cues accumulate.
pub struct Harness {
    /// The context under test.
    ui: UiContext,
    /// Draw commands from the most recent frame.
    sink: RecordingSink,
    /// Every sound cue played so far.
    sounds: RecordingSounds,
    /// Input of the previous frame, used to derive edges.
    input: InputState,
    /// Pointer position for the next frame.
    pointer: Point,
    /// Primary button state for the next frame.
    held: bool,
    /// Scroll delta for the next frame.
    scroll: Point,
    /// Control modifier.
    ctrl: bool,
    /// Shift modifier.
    shift: bool,
    /// Fixed time step.
    dt: f32,
    /// Seconds since the harness started.
    elapsed: f32,
    /// Viewport size.
    viewport: Expanse,
    /// Report of the most recent frame.
    report: FrameReport,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// A harness around a default context, at 60 frames per second on an
    /// 800x600 viewport.
    pub fn new() -> Self {
        Self::with_context(UiContext::default())
    }

    /// A harness around an existing context.
    pub fn with_context(ui: UiContext) -> Self {
        Self {
            ui,
            sink: RecordingSink::new(),
            sounds: RecordingSounds::default(),
            input: InputState::default(),
            pointer: Point::zero(),
            held: false,
            scroll: Point::zero(),
            ctrl: false,
            shift: false,
            dt: 1.0 / 60.0,
            elapsed: 0.0,
            viewport: Expanse::new(800.0, 600.0),
            report: FrameReport::default(),
        }
    }

    /// Set the fixed time step.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Set the viewport size.
    pub fn with_viewport(mut self, w: f32, h: f32) -> Self {
        self.viewport = Expanse::new(w, h);
        self
    }

    /// The context under test.
    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Mutable access to the context under test.
    pub fn ui_mut(&mut self) -> &mut UiContext {
        &mut self.ui
    }

    /// Draw commands of the most recent frame.
    pub fn sink(&self) -> &RecordingSink {
        &self.sink
    }

    /// Sound cues played so far.
    pub fn sounds(&self) -> &RecordingSounds {
        &self.sounds
    }

    /// Report of the most recent frame.
    pub fn report(&self) -> &FrameReport {
        &self.report
    }

    /// Move the pointer.
    pub fn move_to(&mut self, p: Point) {
        self.pointer = p;
    }

    /// Push the primary button down.
    pub fn press(&mut self) {
        self.held = true;
    }

    /// Let the primary button go.
    pub fn release(&mut self) {
        self.held = false;
    }

    /// Scroll during the next frame.
    pub fn scroll(&mut self, delta: Point) {
        self.scroll = delta;
    }

    /// Set the modifier keys.
    pub fn modifiers(&mut self, ctrl: bool, shift: bool) {
        self.ctrl = ctrl;
        self.shift = shift;
    }

    /// Run one frame. `declare` issues the frame's declarations. The frame
    /// is always finished, even when `declare` fails, and the first error is
    /// returned.
    pub fn frame<F>(&mut self, declare: F) -> Result<&FrameReport>
    where
        F: FnOnce(&mut UiContext) -> Result<()>,
    {
        let input = self
            .input
            .poll(self.pointer, self.held, self.scroll)
            .with_modifiers(self.ctrl, self.shift);
        self.input = input;
        self.scroll = Point::zero();
        self.elapsed += self.dt;

        self.ui.begin_frame(FrameInput {
            time: FrameTime::new(self.dt, self.elapsed),
            input,
            viewport: self.viewport,
        })?;
        self.sink.clear();
        let declared = declare(&mut self.ui);
        let report = self.ui.end_frame(&mut self.sink)?;
        declared?;
        report.play(&mut self.sounds);
        self.report = report;
        Ok(&self.report)
    }

    /// Run `n` frames with the same declarations.
    pub fn frames<F>(&mut self, n: usize, mut declare: F) -> Result<()>
    where
        F: FnMut(&mut UiContext) -> Result<()>,
    {
        for _ in 0..n {
            self.frame(&mut declare)?;
        }
        Ok(())
    }
}
