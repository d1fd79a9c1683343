//! A small scripted session for the stratum control tree: a draggable window
//! holding a counter button, a volume slider and a scrolling list.

use stratum::{
    Declaration, FrameInput, FrameTime, InputState, Result, UiContext,
    controls::{Button, DragWindow, ScrollView, Slider},
    geom::{Expanse, Point, Rect},
    layout::VerticalLayout,
};

/// Frames per second the script assumes.
const FPS: f32 = 60.0;

/// Number of rows in the list.
const ROWS: i32 = 20;

/// Application state that lives outside the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Demo {
    /// Times the counter button was clicked.
    pub clicks: u32,
    /// Slider value.
    pub volume: f32,
    /// Last clicked list row.
    pub selected: Option<i32>,
}

impl Demo {
    /// Construct the initial state.
    pub fn new() -> Self {
        Self {
            volume: 0.5,
            ..Self::default()
        }
    }

    /// Issue one frame's declarations.
    pub fn declare(&mut self, ui: &mut UiContext) -> Result<()> {
        DragWindow::start(ui, "stratum", Rect::new(40.0, 40.0, 440.0, 380.0), 0)?;

        let counter = Declaration::new().rect(Rect::new(10.0, 34.0, 130.0, 58.0));
        if Button::click(ui, &format!("clicked {}", self.clicks), counter, 0)? {
            self.clicks += 1;
        }

        let volume = Declaration::new().rect(Rect::new(140.0, 34.0, 390.0, 58.0));
        Slider::float(ui, &mut self.volume, Slider::new(0.0, 1.0).step(0.05), volume, 0)?;

        let list = Declaration::new()
            .rect(Rect::new(10.0, 70.0, 390.0, 330.0))
            .children(VerticalLayout);
        ScrollView::start(ui, list, 0)?;
        for row in 0..ROWS {
            let layout = Declaration::new().size(360.0, 24.0);
            if Button::click(ui, &format!("row {row}"), layout, row)? {
                self.selected = Some(row);
            }
        }
        ui.end()?;

        ui.end()
    }

    /// One-line description of the state.
    pub fn summary(&self) -> String {
        let selected = self
            .selected
            .map_or_else(|| "none".to_string(), |r| r.to_string());
        format!(
            "clicks: {}, volume: {:.2}, selected: {selected}",
            self.clicks, self.volume
        )
    }
}

/// Pointer state for one scripted frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Step {
    /// Pointer position.
    pointer: Point,
    /// Primary button held.
    held: bool,
    /// Scroll wheel delta.
    scroll: Point,
}

impl Step {
    /// Pointer resting at a position.
    fn at(x: f32, y: f32) -> Self {
        Self {
            pointer: Point::new(x, y),
            held: false,
            scroll: Point::zero(),
        }
    }

    /// Hold the primary button.
    fn held(mut self) -> Self {
        self.held = true;
        self
    }

    /// Roll the wheel.
    fn wheel(mut self, dy: f32) -> Self {
        self.scroll = Point::new(0.0, dy);
        self
    }
}

/// Linear interpolation of `frame` through `[start, end)`.
fn progress(frame: usize, start: usize, end: usize) -> f32 {
    (frame.saturating_sub(start) as f32 / (end - start) as f32).clamp(0.0, 1.0)
}

/// The scripted input for a frame.
///
/// Click the counter, drag the window by its title bar, scroll the list and
/// drag the slider to the right, then rest.
fn step(frame: usize) -> Step {
    match frame {
        0..10 => Step::at(110.0, 86.0),
        10..12 => Step::at(110.0, 86.0).held(),
        12..20 => Step::at(200.0, 50.0),
        20..52 => {
            let t = progress(frame, 21, 51);
            Step::at(200.0 + 100.0 * t, 50.0 + 60.0 * t).held()
        }
        52..55 => Step::at(300.0, 300.0),
        55..85 => Step::at(300.0, 300.0).wheel(-1.0),
        85..88 => Step::at(300.0, 146.0),
        88..110 => {
            let t = progress(frame, 89, 109);
            Step::at(300.0 + 230.0 * t, 146.0).held()
        }
        _ => Step::at(600.0, 500.0),
    }
}

/// Replays the scripted input, one frame at a time.
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Next frame number.
    frame: usize,
    /// Input handed to the previous frame.
    input: InputState,
}

impl Script {
    /// Start from frame zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame number of the next call to [`Self::next_frame`].
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Input for the next frame.
    pub fn next_frame(&mut self) -> FrameInput {
        let s = step(self.frame);
        self.input = self.input.poll(s.pointer, s.held, s.scroll);
        self.frame += 1;
        let dt = 1.0 / FPS;
        FrameInput {
            time: FrameTime::new(dt, self.frame as f32 * dt),
            input: self.input,
            viewport: Expanse::new(800.0, 600.0),
        }
    }
}
