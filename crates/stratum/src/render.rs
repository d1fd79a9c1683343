//! Draw commands and the sink they are submitted to.
//!
//! The engine never rasterises anything. Controls describe what they want
//! through a [`Painter`], which tags every command with the node's
//! [`RenderOrder`] and forwards it to a host supplied [`DrawSink`].

use std::cmp::Ordering;

use crate::{
    color::Color,
    geom::{Point, Rect},
};

/// Paint order key. Lower orders are painted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderOrder {
    /// Host draw layer.
    pub layer: i32,
    /// Position within the layer.
    pub order: i32,
}

impl RenderOrder {
    /// Construct a render order.
    pub const fn new(layer: i32, order: i32) -> Self {
        Self { layer, order }
    }
}

impl PartialOrd for RenderOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RenderOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.layer
            .cmp(&other.layer)
            .then(self.order.cmp(&other.order))
    }
}

/// An opaque drawing request.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Restrict subsequent commands of this node to a rectangle.
    Clip(Rect),
    /// A filled, optionally rounded, rectangle.
    Quad {
        /// Area to fill.
        rect: Rect,
        /// Fill colour.
        color: Color,
        /// Corner radius.
        rounding: f32,
    },
    /// A run of text.
    Text {
        /// Top-left of the text.
        position: Point,
        /// The text.
        text: String,
        /// Font size.
        size: f32,
        /// Text colour.
        color: Color,
    },
    /// A host image, looked up by name.
    Image {
        /// Destination rectangle.
        rect: Rect,
        /// Host resource name.
        name: String,
        /// Tint colour.
        tint: Color,
    },
}

/// Receives draw commands from the render pass.
pub trait DrawSink {
    /// Accept one command.
    fn submit(&mut self, order: RenderOrder, command: DrawCommand);
}

impl DrawSink for Vec<(RenderOrder, DrawCommand)> {
    fn submit(&mut self, order: RenderOrder, command: DrawCommand) {
        self.push((order, command));
    }
}

/// A sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DrawSink for NullSink {
    fn submit(&mut self, _order: RenderOrder, _command: DrawCommand) {}
}

/// The drawing surface handed to a control's render callback.
pub struct Painter<'a> {
    /// Destination sink.
    sink: &'a mut dyn DrawSink,
    /// Order attached to every command.
    order: RenderOrder,
    /// Effective draw bounds of the node.
    bounds: Rect,
}

impl<'a> Painter<'a> {
    /// Construct a painter for one node.
    pub fn new(sink: &'a mut dyn DrawSink, order: RenderOrder, bounds: Rect) -> Self {
        Self {
            sink,
            order,
            bounds,
        }
    }

    /// Effective draw bounds of the node being painted.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Paint order of the node being painted.
    pub fn order(&self) -> RenderOrder {
        self.order
    }

    /// Fill a rectangle. Rectangles entirely outside the draw bounds are
    /// culled.
    pub fn quad(&mut self, rect: Rect, color: Color, rounding: f32) {
        if rect.intersect(&self.bounds).is_empty() || color.a <= 0.0 {
            return;
        }
        self.sink.submit(
            self.order,
            DrawCommand::Quad {
                rect,
                color,
                rounding,
            },
        );
    }

    /// Draw text with its top-left corner at `position`.
    pub fn text(&mut self, position: Point, text: &str, size: f32, color: Color) {
        if text.is_empty() || color.a <= 0.0 {
            return;
        }
        self.sink.submit(
            self.order,
            DrawCommand::Text {
                position,
                text: text.to_string(),
                size,
                color,
            },
        );
    }

    /// Draw a named host image.
    pub fn image(&mut self, rect: Rect, name: &str, tint: Color) {
        if rect.intersect(&self.bounds).is_empty() {
            return;
        }
        self.sink.submit(
            self.order,
            DrawCommand::Image {
                rect,
                name: name.to_string(),
                tint,
            },
        );
    }

    /// Narrow the clip for the rest of this node's commands. The result never
    /// exceeds the node's draw bounds.
    pub fn clip(&mut self, rect: Rect) {
        let r = rect.intersect(&self.bounds);
        self.sink.submit(self.order, DrawCommand::Clip(r));
    }
}
