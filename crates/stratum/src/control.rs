//! The contract between the engine and concrete controls.
//!
//! A control is a small value describing one kind of element. A fresh value is
//! handed to the context on every declaration and replaces the previous one;
//! anything that has to survive between frames lives in the node's
//! [`Instance`] or in the [`ValueStore`].

use std::{any::type_name, fmt};

use crate::{
    color::Color,
    config::{Configuration, Theme},
    error::Result,
    geom::Rect,
    input::{FrameTime, InputState},
    node::{Instance, NodeInfo},
    render::Painter,
    state::NodeName,
    values::ValueStore,
};

/// Everything a control callback can see, apart from drawing.
pub struct ControlParams<'a> {
    /// Tree-level snapshot of the node.
    pub node: NodeInfo,
    /// The node's computed state.
    pub instance: &'a mut Instance,
    /// Per-identity value store.
    pub values: &'a mut ValueStore,
    /// Polled input for this frame.
    pub input: &'a InputState,
    /// Frame timing.
    pub time: FrameTime,
    /// Control theme.
    pub theme: &'a Theme,
    /// Engine configuration.
    pub config: &'a Configuration,
}

/// Everything a render callback can see.
pub struct RenderParams<'a> {
    /// Tree-level snapshot of the node.
    pub node: NodeInfo,
    /// The node's computed state.
    pub instance: &'a mut Instance,
    /// Drawing surface, clipped to the node's draw bounds.
    pub painter: Painter<'a>,
    /// Per-identity value store.
    pub values: &'a ValueStore,
    /// Polled input for this frame.
    pub input: &'a InputState,
    /// Frame timing.
    pub time: FrameTime,
    /// Control theme.
    pub theme: &'a Theme,
    /// Engine configuration.
    pub config: &'a Configuration,
    /// Normalised animation time.
    pub t: f32,
}

impl RenderParams<'_> {
    /// The rendered rectangle, with the node's animations applied.
    pub fn animated_rect(&self) -> Rect {
        self.instance.rects.rendered
    }

    /// A colour after the node's animations.
    pub fn animated_colour(&self, c: Color) -> Color {
        self.instance.animations.animate_colour(c, self.t)
    }
}

/// Behaviour attached to a node. Every hook has a no-op default.
pub trait Control {
    /// The node was created.
    fn on_add(&mut self, _p: &mut ControlParams<'_>) -> Result<()> {
        Ok(())
    }

    /// The node was declared this frame, before any of its children.
    fn on_start(&mut self, _p: &mut ControlParams<'_>) -> Result<()> {
        Ok(())
    }

    /// The node's global rectangle is known. Claim capture flags, set the
    /// raycast and clip rectangles, react to state.
    fn on_process(&mut self, _p: &mut ControlParams<'_>) -> Result<()> {
        Ok(())
    }

    /// Draw the node.
    fn on_render(&mut self, _p: &mut RenderParams<'_>) -> Result<()> {
        Ok(())
    }

    /// The node's declaration block was closed.
    fn on_end(&mut self, _p: &mut ControlParams<'_>) -> Result<()> {
        Ok(())
    }

    /// The node is being pruned.
    fn on_remove(&mut self, _p: &mut ControlParams<'_>) -> Result<()> {
        Ok(())
    }

    /// Name used in dumps and logs.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.split('<').next().unwrap_or(name);
        let short = short.rsplit("::").next().unwrap_or(short);
        NodeName::convert(short)
    }
}

/// The callback a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `on_add`.
    Add,
    /// `on_start`.
    Start,
    /// `on_process`.
    Process,
    /// `on_render`.
    Render,
    /// `on_end`, or closing the frame.
    End,
    /// `on_remove`.
    Remove,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Add => "add",
            Self::Start => "start",
            Self::Process => "process",
            Self::Render => "render",
            Self::End => "end",
            Self::Remove => "remove",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DragWindowish;
    impl Control for DragWindowish {}

    struct Generic<T>(T);
    impl<T> Control for Generic<T> {}

    #[test]
    fn default_names() {
        assert_eq!(DragWindowish.name(), "drag_windowish");
        assert_eq!(Generic(1.0_f32).name(), "generic");
        assert_eq!(Hook::Process.to_string(), "process");
    }
}
