//! Stratum: an immediate-mode control tree.
//!
//! Callers declare their UI every frame through a stack-based API, while the
//! context keeps a persistent node graph behind the scenes. Identity,
//! layout results, scroll offsets, interaction state and appear/disappear
//! animations survive between frames without the caller holding any of it.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`UiContext`] - One control tree and the frame API that drives it
//! - [`Control`] - The trait implemented by all controls
//! - [`Declaration`] - Layout for a node
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse, Span)
//! - [`controls`] - Built-in controls
//! - [`layout`] - Self-constraints and children layouts

#![warn(missing_docs)]

pub use stratum_geom as geom;

pub mod animation;
/// RGBA colours.
pub mod color;
pub mod config;
pub mod context;
pub mod control;
pub mod controls;
/// Hierarchical clip regions.
pub mod drawbounds;
/// Error types.
pub mod error;
pub mod id;
/// Polled host input and frame timing.
pub mod input;
pub mod layout;
pub mod navigator;
/// Nodes, instances and their rectangles.
pub mod node;
pub mod render;
pub mod scroll;
/// Sound cues for interaction state transitions.
pub mod sound;
/// Node names and interaction state flags.
pub mod state;
pub mod values;

/// Debug dump of the node tree.
mod dump;
/// Layout, process and render traversals.
mod pass;
/// The node arena.
mod tree;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use color::Color;
pub use config::{Configuration, Theme};
pub use context::{FrameFault, FrameReport, UiContext};
pub use control::{Control, ControlParams, Hook, RenderParams};
pub use error::{Error, Result};
pub use id::{CallSite, Identity, TypeTag};
pub use input::{FrameInput, FrameTime, InputState};
pub use layout::Declaration;
pub use node::{Instance, NodeInfo, Phase};
pub use render::{DrawCommand, DrawSink, RenderOrder};
pub use sound::{SoundCue, SoundSink};
pub use state::{CaptureFlags, ControlState};
