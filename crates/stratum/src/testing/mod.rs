//! Helpers for exercising a context without a host: recording sinks and a
//! frame-driving harness.

/// Frame-driving harness.
mod harness;

pub use harness::Harness;

use crate::{
    geom::Rect,
    render::{DrawCommand, DrawSink, RenderOrder},
    sound::{SoundCue, SoundSink},
};

/// A draw sink that keeps every command in submission order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Recorded commands.
    commands: Vec<(RenderOrder, DrawCommand)>,
}

impl RecordingSink {
    /// Construct an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All commands, in submission order.
    pub fn commands(&self) -> &[(RenderOrder, DrawCommand)] {
        &self.commands
    }

    /// Commands sorted the way a host paints them: by render order, keeping
    /// submission order for ties.
    pub fn painted(&self) -> Vec<(RenderOrder, DrawCommand)> {
        let mut v = self.commands.clone();
        v.sort_by_key(|(order, _)| *order);
        v
    }

    /// The text of every text command.
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|(_, c)| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// The rectangle of every clip command.
    pub fn clips(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|(_, c)| match c {
                DrawCommand::Clip(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// The rectangle of every quad command.
    pub fn quads(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|(_, c)| match c {
                DrawCommand::Quad { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl DrawSink for RecordingSink {
    fn submit(&mut self, order: RenderOrder, command: DrawCommand) {
        self.commands.push((order, command));
    }
}

/// A sound sink that keeps every cue.
#[derive(Debug, Default, Clone)]
pub struct RecordingSounds {
    /// Recorded cues.
    cues: Vec<SoundCue>,
}

impl RecordingSounds {
    /// All cues, in play order.
    pub fn cues(&self) -> &[SoundCue] {
        &self.cues
    }

    /// Names of all cues, in play order.
    pub fn names(&self) -> Vec<&str> {
        self.cues.iter().map(|c| c.name.as_str()).collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl SoundSink for RecordingSounds {
    fn play(&mut self, cue: &SoundCue) {
        self.cues.push(cue.clone());
    }
}
