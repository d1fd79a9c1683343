use crate::{config::Theme, id::Identity, state::ControlState};

/// A request to play a UI sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    /// Node whose state changed.
    pub identity: Identity,
    /// The state flag that was newly set.
    pub state: ControlState,
    /// Host sound name.
    pub name: String,
    /// Playback volume.
    pub volume: f32,
}

/// Receives sound cues.
pub trait SoundSink {
    /// Play one cue.
    fn play(&mut self, cue: &SoundCue);
}

impl SoundSink for Vec<SoundCue> {
    fn play(&mut self, cue: &SoundCue) {
        self.push(cue.clone());
    }
}

/// Cues for every flag present in `new` but not in `old`, for which the theme
/// names a sound.
pub fn transitions(
    identity: Identity,
    old: ControlState,
    new: ControlState,
    theme: &Theme,
    volume: f32,
) -> Vec<SoundCue> {
    (new - old)
        .iter()
        .filter_map(|flag| {
            theme.sound_for(flag).map(|name| SoundCue {
                identity,
                state: flag,
                name: name.to_string(),
                volume,
            })
        })
        .collect()
}
