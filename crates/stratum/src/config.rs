//! Engine configuration and control theme.
//!
//! Both structs deserialize from JSON with every field optional, so a host
//! can ship a partial override file.

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    error::{Error, Result},
    geom::Expanse,
    state::ControlState,
};

/// Largest accepted overlay order boost. Leaves room for the chronological
/// positions it is added to.
pub const MAX_OVERLAY_ORDER_OFFSET: i32 = 1 << 30;

/// Engine behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Draw layer for all commands emitted by the tree.
    pub render_layer: i32,
    /// Pixels scrolled per unit of scroll delta.
    pub scroll_sensitivity: f32,
    /// Approach rate for smoothed scrolling. Zero disables smoothing.
    pub smooth_scroll: f32,
    /// Grace period, in seconds, given to nodes that were not declared.
    pub default_dead_time: f32,
    /// Size of a freshly created node before any layout declaration.
    pub default_size: Expanse,
    /// Trailing space the containment engine keeps after child content.
    pub content_padding: f32,
    /// Volume attached to emitted sound cues.
    pub sound_volume: f32,
    /// Order boost for always-on-top subtrees.
    pub overlay_order_offset: i32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            render_layer: 1000,
            scroll_sensitivity: 18.0,
            smooth_scroll: 0.0,
            default_dead_time: 0.3,
            default_size: Expanse::new(100.0, 24.0),
            content_padding: 0.0,
            sound_volume: 1.0,
            overlay_order_offset: 1 << 20,
        }
    }
}

impl Configuration {
    /// Parse a configuration from JSON. Missing fields take default values.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.default_dead_time.is_finite() && self.default_dead_time >= 0.0) {
            return Err(Error::Config(format!(
                "default_dead_time must be a non-negative number, got {}",
                self.default_dead_time
            )));
        }
        if self.smooth_scroll < 0.0 || !self.smooth_scroll.is_finite() {
            return Err(Error::Config("smooth_scroll must be >= 0".into()));
        }
        if self.content_padding < 0.0 {
            return Err(Error::Config("content_padding must be >= 0".into()));
        }
        if !(0..=MAX_OVERLAY_ORDER_OFFSET).contains(&self.overlay_order_offset) {
            return Err(Error::Config(format!(
                "overlay_order_offset must be within 0..={MAX_OVERLAY_ORDER_OFFSET}, got {}",
                self.overlay_order_offset
            )));
        }
        Expanse::try_new(self.default_size.w, self.default_size.h)?;
        Ok(())
    }
}

/// A theme value that varies with interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateProperty<T> {
    /// Value with no interaction.
    pub default: T,
    /// Value while hovered.
    pub hover: T,
    /// Value while pressed.
    pub active: T,
    /// Value while focused.
    pub focus: T,
}

impl<T: Copy> StateProperty<T> {
    /// The same value for every state.
    pub const fn uniform(v: T) -> Self {
        Self {
            default: v,
            hover: v,
            active: v,
            focus: v,
        }
    }

    /// Resolve for a state. Active wins over hover, hover over focus.
    pub fn get(&self, state: ControlState) -> T {
        if state.contains(ControlState::ACTIVE) {
            self.active
        } else if state.contains(ControlState::HOVER) {
            self.hover
        } else if state.contains(ControlState::FOCUS) {
            self.focus
        } else {
            self.default
        }
    }
}

/// Visual settings for the built-in controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Container backgrounds.
    pub background: StateProperty<Color>,
    /// Control faces.
    pub foreground: StateProperty<Color>,
    /// Text colour.
    pub text: StateProperty<Color>,
    /// Accent, e.g. slider fill.
    pub accent: StateProperty<Color>,
    /// Focus outline colour.
    pub focus_box: Color,
    /// Outline width around controls.
    pub outline_width: StateProperty<f32>,
    /// Outline colour around controls.
    pub outline: StateProperty<Color>,
    /// Spacing used by layout rules and controls.
    pub padding: f32,
    /// Corner rounding.
    pub rounding: f32,
    /// Text size.
    pub font_size: StateProperty<f32>,
    /// Height of window title bars.
    pub window_title_height: f32,
    /// Sound played when a control becomes hovered.
    pub hover_sound: Option<String>,
    /// Sound played when a control becomes active.
    pub active_sound: Option<String>,
    /// Sound played when a control starts receiving scroll input.
    pub scroll_sound: Option<String>,
    /// Sound played when a control is triggered.
    pub trigger_sound: Option<String>,
    /// Sound played when a control gains focus.
    pub focus_sound: Option<String>,
}

impl Theme {
    /// The sound registered for a single state flag.
    pub fn sound_for(&self, flag: ControlState) -> Option<&str> {
        let s = if flag == ControlState::HOVER {
            &self.hover_sound
        } else if flag == ControlState::ACTIVE {
            &self.active_sound
        } else if flag == ControlState::SCROLL {
            &self.scroll_sound
        } else if flag == ControlState::TRIGGERED {
            &self.trigger_sound
        } else if flag == ControlState::FOCUS {
            &self.focus_sound
        } else {
            &None
        };
        s.as_deref()
    }

    /// Parse a theme from JSON. Missing fields take default values.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Default for Theme {
    fn default() -> Self {
        let fg = Color::rgba(0.02, 0.333, 0.333, 1.0);
        Self {
            background: StateProperty::uniform(Color::rgba(0.008, 0.145, 0.145, 1.0)),
            foreground: StateProperty {
                default: fg,
                hover: fg.brightness(1.1),
                active: fg.brightness(0.9),
                focus: fg.brightness(0.8),
            },
            text: StateProperty::uniform(Color::rgba(0.988, 1.0, 1.0, 1.0)),
            accent: StateProperty::uniform(Color::rgba(0.871, 0.227, 0.404, 1.0)),
            focus_box: Color::rgba(0.227, 0.871, 0.855, 1.0),
            outline_width: StateProperty::uniform(0.0),
            outline: StateProperty::uniform(Color::TRANSPARENT),
            padding: 5.0,
            rounding: 1.0,
            font_size: StateProperty::uniform(12.0),
            window_title_height: 24.0,
            hover_sound: None,
            active_sound: Some("click".into()),
            scroll_sound: None,
            trigger_sound: None,
            focus_sound: None,
        }
    }
}
