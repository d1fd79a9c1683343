use std::fmt;

use bitflags::bitflags;
use convert_case::{Case, Casing};

/// Return true if the character is valid in a node name.
pub fn valid_nodename_char(c: char) -> bool {
    (c.is_ascii_lowercase() || c.is_ascii_digit()) || c == '_'
}

/// A node name, which consists of lowercase ASCII alphanumeric characters, plus
/// underscores. Used in dumps and log output only; nodes are keyed by
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName {
    /// Stored node name string.
    name: String,
}

impl NodeName {
    /// Takes a string and munges it into a valid node name. It does this by
    /// first converting the string to snake case, then removing all invalid
    /// characters.
    pub fn convert(name: &str) -> Self {
        let raw = name.to_case(Case::Snake);
        let filtered: String = raw.chars().filter(|x| valid_nodename_char(*x)).collect();
        let name = if filtered.is_empty() {
            "node".to_string()
        } else {
            filtered
        };
        Self { name }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

bitflags! {
    /// Interaction state of a control, resolved from polled input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ControlState: u8 {
        /// The pointer is over the control and nothing above it claims hover.
        const HOVER = 1;
        /// The primary button went down on the control and is still held.
        const ACTIVE = 1 << 1;
        /// The control was the last one activated.
        const FOCUS = 1 << 2;
        /// The control receives scroll input this frame.
        const SCROLL = 1 << 3;
        /// The primary button was released over the active control.
        const TRIGGERED = 1 << 4;
    }
}

bitflags! {
    /// Input channels a node claims. When a descendant and an ancestor both
    /// claim a channel under the pointer, the one drawn on top wins.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CaptureFlags: u8 {
        /// Pointer hover and clicks.
        const HOVER = 1;
        /// Scroll wheel input.
        const SCROLL = 1 << 1;
    }
}
