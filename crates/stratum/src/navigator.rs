//! Interaction state resolution.
//!
//! During the process pass every alive node with a raycast rectangle is
//! offered as a candidate, tagged with its capture flags and paint order. Once
//! the pass is complete the navigator hit-tests the pointer against the
//! candidates and decides which node is hovered, active, focused, scrolled
//! and triggered. The topmost candidate wins, so a descendant claiming the
//! same channel as its ancestor takes precedence over it.
//!
//! States resolved at the end of frame N are what controls see in frame N+1.

use tracing::trace;

use crate::{
    geom::Rect,
    id::Identity,
    input::InputState,
    state::{CaptureFlags, ControlState},
};

/// A node offered for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    /// Node identity.
    identity: Identity,
    /// Global raycast rectangle.
    rect: Rect,
    /// Computed global order.
    order: i32,
    /// Claimed channels.
    flags: CaptureFlags,
}

/// Tracks which nodes hold which interaction state.
#[derive(Debug, Default, Clone)]
pub struct Navigator {
    /// Node under the pointer.
    hover: Option<Identity>,
    /// Node the primary button went down on.
    active: Option<Identity>,
    /// Last activated node.
    focus: Option<Identity>,
    /// Node receiving scroll input.
    scroll: Option<Identity>,
    /// Node clicked this frame.
    triggered: Option<Identity>,
    /// Candidates collected during the current process pass.
    candidates: Vec<Candidate>,
}

impl Navigator {
    /// Construct an idle navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame's candidates.
    pub fn begin(&mut self) {
        self.candidates.clear();
    }

    /// Offer a node for hit-testing.
    pub fn offer(&mut self, identity: Identity, rect: Rect, order: i32, flags: CaptureFlags) {
        if flags.is_empty() || rect.is_empty() {
            return;
        }
        self.candidates.push(Candidate {
            identity,
            rect,
            order,
            flags,
        });
    }

    /// Number of candidates offered this frame.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Topmost candidate under the pointer that claims `flag`. Later offers
    /// win ties.
    fn topmost(&self, input: &InputState, flag: CaptureFlags) -> Option<Identity> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.flags.contains(flag) && c.rect.contains_point(input.mouse_position))
            .max_by_key(|(i, c)| (c.order, *i))
            .map(|(_, c)| c.identity)
    }

    /// Resolve states from this frame's candidates and input.
    pub fn resolve(&mut self, input: &InputState) {
        self.hover = self.topmost(input, CaptureFlags::HOVER);
        self.scroll = self.topmost(input, CaptureFlags::SCROLL);
        self.triggered = None;

        if input.primary_pressed {
            self.active = self.hover;
            self.focus = self.hover;
        }
        if input.primary_released {
            if self.active.is_some() && self.active == self.hover {
                self.triggered = self.active;
            }
            self.active = None;
        } else if !input.primary_held {
            self.active = None;
        }
        trace!(
            hover = ?self.hover,
            active = ?self.active,
            focus = ?self.focus,
            scroll = ?self.scroll,
            "navigator resolved"
        );
    }

    /// The state flags held by a node.
    pub fn state_of(&self, identity: Identity) -> ControlState {
        let mut s = ControlState::empty();
        let holds = |slot: Option<Identity>| slot == Some(identity);
        s.set(ControlState::HOVER, holds(self.hover));
        s.set(ControlState::ACTIVE, holds(self.active));
        s.set(ControlState::FOCUS, holds(self.focus));
        s.set(ControlState::SCROLL, holds(self.scroll));
        s.set(ControlState::TRIGGERED, holds(self.triggered));
        s
    }

    /// Drop every reference to a node that no longer exists.
    pub fn forget(&mut self, identity: Identity) {
        for slot in [
            &mut self.hover,
            &mut self.active,
            &mut self.focus,
            &mut self.scroll,
            &mut self.triggered,
        ] {
            if *slot == Some(identity) {
                *slot = None;
            }
        }
    }

    /// Reset to the idle state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Hovered node.
    pub fn hover(&self) -> Option<Identity> {
        self.hover
    }

    /// Active node.
    pub fn active(&self) -> Option<Identity> {
        self.active
    }

    /// Focused node.
    pub fn focus(&self) -> Option<Identity> {
        self.focus
    }

    /// Node receiving scroll input.
    pub fn scroll(&self) -> Option<Identity> {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn id(n: u32) -> Identity {
        Identity::from_raw(n)
    }

    fn at(x: f32, y: f32) -> InputState {
        InputState {
            mouse_position: Point::new(x, y),
            ..InputState::default()
        }
    }

    #[test]
    fn topmost_wins_hover() {
        let mut nav = Navigator::new();
        nav.offer(id(1), Rect::new(0.0, 0.0, 100.0, 100.0), 1, CaptureFlags::HOVER);
        nav.offer(id(2), Rect::new(10.0, 10.0, 50.0, 50.0), 2, CaptureFlags::HOVER);
        nav.resolve(&at(20.0, 20.0));
        assert_eq!(nav.hover(), Some(id(2)));
        assert_eq!(nav.state_of(id(2)), ControlState::HOVER);
        assert!(nav.state_of(id(1)).is_empty());

        nav.resolve(&at(80.0, 80.0));
        assert_eq!(nav.hover(), Some(id(1)));
    }

    #[test]
    fn capture_flags_split_channels() {
        let mut nav = Navigator::new();
        nav.offer(id(1), Rect::new(0.0, 0.0, 100.0, 100.0), 1, CaptureFlags::SCROLL);
        nav.offer(id(2), Rect::new(0.0, 0.0, 50.0, 50.0), 2, CaptureFlags::HOVER);
        nav.resolve(&at(20.0, 20.0));
        assert_eq!(nav.hover(), Some(id(2)));
        assert_eq!(nav.scroll(), Some(id(1)));
    }

    #[test]
    fn click_sequence() {
        let mut nav = Navigator::new();
        let button = Rect::new(0.0, 0.0, 10.0, 10.0);
        let press = InputState {
            primary_pressed: true,
            primary_held: true,
            ..at(5.0, 5.0)
        };
        let release = InputState {
            primary_released: true,
            ..at(5.0, 5.0)
        };

        nav.offer(id(7), button, 1, CaptureFlags::HOVER);
        nav.resolve(&press);
        assert_eq!(
            nav.state_of(id(7)),
            ControlState::HOVER | ControlState::ACTIVE | ControlState::FOCUS
        );

        nav.begin();
        nav.offer(id(7), button, 1, CaptureFlags::HOVER);
        nav.resolve(&release);
        assert_eq!(
            nav.state_of(id(7)),
            ControlState::HOVER | ControlState::FOCUS | ControlState::TRIGGERED
        );

        nav.begin();
        nav.offer(id(7), button, 1, CaptureFlags::HOVER);
        nav.resolve(&at(5.0, 5.0));
        assert!(!nav.state_of(id(7)).contains(ControlState::TRIGGERED));
    }

    #[test]
    fn release_elsewhere_does_not_trigger() {
        let mut nav = Navigator::new();
        let button = Rect::new(0.0, 0.0, 10.0, 10.0);
        nav.offer(id(7), button, 1, CaptureFlags::HOVER);
        nav.resolve(&InputState {
            primary_pressed: true,
            primary_held: true,
            ..at(5.0, 5.0)
        });
        nav.begin();
        nav.offer(id(7), button, 1, CaptureFlags::HOVER);
        nav.resolve(&InputState {
            primary_released: true,
            ..at(50.0, 50.0)
        });
        assert_eq!(nav.state_of(id(7)), ControlState::FOCUS);
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn forget_and_clear() {
        let mut nav = Navigator::new();
        nav.offer(id(3), Rect::new(0.0, 0.0, 10.0, 10.0), 0, CaptureFlags::HOVER);
        nav.resolve(&InputState {
            primary_pressed: true,
            primary_held: true,
            ..at(1.0, 1.0)
        });
        nav.forget(id(3));
        assert!(nav.state_of(id(3)).is_empty());
        nav.offer(id(3), Rect::new(0.0, 0.0, 10.0, 10.0), 0, CaptureFlags::HOVER);
        nav.clear();
        assert_eq!(nav.candidate_count(), 0);
        assert_eq!(nav.focus(), None);
    }
}
