use slotmap::new_key_type;

use crate::{
    animation::AnimationQueue,
    control::Control,
    geom::{Point, Rect},
    id::Identity,
    layout::{ChildLayout, Constraint},
    state::{CaptureFlags, ControlState, NodeName},
};

new_key_type! {
    /// Arena index of a node. Stable while the node exists.
    pub struct NodeKey;
}

/// The rectangles tracked for a node.
///
/// `local`, `intermediate` and `child_content` are in the parent's space.
/// Everything else is in global (viewport) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rects {
    /// Declared rectangle, before any layout rule. Persists across frames.
    pub local: Rect,
    /// `local` after the parent's children layouts and the node's own
    /// constraints.
    pub intermediate: Rect,
    /// `intermediate` translated by ancestor scroll and the parent's origin.
    pub computed_global: Rect,
    /// The rectangle actually drawn, after animations.
    pub rendered: Rect,
    /// Hit-test rectangle, clipped to the draw bounds. Reset every process.
    pub raycast: Option<Rect>,
    /// Explicit clip rectangle requested by the control.
    pub draw_bounds: Option<Rect>,
    /// Effective draw bounds resolved during the last traversal.
    pub computed_draw_bounds: Rect,
    /// Union of the visible children's intermediate rectangles, in this
    /// node's local space.
    pub child_content: Option<Rect>,
    /// Scrollable range, or `None` when the content fits.
    pub computed_scroll_bounds: Option<Rect>,
}

/// Per-node computed state. Controls read and write this through callbacks;
/// the engine owns it.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Node identity.
    pub identity: Identity,
    /// Tracked rectangles.
    pub rects: Rects,
    /// Offset applied to every child's global rectangle.
    pub inner_scroll: Point,
    /// Input channels this node claims.
    pub capture_flags: CaptureFlags,
    /// Interaction state resolved at the end of the previous frame.
    pub state: ControlState,
    /// Appear and disappear animations.
    pub animations: AnimationQueue,
    /// Grace period in seconds before an undeclared node is pruned.
    pub allowed_dead_time: f32,
}

impl Instance {
    /// Construct an instance with a declared rectangle.
    pub fn new(identity: Identity, local: Rect, allowed_dead_time: f32) -> Self {
        Self {
            identity,
            rects: Rects {
                local,
                intermediate: local,
                ..Rects::default()
            },
            inner_scroll: Point::zero(),
            capture_flags: CaptureFlags::empty(),
            state: ControlState::empty(),
            animations: AnimationQueue::default(),
            allowed_dead_time,
        }
    }

    /// Is any of the given state flags set?
    pub fn has_state(&self, flags: ControlState) -> bool {
        self.state.intersects(flags)
    }
}

/// Where a node is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Declared this frame.
    Alive,
    /// Not declared this frame, inside its grace period.
    Dying,
}

/// A node in the control tree.
pub struct Node {
    /// Stable identity.
    pub(crate) identity: Identity,
    /// Parent in the arena. `None` only for the root.
    pub(crate) parent: Option<NodeKey>,
    /// Children, ordered by requested local order then identity.
    pub(crate) children: Vec<NodeKey>,
    /// Behaviour. Borrowed in place, next to the instance, while a callback
    /// runs.
    pub(crate) control: Option<Box<dyn Control>>,
    /// Display name of the control type.
    pub(crate) name: NodeName,

    /// Declared during the current frame.
    pub(crate) alive: bool,
    /// Declared during the previous frame.
    pub(crate) alive_last_frame: bool,
    /// Seconds spent alive since the node last appeared.
    pub(crate) seconds_alive: f32,
    /// Seconds spent undeclared.
    pub(crate) seconds_dead: f32,

    /// Index among visible siblings.
    pub(crate) sibling_index: usize,
    /// Traversal ordinal among alive nodes, assigned each refresh.
    pub(crate) chronological_position: i32,
    /// Paint and hit-test priority.
    pub(crate) computed_global_order: i32,
    /// Caller requested position among siblings.
    pub(crate) requested_local_order: i32,
    /// Escape ancestor clipping and paint above everything else.
    pub(crate) always_on_top: bool,

    /// Self-constraints, replaced on every declaration.
    pub(crate) constraints: Vec<Box<dyn Constraint>>,
    /// Children layouts, replaced on every declaration.
    pub(crate) children_layout: Vec<Box<dyn ChildLayout>>,

    /// Computed state.
    pub(crate) instance: Instance,
}

impl Node {
    /// Construct a node that is alive in the current frame.
    pub(crate) fn new(
        identity: Identity,
        parent: Option<NodeKey>,
        control: Box<dyn Control>,
        instance: Instance,
    ) -> Self {
        let name = control.name();
        Self {
            identity,
            parent,
            children: Vec::new(),
            control: Some(control),
            name,
            alive: true,
            alive_last_frame: false,
            seconds_alive: 0.0,
            seconds_dead: 0.0,
            sibling_index: 0,
            chronological_position: 0,
            computed_global_order: 0,
            requested_local_order: 0,
            always_on_top: false,
            constraints: Vec::new(),
            children_layout: Vec::new(),
            instance,
        }
    }

    /// Stable identity.
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Display name of the control.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Computed state.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.alive {
            Phase::Alive
        } else {
            Phase::Dying
        }
    }

    /// Normalised animation time.
    ///
    /// Rises from 0 to 1 over the grace period while the node is alive and
    /// falls from 1 to 0 over the grace period while it is dying. With a zero
    /// grace period it is 1 while alive and 0 while dying.
    pub fn animation_time(&self) -> f32 {
        let d = self.instance.allowed_dead_time;
        if d <= 0.0 {
            return if self.alive { 1.0 } else { 0.0 };
        }
        if self.alive {
            (self.seconds_alive / d).clamp(0.0, 1.0)
        } else {
            (1.0 - self.seconds_dead / d).clamp(0.0, 1.0)
        }
    }

    /// Should the render pass visit this node?
    pub(crate) fn renders(&self) -> bool {
        self.alive || self.animation_time() > f32::EPSILON
    }

    /// Reset the per-declaration state. Called on every `start`.
    pub(crate) fn redeclare(&mut self) {
        self.alive = true;
        self.always_on_top = false;
        self.constraints.clear();
        self.children_layout.clear();
        self.instance.animations.clear();
    }

    /// Copyable snapshot of the public node fields.
    pub fn info(&self, parent: Option<Identity>) -> NodeInfo {
        NodeInfo {
            identity: self.identity,
            parent,
            phase: self.phase(),
            alive_last_frame: self.alive_last_frame,
            seconds_alive: self.seconds_alive,
            seconds_dead: self.seconds_dead,
            sibling_index: self.sibling_index,
            chronological_position: self.chronological_position,
            computed_global_order: self.computed_global_order,
            requested_local_order: self.requested_local_order,
            always_on_top: self.always_on_top,
            animation_time: self.animation_time(),
            child_count: self.children.len(),
        }
    }
}

/// A snapshot of a node's tree-level state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInfo {
    /// Stable identity.
    pub identity: Identity,
    /// Parent identity. `None` for the root.
    pub parent: Option<Identity>,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Declared during the previous frame.
    pub alive_last_frame: bool,
    /// Seconds spent alive since the node last appeared.
    pub seconds_alive: f32,
    /// Seconds spent undeclared.
    pub seconds_dead: f32,
    /// Index among visible siblings.
    pub sibling_index: usize,
    /// Traversal ordinal among alive nodes.
    pub chronological_position: i32,
    /// Paint and hit-test priority.
    pub computed_global_order: i32,
    /// Caller requested position among siblings.
    pub requested_local_order: i32,
    /// Escapes ancestor clipping.
    pub always_on_top: bool,
    /// Normalised animation time.
    pub animation_time: f32,
    /// Number of children, alive or dying.
    pub child_count: usize,
}

impl NodeInfo {
    /// Is the node declared this frame?
    pub fn is_alive(&self) -> bool {
        self.phase == Phase::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{animation::Animation, controls::RootContainer, layout::StickLeft};

    fn node(dead_time: f32) -> Node {
        let id = Identity::from_raw(9);
        Node::new(
            id,
            None,
            Box::new(RootContainer),
            Instance::new(id, Rect::new(0.0, 0.0, 10.0, 10.0), dead_time),
        )
    }

    #[test]
    fn animation_time_rises_and_falls() {
        let mut n = node(0.5);
        assert_eq!(n.animation_time(), 0.0);
        n.seconds_alive = 0.25;
        assert_eq!(n.animation_time(), 0.5);
        n.seconds_alive = 2.0;
        assert_eq!(n.animation_time(), 1.0);

        n.alive = false;
        n.seconds_alive = 0.0;
        n.seconds_dead = 0.125;
        assert_eq!(n.animation_time(), 0.75);
        assert!(n.renders());
        n.seconds_dead = 0.6;
        assert_eq!(n.animation_time(), 0.0);
        assert!(!n.renders());
    }

    #[test]
    fn zero_grace_period() {
        let mut n = node(0.0);
        assert_eq!(n.animation_time(), 1.0);
        n.alive = false;
        assert_eq!(n.animation_time(), 0.0);
        assert_eq!(n.phase(), Phase::Dying);
    }

    #[test]
    fn redeclare_clears_queues() {
        let mut n = node(0.3);
        n.always_on_top = true;
        n.constraints.push(Box::new(StickLeft));
        n.instance.animations.add(Animation::Fade);
        n.alive = false;
        n.redeclare();
        assert!(n.alive && !n.always_on_top);
        assert!(n.constraints.is_empty() && n.instance.animations.is_empty());
    }
}
