//! The UI context: the explicit owner of one control tree.
//!
//! A host drives a context once per frame:
//!
//! ```text
//! ui.begin_frame(input)?;
//! ui.start(id, control)?;   // declare a node and open it
//! ui.apply(declaration)?;   // layout for the open node
//! ...                       // nested declarations
//! ui.end()?;                // close it
//! let report = ui.end_frame(&mut sink)?;
//! ```
//!
//! Nothing here is global. Independent contexts share no state.

use std::{mem, panic::Location};

use tracing::{debug, trace, warn};

use crate::{
    animation::{Animation, Easing},
    config::{Configuration, Theme},
    control::{Control, Hook},
    controls::RootContainer,
    dump,
    error::{Error, Result},
    geom::{Expanse, Point, Rect},
    id::{CallSite, Identity, TypeTag, resolve},
    input::{FrameInput, FrameTime, InputState},
    layout::{ChildLayout, Constraint, Declaration},
    navigator::Navigator,
    node::{Instance, Node, NodeInfo, NodeKey},
    pass::{self, Env},
    render::DrawSink,
    sound::{self, SoundCue, SoundSink},
    state::ControlState,
    tree::{RefreshParams, Tree},
    values::ValueStore,
};

/// A control callback that failed during a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameFault {
    /// Node whose callback failed. The root identity stands for the frame
    /// itself.
    pub identity: Identity,
    /// The failing hook.
    pub hook: Hook,
    /// The error it returned.
    pub error: Error,
}

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Isolated failures, in the order they happened.
    pub faults: Vec<FrameFault>,
    /// Sound cues for state transitions resolved this frame.
    pub sounds: Vec<SoundCue>,
    /// Identities pruned this frame, children before parents.
    pub pruned: Vec<Identity>,
    /// Nodes in the tree after pruning, including the root.
    pub nodes: usize,
    /// Hit-test candidates offered during process.
    pub candidates: usize,
}

impl FrameReport {
    /// Forward every sound cue to a sink.
    pub fn play(&self, sink: &mut dyn SoundSink) {
        for cue in &self.sounds {
            sink.play(cue);
        }
    }

    /// True if no callback failed.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// One control tree and everything needed to drive it.
pub struct UiContext {
    /// The node graph.
    tree: Tree,
    /// Interaction state.
    navigator: Navigator,
    /// Per-identity control values.
    values: ValueStore,
    /// Engine configuration.
    config: Configuration,
    /// Control theme.
    theme: Theme,
    /// Input for the current frame.
    input: InputState,
    /// Timing for the current frame.
    time: FrameTime,
    /// Viewport for the current frame.
    viewport: Rect,
    /// Open nodes, innermost last. The root is always at the bottom.
    stack: Vec<NodeKey>,
    /// Between `begin_frame` and `end_frame`.
    in_frame: bool,
    /// Failures collected since `begin_frame`.
    faults: Vec<FrameFault>,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::build(Configuration::default(), Theme::default())
    }
}

impl UiContext {
    /// Construct a context, validating the configuration.
    pub fn new(config: Configuration, theme: Theme) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, theme))
    }

    /// Construct without validation.
    fn build(config: Configuration, theme: Theme) -> Self {
        let tree = Tree::new(Box::new(RootContainer), Rect::zero());
        let root = tree.root();
        Self {
            tree,
            navigator: Navigator::new(),
            values: ValueStore::new(),
            config,
            theme,
            input: InputState::default(),
            time: FrameTime::default(),
            viewport: Rect::zero(),
            stack: vec![root],
            in_frame: false,
            faults: Vec::new(),
        }
    }

    /// Start a frame.
    pub fn begin_frame(&mut self, frame: FrameInput) -> Result<()> {
        if self.in_frame {
            return Err(Error::FrameInProgress);
        }
        self.tree.begin_frame();
        self.input = frame.input;
        self.time = frame.time;
        self.viewport = frame.viewport.rect();
        self.stack.clear();
        self.stack.push(self.tree.root());
        self.faults.clear();
        self.in_frame = true;
        Ok(())
    }

    /// Fail unless a frame is in progress.
    fn require_frame(&self) -> Result<()> {
        if self.in_frame {
            Ok(())
        } else {
            Err(Error::FrameNotStarted)
        }
    }

    /// Key of the innermost open node.
    fn top(&self) -> Result<NodeKey> {
        self.require_frame()?;
        self.stack
            .last()
            .copied()
            .ok_or_else(|| Error::Internal("declaration stack is empty".into()))
    }

    /// Identity of the innermost open node.
    pub fn current(&self) -> Option<Identity> {
        if !self.in_frame {
            return None;
        }
        let key = self.stack.last()?;
        self.tree.node(*key).map(|n| n.identity())
    }

    /// Build callback environment and run one hook on a node.
    fn hook(&mut self, key: NodeKey, hook: Hook) -> bool {
        let mut env = Env {
            values: &mut self.values,
            input: &self.input,
            time: self.time,
            theme: &self.theme,
            config: &self.config,
            faults: &mut self.faults,
        };
        pass::run_hook(&mut self.tree, key, &mut env, hook)
    }

    /// Declare a node and open it.
    ///
    /// The node is created on first use and reused afterwards. Its control
    /// is replaced by `control`, and its constraints, children layouts,
    /// animations and always-on-top flag are reset. Its local rectangle,
    /// scroll offset and requested order persist.
    pub fn start<C: Control + 'static>(
        &mut self,
        identity: Identity,
        control: C,
    ) -> Result<(&mut Instance, NodeInfo)> {
        self.start_boxed(identity, Box::new(control))
    }

    /// [`Self::start`] for an already boxed control.
    pub fn start_boxed(
        &mut self,
        identity: Identity,
        control: Box<dyn Control>,
    ) -> Result<(&mut Instance, NodeInfo)> {
        let parent = self.top()?;
        if identity.is_root() {
            return Err(Error::Internal("the root identity is reserved".into()));
        }

        let (key, created) = match self.tree.key(identity) {
            Ok(key) => {
                let current_parent = self.tree.node(key).and_then(|n| n.parent);
                if current_parent != Some(parent) {
                    self.tree.reparent(key, parent)?;
                }
                let node = self.tree.get_mut(identity)?;
                if node.alive {
                    warn!(%identity, "node declared twice in one frame");
                }
                node.name = control.name();
                node.control = Some(control);
                node.redeclare();
                (key, false)
            }
            Err(_) => {
                let local = Rect::from_origin_size(Point::zero(), self.config.default_size);
                let key = self.tree.insert(
                    identity,
                    parent,
                    control,
                    local,
                    self.config.default_dead_time,
                )?;
                (key, true)
            }
        };

        if created {
            self.hook(key, Hook::Add);
        }
        self.hook(key, Hook::Start);
        self.stack.push(key);

        let info = self
            .tree
            .info(key)
            .ok_or(Error::UnknownIdentity(identity))?;
        let node = self.tree.get_mut(identity)?;
        Ok((&mut node.instance, info))
    }

    /// Resolve the identity a declaration of control type `C` at the
    /// caller's source location would get under the current node.
    #[track_caller]
    pub fn identity_for<C: 'static>(&self, discriminator: i32) -> Result<Identity> {
        self.identity_at::<C>(discriminator, CallSite::from_location(Location::caller()))
    }

    /// Resolve an identity for an explicit call site under the current node.
    pub fn identity_at<C: 'static>(&self, discriminator: i32, site: CallSite) -> Result<Identity> {
        let parent = self
            .current()
            .ok_or(Error::FrameNotStarted)?;
        Ok(resolve(TypeTag::of::<C>(), discriminator, site, parent))
    }

    /// Declare a node whose identity comes from the control type, the
    /// caller's source location and `discriminator`. Loops must pass a
    /// distinct discriminator per iteration.
    #[track_caller]
    pub fn declare<C: Control + 'static>(&mut self, control: C, discriminator: i32) -> Result<Identity> {
        let id = self.identity_at::<C>(discriminator, CallSite::from_location(Location::caller()))?;
        self.start(id, control)?;
        Ok(id)
    }

    /// Declare a node under an explicit call site key.
    pub fn declare_keyed<C: Control + 'static>(
        &mut self,
        control: C,
        key: u32,
        discriminator: i32,
    ) -> Result<Identity> {
        let id = self.identity_at::<C>(discriminator, CallSite::key(key))?;
        self.start(id, control)?;
        Ok(id)
    }

    /// Close the innermost open node.
    pub fn end(&mut self) -> Result<()> {
        self.require_frame()?;
        if self.stack.len() <= 1 {
            return Err(Error::UnbalancedEnd);
        }
        if let Some(key) = self.stack.pop() {
            self.hook(key, Hook::End);
        }
        Ok(())
    }

    /// Mutable access to the innermost open node.
    fn current_node(&mut self) -> Result<&mut Node> {
        let key = self.top()?;
        self.tree
            .node_mut(key)
            .ok_or_else(|| Error::Internal("open node is not in the tree".into()))
    }

    /// Set the size of the open node's local rectangle, keeping its origin.
    pub fn size(&mut self, w: f32, h: f32) -> Result<()> {
        let n = self.current_node()?;
        let local = n.instance.rects.local;
        n.instance.rects.local = local.with_size(Expanse::new(w, h));
        Ok(())
    }

    /// Move the open node's local rectangle, keeping its size.
    pub fn position(&mut self, x: f32, y: f32) -> Result<()> {
        let n = self.current_node()?;
        let local = n.instance.rects.local;
        n.instance.rects.local = local.with_origin(Point::new(x, y));
        Ok(())
    }

    /// Replace the open node's local rectangle.
    pub fn rect(&mut self, r: Rect) -> Result<()> {
        self.current_node()?.instance.rects.local = r;
        Ok(())
    }

    /// Queue a self-constraint on the open node.
    pub fn constraint(&mut self, c: impl Constraint + 'static) -> Result<()> {
        self.current_node()?.constraints.push(Box::new(c));
        Ok(())
    }

    /// Queue a children layout on the open node.
    pub fn children_layout(&mut self, l: impl ChildLayout + 'static) -> Result<()> {
        self.current_node()?.children_layout.push(Box::new(l));
        Ok(())
    }

    /// Let the open node escape ancestor clipping and paint on top.
    pub fn always_on_top(&mut self) -> Result<()> {
        self.current_node()?.always_on_top = true;
        Ok(())
    }

    /// Request a position among siblings. Lower orders come first. Persists
    /// until changed.
    pub fn order(&mut self, order: i32) -> Result<()> {
        self.current_node()?.requested_local_order = order;
        Ok(())
    }

    /// Set the open node's grace period.
    pub fn dead_time(&mut self, seconds: f32) -> Result<()> {
        self.current_node()?.instance.allowed_dead_time = seconds.max(0.0);
        Ok(())
    }

    /// Queue an appear and disappear animation on the open node.
    pub fn animate(&mut self, animation: Animation) -> Result<()> {
        self.current_node()?.instance.animations.add(animation);
        Ok(())
    }

    /// Set the open node's animation easing.
    pub fn easing(&mut self, easing: Easing) -> Result<()> {
        self.current_node()?.instance.animations.set_easing(easing);
        Ok(())
    }

    /// Apply a batch of layout declarations to the open node.
    pub fn apply(&mut self, declaration: Declaration) -> Result<()> {
        let Declaration {
            size,
            position,
            constraints,
            children_layout,
            always_on_top,
            order,
            dead_time,
        } = declaration;
        if let Some(s) = size {
            self.size(s.w, s.h)?;
        }
        if let Some(p) = position {
            self.position(p.x, p.y)?;
        }
        if let Some(o) = order {
            self.order(o)?;
        }
        if let Some(d) = dead_time {
            self.dead_time(d)?;
        }
        let n = self.current_node()?;
        n.constraints.extend(constraints);
        n.children_layout.extend(children_layout);
        n.always_on_top |= always_on_top;
        Ok(())
    }

    /// Finish the frame: lay out, age and prune, process, resolve
    /// interaction state and render.
    pub fn end_frame(&mut self, sink: &mut dyn DrawSink) -> Result<FrameReport> {
        self.require_frame()?;
        let mut report = FrameReport::default();

        let open = self.stack.len().saturating_sub(1);
        if open > 0 {
            warn!(open, "closing nodes left open at end of frame");
            while self.stack.len() > 1 {
                if let Some(key) = self.stack.pop() {
                    self.hook(key, Hook::End);
                }
            }
            self.faults.push(FrameFault {
                identity: Identity::ROOT,
                hook: Hook::End,
                error: Error::UnclosedNodes(open),
            });
        }

        let root = self.tree.root();
        if let Some(n) = self.tree.node_mut(root) {
            n.instance.rects.local = self.viewport;
        }

        self.tree.sort_all();
        pass::layout(&mut self.tree, self.theme.padding);

        let mut removed = self.tree.refresh(RefreshParams {
            dt: self.time.delta,
            overlay_order_offset: self.config.overlay_order_offset,
        });
        {
            let mut env = Env {
                values: &mut self.values,
                input: &self.input,
                time: self.time,
                theme: &self.theme,
                config: &self.config,
                faults: &mut self.faults,
            };
            for r in &mut removed {
                pass::run_removed(r, &mut env);
            }
        }
        for r in &removed {
            let id = r.info.identity;
            self.navigator.forget(id);
            self.values.remove(id);
            report.pruned.push(id);
        }

        self.navigator.begin();
        {
            let mut env = Env {
                values: &mut self.values,
                input: &self.input,
                time: self.time,
                theme: &self.theme,
                config: &self.config,
                faults: &mut self.faults,
            };
            pass::process(&mut self.tree, &mut self.navigator, &mut env, self.viewport);
        }
        report.candidates = self.navigator.candidate_count();

        self.navigator.resolve(&self.input);
        for (_, n) in self.tree.iter_mut() {
            let new = if n.alive {
                self.navigator.state_of(n.identity)
            } else {
                ControlState::empty()
            };
            let old = n.instance.state;
            report.sounds.extend(sound::transitions(
                n.identity,
                old,
                new,
                &self.theme,
                self.config.sound_volume,
            ));
            n.instance.state = new;
        }

        {
            let mut env = Env {
                values: &mut self.values,
                input: &self.input,
                time: self.time,
                theme: &self.theme,
                config: &self.config,
                faults: &mut self.faults,
            };
            pass::render(&mut self.tree, &mut env, sink, self.viewport);
        }

        self.in_frame = false;
        self.stack.truncate(1);
        report.faults = mem::take(&mut self.faults);
        report.nodes = self.tree.len();
        trace!(
            nodes = report.nodes,
            candidates = report.candidates,
            pruned = report.pruned.len(),
            faults = report.faults.len(),
            "frame finished"
        );
        Ok(report)
    }

    /// Drop every node, stored value and interaction state. Any frame in
    /// progress is abandoned.
    pub fn clear(&mut self) {
        self.tree.clear(Box::new(RootContainer), self.viewport);
        self.navigator.clear();
        self.values.clear();
        self.stack.clear();
        self.stack.push(self.tree.root());
        self.faults.clear();
        self.in_frame = false;
        debug!("context cleared");
    }

    /// Snapshot of a node.
    pub fn node(&self, identity: Identity) -> Result<NodeInfo> {
        let key = self.tree.key(identity)?;
        self.tree.info(key).ok_or(Error::UnknownIdentity(identity))
    }

    /// A node's computed state.
    pub fn instance(&self, identity: Identity) -> Result<&Instance> {
        Ok(self.tree.get(identity)?.instance())
    }

    /// Mutable access to a node's computed state.
    pub fn instance_mut(&mut self, identity: Identity) -> Result<&mut Instance> {
        Ok(&mut self.tree.get_mut(identity)?.instance)
    }

    /// Children of a node, in sibling order.
    pub fn children(&self, identity: Identity) -> Result<Vec<Identity>> {
        let key = self.tree.key(identity)?;
        Ok(self
            .tree
            .children(key)
            .iter()
            .filter_map(|c| self.tree.node(*c).map(|n| n.identity()))
            .collect())
    }

    /// Does a node with this identity exist?
    pub fn contains(&self, identity: Identity) -> bool {
        self.tree.contains(identity)
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// True when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Between `begin_frame` and `end_frame`?
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// The value store.
    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    /// Mutable access to the value store.
    pub fn values_mut(&mut self) -> &mut ValueStore {
        &mut self.values
    }

    /// Engine configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Control theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the control theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Input for the current frame.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Timing for the current frame.
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Hovered node.
    pub fn hovered(&self) -> Option<Identity> {
        self.navigator.hover()
    }

    /// Active node.
    pub fn active(&self) -> Option<Identity> {
        self.navigator.active()
    }

    /// Focused node.
    pub fn focused(&self) -> Option<Identity> {
        self.navigator.focus()
    }

    /// Node receiving scroll input.
    pub fn scrolled(&self) -> Option<Identity> {
        self.navigator.scroll()
    }

    /// Render the tree as text.
    pub fn dump(&self, color: bool) -> Result<String> {
        dump::dump(&self.tree, color)
    }
}
