//! The per-frame traversals: layout, process and render.
//!
//! Each traversal walks the tree top-down. Control callbacks are isolated: a
//! callback that fails is recorded as a [`FrameFault`] and the failing node's
//! subtree is skipped for the rest of that traversal only.

use tracing::warn;

use crate::{
    config::{Configuration, Theme},
    context::FrameFault,
    control::{Control, ControlParams, Hook, RenderParams},
    drawbounds::DrawBoundsStack,
    error::{Error, Result},
    geom::{Point, Rect},
    id::Identity,
    input::{FrameTime, InputState},
    layout::{ConstraintContext, apply_children_layout, apply_constraints},
    navigator::Navigator,
    node::NodeKey,
    render::{DrawCommand, DrawSink, Painter, RenderOrder},
    scroll,
    tree::{Removed, Tree},
    values::ValueStore,
};

/// Shared state handed to every callback of a traversal.
pub struct Env<'a> {
    /// Per-identity value store.
    pub values: &'a mut ValueStore,
    /// Polled input.
    pub input: &'a InputState,
    /// Frame timing.
    pub time: FrameTime,
    /// Control theme.
    pub theme: &'a Theme,
    /// Engine configuration.
    pub config: &'a Configuration,
    /// Collected callback failures.
    pub faults: &'a mut Vec<FrameFault>,
}

impl Env<'_> {
    /// Record a callback failure.
    fn fault(&mut self, identity: Identity, hook: Hook, error: Error) {
        warn!(%identity, %hook, %error, "control callback failed");
        self.faults.push(FrameFault {
            identity,
            hook,
            error,
        });
    }
}

/// Dispatch one non-render hook.
fn dispatch(control: &mut dyn Control, hook: Hook, p: &mut ControlParams<'_>) -> Result<()> {
    match hook {
        Hook::Add => control.on_add(p),
        Hook::Start => control.on_start(p),
        Hook::Process => control.on_process(p),
        Hook::End => control.on_end(p),
        Hook::Remove => control.on_remove(p),
        Hook::Render => Err(Error::Internal("render dispatched without a painter".into())),
    }
}

/// Run a hook on a node in the tree. Returns false if the callback failed.
pub fn run_hook(tree: &mut Tree, key: NodeKey, env: &mut Env<'_>, hook: Hook) -> bool {
    let Some(info) = tree.info(key) else {
        return false;
    };
    let Some(node) = tree.node_mut(key) else {
        return false;
    };
    let Some(control) = node.control.as_mut() else {
        return true;
    };
    let mut p = ControlParams {
        node: info,
        instance: &mut node.instance,
        values: env.values,
        input: env.input,
        time: env.time,
        theme: env.theme,
        config: env.config,
    };
    match dispatch(control.as_mut(), hook, &mut p) {
        Ok(()) => true,
        Err(e) => {
            env.fault(info.identity, hook, e);
            false
        }
    }
}

/// Notify a pruned node's control.
pub fn run_removed(removed: &mut Removed, env: &mut Env<'_>) {
    let Some(control) = removed.control.as_mut() else {
        return;
    };
    let mut p = ControlParams {
        node: removed.info,
        instance: &mut removed.instance,
        values: env.values,
        input: env.input,
        time: env.time,
        theme: env.theme,
        config: env.config,
    };
    if let Err(e) = control.on_remove(&mut p) {
        env.fault(removed.info.identity, Hook::Remove, e);
    }
}

/// Compute intermediate rectangles for the whole tree.
///
/// The root's intermediate rectangle is its local rectangle after its own
/// constraints. Below that, each parent first runs its children layouts over
/// the declared rectangles of its visible children, then every child applies
/// its own constraints, then the pass recurses. Dying nodes keep the
/// rectangles they had when they were last declared.
pub fn layout(tree: &mut Tree, padding: f32) {
    let root = tree.root();
    if let Some(n) = tree.node_mut(root) {
        let local = n.instance.rects.local;
        let cx = ConstraintContext {
            parent: local.size(),
            padding,
        };
        n.instance.rects.intermediate = apply_constraints(&n.constraints, local, &cx);
    }
    layout_children(tree, root, padding);
}

/// Lay out the children of one node and recurse.
fn layout_children(tree: &mut Tree, key: NodeKey, padding: f32) {
    let Some(node) = tree.node(key) else {
        return;
    };
    let parent = node.instance.rects.intermediate.size();
    let visible: Vec<NodeKey> = node
        .children
        .iter()
        .copied()
        .filter(|c| tree.node(*c).is_some_and(|n| n.alive))
        .collect();
    let mut rects: Vec<Rect> = visible
        .iter()
        .map(|c| {
            tree.node(*c)
                .map(|n| n.instance.rects.local)
                .unwrap_or_default()
        })
        .collect();
    apply_children_layout(&node.children_layout, &mut rects, parent, padding);

    let cx = ConstraintContext { parent, padding };
    for (child, rect) in visible.iter().zip(rects) {
        if let Some(n) = tree.node_mut(*child) {
            n.instance.rects.intermediate = apply_constraints(&n.constraints, rect, &cx);
        }
    }
    for child in visible {
        layout_children(tree, child, padding);
    }
}

/// Placement of a parent, used to translate its children.
#[derive(Debug, Clone, Copy)]
struct Placement {
    /// Parent's computed global origin.
    origin: Point,
    /// Parent's scroll offset.
    scroll: Point,
}

/// Resolve global rectangles, run process callbacks, offer hit-test
/// candidates and enforce scroll bounds.
pub fn process(tree: &mut Tree, navigator: &mut Navigator, env: &mut Env<'_>, viewport: Rect) {
    let mut stack = DrawBoundsStack::new(viewport);
    let root = tree.root();
    process_node(tree, root, None, &mut stack, navigator, env);
}

/// Process one node and its subtree.
fn process_node(
    tree: &mut Tree,
    key: NodeKey,
    parent: Option<Placement>,
    stack: &mut DrawBoundsStack,
    navigator: &mut Navigator,
    env: &mut Env<'_>,
) {
    if let Some(n) = tree.node_mut(key) {
        let r = n.instance.rects.intermediate;
        n.instance.rects.computed_global = match parent {
            Some(f) => r.translate_by(f.origin + f.scroll),
            None => r,
        };
        n.instance.rects.raycast = None;
    } else {
        return;
    }

    if !run_hook(tree, key, env, Hook::Process) {
        return;
    }

    let Some(n) = tree.node_mut(key) else {
        return;
    };
    let bounds = stack.resolve(n.instance.rects.draw_bounds, n.always_on_top);
    let rects = &mut n.instance.rects;
    rects.computed_draw_bounds = bounds;
    rects.raycast = rects
        .raycast
        .map(|r| r.intersect(&bounds))
        .filter(|r| !r.is_empty());
    if n.alive
        && let Some(r) = rects.raycast
    {
        navigator.offer(
            n.identity,
            r,
            n.computed_global_order,
            n.instance.capture_flags,
        );
    }

    let contained = scroll::enforce(
        n.instance.rects.intermediate.size(),
        n.instance.rects.child_content,
        n.instance.inner_scroll,
        env.config.content_padding,
    );
    n.instance.inner_scroll = contained.offset;
    n.instance.rects.computed_scroll_bounds = contained.bounds;

    let placement = Placement {
        origin: n.instance.rects.computed_global.min(),
        scroll: n.instance.inner_scroll,
    };
    let children = n.children.clone();
    stack.push(bounds);
    for child in children {
        process_node(tree, child, Some(placement), stack, navigator, env);
    }
    stack.pop();
}

/// Emit draw commands for every renderable node.
pub fn render(tree: &mut Tree, env: &mut Env<'_>, sink: &mut dyn DrawSink, viewport: Rect) {
    let mut stack = DrawBoundsStack::new(viewport);
    let root = tree.root();
    render_node(tree, root, &mut stack, env, sink);
}

/// Render one node and its subtree.
fn render_node(
    tree: &mut Tree,
    key: NodeKey,
    stack: &mut DrawBoundsStack,
    env: &mut Env<'_>,
    sink: &mut dyn DrawSink,
) {
    let Some(info) = tree.info(key) else {
        return;
    };
    let Some(n) = tree.node_mut(key) else {
        return;
    };
    if !n.renders() {
        return;
    }
    let bounds = stack.resolve(n.instance.rects.draw_bounds, n.always_on_top);
    n.instance.rects.computed_draw_bounds = bounds;
    let t = n.animation_time();
    n.instance.rects.rendered = n
        .instance
        .animations
        .animate_rect(n.instance.rects.computed_global, t);
    stack.push(bounds);

    if !bounds.is_empty() {
        let order = RenderOrder::new(env.config.render_layer, n.computed_global_order);
        sink.submit(order, DrawCommand::Clip(bounds));
        let result = match n.control.as_mut() {
            Some(control) => {
                let mut p = RenderParams {
                    node: info,
                    instance: &mut n.instance,
                    painter: Painter::new(sink, order, bounds),
                    values: env.values,
                    input: env.input,
                    time: env.time,
                    theme: env.theme,
                    config: env.config,
                    t,
                };
                control.on_render(&mut p)
            }
            None => Ok(()),
        };
        match result {
            Ok(()) => {
                for child in paint_order(tree, key) {
                    render_node(tree, child, stack, env, sink);
                }
            }
            Err(e) => env.fault(info.identity, Hook::Render, e),
        }
    }
    stack.pop();
}

/// Children of a node sorted by computed global order, then identity.
fn paint_order(tree: &Tree, key: NodeKey) -> Vec<NodeKey> {
    let mut children: Vec<(i32, Identity, NodeKey)> = tree
        .children(key)
        .iter()
        .filter_map(|c| {
            tree.node(*c)
                .map(|n| (n.computed_global_order, n.identity, *c))
        })
        .collect();
    children.sort_by_key(|(order, id, _)| (*order, *id));
    children.into_iter().map(|(_, _, c)| c).collect()
}
