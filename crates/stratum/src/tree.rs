//! The persistent node graph.
//!
//! Nodes live in a slot map arena. Parent and child links are arena keys, and
//! an index maps stable identities to keys. The tree never creates a node as a
//! side effect of a lookup.

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::debug;

use crate::{
    control::Control,
    error::{Error, Result},
    geom::Rect,
    id::Identity,
    node::{Instance, Node, NodeInfo, NodeKey},
};

/// A node that was pruned from the tree, handed back so its control can be
/// notified.
pub struct Removed {
    /// Snapshot taken just before removal.
    pub info: NodeInfo,
    /// The node's last control.
    pub control: Option<Box<dyn Control>>,
    /// The node's final computed state.
    pub instance: Instance,
}

/// Tunables for [`Tree::refresh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshParams {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Order boost for always-on-top subtrees.
    pub overlay_order_offset: i32,
}

/// The control tree.
pub struct Tree {
    /// Node storage arena.
    nodes: SlotMap<NodeKey, Node>,
    /// Identity to arena key.
    index: HashMap<Identity, NodeKey>,
    /// Root node key.
    root: NodeKey,
}

impl Tree {
    /// Create a tree holding only a root node.
    pub fn new(root: Box<dyn Control>, viewport: Rect) -> Self {
        let mut nodes = SlotMap::with_key();
        let root_key = nodes.insert(Node::new(
            Identity::ROOT,
            None,
            root,
            Instance::new(Identity::ROOT, viewport, 0.0),
        ));
        let mut index = HashMap::new();
        index.insert(Identity::ROOT, root_key);
        Self {
            nodes,
            index,
            root: root_key,
        }
    }

    /// Root node key.
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Does a node with this identity exist?
    pub fn contains(&self, identity: Identity) -> bool {
        self.index.contains_key(&identity)
    }

    /// Arena key for an identity.
    pub fn key(&self, identity: Identity) -> Result<NodeKey> {
        self.index
            .get(&identity)
            .copied()
            .ok_or(Error::UnknownIdentity(identity))
    }

    /// Borrow a node by key.
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Mutably borrow a node by key.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Borrow a node by identity.
    pub fn get(&self, identity: Identity) -> Result<&Node> {
        let key = self.key(identity)?;
        self.nodes.get(key).ok_or(Error::UnknownIdentity(identity))
    }

    /// Mutably borrow a node by identity.
    pub fn get_mut(&mut self, identity: Identity) -> Result<&mut Node> {
        let key = self.key(identity)?;
        self.nodes
            .get_mut(key)
            .ok_or(Error::UnknownIdentity(identity))
    }

    /// Identity of a node's parent.
    pub fn parent_identity(&self, key: NodeKey) -> Option<Identity> {
        let parent = self.nodes.get(key)?.parent?;
        self.nodes.get(parent).map(|p| p.identity)
    }

    /// Snapshot of a node.
    pub fn info(&self, key: NodeKey) -> Option<NodeInfo> {
        let node = self.nodes.get(key)?;
        Some(node.info(self.parent_identity(key)))
    }

    /// Child keys of a node, in sibling order.
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Insert a new node under `parent`.
    pub fn insert(
        &mut self,
        identity: Identity,
        parent: NodeKey,
        control: Box<dyn Control>,
        local: Rect,
        dead_time: f32,
    ) -> Result<NodeKey> {
        if self.index.contains_key(&identity) {
            return Err(Error::Internal(format!("identity {identity} already exists")));
        }
        if !self.nodes.contains_key(parent) {
            return Err(Error::Internal("parent key is not in the arena".into()));
        }
        let node = Node::new(
            identity,
            Some(parent),
            control,
            Instance::new(identity, local, dead_time),
        );
        debug!(%identity, name = %node.name, "node created");
        let key = self.nodes.insert(node);
        self.index.insert(identity, key);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        Ok(key)
    }

    /// Is `ancestor` on the parent chain of `key`, or `key` itself?
    fn is_ancestor_or_self(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut cur = Some(key);
        while let Some(k) = cur {
            if k == ancestor {
                return true;
            }
            cur = self.nodes.get(k).and_then(|n| n.parent);
        }
        false
    }

    /// Move a node under a new parent.
    pub fn reparent(&mut self, key: NodeKey, new_parent: NodeKey) -> Result<()> {
        if key == self.root {
            return Err(Error::Internal("the root cannot be reparented".into()));
        }
        if self.is_ancestor_or_self(key, new_parent) {
            return Err(Error::Internal(
                "reparenting would create a cycle".into(),
            ));
        }
        let old_parent = self.nodes.get(key).and_then(|n| n.parent);
        if old_parent == Some(new_parent) {
            return Ok(());
        }
        if let Some(old) = old_parent.and_then(|p| self.nodes.get_mut(p)) {
            old.children.retain(|c| *c != key);
        }
        if let Some(p) = self.nodes.get_mut(new_parent) {
            p.children.push(key);
        }
        if let Some(n) = self.nodes.get_mut(key) {
            debug!(identity = %n.identity, "node reparented");
            n.parent = Some(new_parent);
        }
        Ok(())
    }

    /// Sort a node's children by requested local order, then identity.
    fn sort_children(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        let mut keyed: Vec<((i32, Identity), NodeKey)> = node
            .children
            .iter()
            .filter_map(|c| {
                self.nodes
                    .get(*c)
                    .map(|n| ((n.requested_local_order, n.identity), *c))
            })
            .collect();
        keyed.sort_by_key(|(k, _)| *k);
        if let Some(node) = self.nodes.get_mut(key) {
            node.children = keyed.into_iter().map(|(_, c)| c).collect();
        }
    }

    /// Restore sibling order everywhere. Nodes inserted during a frame are
    /// appended, so this runs before layout and again after pruning.
    pub fn sort_all(&mut self) {
        let keys: Vec<NodeKey> = self.nodes.keys().collect();
        for key in keys {
            self.sort_children(key);
        }
    }

    /// Keys of a subtree in pre-order, following sibling order.
    pub fn pre_order(&self, root: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            out.push(key);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Keys of a subtree in post-order, including the root.
    fn post_order(&self, root: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((key, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            if visited {
                out.push(key);
                continue;
            }
            stack.push((key, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Remove a subtree, children before parents.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Vec<Removed> {
        if key == self.root {
            return Vec::new();
        }
        if let Some(parent) = self.nodes.get(key).and_then(|n| n.parent)
            && let Some(p) = self.nodes.get_mut(parent)
        {
            p.children.retain(|c| *c != key);
        }
        let order = self.post_order(key);
        let mut out = Vec::with_capacity(order.len());
        for k in order {
            let info = self.info(k);
            if let Some(node) = self.nodes.remove(k) {
                self.index.remove(&node.identity);
                debug!(identity = %node.identity, name = %node.name, "node pruned");
                if let Some(info) = info {
                    out.push(Removed {
                        info,
                        control: node.control,
                        instance: node.instance,
                    });
                }
            }
        }
        out
    }

    /// Start a new frame: every node except the root forgets that it was
    /// declared.
    pub fn begin_frame(&mut self) {
        let root = self.root;
        for (key, node) in self.nodes.iter_mut() {
            node.alive_last_frame = node.alive;
            if key != root {
                node.alive = false;
            }
        }
    }

    /// Age every node, prune the ones whose grace period elapsed, and
    /// recompute ordering and child content. Returns the pruned nodes.
    pub fn refresh(&mut self, params: RefreshParams) -> Vec<Removed> {
        let root = self.root;
        for (key, node) in self.nodes.iter_mut() {
            if node.alive || key == root {
                node.seconds_alive += params.dt;
                node.seconds_dead = 0.0;
            } else {
                node.seconds_alive = 0.0;
                node.seconds_dead += params.dt;
            }
        }

        let expired: Vec<NodeKey> = self
            .pre_order(root)
            .into_iter()
            .filter(|k| {
                self.nodes
                    .get(*k)
                    .is_some_and(|n| !n.alive && n.seconds_dead > n.instance.allowed_dead_time)
            })
            .collect();
        let mut removed = Vec::new();
        for key in expired {
            // A pruned ancestor may already have taken this node with it.
            if self.nodes.contains_key(key) {
                removed.extend(self.remove_subtree(key));
            }
        }

        self.sort_all();

        let mut chrono = 0;
        self.order_subtree(root, false, &mut chrono, params.overlay_order_offset);
        removed
    }

    /// Assign chronological positions, sibling indices, global orders and
    /// child content for a subtree.
    ///
    /// Only alive nodes take a new chronological position. A dying node keeps
    /// the one it had on its last live frame, so its global order may equal a
    /// live sibling's; painting breaks such ties by identity.
    fn order_subtree(&mut self, key: NodeKey, on_top: bool, chrono: &mut i32, offset: i32) {
        let children = self.children(key).to_vec();
        let on_top = on_top || self.nodes.get(key).is_some_and(|n| n.always_on_top);

        if let Some(node) = self.nodes.get_mut(key) {
            if node.alive {
                node.chronological_position = *chrono;
                *chrono = chrono.saturating_add(1);
            }
            node.computed_global_order = node
                .chronological_position
                .saturating_add(if on_top { offset } else { 0 });
        }

        let mut content: Option<Rect> = None;
        let mut sibling = 0;
        for child in &children {
            let Some(c) = self.nodes.get_mut(*child) else {
                continue;
            };
            if !c.alive {
                continue;
            }
            c.sibling_index = sibling;
            sibling += 1;
            let r = c.instance.rects.intermediate;
            content = Some(content.map_or(r, |acc| acc.union(&r)));
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.instance.rects.child_content = content;
        }

        for child in children {
            self.order_subtree(child, on_top, chrono, offset);
        }
    }

    /// Drop every node except a fresh root.
    pub fn clear(&mut self, root: Box<dyn Control>, viewport: Rect) {
        *self = Self::new(root, viewport);
    }

    /// Iterate mutably over all nodes in arena order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeKey, &mut Node)> {
        self.nodes.iter_mut()
    }
}
