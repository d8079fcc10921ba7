// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: slots, structure, and local data access.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;
use kurbo::Vec2;
use smallvec::SmallVec;

use crate::types::{NodeId, Placement, SceneNode};

/// A rig: a single-rooted tree of [`SceneNode`]s.
///
/// Nodes live in slots addressed by generational [`NodeId`]s. Each node owns two ordered
/// child lists, behind and in front, whose order is paint order. The root is created with
/// the tree and can never be deleted.
///
/// Handles to deleted nodes go stale: every accessor treats them as missing and every
/// mutator as a no-op.
///
/// ## Example
///
/// ```rust
/// use marionette_tree::{Placement, SceneNode, SceneTree};
///
/// let mut tree = SceneTree::new(SceneNode::named("Root"));
/// let body = tree
///     .insert(tree.root(), Placement::InFront, SceneNode::named("Body"))
///     .unwrap();
/// let shadow = tree
///     .insert(body, Placement::Behind, SceneNode::named("Shadow"))
///     .unwrap();
///
/// assert_eq!(tree.parent_of(shadow), Some(body));
/// assert_eq!(tree.placement_of(shadow), Some(Placement::Behind));
/// assert_eq!(tree.children(body, Placement::Behind), &[shadow]);
/// ```
pub struct SceneTree {
    /// slots
    nodes: Vec<Option<Slot>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
}

impl core::fmt::Debug for SceneTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("SceneTree")
            .field("root", &self.root)
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Slot {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) behind: Vec<NodeId>,
    pub(crate) in_front: Vec<NodeId>,
    pub(crate) local: SceneNode,
}

impl Slot {
    fn new(generation: u32, local: SceneNode) -> Self {
        Self {
            generation,
            parent: None,
            behind: Vec::new(),
            in_front: Vec::new(),
            local,
        }
    }

    pub(crate) fn list(&self, placement: Placement) -> &[NodeId] {
        match placement {
            Placement::Behind => &self.behind,
            Placement::InFront => &self.in_front,
        }
    }

    fn list_mut(&mut self, placement: Placement) -> &mut Vec<NodeId> {
        match placement {
            Placement::Behind => &mut self.behind,
            Placement::InFront => &mut self.in_front,
        }
    }
}

/// One row of [`SceneTree::outline`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OutlineRow {
    /// The listed node.
    pub node: NodeId,
    /// Distance from the root (the root is at depth 0).
    pub depth: usize,
    /// Which parent list holds the node; `None` for the root.
    pub placement: Option<Placement>,
}

impl SceneTree {
    /// Create a tree holding only `root`.
    pub fn new(root: SceneNode) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
        };
        tree.root = tree.alloc(root);
        tree
    }

    /// The root node. It stays live for the lifetime of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Insert `local` as the last child in `placement` of `parent`.
    ///
    /// Returns `None` and leaves the tree unchanged if `parent` is stale.
    pub fn insert(
        &mut self,
        parent: NodeId,
        placement: Placement,
        local: SceneNode,
    ) -> Option<NodeId> {
        if !self.is_alive(parent) {
            log::debug!("insert under stale parent {parent:?} ignored");
            return None;
        }
        let id = self.alloc(local);
        self.link(id, parent, placement);
        Some(id)
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot is occupied and its generation matches the
    /// generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Always false: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Local data of a live node.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slot(id).map(|s| &s.local)
    }

    /// Returns the parent of a node if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).and_then(|s| s.parent)
    }

    /// Which parent list holds `id`, or `None` for the root or stale ids.
    pub fn placement_of(&self, id: NodeId) -> Option<Placement> {
        let parent = self.slot(self.parent_of(id)?)?;
        if parent.in_front.contains(&id) {
            Some(Placement::InFront)
        } else if parent.behind.contains(&id) {
            Some(Placement::Behind)
        } else {
            None
        }
    }

    /// The children of `id` in `placement`, in paint order; empty for stale ids.
    pub fn children(&self, id: NodeId, placement: Placement) -> &[NodeId] {
        match self.slot(id) {
            Some(slot) => slot.list(placement),
            None => &[],
        }
    }

    /// Whether `node` lies strictly inside the subtree of `ancestor`.
    pub fn is_descendant(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut current = self.parent_of(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// Every name reachable from the root.
    pub fn names(&self) -> HashSet<&str> {
        self.outline()
            .into_iter()
            .filter_map(|row| self.get(row.node))
            .map(|n| n.name.as_str())
            .collect()
    }

    /// Find the first node named `name` in outline order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.outline()
            .into_iter()
            .map(|row| row.node)
            .find(|&id| self.get(id).is_some_and(|n| n.name == name))
    }

    /// All nodes reachable from the root, listed the way an outliner shows them: each node,
    /// then its behind children, then its front children.
    pub fn outline(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::with_capacity(self.len());
        let mut stack: SmallVec<[OutlineRow; 16]> = SmallVec::new();
        stack.push(OutlineRow {
            node: self.root,
            depth: 0,
            placement: None,
        });
        while let Some(row) = stack.pop() {
            let slot = self.node(row.node);
            rows.push(row);
            // Pushed in reverse so that behind children pop first, each list in order.
            for placement in [Placement::InFront, Placement::Behind] {
                for &child in slot.list(placement).iter().rev() {
                    stack.push(OutlineRow {
                        node: child,
                        depth: row.depth + 1,
                        placement: Some(placement),
                    });
                }
            }
        }
        rows
    }

    /// Rename a live node. Names are not required to be unique.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        self.edit(id, |n| n.name = name.into())
    }

    /// Bind a live node to a sprite by name, or unbind it with `None`.
    pub fn set_sprite(&mut self, id: NodeId, sprite: Option<String>) -> bool {
        self.edit(id, |n| n.sprite = sprite)
    }

    /// Update the pivot of a live node.
    pub fn set_pivot(&mut self, id: NodeId, pivot: Vec2) -> bool {
        self.edit(id, |n| n.pivot = pivot)
    }

    /// Update the pivot offset of a live node.
    pub fn set_pivot_offset(&mut self, id: NodeId, offset: Vec2) -> bool {
        self.edit(id, |n| n.pivot_offset = offset)
    }

    /// Update the local angle, in degrees, of a live node.
    pub fn set_angle(&mut self, id: NodeId, degrees: f64) -> bool {
        self.edit(id, |n| n.angle = degrees)
    }

    /// Rebind every node bound to sprite `old` to sprite `new`, returning how many changed.
    ///
    /// Used after renaming a sprite, since nodes bind to sprites by name.
    pub fn retarget_sprite(&mut self, old: &str, new: &str) -> usize {
        let mut changed = 0;
        for slot in self.nodes.iter_mut().flatten() {
            if slot.local.sprite.as_deref() == Some(old) {
                slot.local.sprite = Some(new.into());
                changed += 1;
            }
        }
        log::trace!("retargeted {changed} node(s) from sprite '{old}' to '{new}'");
        changed
    }
}

impl SceneTree {
    // --- internals ---

    pub(crate) fn slot(&self, id: NodeId) -> Option<&Slot> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Access a node whose id is known to be live; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Slot {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably whose id is known to be live; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Slot {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn edit(&mut self, id: NodeId, f: impl FnOnce(&mut SceneNode)) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                f(&mut slot.local);
                true
            }
            None => false,
        }
    }

    fn alloc(&mut self, local: SceneNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Slot::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Slot::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Empty the slot of a node that is already unlinked; its id goes stale.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<SceneNode> {
        let slot = self.nodes.get_mut(id.idx())?.take()?;
        self.free_list.push(id.idx());
        Some(slot.local)
    }

    /// Append `id` to the `placement` list of `parent`.
    pub(crate) fn link(&mut self, id: NodeId, parent: NodeId, placement: Placement) {
        self.node_mut(parent).list_mut(placement).push(id);
        self.node_mut(id).parent = Some(parent);
    }

    /// Remove `id` from its parent's lists, returning the list it was in.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<Placement> {
        let parent = self.node(id).parent?;
        let p = self.node_mut(parent);
        let placement = if let Some(pos) = p.in_front.iter().position(|c| *c == id) {
            p.in_front.remove(pos);
            Placement::InFront
        } else {
            let pos = p.behind.iter().position(|c| *c == id)?;
            p.behind.remove(pos);
            Placement::Behind
        };
        self.node_mut(id).parent = None;
        Some(placement)
    }

    /// Take both child lists of `id`, leaving them empty.
    pub(crate) fn take_children(&mut self, id: NodeId) -> (Vec<NodeId>, Vec<NodeId>) {
        let slot = self.node_mut(id);
        (
            core::mem::take(&mut slot.behind),
            core::mem::take(&mut slot.in_front),
        )
    }
}
