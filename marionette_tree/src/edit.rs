// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor context: the selection and queued edits, applied between traversals.
//!
//! Interaction that happens while a frame is drawn (a click, a drop, a context-menu pick)
//! is recorded here as plain [`NodeId`]s. [`EditContext::apply`] performs the queued edits
//! once traversal is over, so the tree is never mutated mid-walk.

use kurbo::Point;

use crate::render::RenderList;
use crate::tree::SceneTree;
use crate::types::{NodeId, Placement};

/// A pending drag-and-drop: `source` becomes the last front child of `target`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DragDrop {
    /// Dragged node.
    pub source: NodeId,
    /// Node it was dropped on.
    pub target: NodeId,
}

/// What [`EditContext::apply`] did.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Applied {
    /// A drag-and-drop moved a node.
    pub moved: bool,
    /// A node was deleted.
    pub deleted: bool,
    /// The node created by a queued add, if any.
    pub added: Option<NodeId>,
    /// A node changed placement.
    pub placed: bool,
}

impl Applied {
    /// Whether the tree changed at all.
    pub fn any(&self) -> bool {
        self.moved || self.deleted || self.added.is_some() || self.placed
    }
}

/// Selection plus at most one queued edit of each kind.
///
/// Handles held here are weak: they may go stale when their node is deleted. Use
/// [`EditContext::prune`] to forget stale ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditContext {
    /// Currently selected node.
    pub selected: Option<NodeId>,
    drag: Option<DragDrop>,
    pending_delete: Option<NodeId>,
    pending_add: Option<NodeId>,
    pending_placement: Option<(NodeId, Placement)>,
}

impl EditContext {
    /// An empty context: nothing selected, nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `node`, or clear the selection with `None`.
    pub fn select(&mut self, node: Option<NodeId>) {
        self.selected = node;
    }

    /// Select whatever is drawn on top at `point`, clearing the selection on empty canvas.
    ///
    /// Returns the new selection.
    pub fn select_at(&mut self, list: &RenderList, point: Point) -> Option<NodeId> {
        self.selected = list.hit_test(point);
        self.selected
    }

    /// The queued drag-and-drop, if any.
    pub fn drag(&self) -> Option<DragDrop> {
        self.drag
    }

    /// Queue a drop of `source` onto `target`. A drop onto itself clears any pending drag.
    pub fn request_drag(&mut self, source: NodeId, target: NodeId) {
        self.drag = (source != target).then_some(DragDrop { source, target });
    }

    /// Queue deletion of `node`.
    pub fn request_delete(&mut self, node: NodeId) {
        self.pending_delete = Some(node);
    }

    /// Queue a new child under `target`.
    pub fn request_add_child(&mut self, target: NodeId) {
        self.pending_add = Some(target);
    }

    /// Queue a move of `node` into its parent's `placement` list.
    pub fn request_placement(&mut self, node: NodeId, placement: Placement) {
        self.pending_placement = Some((node, placement));
    }

    /// Whether any edit is queued.
    pub fn has_pending(&self) -> bool {
        self.drag.is_some()
            || self.pending_delete.is_some()
            || self.pending_add.is_some()
            || self.pending_placement.is_some()
    }

    /// Apply queued edits in order: drag-and-drop, delete, add, placement change.
    ///
    /// Every queue is emptied, whether or not its edit had an effect. Deleting the selected
    /// node clears the selection. A rejected drag (cycle, self-drop, stale handle) leaves the
    /// tree untouched.
    pub fn apply(&mut self, tree: &mut SceneTree) -> Applied {
        let mut applied = Applied::default();

        if let Some(DragDrop { source, target }) = self.drag.take() {
            applied.moved = tree.move_node(source, target);
        }

        if let Some(victim) = self.pending_delete.take() {
            applied.deleted = tree.delete_node(victim);
            if applied.deleted && self.selected == Some(victim) {
                self.selected = None;
            }
        }

        if let Some(target) = self.pending_add.take() {
            applied.added = tree.insert_child(target);
        }

        if let Some((node, placement)) = self.pending_placement.take() {
            applied.placed = tree.set_placement(node, placement);
        }

        if applied.any() {
            log::trace!("applied edits: {applied:?}");
        }
        applied
    }

    /// Forget the selection and any queued edit that refers to a node no longer in `tree`.
    pub fn prune(&mut self, tree: &SceneTree) {
        let alive = |id: &NodeId| tree.is_alive(*id);
        self.selected = self.selected.filter(alive);
        self.drag = self
            .drag
            .filter(|d| tree.is_alive(d.source) && tree.is_alive(d.target));
        self.pending_delete = self.pending_delete.filter(alive);
        self.pending_add = self.pending_add.filter(alive);
        self.pending_placement = self.pending_placement.filter(|(id, _)| tree.is_alive(*id));
    }
}
