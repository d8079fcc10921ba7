// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural edits: insertion with unique names, deletion with child promotion,
//! cycle-checked moves, and render-order changes.
//!
//! None of these report errors. A request that cannot apply (stale handle, the root as a
//! victim, a move into the node's own subtree) leaves the tree untouched and returns
//! `false` or `None`.

use alloc::format;
use alloc::string::String;

use crate::tree::SceneTree;
use crate::types::{NodeId, Placement, SceneNode};

/// Base name for nodes created by [`SceneTree::insert_child`].
pub const DEFAULT_NODE_NAME: &str = "Node";

impl SceneTree {
    /// Return `base` if no reachable node uses it, else the first free `base1`, `base2`, ...
    pub fn generate_unique_name(&self, base: &str) -> String {
        let names = self.names();
        if !names.contains(base) {
            return base.into();
        }
        (1_u64..)
            .map(|i| format!("{base}{i}"))
            .find(|candidate| !names.contains(candidate.as_str()))
            .unwrap_or_else(|| base.into())
    }

    /// Append a new, uniquely named node to the front children of `target`.
    ///
    /// Returns `None` if `target` is stale.
    pub fn insert_child(&mut self, target: NodeId) -> Option<NodeId> {
        if !self.is_alive(target) {
            log::debug!("add child to stale node {target:?} ignored");
            return None;
        }
        let name = self.generate_unique_name(DEFAULT_NODE_NAME);
        log::trace!("adding '{name}' under {target:?}");
        self.insert(target, Placement::InFront, SceneNode::named(name))
    }

    /// Delete `victim`, promoting its children into its parent.
    ///
    /// The victim's behind children are appended, in order, to the parent's behind list and
    /// its front children to the parent's front list. Promoted children go to the end of
    /// those lists, not to the victim's former position. The victim's id goes stale.
    ///
    /// Returns `false` without changes for the root or a stale id.
    pub fn delete_node(&mut self, victim: NodeId) -> bool {
        if victim == self.root() {
            log::debug!("refusing to delete the root");
            return false;
        }
        let Some(parent) = self.parent_of(victim) else {
            log::debug!("delete of stale or detached node {victim:?} ignored");
            return false;
        };
        if self.unlink(victim).is_none() {
            return false;
        }
        let (behind, in_front) = self.take_children(victim);
        for child in behind {
            self.link(child, parent, Placement::Behind);
        }
        for child in in_front {
            self.link(child, parent, Placement::InFront);
        }
        let removed = self.free(victim);
        log::trace!(
            "deleted '{}' ({victim:?}), children promoted to {parent:?}",
            removed.as_ref().map_or("", |n| n.name.as_str())
        );
        true
    }

    /// Move `source` (with its subtree) to the end of `destination`'s front children.
    ///
    /// Rejected when either id is stale, when `source` is the root, when the two are the
    /// same node, or when `destination` lies inside `source`'s subtree. The check runs on
    /// the tree as it is before the move.
    pub fn move_node(&mut self, source: NodeId, destination: NodeId) -> bool {
        if !self.is_alive(source) || !self.is_alive(destination) {
            log::debug!("move {source:?} -> {destination:?} with stale id ignored");
            return false;
        }
        if source == destination || self.is_descendant(source, destination) {
            log::debug!("move {source:?} -> {destination:?} would create a cycle");
            return false;
        }
        if self.unlink(source).is_none() {
            log::debug!("move of the root {source:?} ignored");
            return false;
        }
        self.link(source, destination, Placement::InFront);
        log::trace!("moved {source:?} under {destination:?}");
        true
    }

    /// Move `node` to the end of its parent's `placement` list, keeping its parent.
    ///
    /// This changes whether `node` paints behind or in front of its parent. Returns `false`
    /// without changes for the root, a stale id, or a node already in `placement`; sibling
    /// order is left alone in that case.
    pub fn set_placement(&mut self, node: NodeId, placement: Placement) -> bool {
        let Some(parent) = self.parent_of(node) else {
            log::debug!("placement change of root or stale node {node:?} ignored");
            return false;
        };
        if self.placement_of(node) == Some(placement) {
            log::trace!("{node:?} already {placement:?} under {parent:?}");
            return false;
        }
        if self.unlink(node).is_none() {
            return false;
        }
        self.link(node, parent, placement);
        log::trace!("{node:?} now {placement:?} under {parent:?}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use hashbrown::HashSet;

    fn named(tree: &mut SceneTree, parent: NodeId, placement: Placement, name: &str) -> NodeId {
        tree.insert(parent, placement, SceneNode::named(name))
            .unwrap()
    }

    #[test]
    fn unique_name_skips_taken_suffixes() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        assert_eq!(tree.generate_unique_name("Node"), "Node");
        named(&mut tree, root, Placement::InFront, "Node");
        named(&mut tree, root, Placement::Behind, "Node1");
        assert_eq!(tree.generate_unique_name("Node"), "Node2");
        assert_eq!(tree.generate_unique_name("Arm"), "Arm");
    }

    #[test]
    fn generated_names_stay_unique() {
        let mut tree = SceneTree::new(SceneNode::named("Node3"));
        let root = tree.root();
        named(&mut tree, root, Placement::InFront, "Node");
        let before: Vec<String> = tree.names().into_iter().map(String::from).collect();

        let mut created = Vec::new();
        for _ in 0..6 {
            let id = tree.insert_child(root).unwrap();
            created.push(tree.get(id).unwrap().name.clone());
        }
        let distinct: HashSet<&str> = created.iter().map(String::as_str).collect();
        assert_eq!(distinct.len(), created.len(), "generated names must differ");
        for name in &created {
            assert!(!before.contains(name), "{name} collides with an existing name");
        }
        assert!(!created.iter().any(|n| n == "Node3"));
    }

    #[test]
    fn insert_child_appends_to_front() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        let first = named(&mut tree, root, Placement::InFront, "First");
        let added = tree.insert_child(root).unwrap();
        assert_eq!(tree.children(root, Placement::InFront), &[first, added]);
        assert_eq!(tree.get(added).unwrap().name, "Node");

        assert!(tree.delete_node(first));
        assert!(tree.insert_child(first).is_none(), "stale target is a no-op");
    }

    #[test]
    fn delete_promotes_children_in_order() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        let parent = named(&mut tree, root, Placement::InFront, "Parent");
        let x = named(&mut tree, parent, Placement::Behind, "x");
        let victim = named(&mut tree, parent, Placement::InFront, "Victim");
        let y = named(&mut tree, parent, Placement::InFront, "y");
        let a = named(&mut tree, victim, Placement::Behind, "a");
        let b = named(&mut tree, victim, Placement::Behind, "b");
        let c = named(&mut tree, victim, Placement::InFront, "c");
        let d = named(&mut tree, victim, Placement::InFront, "d");

        assert!(tree.delete_node(victim));
        assert_eq!(tree.children(parent, Placement::Behind), &[x, a, b]);
        assert_eq!(tree.children(parent, Placement::InFront), &[y, c, d]);
        assert_eq!(tree.parent_of(a), Some(parent));
        assert_eq!(tree.parent_of(d), Some(parent));
        assert!(!tree.is_alive(victim));
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn delete_root_or_stale_is_noop() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        let child = named(&mut tree, root, Placement::InFront, "Child");

        assert!(!tree.delete_node(root));
        assert_eq!(tree.root(), root);
        assert!(tree.is_alive(root));
        assert_eq!(tree.children(root, Placement::InFront), &[child]);

        assert!(tree.delete_node(child));
        assert!(!tree.delete_node(child), "second delete sees a stale id");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn move_onto_grandchild_is_rejected() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        let base = named(&mut tree, root, Placement::InFront, "Base");
        let turret = named(&mut tree, base, Placement::InFront, "Turret");
        let mount = named(&mut tree, turret, Placement::Behind, "Mount");
        let barrel = named(&mut tree, mount, Placement::InFront, "Barrel");
        let before = tree.outline();

        assert!(!tree.move_node(turret, barrel));
        assert!(!tree.move_node(turret, mount));
        assert!(!tree.move_node(turret, turret));
        assert!(!tree.move_node(root, base), "root cannot be moved under its descendant");
        assert_eq!(tree.outline(), before, "tree must be structurally unchanged");
        assert_eq!(tree.parent_of(turret), Some(base));
    }

    #[test]
    fn move_becomes_last_front_child() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        let left = named(&mut tree, root, Placement::InFront, "Left");
        let right = named(&mut tree, root, Placement::InFront, "Right");
        let hand = named(&mut tree, left, Placement::Behind, "Hand");
        let finger = named(&mut tree, hand, Placement::InFront, "Finger");
        let ring = named(&mut tree, right, Placement::InFront, "Ring");

        assert!(tree.move_node(hand, right));
        assert_eq!(tree.children(left, Placement::Behind), &[] as &[NodeId]);
        assert_eq!(tree.children(right, Placement::InFront), &[ring, hand]);
        assert_eq!(tree.placement_of(hand), Some(Placement::InFront));
        assert_eq!(tree.parent_of(finger), Some(hand), "subtree moves along");
    }

    #[test]
    fn placement_change_keeps_parent() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        let a = named(&mut tree, root, Placement::InFront, "a");
        let b = named(&mut tree, root, Placement::InFront, "b");
        let c = named(&mut tree, root, Placement::Behind, "c");

        assert!(tree.set_placement(a, Placement::Behind));
        assert_eq!(tree.children(root, Placement::Behind), &[c, a]);
        assert_eq!(tree.children(root, Placement::InFront), &[b]);
        assert_eq!(tree.parent_of(a), Some(root));

        assert!(!tree.set_placement(c, Placement::Behind));
        assert_eq!(tree.children(root, Placement::Behind), &[c, a], "same list is a no-op");
        assert!(!tree.set_placement(root, Placement::Behind));
    }

    #[test]
    fn placement_into_current_list_keeps_sibling_order() {
        let mut tree = SceneTree::new(SceneNode::named("Root"));
        let root = tree.root();
        let a = named(&mut tree, root, Placement::InFront, "a");
        let b = named(&mut tree, root, Placement::InFront, "b");

        assert!(!tree.set_placement(a, Placement::InFront));
        assert_eq!(tree.children(root, Placement::InFront), &[a, b]);
        assert_eq!(tree.children(root, Placement::Behind), &[] as &[NodeId]);
    }
}
