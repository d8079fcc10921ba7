// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marionette Tree: a Kurbo-native scene tree for pivot-attached sprite rigs.
//!
//! A rig is a tree of sprite-bearing nodes. Each node hangs off a normalized point (its
//! *pivot*) on its parent's frame and rotates about its own *anchor*. Children are split
//! into two ordered lists, behind and in front, which encode paint order relative to the
//! parent.
//!
//! - Resolves world transforms top-down from pivots, pivot offsets, and angles.
//! - Walks the tree in paint order (behind children, the node, front children) and records
//!   screen bounds for every drawn node.
//! - Hit tests against those bounds, top-most first.
//! - Edits structure safely: unique names, deletion with child promotion, cycle-checked
//!   moves, and render-order changes.
//!
//! Sprite data comes from [`marionette_sprite`]; this crate never draws, loads, or saves.
//!
//! ## API overview
//!
//! - [`SceneTree`]: arena of nodes addressed by generational [`NodeId`]s.
//! - [`SceneNode`]: per-node local data (name, sprite binding, pivot, pivot offset, angle).
//! - [`Placement`]: which child list, behind or in front, holds a node.
//! - [`Transform`]: resolved world position, angle, and anchor.
//! - [`CanvasState`]: zoom and pan of the view.
//! - [`RenderParams`]: active state and frame for a traversal.
//! - [`RenderList`] / [`RenderItem`]: paint-ordered output of a traversal.
//! - [`EditContext`]: selection and queued edits, applied between traversals.
//!
//! Key operations:
//! - [`resolve`]: a node's world [`Transform`] from its parent's.
//! - [`SceneTree::traverse`] → [`RenderList`], then [`RenderList::hit_test`].
//! - [`SceneTree::generate_unique_name`], [`SceneTree::insert_child`],
//!   [`SceneTree::delete_node`], [`SceneTree::move_node`], [`SceneTree::set_placement`].
//! - [`SceneTree::outline`] lists nodes the way an outliner shows them.
//!
//! ## Failure model
//!
//! Nothing here returns an error. Stale handles, deleting the root, and moves that would
//! create a cycle are no-ops that report `false` or `None`. Nodes with no sprite, no usable
//! state, or a frame without a texture are skipped when drawing, but their children are
//! still walked.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use marionette_sprite::{Frame, FrameSequence, Sprite, SpriteSet, SpriteState, TextureId};
//! use marionette_tree::{CanvasState, Placement, RenderParams, SceneNode, SceneTree};
//!
//! let mut sprites = SpriteSet::new();
//! sprites
//!     .insert(Sprite::new("Gun").with_state(
//!         "Normal",
//!         SpriteState::Frames(FrameSequence::new([Frame::new(64, 32, Some(TextureId(1)))])),
//!     ))
//!     .unwrap();
//!
//! let mut tree = SceneTree::new(SceneNode::named("Root"));
//! let gun = tree
//!     .insert(
//!         tree.root(),
//!         Placement::InFront,
//!         SceneNode::named("Gun").with_sprite("Gun").with_pivot((0.5, 0.0)),
//!     )
//!     .unwrap();
//!
//! let canvas = CanvasState::default();
//! let list = tree.traverse(&sprites, &canvas, Point::new(400.0, 300.0), &RenderParams::default());
//! assert_eq!(list.len(), 1);
//! assert_eq!(list.hit_test(Point::new(400.0, 300.0)), Some(gun));
//! assert_eq!(list.hit_test(Point::new(0.0, 0.0)), None);
//!
//! // Deleting the root is refused.
//! assert!(!tree.delete_node(tree.root()));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod canvas;
mod edit;
mod mutate;
mod render;
mod resolve;
mod tree;
mod types;
mod util;

pub use canvas::CanvasState;
pub use edit::{Applied, DragDrop, EditContext};
pub use mutate::DEFAULT_NODE_NAME;
pub use render::{RenderItem, RenderList, RenderParams};
pub use resolve::resolve;
pub use tree::{OutlineRow, SceneTree};
pub use types::{NodeId, Placement, SceneNode, Transform};
