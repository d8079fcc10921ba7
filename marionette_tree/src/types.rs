// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, placement, local data, and transforms.

use alloc::string::String;
use kurbo::{Point, Vec2};

/// Identifier for a node in the tree (generational).
///
/// Deleting a node bumps the generation of its slot, so a handle kept by a selection or a
/// pending drag is detected as stale in O(1) by [`SceneTree::is_alive`](crate::SceneTree::is_alive).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which of its parent's child lists a node lives in.
///
/// Behind children paint before their parent, front children after it. Order within each
/// list is paint order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Painted before the parent.
    Behind,
    /// Painted after the parent.
    InFront,
}

/// Local data for a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneNode {
    /// Display name. Editors use it as a stable reference; see
    /// [`SceneTree::generate_unique_name`](crate::SceneTree::generate_unique_name).
    pub name: String,
    /// Name of the bound sprite. May not resolve, in which case the node draws nothing.
    pub sprite: Option<String>,
    /// Normalized attachment point on the parent's displayed frame, relative to its center.
    /// Nominally in `[0, 1]` but not clamped.
    pub pivot: Vec2,
    /// Normalized position of this node's own anchor relative to its own frame center.
    pub pivot_offset: Vec2,
    /// Rotation in degrees, added to the inherited parent angle.
    pub angle: f64,
}

impl SceneNode {
    /// A node with the given name and no sprite, pivot, or rotation.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Bind to a sprite by name.
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// Set the pivot on the parent's frame.
    pub fn with_pivot(mut self, pivot: impl Into<Vec2>) -> Self {
        self.pivot = pivot.into();
        self
    }

    /// Set the anchor offset on this node's own frame.
    pub fn with_pivot_offset(mut self, offset: impl Into<Vec2>) -> Self {
        self.pivot_offset = offset.into();
        self
    }

    /// Set the local rotation in degrees.
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }
}

/// Resolved world placement of a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// World position of the node's frame center.
    pub position: Point,
    /// World rotation in degrees.
    pub angle: f64,
    /// World point where the node attaches to its parent.
    pub anchor: Point,
}

impl Transform {
    /// Transform of a synthetic root placed at `position` with no rotation.
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            angle: 0.0,
            anchor: position,
        }
    }

    /// World rotation in radians.
    pub fn angle_radians(&self) -> f64 {
        self.angle.to_radians()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Point::ORIGIN)
    }
}
