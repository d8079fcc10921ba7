// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order traversal, screen bounds, and top-most hit testing.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use marionette_sprite::{DEFAULT_STATE, DisplayFrame, Frame, SpriteSet, TextureId};
use smallvec::SmallVec;

use crate::canvas::CanvasState;
use crate::resolve::{resolve, scaled_size};
use crate::tree::SceneTree;
use crate::types::{NodeId, Placement, Transform};
use crate::util::{rotation_about, transform_quad, transform_rect_bbox};

/// Animation inputs for a traversal.
///
/// Supplied per call and never cached by the tree.
#[derive(Copy, Clone, Debug)]
pub struct RenderParams<'a> {
    /// State currently playing, looked up by name in each node's sprite.
    pub active_state: &'a str,
    /// Rest state. Its first frame is what behind children attach to and what is shown
    /// when the active state cannot be used.
    pub default_state: &'a str,
    /// Requested frame of the active state, clamped per sprite.
    pub active_frame: usize,
    /// Whether a link active state shows its target's frames. When off, links display the
    /// default state's first frame.
    pub follow_links: bool,
}

impl Default for RenderParams<'_> {
    fn default() -> Self {
        Self {
            active_state: DEFAULT_STATE,
            default_state: DEFAULT_STATE,
            active_frame: 0,
            follow_links: true,
        }
    }
}

impl<'a> RenderParams<'a> {
    /// Create params showing frame 0 of the default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `state`.
    pub fn with_state(mut self, state: &'a str) -> Self {
        self.active_state = state;
        self
    }

    /// Show frame `frame` of the active state.
    pub fn with_frame(mut self, frame: usize) -> Self {
        self.active_frame = frame;
        self
    }

    /// Use `state` as the rest state.
    pub fn with_default_state(mut self, state: &'a str) -> Self {
        self.default_state = state;
        self
    }

    /// Set whether link states show their target's frames.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

/// A drawn node, in paint order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The drawn node.
    pub node: NodeId,
    /// Axis-aligned screen bounds of the rotated frame. Contains its min edges, not its max
    /// edges.
    pub bounds: Rect,
    /// Rotated frame corners: top-left, top-right, bottom-right, bottom-left.
    pub quad: [Point; 4],
    /// Resolved transform of the node.
    pub transform: Transform,
    /// Texture to draw.
    pub texture: TextureId,
    /// Index of the displayed frame within its state.
    pub frame_index: usize,
}

/// Output of [`SceneTree::traverse`]: every drawn node, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderList {
    items: Vec<RenderItem>,
}

impl RenderList {
    /// Items in paint order; later items paint over earlier ones.
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Number of drawn nodes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The top-most drawn node whose bounds contain `point`.
    ///
    /// Items are scanned last-painted first, so what is seen on top is what is picked.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.bounds.contains(point))
            .map(|item| item.node)
    }

    /// The recorded item for `node`, for example to outline the selection and mark its
    /// anchor.
    pub fn item_for(&self, node: NodeId) -> Option<&RenderItem> {
        self.items.iter().find(|item| item.node == node)
    }
}

enum Work<'a> {
    /// Resolve a node, then schedule its behind children, itself, and its front children.
    Visit {
        id: NodeId,
        parent: Transform,
        parent_frame: Option<&'a Frame>,
    },
    /// Record a node whose transform and frame are known.
    Paint {
        id: NodeId,
        transform: Transform,
        shown: DisplayFrame<'a>,
        texture: TextureId,
    },
}

impl SceneTree {
    /// Walk the tree in paint order and record what is drawn.
    ///
    /// Each node resolves its transform from its parent's, then paints its behind children,
    /// then itself, then its front children. Behind children attach to the node's first
    /// frame of [`RenderParams::default_state`]; front children attach to the frame the node
    /// displays. Nodes without a sprite or with an unknown sprite draw nothing and hand no
    /// frame to their children. A sprite with no states cannot be registered in a
    /// [`SpriteSet`], and would select no frame anyway. Nodes whose displayed frame has no
    /// texture are not recorded. In every case the walk continues into the children.
    ///
    /// `viewport_center` is the screen point the root sits on before panning.
    pub fn traverse(
        &self,
        sprites: &SpriteSet,
        canvas: &CanvasState,
        viewport_center: Point,
        params: &RenderParams<'_>,
    ) -> RenderList {
        let zoom = canvas.zoom;
        let mut items = Vec::new();
        let mut stack: SmallVec<[Work<'_>; 16]> = SmallVec::new();
        stack.push(Work::Visit {
            id: self.root(),
            parent: canvas.root_transform(viewport_center),
            parent_frame: None,
        });

        while let Some(work) = stack.pop() {
            match work {
                Work::Visit {
                    id,
                    parent,
                    parent_frame,
                } => {
                    let slot = self.node(id);
                    let sprite = slot
                        .local
                        .sprite
                        .as_deref()
                        .and_then(|name| sprites.get(name));
                    let transform = resolve(&slot.local, sprite, &parent, parent_frame, zoom);

                    let shown = sprite.and_then(|s| {
                        s.display_frame(
                            params.active_state,
                            params.default_state,
                            params.active_frame,
                            params.follow_links,
                        )
                    });
                    let behind_frame = sprite.and_then(|s| s.first_frame(params.default_state));

                    // The stack is LIFO: push front children, then self, then behind children.
                    for &child in slot.list(Placement::InFront).iter().rev() {
                        stack.push(Work::Visit {
                            id: child,
                            parent: transform,
                            parent_frame: shown.map(|d| d.frame),
                        });
                    }
                    if let Some(shown) = shown
                        && let Some(texture) = shown.frame.texture
                    {
                        stack.push(Work::Paint {
                            id,
                            transform,
                            shown,
                            texture,
                        });
                    }
                    for &child in slot.list(Placement::Behind).iter().rev() {
                        stack.push(Work::Visit {
                            id: child,
                            parent: transform,
                            parent_frame: behind_frame,
                        });
                    }
                }
                Work::Paint {
                    id,
                    transform,
                    shown,
                    texture,
                } => {
                    let rect =
                        Rect::from_center_size(transform.position, scaled_size(shown.frame, zoom));
                    let affine = rotation_about(transform.angle, transform.position);
                    items.push(RenderItem {
                        node: id,
                        bounds: transform_rect_bbox(affine, rect),
                        quad: transform_quad(affine, rect),
                        transform,
                        texture,
                        frame_index: shown.index,
                    });
                }
            }
        }

        log::trace!("traversal drew {} of {} node(s)", items.len(), self.len());
        RenderList { items }
    }
}
