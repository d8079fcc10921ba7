// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pivot attachment: from a node's local pivot data to its world transform.

use kurbo::{Size, Vec2};
use marionette_sprite::{Frame, Sprite};

use crate::types::{SceneNode, Transform};
use crate::util::rotate_vec;

/// Size of `frame` on screen at `zoom`.
pub(crate) fn scaled_size(frame: &Frame, zoom: f64) -> Size {
    Size::new(f64::from(frame.width) * zoom, f64::from(frame.height) * zoom)
}

/// Resolve the world transform of `node`.
///
/// - `sprite` is the sprite `node` is bound to, if it resolves. Its rest frame (first frame
///   of the `Normal` state) is the node's footprint, whatever state is playing.
/// - `parent` is the already-resolved transform of the parent, or a synthetic root
///   transform (see [`CanvasState::root_transform`](crate::CanvasState::root_transform)).
/// - `parent_frame` is the frame of the parent that `node` attaches to, if any.
/// - `zoom` scales every distance, never angles.
///
/// The pivot is measured on the parent frame from its center and rotated by the parent's
/// angle to find the anchor. Without a parent frame the anchor is the parent's position.
/// Without a rest frame of its own the node sits on its anchor; otherwise its center is
/// placed so that its own pivot offset, rotated by the node's world angle, lands on the
/// anchor.
///
/// This is a pure function. Parents must be resolved before their children.
pub fn resolve(
    node: &SceneNode,
    sprite: Option<&Sprite>,
    parent: &Transform,
    parent_frame: Option<&Frame>,
    zoom: f64,
) -> Transform {
    let angle = parent.angle + node.angle;

    let anchor = match parent_frame {
        Some(frame) => {
            let size = scaled_size(frame, zoom);
            let local = Vec2::new(node.pivot.x * size.width, node.pivot.y * size.height);
            parent.position + rotate_vec(local, parent.angle)
        }
        None => parent.position,
    };

    let Some(own) = sprite.and_then(Sprite::rest_frame) else {
        return Transform {
            position: anchor,
            angle,
            anchor,
        };
    };

    let size = scaled_size(own, zoom);
    let center_to_anchor = Vec2::new(
        -node.pivot_offset.x * size.width,
        -node.pivot_offset.y * size.height,
    );
    Transform {
        position: anchor - rotate_vec(center_to_anchor, angle),
        angle,
        anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use marionette_sprite::{FrameSequence, SpriteState, TextureId};

    fn sprite(width: u32, height: u32) -> Sprite {
        Sprite::new("S").with_state(
            "Normal",
            SpriteState::Frames(FrameSequence::new([Frame::new(
                width,
                height,
                Some(TextureId(1)),
            )])),
        )
    }

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn root_child_without_parent_frame_sits_on_parent() {
        let gun = SceneNode::named("Gun").with_pivot((0.5, 0.0));
        let gun_sprite = sprite(64, 32);
        let root = Transform::at(Point::new(100.0, 50.0));

        let tf = resolve(&gun, Some(&gun_sprite), &root, None, 1.0);
        // No parent frame: pivot is ignored, zero pivot offset keeps the center on the anchor.
        assert_eq!(tf.anchor, Point::new(100.0, 50.0));
        assert_eq!(tf.position, Point::new(100.0, 50.0));
        assert_eq!(tf.angle, 0.0);
    }

    #[test]
    fn pivot_measures_on_parent_frame_with_zoom() {
        let gun = SceneNode::named("Gun").with_pivot((0.5, 0.0));
        let gun_sprite = sprite(64, 32);
        let body_frame = Frame::new(100, 40, Some(TextureId(2)));
        let parent = Transform::at(Point::new(0.0, 0.0));

        let tf = resolve(&gun, Some(&gun_sprite), &parent, Some(&body_frame), 2.0);
        // 0.5 * 100 * 2 = 100 along x.
        assert_eq!(tf.anchor, Point::new(100.0, 0.0));
        assert_eq!(tf.position, Point::new(100.0, 0.0));
    }

    #[test]
    fn pivot_rotates_with_parent_angle_only() {
        let arm = SceneNode::named("Arm").with_pivot((0.5, 0.0)).with_angle(30.0);
        let parent = Transform {
            position: Point::new(10.0, 10.0),
            angle: 90.0,
            anchor: Point::new(10.0, 10.0),
        };
        let frame = Frame::new(20, 20, Some(TextureId(3)));

        let tf = resolve(&arm, None, &parent, Some(&frame), 1.0);
        // (10, 0) rotated by the parent's 90 degrees is (0, 10).
        assert!(close(tf.anchor, Point::new(10.0, 20.0)), "{:?}", tf.anchor);
        assert_eq!(tf.angle, 120.0, "angles accumulate");
        assert_eq!(tf.position, tf.anchor, "no sprite means no self-centering");
    }

    #[test]
    fn pivot_offset_places_center_away_from_anchor() {
        let barrel = SceneNode::named("Barrel").with_pivot_offset((-0.5, 0.0));
        let barrel_sprite = sprite(40, 10);
        let parent = Transform::at(Point::ZERO);

        let tf = resolve(&barrel, Some(&barrel_sprite), &parent, None, 1.0);
        // The center lands at anchor + offset * size.
        assert!(close(tf.position, Point::new(-20.0, 0.0)), "{:?}", tf.position);
        assert_eq!(tf.anchor, Point::ZERO);
    }

    #[test]
    fn pivot_offset_rotates_with_own_angle() {
        let barrel = SceneNode::named("Barrel")
            .with_pivot_offset((-0.5, 0.0))
            .with_angle(90.0);
        let barrel_sprite = sprite(40, 10);
        let parent = Transform::at(Point::ZERO);

        let tf = resolve(&barrel, Some(&barrel_sprite), &parent, None, 1.0);
        assert!(close(tf.position, Point::new(0.0, -20.0)), "{:?}", tf.position);
    }

    #[test]
    fn rest_frame_is_used_not_a_link() {
        let linked = Sprite::new("L")
            .with_state("Normal", SpriteState::Link("Idle".into()))
            .with_state(
                "Idle",
                SpriteState::Frames(FrameSequence::new([Frame::new(50, 50, None)])),
            );
        let node = SceneNode::named("N").with_pivot_offset((0.5, 0.5));
        let tf = resolve(&node, Some(&linked), &Transform::default(), None, 1.0);
        assert_eq!(tf.position, Point::ZERO, "link rest state has no footprint");
    }

    #[test]
    fn resolution_is_deterministic() {
        let node = SceneNode::named("N")
            .with_pivot((0.3, -0.2))
            .with_pivot_offset((0.1, 0.4))
            .with_angle(17.0);
        let s = sprite(33, 21);
        let parent = Transform {
            position: Point::new(5.0, 7.0),
            angle: -42.0,
            anchor: Point::new(1.0, 1.0),
        };
        let frame = Frame::new(80, 60, Some(TextureId(4)));
        let a = resolve(&node, Some(&s), &parent, Some(&frame), 1.7);
        let b = resolve(&node, Some(&s), &parent, Some(&frame), 1.7);
        assert_eq!(a, b);
    }
}
