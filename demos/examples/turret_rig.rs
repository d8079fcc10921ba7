// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small turret rig: build, draw, pick, and edit.
//!
//! This example shows how to:
//! - register sprites with `marionette_sprite`,
//! - attach nodes by pivot and walk them in paint order,
//! - pick the top-most node under a point,
//! - queue edits in an `EditContext` and apply them between frames.
//!
//! Run:
//! - `cargo run -p marionette_demos --example turret_rig`

use kurbo::{Point, Vec2};
use marionette_sprite::{Frame, FrameSequence, Sprite, SpriteSet, SpriteState, TextureId};
use marionette_tree::{
    CanvasState, EditContext, Placement, RenderList, RenderParams, SceneNode, SceneTree,
};

fn frames(width: u32, height: u32, textures: &[u32]) -> SpriteState {
    SpriteState::Frames(FrameSequence::new(
        textures
            .iter()
            .map(|&t| Frame::new(width, height, Some(TextureId(t)))),
    ))
}

fn print_list(tree: &SceneTree, list: &RenderList) {
    for item in list.items() {
        let name = tree.get(item.node).map_or("?", |n| n.name.as_str());
        println!(
            "  {name:<8} frame {} at ({:.1}, {:.1}) angle {:.1} bounds {:?}",
            item.frame_index,
            item.transform.position.x,
            item.transform.position.y,
            item.transform.angle,
            item.bounds,
        );
    }
}

fn print_outline(tree: &SceneTree) {
    for row in tree.outline() {
        let name = tree.get(row.node).map_or("?", |n| n.name.as_str());
        let side = match row.placement {
            Some(Placement::Behind) => " (behind)",
            Some(Placement::InFront) | None => "",
        };
        println!("  {:indent$}{name}{side}", "", indent = row.depth * 2);
    }
}

fn main() {
    let mut sprites = SpriteSet::new();
    let rig = [
        Sprite::new("Base").with_state("Normal", frames(120, 40, &[1])),
        Sprite::new("Turret")
            .with_state("Normal", frames(60, 60, &[2]))
            .with_state("Idle", frames(60, 60, &[3, 4, 5]))
            .with_state("Alert", SpriteState::Link("Idle".into())),
        Sprite::new("Barrel").with_state("Normal", frames(80, 12, &[6])),
        Sprite::new("Shadow").with_state("Normal", frames(140, 20, &[7])),
    ];
    for sprite in rig {
        if let Err(err) = sprites.insert(sprite) {
            eprintln!("skipping sprite: {err}");
        }
    }
    // Rejected: no rest state.
    if let Err(err) = sprites.insert(Sprite::new("Broken").with_state("Idle", frames(1, 1, &[0])))
    {
        println!("rejected: {err}");
    }
    println!("states: {:?}", sprites.available_states());
    println!("timeline frames for Idle: {}", sprites.max_frames("Idle"));

    let mut tree = SceneTree::new(SceneNode::named("Root"));
    let root = tree.root();
    let base = tree
        .insert(root, Placement::InFront, SceneNode::named("Base").with_sprite("Base"))
        .expect("root is live");
    tree.insert(
        base,
        Placement::Behind,
        SceneNode::named("Shadow")
            .with_sprite("Shadow")
            .with_pivot((0.0, 0.6)),
    );
    let turret = tree
        .insert(
            base,
            Placement::InFront,
            SceneNode::named("Turret")
                .with_sprite("Turret")
                .with_pivot((0.0, -0.5)),
        )
        .expect("base is live");
    let barrel = tree
        .insert(
            turret,
            Placement::Behind,
            SceneNode::named("Barrel")
                .with_sprite("Barrel")
                .with_pivot((0.25, 0.0))
                .with_pivot_offset((-0.5, 0.0))
                .with_angle(-20.0),
        )
        .expect("turret is live");

    let viewport_center = Point::new(400.0, 300.0);
    let mut canvas = CanvasState::default();
    canvas.zoom_by_wheel(2.0);
    canvas.pan_by(Vec2::new(-25.0, 10.0));
    println!("zoom {:.3}, pan {:?}", canvas.zoom, canvas.pan);

    println!("outline:");
    print_outline(&tree);

    for frame in 0..4 {
        let params = RenderParams::new().with_state("Alert").with_frame(frame);
        let list = tree.traverse(&sprites, &canvas, viewport_center, &params);
        println!("Alert frame {frame}:");
        print_list(&tree, &list);
    }

    let params = RenderParams::new().with_state("Walk");
    let list = tree.traverse(&sprites, &canvas, viewport_center, &params);
    println!("Walk (missing, falls back to Normal):");
    print_list(&tree, &list);

    let mut edits = EditContext::new();
    let picked = edits.select_at(&list, viewport_center);
    println!(
        "clicked center: {:?}",
        picked.and_then(|id| tree.get(id)).map(|n| n.name.as_str())
    );

    // Dropping the turret onto its own barrel would create a cycle.
    edits.request_drag(turret, barrel);
    let applied = edits.apply(&mut tree);
    println!("drop turret on barrel: moved = {}", applied.moved);

    edits.request_add_child(barrel);
    edits.request_placement(barrel, Placement::InFront);
    let applied = edits.apply(&mut tree);
    if let Some(added) = applied.added {
        tree.set_angle(added, 15.0);
    }
    println!("added {:?}, barrel now in front = {}", applied.added, applied.placed);

    edits.select(Some(turret));
    edits.request_delete(turret);
    let applied = edits.apply(&mut tree);
    println!(
        "deleted turret = {}, selection = {:?}",
        applied.deleted, edits.selected
    );

    println!("outline after edits:");
    print_outline(&tree);
    canvas.reset();
    let list = tree.traverse(&sprites, &canvas, viewport_center, &RenderParams::default());
    print_list(&tree, &list);
}
