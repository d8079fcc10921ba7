// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

/// Rotate `v` about the origin by `degrees`.
pub(crate) fn rotate_vec(v: Vec2, degrees: f64) -> Vec2 {
    (Affine::rotate(degrees.to_radians()) * v.to_point()).to_vec2()
}

/// Rotation by `degrees` about `center`.
pub(crate) fn rotation_about(degrees: f64, center: Point) -> Affine {
    Affine::rotate_about(degrees.to_radians(), center)
}

/// Corners of `rect` mapped through `affine`, in top-left, top-right, bottom-right,
/// bottom-left order.
pub(crate) fn transform_quad(affine: Affine, rect: Rect) -> [Point; 4] {
    [
        affine * Point::new(rect.x0, rect.y0),
        affine * Point::new(rect.x1, rect.y0),
        affine * Point::new(rect.x1, rect.y1),
        affine * Point::new(rect.x0, rect.y1),
    ]
}

/// Transform an axis-aligned `Rect` by an `Affine` and return the axis-aligned bounding
/// box of the result.
pub(crate) fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let min_x = (a * rect.x0).min(a * rect.x1) + (c * rect.y0).min(c * rect.y1);
    let max_x = (a * rect.x0).max(a * rect.x1) + (c * rect.y0).max(c * rect.y1);
    let min_y = (b * rect.x0).min(b * rect.x1) + (d * rect.y0).min(d * rect.y1);
    let max_y = (b * rect.x0).max(b * rect.x1) + (d * rect.y0).max(d * rect.y1);
    Rect::new(min_x + e, min_y + f, max_x + e, max_y + f)
}
