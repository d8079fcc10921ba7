// Copyright 2025 the Marionette Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View state of the canvas a rig is drawn on.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::types::Transform;

/// Zoom and pan of the canvas.
///
/// Zoom scales every distance produced by transform resolution (never angles). Pan shifts
/// the synthetic root transform. Neither is mutated by traversal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasState {
    /// Uniform scale applied to frame sizes and pivot distances.
    pub zoom: f64,
    /// Offset of the root from the viewport center, in screen units.
    pub pan: Vec2,
}

impl CanvasState {
    /// Smallest zoom reachable through [`CanvasState::zoom_by_wheel`].
    pub const MIN_ZOOM: f64 = 0.05;
    /// Largest zoom reachable through [`CanvasState::zoom_by_wheel`].
    pub const MAX_ZOOM: f64 = 20.0;
    /// Zoom factor per wheel step.
    pub const WHEEL_FACTOR: f64 = 1.1;

    /// Canvas with the given zoom and no pan.
    pub fn with_zoom(zoom: f64) -> Self {
        Self {
            zoom,
            ..Self::default()
        }
    }

    /// Scale zoom by [`Self::WHEEL_FACTOR`] per wheel step, clamped to
    /// [`Self::MIN_ZOOM`]..=[`Self::MAX_ZOOM`].
    pub fn zoom_by_wheel(&mut self, steps: f64) {
        self.zoom = (self.zoom * Self::WHEEL_FACTOR.powf(steps))
            .clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Back to zoom 1 and no pan, as after loading a rig.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Transform of the synthetic root for a viewport whose center is `viewport_center`.
    pub fn root_transform(&self, viewport_center: Point) -> Transform {
        Transform::at(viewport_center + self.pan)
    }
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut canvas = CanvasState::default();
        canvas.zoom_by_wheel(1.0);
        assert!((canvas.zoom - 1.1).abs() < 1e-12, "one step scales by 1.1");
        canvas.zoom_by_wheel(-200.0);
        assert_eq!(canvas.zoom, CanvasState::MIN_ZOOM);
        canvas.zoom_by_wheel(500.0);
        assert_eq!(canvas.zoom, CanvasState::MAX_ZOOM);
    }

    #[test]
    fn root_follows_pan() {
        let mut canvas = CanvasState::with_zoom(2.0);
        canvas.pan_by(Vec2::new(10.0, -5.0));
        canvas.pan_by(Vec2::new(1.0, 1.0));
        let root = canvas.root_transform(Point::new(400.0, 300.0));
        assert_eq!(root.position, Point::new(411.0, 296.0));
        assert_eq!(root.anchor, root.position);
        assert_eq!(root.angle, 0.0);
        canvas.reset();
        assert_eq!(canvas, CanvasState::default());
    }
}
