// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::sizes::ViewSizes;

/// Bounds a candidate pan offset so the content stays pinned to the viewport.
///
/// Each axis is handled independently by [`clamp_axis`] using the displayed
/// content size (`view_box * real_zoom`) and the viewport size:
/// - Where the content is at least as large as the viewport, the pan is
///   limited so that no viewport edge ever shows a gap.
/// - Where the content is smaller, the only valid pan is the one that
///   centers it, so the requested value is ignored.
#[must_use]
pub fn clamp_pan(sizes: &ViewSizes, pan: Vec2) -> Vec2 {
    let content = sizes.content();
    Vec2::new(
        clamp_axis(content.width, sizes.viewport.width, pan.x),
        clamp_axis(content.height, sizes.viewport.height, pan.y),
    )
}

/// Clamps a single pan coordinate.
///
/// The valid range is `[-(extra + content - viewport), extra]` where
/// `extra = max(viewport - content, 0) / 2`. When the content is smaller
/// than the viewport both ends of that range equal `extra`, the centering
/// offset.
#[must_use]
pub fn clamp_axis(content: f64, viewport: f64, pan: f64) -> f64 {
    let extra = (viewport - content).max(0.0) / 2.0;
    let lowest = -(extra + content - viewport);
    pan.min(extra).max(lowest)
}
