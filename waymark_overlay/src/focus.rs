// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus-follows-selection.

use kurbo::{Rect, Vec2};

/// Visible-area ratio below which a focused region is brought into view.
pub const DEFAULT_RECENTER_THRESHOLD: f64 = 0.25;

/// Pan needed to bring a newly focused region into view, if any.
///
/// `region` and `viewport` are bounding rectangles in the same screen space.
/// When less than `threshold` of the region's area lies inside the viewport,
/// returns the offset that moves the region's center onto the viewport's
/// center. Regions with no area never pan.
#[must_use]
pub fn recenter_delta(region: Rect, viewport: Rect, threshold: f64) -> Option<Vec2> {
    let region = region.abs();
    let full = region.area();
    if full.is_nan() || full <= 0.0 {
        return None;
    }
    let visible = region.intersect(viewport.abs()).area();
    if visible / full >= threshold {
        return None;
    }
    Some(-(region.center() - viewport.center()))
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Vec2};

    use super::{DEFAULT_RECENTER_THRESHOLD, recenter_delta};

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn mostly_hidden_region_is_recentered() {
        // 100x100 region with a 10x100 sliver inside the viewport.
        let region = Rect::new(790.0, 100.0, 890.0, 200.0);
        let delta = recenter_delta(region, VIEWPORT, DEFAULT_RECENTER_THRESHOLD).unwrap();
        assert_eq!(delta, Vec2::new(-(840.0 - 400.0), -(150.0 - 300.0)));
        assert_ne!(delta, Vec2::ZERO);
    }

    #[test]
    fn mostly_visible_region_stays() {
        // 90% of the region is inside.
        let region = Rect::new(710.0, 100.0, 810.0, 200.0);
        assert_eq!(recenter_delta(region, VIEWPORT, DEFAULT_RECENTER_THRESHOLD), None);
    }

    #[test]
    fn fully_outside_region_is_recentered() {
        let region = Rect::new(-300.0, -300.0, -200.0, -200.0);
        let delta = recenter_delta(region, VIEWPORT, DEFAULT_RECENTER_THRESHOLD).unwrap();
        assert_eq!(delta, Vec2::new(650.0, 550.0));
    }

    #[test]
    fn threshold_is_exclusive() {
        // Exactly a quarter visible.
        let region = Rect::new(775.0, 0.0, 875.0, 100.0);
        assert_eq!(recenter_delta(region, VIEWPORT, 0.25), None);
    }

    #[test]
    fn degenerate_region_never_pans() {
        let line = Rect::new(900.0, 0.0, 900.0, 50.0);
        assert_eq!(recenter_delta(line, VIEWPORT, DEFAULT_RECENTER_THRESHOLD), None);
    }
}
