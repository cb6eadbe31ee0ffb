// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::clamp::clamp_pan;
use crate::controller::PanBegin;
use crate::host::{HostError, PanZoomHost};

/// Multipliers applied to the base zoom to derive the zoom limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomMultipliers {
    /// Lower limit as a multiple of the base zoom.
    pub min: f64,
    /// Upper limit as a multiple of the base zoom.
    pub max: f64,
}

impl Default for ZoomMultipliers {
    fn default() -> Self {
        Self { min: 0.5, max: 5.0 }
    }
}

/// Zoom limits derived from the current content and viewport sizes.
///
/// The limits are scale invariant: they are expressed relative to the
/// _base zoom_, the zoom at which the more constrained axis of the content
/// exactly fills the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomEnvelope {
    /// Zoom at which the content exactly fills the viewport.
    pub base_zoom: f64,
    /// Lowest permitted zoom.
    pub min_zoom: f64,
    /// Highest permitted zoom.
    pub max_zoom: f64,
}

impl ZoomEnvelope {
    /// Derives the limits for a base zoom.
    #[must_use]
    pub fn from_base(base_zoom: f64, multipliers: ZoomMultipliers) -> Self {
        Self {
            base_zoom,
            min_zoom: base_zoom * multipliers.min,
            max_zoom: base_zoom * multipliers.max,
        }
    }

    /// Returns `true` if `zoom` lies within the limits.
    #[must_use]
    pub fn contains(&self, zoom: f64) -> bool {
        self.min_zoom <= zoom && zoom <= self.max_zoom
    }

    /// Snaps `zoom` to the nearest limit if it lies outside them.
    #[must_use]
    pub fn snap(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }
}

/// Whether [`recompute_envelope`] should also reset the view to the base zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ApplyBase {
    /// Keep the current zoom unless it falls outside the new limits.
    #[default]
    Keep,
    /// Zoom to the base zoom and center the content (initial mount).
    Apply,
}

/// Recomputes and installs the zoom limits for the host's current size.
///
/// 1. Asks the host to re-measure.
/// 2. Derives the base zoom from the content/viewport ratio per axis.
/// 3. Installs `base * multipliers.min` and `base * multipliers.max` as the
///    host's zoom limits.
/// 4. Snaps the current zoom into the limits if needed, re-clamping the pan.
/// 5. With [`ApplyBase::Apply`], zooms to the base zoom, centers, and
///    re-clamps the pan.
///
/// Each re-clamp is announced through `on_begin` before the pan is written.
///
/// Calling this twice without the host changing size yields the same limits.
pub fn recompute_envelope<H: PanZoomHost + ?Sized>(
    host: &mut H,
    multipliers: ZoomMultipliers,
    apply_base: ApplyBase,
    mut on_begin: impl FnMut(PanBegin),
) -> Result<ZoomEnvelope, HostError> {
    host.resize();

    let sizes = host.sizes();
    sizes.validate()?;
    let content = sizes.content();
    let width_ratio = sizes.viewport.width / content.width;
    let height_ratio = sizes.viewport.height / content.height;
    let base_zoom = width_ratio.max(height_ratio) * host.zoom();

    let envelope = ZoomEnvelope::from_base(base_zoom, multipliers);
    host.set_min_zoom(envelope.min_zoom);
    host.set_max_zoom(envelope.max_zoom);

    let zoom = host.zoom();
    if !envelope.contains(zoom) {
        host.set_zoom(envelope.snap(zoom));
        reclamp(host, &mut on_begin);
    }

    if apply_base == ApplyBase::Apply {
        host.set_zoom(envelope.base_zoom);
        host.center();
        reclamp(host, &mut on_begin);
    }

    Ok(envelope)
}

pub(crate) fn reclamp<H: PanZoomHost + ?Sized>(host: &mut H, on_begin: &mut impl FnMut(PanBegin)) {
    let old = host.pan();
    on_begin(PanBegin {
        old,
        requested: old,
    });
    host.set_pan(clamp_pan(&host.sizes(), old));
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use kurbo::{Size, Vec2};

    use super::{ApplyBase, ZoomEnvelope, ZoomMultipliers, recompute_envelope};
    use crate::headless::HeadlessHost;
    use crate::host::{HostError, PanZoomHost};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn envelope_from_base_scales_limits() {
        let env = ZoomEnvelope::from_base(2.0, ZoomMultipliers::default());
        assert_eq!(env.min_zoom, 1.0);
        assert_eq!(env.max_zoom, 10.0);
        assert!(env.contains(2.0));
        assert!(!env.contains(0.5));
        assert_eq!(env.snap(0.5), 1.0);
        assert_eq!(env.snap(50.0), 10.0);
    }

    #[test]
    fn base_zoom_fills_the_more_constrained_axis() {
        // 400x100 content in 800x600: contain-fit scale is 2 (width bound),
        // so at zoom 1 the content is 800x200. Filling the height needs 3x.
        let mut host = HeadlessHost::new(Size::new(400.0, 100.0), Size::new(800.0, 600.0));
        let env = recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Apply, |_| {})
            .unwrap();
        assert!(close(env.base_zoom, 3.0));
        assert!(close(host.zoom(), 3.0));
        let content = host.sizes().content();
        assert!(close(content.height, 600.0));
        assert!(content.width >= 800.0);
    }

    #[test]
    fn out_of_range_zoom_is_snapped_and_pan_reclamped() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        host.set_zoom(0.1);
        host.set_pan(Vec2::new(-9_000.0, 9_000.0));

        let env =
            recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Keep, |_| {}).unwrap();
        assert!(close(host.zoom(), env.min_zoom));

        // At min zoom (0.5x of fill) the content is smaller than the viewport
        // on both axes, so it must be centered.
        let content = host.sizes().content();
        let pan = host.pan();
        assert!(close(pan.x, (800.0 - content.width) / 2.0));
        assert!(close(pan.y, (600.0 - content.height) / 2.0));
    }

    #[test]
    fn snapping_reclamp_is_announced_first() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        host.set_zoom(0.1);
        host.set_pan(Vec2::new(-9_000.0, 9_000.0));

        let mut seen = Vec::new();
        recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Keep, |begin| {
            seen.push(begin);
        })
        .unwrap();

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].old, seen[0].requested);
        // Reported pan is the unclamped one.
        assert_ne!(seen[0].old, host.pan());
    }

    #[test]
    fn in_range_zoom_keeps_pan_silent() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Apply, |_| {}).unwrap();

        let mut count = 0;
        recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Keep, |_| count += 1)
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut host = HeadlessHost::new(Size::new(640.0, 480.0), Size::new(1024.0, 768.0));
        let first =
            recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Apply, |_| {}).unwrap();
        let second =
            recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Keep, |_| {}).unwrap();
        assert!(close(first.min_zoom, second.min_zoom));
        assert!(close(first.max_zoom, second.max_zoom));
    }

    #[test]
    fn resize_is_only_observed_after_remeasure() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Apply, |_| {}).unwrap();

        host.set_element_size(Size::new(1600.0, 600.0));
        assert_eq!(host.sizes().viewport, Size::new(800.0, 600.0));

        let env =
            recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Keep, |_| {}).unwrap();
        assert_eq!(host.sizes().viewport, Size::new(1600.0, 600.0));
        assert!(env.contains(host.zoom()));
    }

    #[test]
    fn degenerate_host_fails_fast() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(0.0, 0.0));
        let err = recompute_envelope(&mut host, ZoomMultipliers::default(), ApplyBase::Apply, |_| {});
        assert_eq!(err, Err(HostError::EmptyViewport));
    }
}
