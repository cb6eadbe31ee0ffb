// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::host::PanZoomHost;
use crate::sizes::ViewSizes;

/// In-memory [`PanZoomHost`] with the semantics of an SVG pan/zoom surface.
///
/// The content (view box) is first fitted into the viewport with a
/// "contain" scale; the user-facing zoom multiplies that fit scale to give
/// the effective `real_zoom`. The viewport size is only re-read on
/// [`PanZoomHost::resize`], mirroring a surface whose cached measurements go
/// stale until it is asked to re-measure.
///
/// Pans are stored as given. Zoom is kept within the configured limits.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    view_box: Size,
    element_size: Size,
    viewport: Size,
    fit_scale: f64,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    content_to_view: Affine,
    view_to_content: Affine,
}

impl HeadlessHost {
    /// Creates a host showing `view_box` content in a `viewport` sized surface.
    ///
    /// - Initial zoom is `1.0` (content fitted inside the viewport).
    /// - Initial pan is zero.
    /// - Zoom is limited to `[1e-3, 1e3]` until limits are installed.
    #[must_use]
    pub fn new(view_box: Size, viewport: Size) -> Self {
        let mut host = Self {
            view_box,
            element_size: viewport,
            viewport,
            fit_scale: 1.0,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            content_to_view: Affine::IDENTITY,
            view_to_content: Affine::IDENTITY,
        };
        host.refit();
        host
    }

    /// Changes the on-screen size of the surface.
    ///
    /// The new size is not visible through [`PanZoomHost::sizes`] until the
    /// next [`PanZoomHost::resize`].
    pub fn set_element_size(&mut self, size: Size) {
        self.element_size = size;
    }

    /// Returns the zoom limits currently installed.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Converts a content-space point into viewport coordinates.
    #[must_use]
    pub fn content_to_view_point(&self, pt: Point) -> Point {
        self.content_to_view * pt
    }

    /// Converts a viewport point into content space.
    #[must_use]
    pub fn view_to_content_point(&self, pt: Point) -> Point {
        self.view_to_content * pt
    }

    /// Converts a content-space rectangle (for example a region's bounding
    /// box) into viewport coordinates.
    #[must_use]
    pub fn content_to_view_rect(&self, rect: Rect) -> Rect {
        // Uniform, axis-aligned scale: the corners stay ordered.
        Rect::from_points(
            self.content_to_view * rect.origin(),
            self.content_to_view * Point::new(rect.x1, rect.y1),
        )
    }

    /// The viewport as a rectangle anchored at the origin.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        self.viewport.to_rect()
    }

    /// Snapshot of the current host state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> HeadlessHostDebugInfo {
        HeadlessHostDebugInfo {
            view_box: self.view_box,
            viewport: self.viewport,
            fit_scale: self.fit_scale,
            zoom: self.zoom,
            real_zoom: self.real_zoom(),
            pan: self.pan,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    fn real_zoom(&self) -> f64 {
        self.zoom * self.fit_scale
    }

    fn refit(&mut self) {
        self.viewport = self.element_size;
        let sx = self.viewport.width / self.view_box.width.max(f64::MIN_POSITIVE);
        let sy = self.viewport.height / self.view_box.height.max(f64::MIN_POSITIVE);
        self.fit_scale = sx.min(sy);
        self.rebuild_transforms();
    }

    fn limit(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    fn rebuild_transforms(&mut self) {
        self.content_to_view = Affine::translate(self.pan) * Affine::scale(self.real_zoom());
        self.view_to_content = self.content_to_view.inverse();
    }
}

impl PanZoomHost for HeadlessHost {
    fn sizes(&self) -> ViewSizes {
        ViewSizes::new(self.view_box, self.viewport, self.real_zoom())
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        let center = self.viewport.to_rect().center();
        self.zoom_at_point(zoom, center);
    }

    fn zoom_at_point(&mut self, zoom: f64, point: Point) {
        let zoom = self.limit(zoom);
        if !zoom.is_finite() || zoom <= 0.0 {
            return;
        }
        let ratio = zoom / self.zoom;
        let anchor = point.to_vec2();
        // Keep the content under `point` where it is.
        self.pan = anchor - (anchor - self.pan) * ratio;
        self.zoom = zoom;
        self.rebuild_transforms();
    }

    fn pan(&self) -> Vec2 {
        self.pan
    }

    fn set_pan(&mut self, pan: Vec2) {
        if self.pan == pan {
            return;
        }
        self.pan = pan;
        self.rebuild_transforms();
    }

    fn set_min_zoom(&mut self, zoom: f64) {
        self.min_zoom = zoom;
    }

    fn set_max_zoom(&mut self, zoom: f64) {
        self.max_zoom = zoom;
    }

    fn center(&mut self) {
        let content = self.sizes().content();
        self.set_pan(Vec2::new(
            (self.viewport.width - content.width) / 2.0,
            (self.viewport.height - content.height) / 2.0,
        ));
    }

    fn resize(&mut self) {
        self.refit();
    }
}

/// Debug snapshot of a [`HeadlessHost`] state.
#[derive(Clone, Copy, Debug)]
pub struct HeadlessHostDebugInfo {
    /// Intrinsic content size.
    pub view_box: Size,
    /// Last measured viewport size.
    pub viewport: Size,
    /// Scale that fits the content inside the viewport at zoom `1.0`.
    pub fit_scale: f64,
    /// User-facing zoom factor.
    pub zoom: f64,
    /// Effective scale, `zoom * fit_scale`.
    pub real_zoom: f64,
    /// Current pan offset.
    pub pan: Vec2,
    /// Installed lower zoom limit.
    pub min_zoom: f64,
    /// Installed upper zoom limit.
    pub max_zoom: f64,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::HeadlessHost;
    use crate::host::PanZoomHost;

    #[test]
    fn content_is_fitted_inside_the_viewport() {
        let host = HeadlessHost::new(Size::new(400.0, 100.0), Size::new(800.0, 600.0));
        let info = host.debug_info();
        assert_eq!(info.fit_scale, 2.0);
        assert_eq!(host.sizes().content(), Size::new(800.0, 200.0));
    }

    #[test]
    fn zoom_at_point_keeps_anchor_fixed() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        let anchor = Point::new(200.0, 100.0);
        let before = host.view_to_content_point(anchor);

        host.zoom_at_point(3.0, anchor);
        let after = host.view_to_content_point(anchor);

        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert_eq!(host.zoom(), 3.0);
    }

    #[test]
    fn zoom_respects_installed_limits() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        host.set_min_zoom(0.5);
        host.set_max_zoom(4.0);
        host.set_zoom(10.0);
        assert_eq!(host.zoom(), 4.0);
        host.set_zoom(0.01);
        assert_eq!(host.zoom(), 0.5);
        assert_eq!(host.zoom_limits(), (0.5, 4.0));
    }

    #[test]
    fn center_and_rect_conversion() {
        let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        host.set_zoom(0.5);
        host.center();
        assert_eq!(host.pan(), Vec2::new(200.0, 150.0));

        let on_screen = host.content_to_view_rect(Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(on_screen, Rect::new(200.0, 150.0, 600.0, 450.0));
        assert_eq!(host.viewport_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }
}
