// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Vec2};

use crate::sizes::ViewSizes;

/// The pan/zoom rendering capability the map is displayed through.
///
/// Implementations own the live view state. Everything in this crate reads
/// and writes that state through these calls and never keeps a copy across
/// calls, so the host is free to change its measurements between events
/// (for example when its element is resized).
///
/// Hosts are expected to keep their zoom within the limits most recently
/// passed to [`PanZoomHost::set_min_zoom`] / [`PanZoomHost::set_max_zoom`].
/// Hosts are not expected to clamp pans; [`crate::ViewportController`] does
/// that before any pan reaches the host.
pub trait PanZoomHost {
    /// Current measurement of the content and viewport.
    fn sizes(&self) -> ViewSizes;

    /// Current user-facing zoom factor.
    fn zoom(&self) -> f64;

    /// Zooms to `zoom` about the viewport center.
    fn set_zoom(&mut self, zoom: f64);

    /// Zooms to `zoom`, keeping `point` (in viewport units) fixed on screen.
    fn zoom_at_point(&mut self, zoom: f64, point: Point);

    /// Current pan offset of the content's top-left corner, in viewport units.
    fn pan(&self) -> Vec2;

    /// Moves the content to the given pan offset.
    fn set_pan(&mut self, pan: Vec2);

    /// Moves the content by a relative offset.
    fn pan_by(&mut self, delta: Vec2) {
        let pan = self.pan();
        self.set_pan(pan + delta);
    }

    /// Sets the lower zoom limit.
    fn set_min_zoom(&mut self, zoom: f64);

    /// Sets the upper zoom limit.
    fn set_max_zoom(&mut self, zoom: f64);

    /// Centers the content in the viewport at the current zoom.
    fn center(&mut self);

    /// Re-measures the viewport so that the next [`PanZoomHost::sizes`] call
    /// reflects its current on-screen size.
    fn resize(&mut self);
}

/// The host does not have the structure the viewer needs.
///
/// This is a fail-fast condition: a viewer cannot operate over a host that
/// reports an empty or non-finite measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The content has no area.
    EmptyViewBox,
    /// The viewport has no area.
    EmptyViewport,
    /// The effective scale is zero, negative, or not finite.
    InvalidScale,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyViewBox => f.write_str("map content has an empty view box"),
            Self::EmptyViewport => f.write_str("map viewport has no visible area"),
            Self::InvalidScale => f.write_str("map host reported an invalid scale"),
        }
    }
}

impl core::error::Error for HostError {}
