// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::clamp::clamp_pan;
use crate::envelope::{ApplyBase, ZoomEnvelope, ZoomMultipliers, recompute_envelope, reclamp};
use crate::host::{HostError, PanZoomHost};

/// Tunables for a [`ViewportController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSettings {
    /// Zoom limit multipliers relative to the base zoom.
    pub multipliers: ZoomMultipliers,
    /// Distance moved by one keyboard pan step.
    pub pan_step: f64,
    /// Step multiplier while the fast-pan modifier is held.
    pub fast_pan_multiplier: f64,
    /// Zoom-in step: each zoom-in multiplies the zoom by `1 + zoom_sensitivity`.
    pub zoom_sensitivity: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            multipliers: ZoomMultipliers::default(),
            pan_step: 20.0,
            fast_pan_multiplier: 10.0,
            zoom_sensitivity: 0.5,
        }
    }
}

/// A keyboard pan direction.
///
/// Directions name where the _view_ moves; the content moves the other way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Reveal content above.
    Up,
    /// Reveal content below.
    Down,
    /// Reveal content to the left.
    Left,
    /// Reveal content to the right.
    Right,
}

impl PanDirection {
    /// Unit pan offset for this direction.
    #[must_use]
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, 1.0),
            Self::Down => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(1.0, 0.0),
            Self::Right => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Notification that a pan is about to be applied.
///
/// Delivered before the host is mutated, for every pan attempt including
/// ones the clamp reduces to no movement. Corrective re-clamps after a zoom
/// snap or resize are reported too, with `requested` equal to `old`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanBegin {
    /// Pan offset before the change.
    pub old: Vec2,
    /// Requested pan offset, before clamping.
    pub requested: Vec2,
}

/// Orchestrates clamping and zoom envelopes over a [`PanZoomHost`].
///
/// Every pan that goes through the controller is clamped with
/// [`clamp_pan`] before it reaches the host, and every zoom is followed by a
/// re-clamp. The zoom envelope is recomputed on [`ViewportController::mount`]
/// and [`ViewportController::resize`].
#[derive(Clone, Debug)]
pub struct ViewportController {
    settings: ViewportSettings,
    envelope: Option<ZoomEnvelope>,
}

impl ViewportController {
    /// Creates a controller; call [`ViewportController::mount`] before use.
    #[must_use]
    pub fn new(settings: ViewportSettings) -> Self {
        Self {
            settings,
            envelope: None,
        }
    }

    /// Returns the settings this controller was built with.
    #[must_use]
    pub fn settings(&self) -> &ViewportSettings {
        &self.settings
    }

    /// The most recently installed zoom envelope, if mounted.
    #[must_use]
    pub fn envelope(&self) -> Option<ZoomEnvelope> {
        self.envelope
    }

    /// Initial setup: installs zoom limits, zooms to the base zoom and
    /// centers the content.
    pub fn mount<H: PanZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        on_begin: impl FnMut(PanBegin),
    ) -> Result<ZoomEnvelope, HostError> {
        let envelope = recompute_envelope(host, self.settings.multipliers, ApplyBase::Apply, on_begin)?;
        self.envelope = Some(envelope);
        Ok(envelope)
    }

    /// Handles a viewport size change.
    ///
    /// Recomputes the envelope and re-clamps the pan even when the zoom did
    /// not need snapping, since a size change alone can invalidate a pan.
    pub fn resize<H: PanZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        mut on_begin: impl FnMut(PanBegin),
    ) -> Result<ZoomEnvelope, HostError> {
        let envelope =
            recompute_envelope(host, self.settings.multipliers, ApplyBase::Keep, &mut on_begin)?;
        reclamp(host, &mut on_begin);
        self.envelope = Some(envelope);
        Ok(envelope)
    }

    /// Pans by `delta`, clamped. Returns the pan actually applied.
    pub fn pan_by<H: PanZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        delta: Vec2,
        on_begin: impl FnOnce(PanBegin),
    ) -> Vec2 {
        let old = host.pan();
        self.pan_to(host, old + delta, on_begin)
    }

    /// Pans to `pan`, clamped. Returns the pan actually applied.
    pub fn pan_to<H: PanZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        pan: Vec2,
        on_begin: impl FnOnce(PanBegin),
    ) -> Vec2 {
        on_begin(PanBegin {
            old: host.pan(),
            requested: pan,
        });
        let clamped = clamp_pan(&host.sizes(), pan);
        host.set_pan(clamped);
        clamped
    }

    /// Pans one keyboard step. `fast` selects the multiplied step.
    ///
    /// Always performs a pan, so callers should suppress the key's default
    /// scrolling behavior.
    pub fn key_pan<H: PanZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        direction: PanDirection,
        fast: bool,
        on_begin: impl FnOnce(PanBegin),
    ) -> Vec2 {
        let mult = if fast {
            self.settings.fast_pan_multiplier
        } else {
            1.0
        };
        let delta = direction.unit() * (self.settings.pan_step * mult);
        self.pan_by(host, delta, on_begin)
    }

    /// Zooms to `zoom` about `point`, then re-clamps the pan.
    pub fn zoom_at_point<H: PanZoomHost + ?Sized>(
        &mut self,
        host: &mut H,
        zoom: f64,
        point: Point,
        on_begin: impl FnOnce(PanBegin),
    ) {
        let zoom = match self.envelope {
            Some(envelope) => envelope.snap(zoom),
            None => zoom,
        };
        host.zoom_at_point(zoom, point);
        let pan = host.pan();
        self.pan_to(host, pan, on_begin);
    }

    /// Zooms in one step about the viewport center.
    pub fn zoom_in<H: PanZoomHost + ?Sized>(&mut self, host: &mut H, on_begin: impl FnOnce(PanBegin)) {
        let zoom = host.zoom() * (1.0 + self.settings.zoom_sensitivity);
        let viewport = host.sizes().viewport;
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.zoom_at_point(host, zoom, center, on_begin);
    }
}
