// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::host::HostError;

/// A measurement of the view, as reported by a [`crate::PanZoomHost`].
///
/// `view_box` is the intrinsic size of the content in content units,
/// `viewport` is the size of the surface the content is shown in, and
/// `real_zoom` is the effective scale from content units to viewport units
/// (the host's own fit scale multiplied by its user-facing zoom).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSizes {
    /// Intrinsic content size.
    pub view_box: Size,
    /// Size of the visible surface.
    pub viewport: Size,
    /// Effective content-to-viewport scale.
    pub real_zoom: f64,
}

impl ViewSizes {
    /// Creates a new measurement.
    #[must_use]
    pub fn new(view_box: Size, viewport: Size, real_zoom: f64) -> Self {
        Self {
            view_box,
            viewport,
            real_zoom,
        }
    }

    /// Size of the content as currently displayed, in viewport units.
    #[must_use]
    pub fn content(&self) -> Size {
        self.view_box * self.real_zoom
    }

    /// Checks that the measurement describes a usable view.
    ///
    /// Every dimension and the effective scale must be finite and strictly
    /// positive; anything else means the expected map structure is absent.
    pub fn validate(&self) -> Result<(), HostError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.view_box.width) || !positive(self.view_box.height) {
            return Err(HostError::EmptyViewBox);
        }
        if !positive(self.viewport.width) || !positive(self.viewport.height) {
            return Err(HostError::EmptyViewport);
        }
        if !positive(self.real_zoom) {
            return Err(HostError::InvalidScale);
        }
        Ok(())
    }
}
