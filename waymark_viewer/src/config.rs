// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use serde::{Deserialize, Serialize};
use waymark_overlay::{DEFAULT_RECENTER_THRESHOLD, OverlaySettings};
use waymark_view2d::{ViewportSettings, ZoomMultipliers};

/// Viewer tunables.
///
/// Every field has a default, so a configuration document only needs the
/// fields it changes:
///
/// ```
/// use waymark_viewer::ViewerConfig;
///
/// let config = ViewerConfig::from_json(r#"{ "max_zoom_multiplier": 8.0 }"#).unwrap();
/// assert_eq!(config.max_zoom_multiplier, 8.0);
/// assert_eq!(config.pan_step, 20.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Minimum zoom as a multiple of the base zoom.
    pub min_zoom_multiplier: f64,
    /// Maximum zoom as a multiple of the base zoom.
    pub max_zoom_multiplier: f64,
    /// Keyboard pan step.
    pub pan_step: f64,
    /// Pan step multiplier while Shift is held.
    pub fast_pan_multiplier: f64,
    /// Each zoom-in step multiplies the zoom by `1 + zoom_sensitivity`.
    pub zoom_sensitivity: f64,
    /// Overlay fade duration.
    pub fade_ms: u64,
    /// Frames to wait before each overlay transition edge.
    pub transition_frames: u32,
    /// Visible-area ratio under which a focused region is recentered.
    pub recenter_threshold: f64,
    /// Base URL for "edit this information" links; none when unset.
    pub edit_base_url: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let viewport = ViewportSettings::default();
        let overlay = OverlaySettings::default();
        Self {
            min_zoom_multiplier: viewport.multipliers.min,
            max_zoom_multiplier: viewport.multipliers.max,
            pan_step: viewport.pan_step,
            fast_pan_multiplier: viewport.fast_pan_multiplier,
            zoom_sensitivity: viewport.zoom_sensitivity,
            fade_ms: overlay.fade_ms,
            transition_frames: overlay.transition_frames,
            recenter_threshold: DEFAULT_RECENTER_THRESHOLD,
            edit_base_url: None,
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a usable viewer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_zoom_multiplier, self.max_zoom_multiplier);
        if !(is_positive(min) && is_positive(max) && min <= max) {
            return Err(ConfigError::ZoomMultipliers { min, max });
        }
        for (field, value) in [
            ("pan_step", self.pan_step),
            ("fast_pan_multiplier", self.fast_pan_multiplier),
            ("zoom_sensitivity", self.zoom_sensitivity),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        let t = self.recenter_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::RecenterThreshold(t));
        }
        Ok(())
    }

    pub(crate) fn viewport_settings(&self) -> ViewportSettings {
        ViewportSettings {
            multipliers: ZoomMultipliers {
                min: self.min_zoom_multiplier,
                max: self.max_zoom_multiplier,
            },
            pan_step: self.pan_step,
            fast_pan_multiplier: self.fast_pan_multiplier,
            zoom_sensitivity: self.zoom_sensitivity,
        }
    }

    pub(crate) fn overlay_settings(&self) -> OverlaySettings {
        OverlaySettings {
            transition_frames: self.transition_frames,
            fade_ms: self.fade_ms,
            edit_base_url: self.edit_base_url.clone(),
        }
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Rejected viewer configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for [`ViewerConfig`].
    Parse(serde_json::Error),
    /// Zoom multipliers must be positive with `min <= max`.
    ZoomMultipliers {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A step or sensitivity must be positive.
    NotPositive {
        /// Offending field.
        field: &'static str,
        /// Its value.
        value: f64,
    },
    /// The recenter threshold must lie in `(0, 1]`.
    RecenterThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid viewer configuration: {err}"),
            Self::ZoomMultipliers { min, max } => write!(
                f,
                "zoom multipliers must be positive with min <= max (min {min}, max {max})"
            ),
            Self::NotPositive { field, value } => {
                write!(f, "`{field}` must be positive, got {value}")
            }
            Self::RecenterThreshold(t) => {
                write!(f, "recenter threshold must be in (0, 1], got {t}")
            }
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ViewerConfig};

    #[test]
    fn defaults_match_the_shipped_viewer() {
        let c = ViewerConfig::default();
        assert_eq!(c.min_zoom_multiplier, 0.5);
        assert_eq!(c.max_zoom_multiplier, 5.0);
        assert_eq!(c.pan_step, 20.0);
        assert_eq!(c.fast_pan_multiplier, 10.0);
        assert_eq!(c.zoom_sensitivity, 0.5);
        assert_eq!(c.fade_ms, 200);
        assert_eq!(c.transition_frames, 2);
        assert_eq!(c.recenter_threshold, 0.25);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn rejects_inverted_multipliers() {
        let err = ViewerConfig::from_json(
            r#"{ "min_zoom_multiplier": 4.0, "max_zoom_multiplier": 2.0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZoomMultipliers { .. }));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let c = ViewerConfig {
            recenter_threshold: 0.0,
            ..ViewerConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::RecenterThreshold(_))));

        let c = ViewerConfig {
            pan_step: -1.0,
            ..ViewerConfig::default()
        };
        match c.validate() {
            Err(ConfigError::NotPositive { field, .. }) => assert_eq!(field, "pan_step"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_document() {
        let err = ViewerConfig::from_json("{ \"fade_ms\": \"slow\" }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
