// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture adapter: multi-touch input expressed as pan/zoom commands.
//!
//! A touch recogniser reports pans as cumulative offsets, pinches as a scale
//! relative to the pinch start, and double taps. [`GestureAdapter`] turns
//! those into the same pan/zoom commands pointer and keyboard input produce,
//! so they all flow through one clamped path.
//!
//! The adapter is selected from what the environment supports: pointer
//! events when available, otherwise touch events, otherwise no adapter at
//! all. Tearing it down releases its listeners; later input is ignored.

use kurbo::{Point, Vec2};

use crate::drag::DragTracker;

/// Touch event types whose default handling is halted while an adapter is
/// installed, so the page does not scroll under a gesture.
pub const HALTED_TOUCH_EVENTS: &[&str] = &[
    "touchstart",
    "touchend",
    "touchmove",
    "touchleave",
    "touchcancel",
];

/// What the environment supports for gesture input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputCapabilities {
    /// Pointer events are available.
    pub pointer_events: bool,
    /// Touch events are available.
    pub touch_events: bool,
}

/// Which event family the adapter listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// Pointer events (mouse, pen, and touch unified).
    Pointer,
    /// Legacy touch events.
    Touch,
}

/// Recognised gesture input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureInput {
    /// A pan gesture was recognised; `offset` is the movement so far.
    PanStart {
        /// Cumulative offset since the pointer went down.
        offset: Vec2,
    },
    /// A pan gesture moved.
    PanMove {
        /// Cumulative offset since the pointer went down.
        offset: Vec2,
    },
    /// A pan gesture finished.
    PanEnd,
    /// A pinch was recognised.
    PinchStart {
        /// Scale relative to the finger distance at pinch start.
        scale: f64,
        /// Pinch center in viewport coordinates.
        center: Point,
    },
    /// A pinch moved.
    PinchMove {
        /// Scale relative to the finger distance at pinch start.
        scale: f64,
        /// Pinch center in viewport coordinates.
        center: Point,
    },
    /// A pinch finished.
    PinchEnd,
    /// Two quick taps.
    DoubleTap,
}

/// A pan/zoom command produced from gesture input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureCommand {
    /// Pan by a relative offset.
    PanBy(Vec2),
    /// Zoom to an absolute zoom, keeping `point` fixed.
    ZoomAtPoint {
        /// Target zoom.
        zoom: f64,
        /// Anchor point in viewport coordinates.
        point: Point,
    },
    /// Zoom in one step about the viewport center.
    ZoomIn,
}

/// Gesture state for an installed pointer/touch adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerGestures {
    source: InputSource,
    pan: DragTracker,
    pinch_start_zoom: Option<f64>,
}

impl PointerGestures {
    /// Creates gesture state listening to `source`.
    #[must_use]
    pub fn new(source: InputSource) -> Self {
        Self {
            source,
            pan: DragTracker::default(),
            pinch_start_zoom: None,
        }
    }

    /// The event family this adapter listens to.
    #[must_use]
    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Translates one gesture input. `current_zoom` is the host's zoom now.
    pub fn handle(&mut self, input: GestureInput, current_zoom: f64) -> Option<GestureCommand> {
        match input {
            GestureInput::PanStart { offset } => Some(GestureCommand::PanBy(self.pan.start(offset))),
            GestureInput::PanMove { offset } => self.pan.update(offset).map(GestureCommand::PanBy),
            GestureInput::PanEnd => {
                self.pan.end();
                None
            }
            GestureInput::PinchStart { scale, center } => {
                self.pinch_start_zoom = Some(current_zoom);
                Some(GestureCommand::ZoomAtPoint {
                    zoom: current_zoom * scale,
                    point: center,
                })
            }
            GestureInput::PinchMove { scale, center } => {
                let start = self.pinch_start_zoom?;
                Some(GestureCommand::ZoomAtPoint {
                    zoom: start * scale,
                    point: center,
                })
            }
            GestureInput::PinchEnd => {
                self.pinch_start_zoom = None;
                None
            }
            GestureInput::DoubleTap => Some(GestureCommand::ZoomIn),
        }
    }
}

/// The gesture capability in use for a map instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAdapter {
    /// Gestures are recognised from pointer or touch events.
    Pointer(PointerGestures),
    /// No gesture support; only mouse and keyboard input.
    None,
}

impl GestureAdapter {
    /// Picks an adapter from the environment's capabilities.
    #[must_use]
    pub fn detect(capabilities: InputCapabilities) -> Self {
        if capabilities.pointer_events {
            Self::Pointer(PointerGestures::new(InputSource::Pointer))
        } else if capabilities.touch_events {
            Self::Pointer(PointerGestures::new(InputSource::Touch))
        } else {
            Self::None
        }
    }

    /// The event family listened to, if an adapter is installed.
    #[must_use]
    pub fn source(&self) -> Option<InputSource> {
        match self {
            Self::Pointer(gestures) => Some(gestures.source()),
            Self::None => None,
        }
    }

    /// Touch event types whose default handling the binding must halt.
    ///
    /// Empty without an adapter, and after [`GestureAdapter::teardown`].
    #[must_use]
    pub fn halted_events(&self) -> &'static [&'static str] {
        match self {
            Self::Pointer(_) => HALTED_TOUCH_EVENTS,
            Self::None => &[],
        }
    }

    /// Translates one gesture input; always `None` without an adapter.
    pub fn handle(&mut self, input: GestureInput, current_zoom: f64) -> Option<GestureCommand> {
        match self {
            Self::Pointer(gestures) => gestures.handle(input, current_zoom),
            Self::None => None,
        }
    }

    /// Releases the adapter's input listeners.
    ///
    /// Returns the event family that was released, if any. Afterwards the
    /// adapter is [`GestureAdapter::None`].
    pub fn teardown(&mut self) -> Option<InputSource> {
        let released = self.source();
        *self = Self::None;
        released
    }
}
