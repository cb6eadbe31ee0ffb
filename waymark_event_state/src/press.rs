// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press latch: decide whether a pointer click ended a drag-pan.
//!
//! On a pannable map, pressing on a region, dragging, and releasing produces
//! a click event on that region. That click should not activate the region.
//! [`PressLatch`] is armed on pointer down, latched when the viewport reports
//! that a pan is beginning while armed, and disarmed on pointer up. The latch
//! stays set until the next pointer down, so the click that follows pointer
//! up still sees it.
//!
//! Keyboard activation never consults the latch.
//!
//! ## Minimal example
//! ```
//! use waymark_event_state::press::PressLatch;
//!
//! let mut press = PressLatch::default();
//! // Pans outside a press (keyboard, programmatic) do not latch.
//! press.on_pan_begin();
//! assert!(!press.suppresses_click());
//!
//! press.on_down();
//! assert!(press.is_armed());
//! press.on_pan_begin();
//! press.on_up();
//! assert!(!press.is_armed());
//! assert!(press.suppresses_click());
//! ```

/// Pointer press state used for drag suppression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressLatch {
    armed: bool,
    dragged: bool,
}

impl PressLatch {
    /// Pointer went down on the map surface.
    pub fn on_down(&mut self) {
        self.armed = true;
        self.dragged = false;
    }

    /// The viewport is about to pan. Returns `true` if this latched the press.
    pub fn on_pan_begin(&mut self) -> bool {
        if self.armed && !self.dragged {
            self.dragged = true;
            return true;
        }
        false
    }

    /// Pointer went up.
    pub fn on_up(&mut self) {
        self.armed = false;
    }

    /// Returns `true` between pointer down and pointer up.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` if the most recent press panned the map, in which case
    /// a pointer click must be ignored.
    pub fn suppresses_click(&self) -> bool {
        self.dragged
    }
}

#[cfg(test)]
mod tests {
    use super::PressLatch;

    #[test]
    fn plain_click_is_not_suppressed() {
        let mut press = PressLatch::default();
        press.on_down();
        press.on_up();
        assert!(!press.suppresses_click());
    }

    #[test]
    fn pan_during_press_latches_until_next_down() {
        let mut press = PressLatch::default();
        press.on_down();
        assert!(press.on_pan_begin());
        // Further pans in the same press do not re-latch.
        assert!(!press.on_pan_begin());
        press.on_up();
        assert!(press.suppresses_click());

        press.on_down();
        assert!(!press.suppresses_click());
    }

    #[test]
    fn pan_after_release_does_not_latch() {
        let mut press = PressLatch::default();
        press.on_down();
        press.on_up();
        assert!(!press.on_pan_begin());
        assert!(!press.suppresses_click());
    }
}
