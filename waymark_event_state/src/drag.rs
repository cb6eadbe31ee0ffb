// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag offset helper: turn cumulative gesture offsets into incremental deltas.
//!
//! Gesture recognisers usually report a pan as the total offset since the
//! gesture started. A pan/zoom surface wants the movement since the last
//! event instead. [`DragTracker`] remembers how much has already been applied.
//!
//! ## Usage
//!
//! 1) Call [`DragTracker::start`] with the offset reported on gesture start.
//! 2) On each move, call [`DragTracker::update`] with the reported offset to
//!    get the part that has not been applied yet.
//! 3) Call [`DragTracker::end`] when the gesture finishes.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use waymark_event_state::drag::DragTracker;
//!
//! let mut drag = DragTracker::default();
//!
//! // The recogniser already moved 3px before it decided this is a pan.
//! assert_eq!(drag.start(Vec2::new(3.0, 0.0)), Vec2::new(3.0, 0.0));
//!
//! // Cumulative offset 10px: only 7px are new.
//! assert_eq!(drag.update(Vec2::new(10.0, 0.0)), Some(Vec2::new(7.0, 0.0)));
//! assert_eq!(drag.applied(), Some(Vec2::new(10.0, 0.0)));
//! ```

use kurbo::Vec2;

/// Tracks how much of a gesture's cumulative offset has been applied.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragTracker {
    applied: Option<Vec2>,
}

impl DragTracker {
    /// Starts a new gesture and returns the initial offset to apply.
    ///
    /// Any previous gesture is forgotten.
    pub fn start(&mut self, offset: Vec2) -> Vec2 {
        self.applied = Some(offset);
        offset
    }

    /// Records a new cumulative offset and returns the unapplied part.
    ///
    /// Returns `None` when no gesture is in progress.
    pub fn update(&mut self, offset: Vec2) -> Option<Vec2> {
        let applied = self.applied?;
        self.applied = Some(offset);
        Some(offset - applied)
    }

    /// Cumulative offset applied so far in the current gesture.
    pub fn applied(&self) -> Option<Vec2> {
        self.applied
    }

    /// Ends the current gesture.
    pub fn end(&mut self) {
        self.applied = None;
    }

    /// Returns `true` while a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.applied.is_some()
    }
}
