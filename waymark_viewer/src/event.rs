// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Vec2};
use smallvec::SmallVec;
use waymark_event_state::gesture::{GestureInput, InputSource};
use waymark_event_state::keyboard::{Key, Modifiers};
use waymark_overlay::Wake;
use waymark_regions::RegionId;

/// Token the viewer schedules on its [`Scheduler`](waymark_timing::Scheduler).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerWake {
    /// Continuation of an overlay transition.
    Overlay(Wake),
    /// The viewport has settled after mount; honor the initial fragment.
    InitialFragment,
}

/// Input delivered by the host page.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    /// The window was resized.
    Resize,
    /// Key pressed while the map surface has focus.
    MapKey {
        /// Decoded key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// Pointer went down on the map surface.
    MapPointerDown,
    /// Pointer went up on the map surface.
    MapPointerUp,
    /// The map surface was clicked.
    MapClick,
    /// Programmatic relative pan.
    PanBy(Vec2),
    /// Gesture input from the installed adapter.
    Gesture(GestureInput),
    /// A region was clicked.
    RegionClick(RegionId),
    /// Key pressed while a region has focus.
    RegionKey {
        /// Focused region.
        region: RegionId,
        /// Decoded key.
        key: Key,
    },
    /// A region received input focus.
    RegionFocused {
        /// Focused region.
        region: RegionId,
        /// The region's bounding box on screen.
        bounds: Rect,
        /// The map surface's bounding box on screen.
        viewport: Rect,
    },
    /// The overlay's close button was clicked.
    CloseClick,
    /// Key pressed while the close button has focus.
    CloseKey(Key),
    /// The backdrop around the overlay was clicked.
    BackdropClick,
    /// Key pressed inside the overlay.
    OverlayKey(Key),
    /// The location fragment changed.
    FragmentChanged,
    /// A scheduled wake is due.
    Wake(ViewerWake),
    /// The viewer is being removed from the page.
    Teardown,
}

/// Action the host page must carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Add the active marker to a region.
    MarkActive(RegionId),
    /// Remove the active marker from a region.
    UnmarkActive(RegionId),
    /// Move input focus to a region.
    FocusRegion(RegionId),
    /// Move input focus into the overlay.
    FocusOverlay,
    /// Move input focus to the map surface.
    FocusMap,
    /// Suppress the default action of the event being handled.
    PreventDefault,
    /// Remove the gesture listeners for this input source, and stop halting
    /// the touch events listed by
    /// [`GestureAdapter::halted_events`](waymark_event_state::gesture::GestureAdapter::halted_events).
    ReleaseGestures(InputSource),
}

/// Commands from one event, in order.
pub type Commands = SmallVec<[ViewerCommand; 4]>;
