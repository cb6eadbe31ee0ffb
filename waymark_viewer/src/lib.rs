// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Viewer: an interactive map viewer core.
//!
//! [`MapViewer`] is the per-map context object. It combines:
//!
//! - a [`ViewportController`](waymark_view2d::ViewportController) that keeps
//!   the map covering the viewport and its zoom within a screen-relative
//!   envelope
//! - an [`OverlayMachine`](waymark_overlay::OverlayMachine) for region
//!   selection, with deep links through the location fragment
//! - a [`GestureAdapter`](waymark_event_state::gesture::GestureAdapter) for
//!   touch input
//!
//! The page binding translates DOM input into [`ViewerEvent`]s, calls
//! [`MapViewer::dispatch`], and carries out the returned
//! [`ViewerCommand`]s. Scheduled [`ViewerWake`]s are dispatched back as
//! [`ViewerEvent::Wake`] when due.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use waymark_event_state::gesture::InputCapabilities;
//! use waymark_overlay::Phase;
//! use waymark_overlay::fragment::MemoryLocation;
//! use waymark_timing::ManualScheduler;
//! use waymark_view2d::HeadlessHost;
//! use waymark_viewer::{MapContent, MapViewer, ViewerConfig, ViewerEvent};
//!
//! let content = MapContent::from_labels(
//!     ["Pasture [outline]", "Pond [outline]"],
//!     r#"{ "pond": { "data": { "title": "The Pond" }, "content": "<p>Ducks.</p>" } }"#,
//! )
//! .unwrap();
//! let mut viewer = MapViewer::new(
//!     HeadlessHost::new(Size::new(2000.0, 1000.0), Size::new(800.0, 600.0)),
//!     MemoryLocation::new("#pond"),
//!     ManualScheduler::new(),
//!     content,
//!     &ViewerConfig::default(),
//!     InputCapabilities::default(),
//! )
//! .unwrap();
//! viewer.mount().unwrap();
//!
//! // Deliver scheduled wakes until nothing is left.
//! while let Some(wake) = viewer.scheduler_mut().pop_next() {
//!     viewer.dispatch(ViewerEvent::Wake(wake));
//! }
//!
//! // The deep link opened the overlay.
//! assert_eq!(viewer.overlay().phase(), Phase::Open);
//! assert_eq!(viewer.overlay().surface().title(), "The Pond");
//! ```

mod config;
mod error;
mod event;
mod viewer;

pub use config::{ConfigError, ViewerConfig};
pub use error::ViewerError;
pub use event::{Commands, ViewerCommand, ViewerEvent, ViewerWake};
pub use viewer::{MapContent, MapViewer};
