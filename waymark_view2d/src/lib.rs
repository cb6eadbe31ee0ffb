// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark View 2D: viewport constraints for a fixed vector map.
//!
//! This crate keeps a pan/zoom view over a single, fixed-size piece of
//! content (the map) well behaved as the viewport changes size. It focuses on:
//! - Edge clamping: the content never leaves a gap at a viewport edge, and is
//!   centered on any axis where it is smaller than the viewport.
//! - Screen-relative zoom limits: the minimum and maximum zoom are multiples
//!   of a _base zoom_, the zoom at which the content exactly fills the
//!   viewport on its more constrained axis.
//! - A small controller that routes every pan through the clamp and
//!   recomputes the zoom envelope on mount and resize.
//!
//! It does **not** render anything. The actual pan/zoom surface is a host
//! capability described by the [`PanZoomHost`] trait; the crate measures and
//! mutates the view only through that trait, so state is never cached stale.
//! [`HeadlessHost`] is an in-memory host for tests and headless tooling.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use waymark_view2d::{HeadlessHost, PanZoomHost, ViewportController, ViewportSettings};
//!
//! // A 400x300 map shown in an 800x600 viewport.
//! let mut host = HeadlessHost::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
//! let mut controller = ViewportController::new(ViewportSettings::default());
//!
//! // Mounting applies the base zoom and centers the map.
//! let envelope = controller.mount(&mut host, |_| {}).unwrap();
//! assert!(envelope.contains(host.zoom()));
//!
//! // Pans are clamped: the map cannot be dragged off screen.
//! controller.pan_by(&mut host, Vec2::new(10_000.0, 0.0), |_| {});
//! assert_eq!(host.pan().x, 0.0);
//! ```
//!
//! ## Clamping on its own
//!
//! [`clamp_pan`] is a pure function and can be used without a host:
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use waymark_view2d::{ViewSizes, clamp_pan};
//!
//! let sizes = ViewSizes::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0), 1.0);
//! // Content is smaller than the viewport on both axes, so it is centered
//! // whatever pan was requested.
//! assert_eq!(clamp_pan(&sizes, Vec2::new(50.0, 50.0)), Vec2::new(200.0, 150.0));
//! ```
//!
//! ## Design notes
//!
//! - Views are axis-aligned with a **uniform** zoom factor; there is no
//!   rotation or skew.
//! - Pan offsets are in viewport (device) units and position the content's
//!   top-left corner relative to the viewport's top-left corner.
//!
//! This crate is `no_std`.

#![no_std]

mod clamp;
mod controller;
mod envelope;
mod headless;
mod host;
mod sizes;

pub use clamp::{clamp_axis, clamp_pan};
pub use controller::{PanBegin, PanDirection, ViewportController, ViewportSettings};
pub use envelope::{ApplyBase, ZoomEnvelope, ZoomMultipliers, recompute_envelope};
pub use headless::{HeadlessHost, HeadlessHostDebugInfo};
pub use host::{HostError, PanZoomHost};
pub use sizes::ViewSizes;
