// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Overlay: the region selection overlay as a state machine.
//!
//! [`OverlayMachine`] owns the single active region and the overlay's
//! visibility. It is a reducer: feed it [`OverlayEvent`]s, apply the
//! returned [`OverlayEffect`]s in order, and mirror
//! [`OverlayMachine::surface`] onto the real overlay. Deferred steps are
//! requested as effects carrying [`Wake`] tokens, so any scheduler (or a
//! test) can drive time.
//!
//! Supporting pieces:
//!
//! - [`fragment`]: reading, writing, and resolving the location fragment
//!   used for deep links
//! - [`recenter_delta`]: the pan that brings a keyboard-focused region into
//!   view
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_overlay::{OverlayEffect, OverlayEvent, OverlayMachine, Phase, Selection, Trigger};
//! use waymark_regions::{ContentCatalog, RegionRegistry};
//!
//! let regions = RegionRegistry::from_labels(["Pasture [outline]"]);
//! let pasture = regions.first_with_key("pasture").unwrap();
//! let content = ContentCatalog::new().lookup(pasture.content_key(), pasture.display_name());
//!
//! let mut overlay = OverlayMachine::default();
//! let mut effects = overlay
//!     .handle(OverlayEvent::Select(Selection {
//!         region: pasture.id(),
//!         content,
//!         trigger: Trigger::Keyboard,
//!     }))
//!     .into_vec();
//! assert_eq!(effects[1], OverlayEffect::WriteFragment("pasture".into()));
//!
//! // Deliver each requested wake, as a scheduler would.
//! while let Some(wake) = effects.iter().find_map(|e| match e {
//!     OverlayEffect::AfterFrames { wake, .. } | OverlayEffect::AfterMs { wake, .. } => Some(*wake),
//!     _ => None,
//! }) {
//!     effects = overlay.handle(OverlayEvent::Wake(wake)).into_vec();
//! }
//!
//! assert_eq!(overlay.phase(), Phase::Open);
//! assert_eq!(overlay.surface().title(), "Pasture");
//! assert!(overlay.surface().body().contains("no information available about 'Pasture'"));
//! ```

pub mod fragment;

mod focus;
mod machine;
mod surface;

pub use focus::{DEFAULT_RECENTER_THRESHOLD, recenter_delta};
pub use machine::{
    Effects, OverlayEffect, OverlayEvent, OverlayMachine, OverlaySettings, Phase, Selection,
    Trigger, Wake,
};
pub use surface::{OverlaySurface, compose_body};
