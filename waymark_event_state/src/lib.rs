// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Event State: small input state machines for the map viewer.
//!
//! Each module handles one interaction pattern that needs state across
//! several events:
//!
//! - [`press`]: tell a click apart from the end of a drag-pan
//! - [`drag`]: turn cumulative gesture offsets into incremental pan deltas
//! - [`gesture`]: adapt multi-touch gestures into pan/zoom commands, with
//!   capability detection and teardown
//! - [`keyboard`]: decode DOM key names and modifier state
//!
//! None of these touch a rendering surface. They accept already-decoded
//! input and return values (commands, booleans) that a higher layer applies.
//!
//! ## Drag suppression
//!
//! ```rust
//! use waymark_event_state::press::PressLatch;
//!
//! let mut press = PressLatch::default();
//!
//! // A press with no pan in between is a click.
//! press.on_down();
//! press.on_up();
//! assert!(!press.suppresses_click());
//!
//! // A press that panned the map is not.
//! press.on_down();
//! press.on_pan_begin();
//! press.on_up();
//! assert!(press.suppresses_click());
//! ```
//!
//! ## Gestures
//!
//! ```rust
//! use kurbo::Vec2;
//! use waymark_event_state::gesture::{
//!     GestureAdapter, GestureCommand, GestureInput, InputCapabilities,
//! };
//!
//! let mut gestures = GestureAdapter::detect(InputCapabilities {
//!     pointer_events: true,
//!     touch_events: false,
//! });
//! gestures.handle(GestureInput::PanStart { offset: Vec2::new(4.0, 0.0) }, 1.0);
//! let cmd = gestures.handle(GestureInput::PanMove { offset: Vec2::new(10.0, 2.0) }, 1.0);
//! assert_eq!(cmd, Some(GestureCommand::PanBy(Vec2::new(6.0, 2.0))));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod gesture;
pub mod keyboard;
pub mod press;
