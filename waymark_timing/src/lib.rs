// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Timing: host-agnostic frame and timer scheduling.
//!
//! UI transitions often need two kinds of suspension point: "after the next
//! N rendering frames" (so a style change is observed before the next one)
//! and "after N milliseconds" (a fade duration). This crate abstracts both
//! behind the [`Scheduler`] trait so state machines can request them without
//! knowing whether a browser, a native event loop, or a test drives time.
//!
//! Scheduled work is represented by an opaque token of the caller's choosing.
//! When the wait elapses the host hands the token back to its owner, which
//! decides whether it is still relevant (for example by comparing a
//! generation number carried in the token).
//!
//! [`ManualScheduler`] is a deterministic implementation with a virtual
//! clock, for tests and headless tools.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_timing::{ManualScheduler, Scheduler};
//!
//! let mut sched = ManualScheduler::new();
//! sched.after_frames(2, "styled");
//! sched.after_ms(200, "faded");
//!
//! // The two frame boundaries come first, then the timer.
//! assert_eq!(sched.advance_frame(), Vec::<&str>::new());
//! assert_eq!(sched.advance_frame(), vec!["styled"]);
//! assert_eq!(sched.pop_next(), Some("faded"));
//! assert_eq!(sched.now_ms(), 200);
//! assert!(sched.is_idle());
//! ```
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod manual;

pub use manual::ManualScheduler;

/// Requests deferred delivery of a token.
///
/// Implementations must deliver each token at most once and must never
/// deliver it synchronously from inside the call that scheduled it.
pub trait Scheduler<T> {
    /// Delivers `token` after `frames` rendering-frame boundaries have passed.
    fn after_frames(&mut self, frames: u32, token: T);

    /// Delivers `token` after `ms` milliseconds.
    fn after_ms(&mut self, ms: u64, token: T);
}
