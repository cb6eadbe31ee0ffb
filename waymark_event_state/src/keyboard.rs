// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key decoding for map and overlay shortcuts.
//!
//! Hosts hand over the DOM `KeyboardEvent.key` string and modifier state;
//! this module reduces them to the handful of keys the viewer reacts to.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift; selects fast keyboard panning.
        const SHIFT = 0b0001;
        /// Alt / Option.
        const ALT   = 0b0010;
        /// Control.
        const CTRL  = 0b0100;
        /// Meta / Command / Windows.
        const META  = 0b1000;
    }
}

/// An arrow key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    /// `ArrowUp`
    Up,
    /// `ArrowDown`
    Down,
    /// `ArrowLeft`
    Left,
    /// `ArrowRight`
    Right,
}

/// A key the viewer distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// One of the four arrow keys.
    Arrow(ArrowKey),
    /// `Enter`
    Enter,
    /// The space bar.
    Space,
    /// `Escape`
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Decodes a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowUp" => Self::Arrow(ArrowKey::Up),
            "ArrowDown" => Self::Arrow(ArrowKey::Down),
            "ArrowLeft" => Self::Arrow(ArrowKey::Left),
            "ArrowRight" => Self::Arrow(ArrowKey::Right),
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Returns `true` for keys that activate a focused control.
    #[must_use]
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}
