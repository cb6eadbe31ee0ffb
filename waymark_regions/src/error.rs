// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error raised while building or loading a content catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// Two content sources map to the same content key.
    ///
    /// This is an authoring error; catalog generation must stop.
    DuplicateContentKey {
        /// The colliding key.
        key: String,
        /// The source registered first.
        first: String,
        /// The source that collided with it.
        second: String,
    },
    /// A catalog document could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateContentKey { key, first, second } => write!(
                f,
                "duplicate content key `{key}`: `{first}` and `{second}`"
            ),
            Self::Parse(err) => write!(f, "malformed catalog document: {err}"),
        }
    }
}

impl core::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DuplicateContentKey { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
