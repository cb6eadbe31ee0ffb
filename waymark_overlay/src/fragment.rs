// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Location fragment access and deep-link resolution.
//!
//! The fragment is the part of the page location after `#`. While the
//! overlay is open it holds the active content key; while closed it is
//! empty. Writes go through [`sync_fragment`], which skips writes that would
//! not change anything so the page does not see a redundant change
//! notification.

use waymark_regions::{ContentCatalog, RegionId, RegionRegistry};

/// Read/write access to the page's location fragment.
pub trait LocationFragment {
    /// The current fragment, without the leading `#`.
    fn fragment(&self) -> String;

    /// Returns `true` if history-preserving navigation is available.
    fn supports_history(&self) -> bool;

    /// Navigates to `fragment` with a new history entry. Does not emit a
    /// change notification.
    fn push_fragment(&mut self, fragment: &str);

    /// Assigns `fragment` directly. Emits a change notification.
    fn assign_fragment(&mut self, fragment: &str);
}

/// How [`sync_fragment`] wrote the fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentWrite {
    /// The fragment already had the requested value.
    Unchanged,
    /// Written with history-preserving navigation.
    Pushed,
    /// Assigned directly.
    Assigned,
}

/// Sets the location fragment to `fragment` (no `#`; empty clears it).
pub fn sync_fragment<L: LocationFragment + ?Sized>(location: &mut L, fragment: &str) -> FragmentWrite {
    if location.fragment() == fragment {
        return FragmentWrite::Unchanged;
    }
    if location.supports_history() {
        location.push_fragment(fragment);
        FragmentWrite::Pushed
    } else {
        location.assign_fragment(fragment);
        FragmentWrite::Assigned
    }
}

/// Strips the leading `#` from a raw fragment.
#[must_use]
pub fn normalize_fragment(raw: &str) -> &str {
    raw.strip_prefix('#').unwrap_or(raw)
}

/// What a fragment refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentTarget {
    /// The fragment is empty.
    Empty,
    /// The fragment names no known content.
    Unknown,
    /// The fragment deep-links to `content_key`, shown on `region`.
    Region {
        /// Region to focus and activate.
        region: RegionId,
        /// Content to display; may differ from the region's own key.
        content_key: String,
    },
}

/// Resolves a fragment against the registry and catalog.
///
/// A fragment is a deep link if the catalog has an entry for it, or if some
/// region's derived key equals it. The region is the first whose key equals
/// the entry's `outline` override, or the fragment itself.
#[must_use]
pub fn resolve_fragment(
    fragment: &str,
    regions: &RegionRegistry,
    catalog: &ContentCatalog,
) -> FragmentTarget {
    let key = normalize_fragment(fragment);
    if key.is_empty() {
        return FragmentTarget::Empty;
    }
    if !catalog.contains_key(key) && regions.first_with_key(key).is_none() {
        return FragmentTarget::Unknown;
    }
    match regions.first_with_key(catalog.outline_for(key)) {
        Some(region) => FragmentTarget::Region {
            region: region.id(),
            content_key: key.to_owned(),
        },
        None => FragmentTarget::Unknown,
    }
}

/// An in-memory [`LocationFragment`] for headless hosts and tests.
#[derive(Clone, Debug)]
pub struct MemoryLocation {
    fragment: String,
    history: bool,
    entries: Vec<String>,
    notifications: usize,
}

impl MemoryLocation {
    /// Creates a location with history support and the given fragment.
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        Self {
            fragment: normalize_fragment(fragment).to_owned(),
            history: true,
            entries: Vec::new(),
            notifications: 0,
        }
    }

    /// Creates a location without history support.
    #[must_use]
    pub fn without_history(fragment: &str) -> Self {
        Self {
            history: false,
            ..Self::new(fragment)
        }
    }

    /// Fragments pushed as history entries, oldest first.
    #[must_use]
    pub fn history_entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of change notifications the page would have seen.
    #[must_use]
    pub fn notifications(&self) -> usize {
        self.notifications
    }

    /// Simulates the user navigating, for example with the back button.
    pub fn navigate(&mut self, fragment: &str) {
        self.fragment = normalize_fragment(fragment).to_owned();
        self.notifications += 1;
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl LocationFragment for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn supports_history(&self) -> bool {
        self.history
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_owned();
        self.entries.push(fragment.to_owned());
    }

    fn assign_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_owned();
        self.notifications += 1;
    }
}
