// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use hashbrown::HashMap;

use crate::key::{content_key, display_name, is_outline_label};

/// Handle to a region in a [`RegionRegistry`].
///
/// Handles are indices in document order and are only meaningful for the
/// registry that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u32);

impl RegionId {
    /// Position of the region in document order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// A selectable map region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    id: RegionId,
    label: String,
    display_name: String,
    content_key: String,
}

impl Region {
    /// Registry handle.
    #[must_use]
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// The raw label from the map markup, marker included.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label without its outline marker.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Key used to look up this region's description.
    #[must_use]
    pub fn content_key(&self) -> &str {
        &self.content_key
    }
}

/// The fixed set of selectable regions on a map.
///
/// Built once from the labels found in the map markup and read-only after
/// that. Several regions may share a content key; lookups by key resolve to
/// the first such region in document order.
#[derive(Clone, Debug, Default)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    first_by_key: HashMap<String, RegionId>,
    by_label: HashMap<String, RegionId>,
}

impl RegionRegistry {
    /// Registers every outline label among `labels`, in order.
    ///
    /// Labels that do not follow the outline naming convention are skipped.
    /// A repeated label is registered once.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        for label in labels {
            let label = label.as_ref();
            if !is_outline_label(label) || registry.by_label.contains_key(label) {
                continue;
            }
            let index = u32::try_from(registry.regions.len()).unwrap_or(u32::MAX);
            let id = RegionId(index);
            let region = Region {
                id,
                label: label.to_owned(),
                display_name: display_name(label).to_owned(),
                content_key: content_key(label),
            };
            registry
                .first_by_key
                .entry(region.content_key.clone())
                .or_insert(id);
            registry.by_label.insert(region.label.clone(), id);
            registry.regions.push(region);
        }
        tracing::debug!(regions = registry.regions.len(), "registered map regions");
        registry
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if no outlines were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Looks up a region by handle.
    #[must_use]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    /// Looks up a region by its raw label.
    #[must_use]
    pub fn by_label(&self, label: &str) -> Option<&Region> {
        self.by_label.get(label).and_then(|&id| self.get(id))
    }

    /// The first region, in document order, whose content key is `key`.
    #[must_use]
    pub fn first_with_key(&self, key: &str) -> Option<&Region> {
        self.first_by_key.get(key).and_then(|&id| self.get(id))
    }

    /// Every region whose content key is `key`, in document order.
    pub fn regions_with_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Region> + 'a {
        self.regions.iter().filter(move |r| r.content_key == key)
    }

    /// All regions in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::RegionRegistry;

    #[test]
    fn only_outlines_are_registered() {
        let reg = RegionRegistry::from_labels(["Birds", "Pasture [outline]", "Overlay", "Pond [outline]"]);
        assert_eq!(reg.len(), 2);
        let names: Vec<_> = reg.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, ["Pasture", "Pond"]);
    }

    #[test]
    fn shared_keys_resolve_to_first_region() {
        let reg = RegionRegistry::from_labels(["Pond [outline]", "pond  [outline]"]);
        assert_eq!(reg.len(), 2);
        let first = reg.first_with_key("pond").unwrap();
        assert_eq!(first.label(), "Pond [outline]");
        assert_eq!(reg.regions_with_key("pond").count(), 2);
    }

    #[test]
    fn repeated_labels_register_once() {
        let reg = RegionRegistry::from_labels(["Pond [outline]", "Pond [outline]"]);
        assert_eq!(reg.len(), 1);
        let pond = reg.by_label("Pond [outline]").unwrap();
        assert_eq!(reg.get(pond.id()), Some(pond));
    }

    #[test]
    fn unknown_lookups_are_none() {
        let reg = RegionRegistry::from_labels(["Pond [outline]"]);
        assert!(reg.first_with_key("barn").is_none());
        assert!(reg.by_label("Barn [outline]").is_none());
    }
}
