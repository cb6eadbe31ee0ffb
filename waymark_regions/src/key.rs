// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline naming convention and content key derivation.

/// Marker that ends the label of every selectable outline.
pub const OUTLINE_MARKER: &str = "[outline]";

/// Returns `true` if `label` names a selectable outline.
///
/// Outline labels end with one or more spaces followed by
/// [`OUTLINE_MARKER`], for example `"Pasture [outline]"`.
#[must_use]
pub fn is_outline_label(label: &str) -> bool {
    strip_marker(label).is_some()
}

/// The human-readable name of an outline: its label without the marker.
///
/// Labels without the marker are returned unchanged.
#[must_use]
pub fn display_name(label: &str) -> &str {
    strip_marker(label).unwrap_or(label)
}

/// Derives the content key for a label.
///
/// The label is lower-cased, a trailing outline marker is stripped, and every
/// whitespace character becomes an underscore: `"Chicken Coop [outline]"`
/// becomes `"chicken_coop"`.
#[must_use]
pub fn content_key(label: &str) -> String {
    display_name(label)
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

fn strip_marker(label: &str) -> Option<&str> {
    let head = label.strip_suffix(OUTLINE_MARKER)?;
    let name = head.trim_end_matches(' ');
    // At least one space must separate the name from the marker.
    (name.len() < head.len()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::{content_key, display_name, is_outline_label};

    #[test]
    fn outline_labels_need_a_space_before_the_marker() {
        assert!(is_outline_label("Pasture [outline]"));
        assert!(is_outline_label("Pasture   [outline]"));
        assert!(!is_outline_label("Pasture[outline]"));
        assert!(!is_outline_label("Pasture"));
        assert!(!is_outline_label("Pasture [outline] extra"));
    }

    #[test]
    fn display_name_strips_marker() {
        assert_eq!(display_name("Pasture [outline]"), "Pasture");
        assert_eq!(display_name("Birds"), "Birds");
    }

    #[test]
    fn keys_are_lowercase_with_underscores() {
        assert_eq!(content_key("Pasture [outline]"), "pasture");
        assert_eq!(content_key("Chicken Coop [outline]"), "chicken_coop");
        assert_eq!(content_key("Fox\tDen [outline]"), "fox_den");
        // Each whitespace character maps to one underscore.
        assert_eq!(content_key("Old  Barn [outline]"), "old__barn");
    }

    #[test]
    fn keys_for_plain_names() {
        assert_eq!(content_key("Parrot Aviary"), "parrot_aviary");
    }
}
