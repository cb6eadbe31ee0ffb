// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay surface as seen by a renderer.

use waymark_regions::ResolvedContent;

/// Presentation state of the overlay.
///
/// Only [`OverlayMachine`](crate::OverlayMachine) mutates this; renderers
/// read it after each event and mirror it onto the real surface.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySurface {
    title: String,
    body: String,
    displayed: bool,
    opacity: f64,
    aria_hidden: bool,
    transitioning: bool,
}

impl Default for OverlaySurface {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            displayed: false,
            opacity: 0.0,
            aria_hidden: true,
            transitioning: false,
        }
    }
}

impl OverlaySurface {
    /// Title slot. Plain text; renderers must not interpret it as markup.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body slot. Markup, inserted as-is.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the overlay takes part in layout.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Target opacity, `0.0` or `1.0`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Value of the `aria-hidden` attribute.
    #[must_use]
    pub fn aria_hidden(&self) -> bool {
        self.aria_hidden
    }

    /// Whether an opacity transition is enabled.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub(crate) fn set_content(&mut self, content: &ResolvedContent, edit_base_url: Option<&str>) {
        self.title.clone_from(&content.title);
        self.body = compose_body(content, edit_base_url);
    }

    pub(crate) fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    pub(crate) fn set_transitioning(&mut self, transitioning: bool) {
        self.transitioning = transitioning;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.opacity = if visible { 1.0 } else { 0.0 };
        self.aria_hidden = !visible;
    }
}

/// Body markup for `content`, followed by an edit footer when
/// `edit_base_url` is set.
#[must_use]
pub fn compose_body(content: &ResolvedContent, edit_base_url: Option<&str>) -> String {
    let Some(base) = edit_base_url else {
        return content.html_body.clone();
    };
    let href = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        content.source_ref.trim_start_matches('/')
    );
    format!(
        "{}<hr><p>Want to improve this information? \
         <a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">Edit it</a></p>",
        content.html_body,
        escape_attribute(&href)
    )
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use waymark_regions::ContentCatalog;

    use super::{OverlaySurface, compose_body};

    #[test]
    fn starts_hidden() {
        let s = OverlaySurface::default();
        assert!(!s.is_displayed());
        assert!(s.aria_hidden());
        assert_eq!(s.opacity(), 0.0);
    }

    #[test]
    fn body_without_edit_link_is_verbatim() {
        let content = ContentCatalog::new().lookup("pond", "Pond");
        assert_eq!(compose_body(&content, None), content.html_body);
    }

    #[test]
    fn edit_link_points_at_source() {
        let content = ContentCatalog::new().lookup("pond", "Pond");
        let body = compose_body(&content, Some("https://example.org/edit/main/data/"));
        assert!(body.starts_with(&content.html_body));
        assert!(body.contains("href=\"https://example.org/edit/main/data/pond.md\""));
        assert!(body.contains("rel=\"noreferrer\""));
    }
}
