// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region content catalog.
//!
//! The catalog maps content keys to pre-rendered descriptions. It is produced
//! at build time by [`CatalogBuilder`] from one source per key and shipped as
//! a JSON document, so lookups at runtime never touch the file system.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One description in the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Front matter.
    #[serde(default)]
    pub data: ContentMeta,
    /// Rendered body markup.
    #[serde(rename = "content")]
    pub html_body: String,
    /// Path of the source file, relative to the content root.
    #[serde(default, rename = "file", skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
}

/// Front matter of a [`ContentEntry`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMeta {
    /// Title shown in the overlay. Defaults to the region's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Content key of the outline to activate for this entry, when it differs
    /// from the entry's own key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
}

impl ContentEntry {
    /// Creates an entry with a body and no front matter.
    #[must_use]
    pub fn new(html_body: impl Into<String>) -> Self {
        Self {
            data: ContentMeta::default(),
            html_body: html_body.into(),
            source_ref: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.data.title = Some(title.into());
        self
    }

    /// Sets the outline override.
    #[must_use]
    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.data.outline = Some(outline.into());
        self
    }
}

/// Content resolved for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedContent {
    /// Content key that was looked up.
    pub key: String,
    /// Plain-text title.
    pub title: String,
    /// Body markup.
    pub html_body: String,
    /// Source file backing this content, for "edit" links.
    pub source_ref: String,
    /// `false` when the key was unknown and the fallback was used.
    pub found: bool,
}

/// Content keyed by content key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentCatalog {
    entries: BTreeMap<String, ContentEntry>,
}

impl ContentCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog document.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(document)?;
        tracing::debug!(entries = catalog.len(), "loaded content catalog");
        Ok(catalog)
    }

    /// Serializes the catalog as a pretty-printed document.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContentEntry> {
        self.entries.get(key)
    }

    /// Content key of the outline that should be activated for `key`.
    ///
    /// This is the entry's `outline` override when present, else `key` itself.
    #[must_use]
    pub fn outline_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key)
            .and_then(|entry| entry.data.outline.as_deref())
            .unwrap_or(key)
    }

    /// Resolves content for display.
    ///
    /// An unknown key is not an error: the result carries `display_name` as
    /// its title and a short notice as its body.
    #[must_use]
    pub fn lookup(&self, key: &str, display_name: &str) -> ResolvedContent {
        let source_ref = |entry: Option<&ContentEntry>| {
            entry
                .and_then(|e| e.source_ref.clone())
                .unwrap_or_else(|| format!("{key}.md"))
        };
        match self.get(key) {
            Some(entry) => ResolvedContent {
                key: key.to_owned(),
                title: entry
                    .data
                    .title
                    .clone()
                    .unwrap_or_else(|| display_name.to_owned()),
                html_body: entry.html_body.clone(),
                source_ref: source_ref(Some(entry)),
                found: true,
            },
            None => {
                tracing::debug!(key, "no content for key, using fallback");
                ResolvedContent {
                    key: key.to_owned(),
                    title: display_name.to_owned(),
                    html_body: fallback_body(display_name),
                    source_ref: source_ref(None),
                    found: false,
                }
            }
        }
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn fallback_body(title: &str) -> String {
    format!(
        "Sorry, there is no information available about '{}'",
        escape_html(title)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build-time assembly of a [`ContentCatalog`].
///
/// Each source file contributes the entry for the key named by its file
/// stem. Two sources with the same stem are rejected, wherever they live.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    catalog: ContentCatalog,
}

impl CatalogBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the entry rendered from the source at `path`.
    ///
    /// The entry's source reference is set to `path` unless it already has
    /// one.
    pub fn add_source(
        &mut self,
        path: impl AsRef<Path>,
        mut entry: ContentEntry,
    ) -> Result<&mut Self, CatalogError> {
        let path = path.as_ref();
        let key = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let path = path.to_string_lossy().replace('\\', "/");
        if entry.source_ref.is_none() {
            entry.source_ref = Some(path.clone());
        }
        self.insert(key, entry, path)
    }

    /// Adds an entry under an explicit key; `origin` names it in errors.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        entry: ContentEntry,
        origin: impl Into<String>,
    ) -> Result<&mut Self, CatalogError> {
        let key = key.into();
        if let Some(existing) = self.catalog.entries.get(&key) {
            return Err(CatalogError::DuplicateContentKey {
                first: existing
                    .source_ref
                    .clone()
                    .unwrap_or_else(|| format!("{key}.md")),
                second: origin.into(),
                key,
            });
        }
        self.catalog.entries.insert(key, entry);
        Ok(self)
    }

    /// Finishes the catalog.
    #[must_use]
    pub fn build(self) -> ContentCatalog {
        self.catalog
    }
}
