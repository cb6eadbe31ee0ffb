// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Regions: the selectable regions of a map and their descriptions.
//!
//! A map marks its selectable areas with labels ending in ` [outline]`. The
//! [`RegionRegistry`] collects those once at load, giving each a display name
//! and a content key (`"Chicken Coop [outline]"` becomes `"chicken_coop"`).
//! Content keys index a [`ContentCatalog`] of pre-rendered descriptions.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_regions::{CatalogBuilder, ContentEntry, RegionRegistry};
//!
//! let regions = RegionRegistry::from_labels(["Birds", "Pond [outline]", "Pasture [outline]"]);
//! assert_eq!(regions.len(), 2);
//!
//! let mut builder = CatalogBuilder::new();
//! builder.add_source("pond.md", ContentEntry::new("<p>Ducks live here.</p>")).unwrap();
//! let catalog = builder.build();
//!
//! let pasture = regions.first_with_key("pasture").unwrap();
//! let content = catalog.lookup(pasture.content_key(), pasture.display_name());
//! assert_eq!(content.title, "Pasture");
//! assert!(content.html_body.contains("no information available about 'Pasture'"));
//! ```
//!
//! Building a catalog is the step where authoring errors surface: two
//! sources that map to the same key yield
//! [`CatalogError::DuplicateContentKey`].

mod catalog;
mod error;
pub mod key;
mod registry;

pub use catalog::{CatalogBuilder, ContentCatalog, ContentEntry, ContentMeta, ResolvedContent};
pub use error::CatalogError;
pub use key::{content_key, display_name, is_outline_label};
pub use registry::{Region, RegionId, RegionRegistry};
