// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use waymark_regions::CatalogError;
use waymark_view2d::HostError;

use crate::config::ConfigError;

/// Error raised while setting up a viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// The host surface does not have the structure the viewer needs.
    Host(HostError),
    /// The configuration was rejected.
    Config(ConfigError),
    /// The content catalog could not be loaded.
    Catalog(CatalogError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(err) => write!(f, "host surface unusable: {err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Host(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<HostError> for ViewerError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

impl From<ConfigError> for ViewerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<CatalogError> for ViewerError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}
