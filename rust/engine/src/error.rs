// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during facet extraction
#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected a unique top cell, found {found}")]
    AmbiguousTopCell { found: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] facet_lite_geometry::Error),
}
