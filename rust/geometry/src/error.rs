// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the geometry kernel
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Layer {0} is not defined in this layout")]
    InvalidLayer(u32),

    #[error("Cell is not present in this layout")]
    InvalidCell,

    #[error("Invalid sizing distance: {0}")]
    InvalidSizing(i64),
}
