// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facet-Lite Geometry Kernel
//!
//! Integer-coordinate 2D polygon geometry for hierarchical layouts:
//! content-canonical polygons, regions with boolean operations backed by
//! i_overlay, and an in-memory cell/instance hierarchy with recursive
//! shape queries.

pub mod bbox;
pub mod error;
pub mod layout;
pub mod polygon;
pub mod region;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

/// Coordinate type of the layout database grid.
pub type Coord = i64;

/// A point in layout coordinates.
pub type LayoutPoint = Point2<Coord>;

/// A translation vector in layout coordinates.
pub type LayoutVector = Vector2<Coord>;

pub use bbox::BBox;
pub use error::{Error, Result};
pub use layout::{Cell, CellKey, Instance, LayerId, Layout};
pub use polygon::{Contour, Polygon};
pub use region::Region;
