// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The geometry-provider seam.
//!
//! The separator consumes the layout only through this trait, injected at
//! the caller's composition root. `facet_lite_geometry::Layout` is the
//! reference implementation; anything that can enumerate top cells and
//! answer the two hierarchical shape queries can stand in for it.

use facet_lite_geometry::{self as geometry, CellKey, LayerId, Layout, Polygon, Region};

/// Hierarchical shape queries over a layout.
pub trait LayoutQuery {
    /// Cells not instantiated by any other cell, in a stable order.
    fn top_cells(&self) -> Vec<CellKey>;

    /// All shapes on `layer` hierarchically below `cell`, flattened into
    /// `cell`'s coordinate space.
    fn flat_region(&self, cell: CellKey, layer: LayerId) -> geometry::Result<Region>;

    /// All shapes on `layer` anywhere below `cell` whose bounding extent
    /// touches `clip`'s bounding extent, flattened into `cell`'s
    /// coordinate space.
    fn touching_region(
        &self,
        cell: CellKey,
        layer: LayerId,
        clip: &Polygon,
    ) -> geometry::Result<Region>;
}

impl LayoutQuery for Layout {
    fn top_cells(&self) -> Vec<CellKey> {
        Layout::top_cells(self)
    }

    fn flat_region(&self, cell: CellKey, layer: LayerId) -> geometry::Result<Region> {
        Layout::flat_region(self, cell, layer)
    }

    fn touching_region(
        &self,
        cell: CellKey,
        layer: LayerId,
        clip: &Polygon,
    ) -> geometry::Result<Region> {
        Layout::touching_region(self, cell, layer, clip)
    }
}
