// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory hierarchical layout database.
//!
//! Cells live in a slotmap arena and reference each other through
//! instances, each placing a child cell at an integer displacement. The
//! instance graph must be acyclic. Layers are plain `u32` handles
//! allocated by [`Layout::layer`]; shapes are polygons stored per cell and
//! layer.

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::{BBox, LayoutVector, Polygon, Region};

new_key_type! {
    /// Key for a cell in the layout arena.
    pub struct CellKey;
}

/// Layer handle, allocated by [`Layout::layer`].
pub type LayerId = u32;

/// A placement of a child cell at an integer displacement.
#[derive(Debug, Clone, Copy)]
pub struct Instance {
    pub cell: CellKey,
    pub disp: LayoutVector,
}

/// A cell: named container of shapes and child instances.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    name: String,
    // One shape list per layer; index = LayerId.
    shapes: Vec<Vec<Polygon>>,
    instances: Vec<Instance>,
}

impl Cell {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shapes stored directly in this cell on `layer` (not hierarchical).
    pub fn shapes(&self, layer: LayerId) -> &[Polygon] {
        self.shapes
            .get(layer as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

/// The layout database.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    cells: SlotMap<CellKey, Cell>,
    layer_count: u32,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next layer handle.
    pub fn layer(&mut self) -> LayerId {
        let id = self.layer_count;
        self.layer_count += 1;
        id
    }

    pub fn layer_count(&self) -> u32 {
        self.layer_count
    }

    pub fn create_cell(&mut self, name: &str) -> CellKey {
        self.cells.insert(Cell {
            name: name.to_string(),
            shapes: Vec::new(),
            instances: Vec::new(),
        })
    }

    pub fn cell(&self, key: CellKey) -> Option<&Cell> {
        self.cells.get(key)
    }

    /// Insert a shape into a cell on a layer.
    pub fn insert_shape(&mut self, cell: CellKey, layer: LayerId, polygon: Polygon) -> Result<()> {
        self.check_layer(layer)?;
        let cell = self.cells.get_mut(cell).ok_or(Error::InvalidCell)?;
        if cell.shapes.len() <= layer as usize {
            cell.shapes.resize_with(layer as usize + 1, Vec::new);
        }
        cell.shapes[layer as usize].push(polygon);
        Ok(())
    }

    /// Place `child` inside `parent` at `disp`. The caller must keep the
    /// instance graph acyclic.
    pub fn insert_instance(
        &mut self,
        parent: CellKey,
        child: CellKey,
        disp: LayoutVector,
    ) -> Result<()> {
        if !self.cells.contains_key(child) {
            return Err(Error::InvalidCell);
        }
        let parent = self.cells.get_mut(parent).ok_or(Error::InvalidCell)?;
        parent.instances.push(Instance { cell: child, disp });
        Ok(())
    }

    /// Cells that are not instantiated by any other cell, in arena order.
    pub fn top_cells(&self) -> Vec<CellKey> {
        let mut referenced: FxHashSet<CellKey> = FxHashSet::default();
        for (_, cell) in &self.cells {
            for inst in &cell.instances {
                referenced.insert(inst.cell);
            }
        }
        self.cells
            .keys()
            .filter(|k| !referenced.contains(k))
            .collect()
    }

    /// All shapes on `layer` hierarchically below `cell`, flattened into
    /// `cell`'s coordinate space. Enumeration order is the depth-first
    /// instance traversal order.
    pub fn flat_region(&self, cell: CellKey, layer: LayerId) -> Result<Region> {
        self.check_layer(layer)?;
        let mut out = Vec::new();
        self.collect_flat(cell, layer, LayoutVector::new(0, 0), &mut out)?;
        Ok(Region::from_polygons(out))
    }

    /// All shapes on `layer` hierarchically below `cell` whose bounding box
    /// touches `clip`'s bounding box (closed intervals, so abutting shapes
    /// are included). Subtrees whose hierarchical layer extent misses the
    /// clip are pruned.
    pub fn touching_region(
        &self,
        cell: CellKey,
        layer: LayerId,
        clip: &Polygon,
    ) -> Result<Region> {
        self.check_layer(layer)?;
        let clip_bbox = clip.bbox();
        let mut out = Vec::new();
        self.collect_touching(cell, layer, LayoutVector::new(0, 0), &clip_bbox, &mut out)?;
        Ok(Region::from_polygons(out))
    }

    /// Hierarchical bounding box of `layer` below `cell`. Walks the
    /// subtree on every call; cost is proportional to the expanded
    /// hierarchy.
    pub fn layer_bbox(&self, cell: CellKey, layer: LayerId) -> Result<Option<BBox>> {
        self.check_layer(layer)?;
        let c = self.cells.get(cell).ok_or(Error::InvalidCell)?;
        let mut bbox: Option<BBox> = None;
        for p in c.shapes(layer) {
            let b = p.bbox();
            bbox = Some(match bbox {
                Some(acc) => acc.join(&b),
                None => b,
            });
        }
        for inst in &c.instances {
            if let Some(b) = self.layer_bbox(inst.cell, layer)? {
                let b = b.translated(inst.disp);
                bbox = Some(match bbox {
                    Some(acc) => acc.join(&b),
                    None => b,
                });
            }
        }
        Ok(bbox)
    }

    fn check_layer(&self, layer: LayerId) -> Result<()> {
        if layer >= self.layer_count {
            return Err(Error::InvalidLayer(layer));
        }
        Ok(())
    }

    fn collect_flat(
        &self,
        cell: CellKey,
        layer: LayerId,
        disp: LayoutVector,
        out: &mut Vec<Polygon>,
    ) -> Result<()> {
        let c = self.cells.get(cell).ok_or(Error::InvalidCell)?;
        for p in c.shapes(layer) {
            out.push(p.translated(disp));
        }
        for inst in &c.instances {
            self.collect_flat(inst.cell, layer, disp + inst.disp, out)?;
        }
        Ok(())
    }

    fn collect_touching(
        &self,
        cell: CellKey,
        layer: LayerId,
        disp: LayoutVector,
        clip_bbox: &BBox,
        out: &mut Vec<Polygon>,
    ) -> Result<()> {
        let c = self.cells.get(cell).ok_or(Error::InvalidCell)?;
        for p in c.shapes(layer) {
            if p.bbox().translated(disp).touches(clip_bbox) {
                out.push(p.translated(disp));
            }
        }
        for inst in &c.instances {
            let child_disp = disp + inst.disp;
            match self.layer_bbox(inst.cell, layer)? {
                Some(b) if b.translated(child_disp).touches(clip_bbox) => {
                    self.collect_touching(inst.cell, layer, child_disp, clip_bbox, out)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
