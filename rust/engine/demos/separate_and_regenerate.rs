// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Separates a layout along the seed shapes of one layer, taking three
//! side layers as context within a halo of 200 database units, and
//! regenerates a new layout from the distinct facets: one cell per facet,
//! instanced at every original location, plus a catalog cell holding one
//! copy of each distinct facet side by side.

use facet_lite_engine::{Facet, Integrator, Operator, Separator, SeparatorConfig};
use facet_lite_geometry::{LayoutPoint, LayoutVector, Layout, Polygon};

const HALO: i64 = 200;

/// Per-facet result: a running index and the seed center as a label
/// anchor.
struct Label {
    index: usize,
    anchor: LayoutPoint,
}

/// Assigns each distinct facet a label.
struct LabelOperator {
    next_index: usize,
}

impl Operator<Label> for LabelOperator {
    fn apply(&mut self, facet: &mut Facet<Label>) {
        self.next_index += 1;
        facet.result = Some(Label {
            index: self.next_index,
            anchor: facet.seed().bbox().center(),
        });
    }
}

/// Rebuilds a layout from the facets: one cell per facet placed at every
/// recorded offset under TOP, and one copy of each in an ALL_FACETS
/// catalog row.
struct RegenIntegrator {
    layout: Layout,
    seed_layer: u32,
    side_layers: [u32; 3],
    outline_layer: u32,
    top: facet_lite_geometry::CellKey,
    catalog: facet_lite_geometry::CellKey,
    catalog_x: i64,
}

impl RegenIntegrator {
    fn new() -> Self {
        let mut layout = Layout::new();
        let outline_layer = layout.layer();
        let side_layers = [layout.layer(), layout.layer(), layout.layer()];
        let seed_layer = layout.layer();
        let top = layout.create_cell("TOP");
        let catalog = layout.create_cell("ALL_FACETS");
        Self {
            layout,
            seed_layer,
            side_layers,
            outline_layer,
            top,
            catalog,
            catalog_x: 0,
        }
    }
}

impl Integrator<Label> for RegenIntegrator {
    fn integrate(&mut self, facet: &Facet<Label>, offsets: &[LayoutVector]) {
        let name = match &facet.result {
            Some(label) => format!("FACET_{}", label.index),
            None => "FACET".to_string(),
        };
        let cell = self.layout.create_cell(&name);

        self.layout
            .insert_shape(cell, self.seed_layer, facet.seed().clone())
            .expect("regenerated layout accepts the seed");
        for polygon in facet.mask().iter() {
            self.layout
                .insert_shape(cell, self.outline_layer, polygon.clone())
                .expect("regenerated layout accepts the mask");
        }
        for (layer, region) in self.side_layers.iter().zip(facet.side_regions()) {
            for polygon in region.iter() {
                self.layout
                    .insert_shape(cell, *layer, polygon.clone())
                    .expect("regenerated layout accepts side content");
            }
        }

        for offset in offsets {
            self.layout
                .insert_instance(self.top, cell, *offset)
                .expect("regenerated layout accepts instances");
        }

        self.layout
            .insert_instance(self.catalog, cell, LayoutVector::new(self.catalog_x, 0))
            .expect("regenerated layout accepts catalog entries");
        let width = facet.mask().bbox().map(|b| b.width()).unwrap_or(0);
        self.catalog_x += width + HALO;
    }
}

/// Source layout: a repeated via-like pattern instanced three times, plus
/// one unique pattern placed directly in the top cell.
fn build_source() -> (Layout, u32, [u32; 3]) {
    let mut ly = Layout::new();
    let l3 = ly.layer();
    let l4 = ly.layer();
    let l5 = ly.layer();
    let l6 = ly.layer();

    let top = ly.create_cell("TOP");
    let via = ly.create_cell("VIA");

    ly.insert_shape(via, l6, Polygon::rect(0, 0, 200, 200)).unwrap();
    ly.insert_shape(via, l3, Polygon::rect(-100, -100, 300, 300)).unwrap();
    ly.insert_shape(via, l4, Polygon::rect(50, 50, 150, 150)).unwrap();
    ly.insert_shape(via, l5, Polygon::rect(-50, 80, 250, 120)).unwrap();

    for disp in [
        LayoutVector::new(1000, 0),
        LayoutVector::new(3000, 500),
        LayoutVector::new(5000, -200),
    ] {
        ly.insert_instance(top, via, disp).unwrap();
    }

    // A unique neighborhood: same seed size, different side content
    ly.insert_shape(top, l6, Polygon::rect(9000, 9000, 9200, 9200)).unwrap();
    ly.insert_shape(top, l3, Polygon::rect(8950, 8950, 9100, 9250)).unwrap();

    (ly, l6, [l3, l4, l5])
}

fn main() -> facet_lite_engine::Result<()> {
    let (source, seed_layer, side_layers) = build_source();

    let config = SeparatorConfig::new(seed_layer)
        .with_side_layers(side_layers.to_vec())
        .with_halo(HALO);
    let mut separator: Separator<Label> = Separator::extract(&source, &config)?;

    println!(
        "Extracted {} distinct facets covering {} occurrences",
        separator.len(),
        separator.occurrence_count()
    );

    separator.process(&mut LabelOperator { next_index: 0 });

    let mut integrator = RegenIntegrator::new();
    separator.integrate(&mut integrator);

    for (facet, offsets) in separator.facets() {
        let label = facet.result.as_ref().map(|l| l.index).unwrap_or(0);
        let anchor = facet
            .result
            .as_ref()
            .map(|l| (l.anchor.x, l.anchor.y))
            .unwrap_or((0, 0));
        println!(
            "FACET #{label}: seed {}x{} at anchor ({}, {}), {} occurrence(s)",
            facet.seed().bbox().width(),
            facet.seed().bbox().height(),
            anchor.0,
            anchor.1,
            offsets.len()
        );
    }

    let regenerated = integrator.layout;
    println!(
        "Regenerated layout has {} top-level cells",
        regenerated.top_cells().len()
    );

    Ok(())
}
