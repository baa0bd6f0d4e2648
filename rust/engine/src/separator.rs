// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facet extraction and the canonical facet table.
//!
//! The separator walks the seed layer of a layout, builds one facet per
//! seed shape, normalizes it to the origin and collapses
//! translation-identical facets into one table entry carrying every
//! offset at which the facet occurred. The table is keyed by content
//! hash with full equality verification on hash collisions; entries keep
//! insertion order.

use facet_lite_geometry::{CellKey, Coord, LayerId, LayoutVector, Polygon, Region};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::facet::Facet;
use crate::ops::{Integrator, Operator};
use crate::provider::LayoutQuery;

/// Extraction parameters.
#[derive(Debug, Clone)]
pub struct SeparatorConfig {
    seed_layer: LayerId,
    side_layers: Vec<LayerId>,
    halo: Coord,
    merge: bool,
    cell: Option<CellKey>,
}

impl SeparatorConfig {
    /// Configuration with defaults: no side layers, halo 0, merging on,
    /// starting at the layout's unique top cell.
    pub fn new(seed_layer: LayerId) -> Self {
        Self {
            seed_layer,
            side_layers: Vec::new(),
            halo: 0,
            merge: true,
            cell: None,
        }
    }

    /// Side layers whose nearby content is captured with each seed, in
    /// significant order.
    pub fn with_side_layers(mut self, side_layers: Vec<LayerId>) -> Self {
        self.side_layers = side_layers;
        self
    }

    /// Distance by which each seed is grown to define its neighborhood.
    pub fn with_halo(mut self, halo: Coord) -> Self {
        self.halo = halo;
        self
    }

    /// Whether seed shapes are merged into maximal connected components
    /// before seeding (default true). With merging off, every stored
    /// shape occurrence seeds its own facet.
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Start extraction at this cell instead of the unique top cell.
    pub fn with_cell(mut self, cell: CellKey) -> Self {
        self.cell = Some(cell);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.halo < 0 {
            return Err(Error::InvalidInput(format!(
                "halo must be >= 0, got {}",
                self.halo
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Entry<R> {
    facet: Facet<R>,
    offsets: Vec<LayoutVector>,
}

/// The canonical facet table.
///
/// `R` is the caller's per-facet result type (see [`Facet::result`]).
#[derive(Debug)]
pub struct Separator<R = ()> {
    entries: Vec<Entry<R>>,
    index: FxHashMap<u64, Vec<usize>>,
}

impl<R> Separator<R> {
    /// Extract facets from `provider` according to `config`.
    pub fn extract<P: LayoutQuery>(provider: &P, config: &SeparatorConfig) -> Result<Self> {
        config.validate()?;
        let cell = start_cell(provider, config)?;
        let seeds = collect_seeds(provider, config, cell)?;
        tracing::debug!(seeds = seeds.len(), merge = config.merge, "Collected seed region");

        let mut sep = Self::empty();
        for seed in seeds.iter() {
            let (facet, offset) = build_facet(provider, cell, config, seed)?;
            sep.insert(facet, offset);
        }
        tracing::info!(
            seeds = seeds.len(),
            distinct = sep.len(),
            "Facet extraction complete"
        );
        Ok(sep)
    }

    /// Like [`Separator::extract`], but builds the per-seed facets in
    /// parallel. Seeds are independent of each other, and the results are
    /// folded into the table in seed order, so the outcome is identical
    /// to the sequential extraction.
    pub fn par_extract<P>(provider: &P, config: &SeparatorConfig) -> Result<Self>
    where
        P: LayoutQuery + Sync,
        R: Send,
    {
        config.validate()?;
        let cell = start_cell(provider, config)?;
        let seeds = collect_seeds(provider, config, cell)?;
        tracing::debug!(seeds = seeds.len(), merge = config.merge, "Collected seed region");

        let built: Vec<(Facet<R>, LayoutVector)> = seeds
            .polygons()
            .par_iter()
            .map(|seed| build_facet(provider, cell, config, seed))
            .collect::<Result<Vec<_>>>()?;

        let mut sep = Self::empty();
        for (facet, offset) in built {
            sep.insert(facet, offset);
        }
        tracing::info!(
            seeds = seeds.len(),
            distinct = sep.len(),
            "Facet extraction complete"
        );
        Ok(sep)
    }

    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    fn insert(&mut self, facet: Facet<R>, offset: LayoutVector) {
        let h = facet.content_hash();
        let bucket = self.index.entry(h).or_default();
        for &i in bucket.iter() {
            if self.entries[i].facet == facet {
                self.entries[i].offsets.push(offset);
                return;
            }
        }
        bucket.push(self.entries.len());
        self.entries.push(Entry {
            facet,
            offsets: vec![offset],
        });
    }

    /// Number of distinct canonical facets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of occurrences across all facets.
    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(|e| e.offsets.len()).sum()
    }

    /// Enumerate (facet, offsets) pairs in insertion order.
    pub fn facets(&self) -> impl Iterator<Item = (&Facet<R>, &[LayoutVector])> {
        self.entries.iter().map(|e| (&e.facet, e.offsets.as_slice()))
    }

    /// Offsets recorded for a facet equal to `facet`, if present.
    pub fn offsets_of(&self, facet: &Facet<R>) -> Option<&[LayoutVector]> {
        let bucket = self.index.get(&facet.content_hash())?;
        bucket
            .iter()
            .copied()
            .find(|&i| self.entries[i].facet == *facet)
            .map(|i| self.entries[i].offsets.as_slice())
    }

    /// Run `operator` once per distinct canonical facet.
    pub fn process<O: Operator<R>>(&mut self, operator: &mut O) {
        for entry in &mut self.entries {
            operator.apply(&mut entry.facet);
        }
    }

    /// Run `integrator` once per distinct canonical facet, with the full
    /// offset list in extraction order.
    pub fn integrate<I: Integrator<R>>(&self, integrator: &mut I) {
        for entry in &self.entries {
            integrator.integrate(&entry.facet, &entry.offsets);
        }
    }
}

fn start_cell<P: LayoutQuery>(provider: &P, config: &SeparatorConfig) -> Result<CellKey> {
    if let Some(cell) = config.cell {
        return Ok(cell);
    }
    let tops = provider.top_cells();
    if tops.len() == 1 {
        Ok(tops[0])
    } else {
        Err(Error::AmbiguousTopCell { found: tops.len() })
    }
}

fn collect_seeds<P: LayoutQuery>(
    provider: &P,
    config: &SeparatorConfig,
    cell: CellKey,
) -> Result<Region> {
    let region = provider.flat_region(cell, config.seed_layer)?;
    if config.merge {
        Ok(region.merged()?)
    } else {
        Ok(region)
    }
}

/// Build and normalize the facet for one seed polygon.
fn build_facet<R, P: LayoutQuery>(
    provider: &P,
    cell: CellKey,
    config: &SeparatorConfig,
    seed: &Polygon,
) -> Result<(Facet<R>, LayoutVector)> {
    let mut mask = Region::from_polygon(seed.clone());
    if config.halo > 0 {
        mask = mask.sized(config.halo)?;
    }
    let mut side_regions = Vec::with_capacity(config.side_layers.len());
    for &layer in &config.side_layers {
        let touching = provider.touching_region(cell, layer, seed)?;
        side_regions.push(touching.and(&mask)?);
    }
    let mut facet = Facet::new(mask, seed.clone(), side_regions);
    let offset = facet.normalize();
    Ok((facet, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_lite_geometry::Layout;

    #[test]
    fn negative_halo_is_invalid_input() {
        let mut ly = Layout::new();
        let l1 = ly.layer();
        ly.create_cell("TOP");
        let config = SeparatorConfig::new(l1).with_halo(-5);
        let err = Separator::<()>::extract(&ly, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn missing_top_cell_is_ambiguous() {
        let mut ly = Layout::new();
        let l1 = ly.layer();
        let err = Separator::<()>::extract(&ly, &SeparatorConfig::new(l1)).unwrap_err();
        assert!(matches!(err, Error::AmbiguousTopCell { found: 0 }));
    }

    #[test]
    fn multiple_top_cells_are_ambiguous() {
        let mut ly = Layout::new();
        let l1 = ly.layer();
        let a = ly.create_cell("A");
        ly.create_cell("B");
        let err = Separator::<()>::extract(&ly, &SeparatorConfig::new(l1)).unwrap_err();
        assert!(matches!(err, Error::AmbiguousTopCell { found: 2 }));

        // Giving an explicit start cell resolves the ambiguity
        let sep =
            Separator::<()>::extract(&ly, &SeparatorConfig::new(l1).with_cell(a)).unwrap();
        assert!(sep.is_empty());
    }

    #[test]
    fn unknown_seed_layer_propagates_geometry_error() {
        let mut ly = Layout::new();
        ly.create_cell("TOP");
        let err = Separator::<()>::extract(&ly, &SeparatorConfig::new(7)).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }
}
