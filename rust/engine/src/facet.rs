// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single extracted neighborhood.
//!
//! A facet bundles one seed polygon, the seed grown by the halo distance
//! (the mask), and one clipped region per side layer. Identity — equality
//! and hashing — depends only on the seed and the side regions: the mask
//! is re-derivable from seed and halo, and the `result` slot is opaque
//! caller data.

use std::hash::{Hash, Hasher};

use facet_lite_geometry::{LayoutVector, Polygon, Region};
use rustc_hash::FxHasher;

use crate::hash::{compare_region, hash_of_region};

/// One seed shape with its side-layer context.
///
/// `R` is the caller's per-facet output type, attached by an operator and
/// read back by an integrator.
#[derive(Clone, Debug)]
pub struct Facet<R> {
    seed: Polygon,
    mask: Region,
    side_regions: Vec<Region>,
    /// Caller-attached output. `None` until an operator sets it. Never
    /// part of facet identity.
    pub result: Option<R>,
}

impl<R> Facet<R> {
    /// Bundle a facet from owned, independent copies of its parts.
    /// `side_regions[i]` must correspond to the i-th configured side
    /// layer; the separator upholds this.
    pub fn new(mask: Region, seed: Polygon, side_regions: Vec<Region>) -> Self {
        Self {
            mask,
            seed,
            side_regions,
            result: None,
        }
    }

    /// The seed polygon.
    pub fn seed(&self) -> &Polygon {
        &self.seed
    }

    /// The seed grown by the halo distance.
    pub fn mask(&self) -> &Region {
        &self.mask
    }

    /// One region per side layer, in layer order.
    pub fn side_regions(&self) -> &[Region] {
        &self.side_regions
    }

    /// Move the facet to its canonical position: translate seed, mask and
    /// side regions so the seed's bounding box sits at the origin. Returns
    /// the original lower-left corner — the offset at which this facet
    /// occurred.
    ///
    /// Must be called exactly once per facet, before it is used as a
    /// table key. A second call would translate again.
    pub fn normalize(&mut self) -> LayoutVector {
        let v = self.seed.bbox().min.coords;
        let back = -v;
        self.seed.translate(back);
        self.mask.translate(back);
        for r in &mut self.side_regions {
            r.translate(back);
        }
        v
    }

    /// Content hash over seed and side regions, in side-layer order (side
    /// layers are positionally distinct, so this fold is order-sensitive).
    pub fn content_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.seed.content_hash().hash(&mut hasher);
        for r in &self.side_regions {
            hash_of_region(r).hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl<R> PartialEq for Facet<R> {
    fn eq(&self, other: &Self) -> bool {
        if self.seed != other.seed {
            return false;
        }
        if self.side_regions.len() != other.side_regions.len() {
            return false;
        }
        self.side_regions
            .iter()
            .zip(other.side_regions.iter())
            .all(|(a, b)| compare_region(a, b))
    }
}

impl<R> Eq for Facet<R> {}

impl<R> Hash for Facet<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet_at(v: LayoutVector) -> Facet<()> {
        let seed = Polygon::rect(0, 0, 100, 200).translated(v);
        let side = Region::from_polygon(Polygon::rect(-200, -100, 200, 300)).translated(v);
        Facet::new(Region::from_polygon(seed.clone()), seed, vec![side])
    }

    #[test]
    fn normalize_makes_translated_facets_identical() {
        let mut f = facet_at(LayoutVector::new(0, 0));
        let mut ff = facet_at(LayoutVector::new(10, 20));

        // Distinct before normalization
        assert_ne!(f, ff);
        assert_ne!(f.content_hash(), ff.content_hash());

        let v1 = f.normalize();
        let v2 = ff.normalize();
        assert_eq!(v1, LayoutVector::new(0, 0));
        assert_eq!(v2, LayoutVector::new(10, 20));

        assert_eq!(f, ff);
        assert_eq!(f.content_hash(), ff.content_hash());
    }

    #[test]
    fn normalize_moves_mask_and_sides() {
        let mut f = facet_at(LayoutVector::new(10, 20));
        f.normalize();
        assert_eq!(f.seed().bbox().min.coords, LayoutVector::new(0, 0));
        assert_eq!(
            f.mask().bbox().map(|b| b.min.coords),
            Some(LayoutVector::new(0, 0))
        );
        assert_eq!(
            f.side_regions()[0].bbox().map(|b| b.min.coords),
            Some(LayoutVector::new(-200, -100))
        );
    }

    #[test]
    fn distinct_side_content_is_unequal() {
        let seed = Polygon::rect(0, 0, 100, 100);
        let mask = Region::from_polygon(seed.clone());
        let a: Facet<()> = Facet::new(
            mask.clone(),
            seed.clone(),
            vec![Region::from_polygon(Polygon::rect(0, 0, 50, 50))],
        );
        let b: Facet<()> = Facet::new(
            mask.clone(),
            seed.clone(),
            vec![Region::from_polygon(Polygon::rect(0, 0, 60, 60))],
        );
        assert_ne!(a, b);
        assert_ne!(a.content_hash(), b.content_hash());

        // Differing arity is unequal too
        let c: Facet<()> = Facet::new(mask, seed, vec![]);
        assert_ne!(a, c);
    }

    #[test]
    fn mask_and_result_do_not_affect_identity() {
        let seed = Polygon::rect(0, 0, 100, 100);
        let mut a: Facet<u32> = Facet::new(
            Region::from_polygon(Polygon::rect(-10, -10, 110, 110)),
            seed.clone(),
            vec![],
        );
        let b: Facet<u32> = Facet::new(Region::from_polygon(seed.clone()), seed, vec![]);
        a.result = Some(7);
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());
    }
}
