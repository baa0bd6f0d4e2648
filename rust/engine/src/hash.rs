// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Order-independent content hashing and comparison for regions.
//!
//! A region's identity is the *set* of its polygons: neither enumeration
//! order nor duplicate entries may affect the outcome, and the hash must
//! agree with the comparison. Uses FxHasher — collisions at 64 bits are
//! the accepted failure probability, and facet lookups verify equality on
//! hash matches anyway.

use std::hash::{Hash, Hasher};

use facet_lite_geometry::{Polygon, Region};
use rustc_hash::{FxHashSet, FxHasher};

/// Content hash of a region, independent of polygon enumeration order.
///
/// Per-polygon content hashes are sorted and deduplicated before folding,
/// so the polygon *set* alone determines the result, matching
/// [`compare_region`].
pub fn hash_of_region(region: &Region) -> u64 {
    let mut hashes: Vec<u64> = region.iter().map(|p| p.content_hash()).collect();
    hashes.sort_unstable();
    hashes.dedup();
    let mut hasher = FxHasher::default();
    hashes.len().hash(&mut hasher);
    for h in hashes {
        h.hash(&mut hasher);
    }
    hasher.finish()
}

/// Compare two regions as polygon sets (duplicate polygons collapse).
pub fn compare_region(a: &Region, b: &Region) -> bool {
    let pa: FxHashSet<&Polygon> = a.iter().collect();
    let pb: FxHashSet<&Polygon> = b.iter().collect();
    pa == pb
}
