// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Content-canonical integer polygons.
//!
//! A polygon is stored in a canonical form so that two polygons describing
//! the same point set compare equal and hash equally regardless of how
//! their contours were produced: the outer contour is counter-clockwise,
//! holes are clockwise, every contour starts at its lexicographically
//! smallest vertex, holes are sorted, and duplicate or collinear vertices
//! are removed. Structural equality and hashing are therefore content
//! equality and content hashing.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::{BBox, Coord, LayoutPoint, LayoutVector};

/// A closed contour, stored open (the last vertex connects back to the
/// first).
pub type Contour = Vec<LayoutPoint>;

/// An integer polygon with an outer boundary and optional holes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polygon {
    outer: Contour,
    holes: SmallVec<[Contour; 2]>,
}

impl Polygon {
    /// Create a polygon from an outer contour.
    ///
    /// The contour may be given in either winding and with redundant
    /// vertices; it is canonicalized. Contours with fewer than 3 distinct,
    /// non-collinear vertices are rejected.
    pub fn new(outer: Contour) -> Result<Self> {
        Self::with_holes(outer, Vec::new())
    }

    /// Create a polygon with holes. Hole contours are canonicalized and
    /// sorted; degenerate holes are rejected.
    pub fn with_holes(outer: Contour, holes: Vec<Contour>) -> Result<Self> {
        let outer = canonical_contour(outer, true)
            .ok_or_else(|| Error::InvalidPolygon("degenerate outer contour".to_string()))?;
        let mut canonical_holes: SmallVec<[Contour; 2]> = SmallVec::with_capacity(holes.len());
        for hole in holes {
            let hole = canonical_contour(hole, false)
                .ok_or_else(|| Error::InvalidPolygon("degenerate hole contour".to_string()))?;
            canonical_holes.push(hole);
        }
        canonical_holes.sort_by(|a, b| cmp_contours(a, b));
        Ok(Self {
            outer,
            holes: canonical_holes,
        })
    }

    /// Axis-aligned rectangle from corner coordinates (in any order).
    ///
    /// Panics if the rectangle is degenerate (zero width or height).
    pub fn rect(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        assert!(x1 != x2 && y1 != y2, "degenerate rectangle");
        let (xl, xr) = (x1.min(x2), x1.max(x2));
        let (yb, yt) = (y1.min(y2), y1.max(y2));
        // Already canonical: CCW, starting at the lexicographic minimum.
        Self {
            outer: vec![
                LayoutPoint::new(xl, yb),
                LayoutPoint::new(xr, yb),
                LayoutPoint::new(xr, yt),
                LayoutPoint::new(xl, yt),
            ],
            holes: SmallVec::new(),
        }
    }

    /// Rectangle covering a bounding box.
    pub fn from_bbox(bbox: &BBox) -> Self {
        Self::rect(bbox.min.x, bbox.min.y, bbox.max.x, bbox.max.y)
    }

    /// Lenient construction used when decoding boolean-operation output:
    /// degenerate holes are dropped, a degenerate outer yields `None`.
    pub(crate) fn build_lenient(outer: Contour, holes: Vec<Contour>) -> Option<Self> {
        let outer = canonical_contour(outer, true)?;
        let mut canonical_holes: SmallVec<[Contour; 2]> = SmallVec::new();
        for hole in holes {
            if let Some(hole) = canonical_contour(hole, false) {
                canonical_holes.push(hole);
            }
        }
        canonical_holes.sort_by(|a, b| cmp_contours(a, b));
        Some(Self {
            outer,
            holes: canonical_holes,
        })
    }

    /// The outer boundary (counter-clockwise).
    pub fn outer(&self) -> &[LayoutPoint] {
        &self.outer
    }

    /// The holes (clockwise), in canonical order.
    pub fn holes(&self) -> &[Contour] {
        &self.holes
    }

    /// Bounding box of the outer contour.
    pub fn bbox(&self) -> BBox {
        // A canonical polygon always has at least 3 outer vertices.
        let mut bbox = BBox::new(self.outer[0], self.outer[0]);
        for p in &self.outer[1..] {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        bbox
    }

    /// Translate in place. Translation preserves the canonical form, so no
    /// re-normalization is needed.
    pub fn translate(&mut self, v: LayoutVector) {
        for p in &mut self.outer {
            *p += v;
        }
        for hole in &mut self.holes {
            for p in hole {
                *p += v;
            }
        }
    }

    /// Translated copy.
    pub fn translated(&self, v: LayoutVector) -> Self {
        let mut p = self.clone();
        p.translate(v);
        p
    }

    /// Content hash of this polygon. Equal polygons (as point sets) hash
    /// equally because the stored form is canonical.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Twice the signed area of a contour. Positive = counter-clockwise.
/// Computed in i128 so layout-scale coordinates cannot overflow.
pub(crate) fn signed_area_2x(contour: &[LayoutPoint]) -> i128 {
    let n = contour.len();
    if n < 3 {
        return 0;
    }
    let mut area: i128 = 0;
    for i in 0..n {
        let p = &contour[i];
        let q = &contour[(i + 1) % n];
        area += p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128;
    }
    area
}

/// Cross product of (b - a) x (c - b), in i128.
pub(crate) fn cross(a: &LayoutPoint, b: &LayoutPoint, c: &LayoutPoint) -> i128 {
    let abx = (b.x - a.x) as i128;
    let aby = (b.y - a.y) as i128;
    let bcx = (c.x - b.x) as i128;
    let bcy = (c.y - b.y) as i128;
    abx * bcy - aby * bcx
}

fn cmp_points(a: &LayoutPoint, b: &LayoutPoint) -> Ordering {
    (a.x, a.y).cmp(&(b.x, b.y))
}

pub(crate) fn cmp_contours(a: &[LayoutPoint], b: &[LayoutPoint]) -> Ordering {
    for (p, q) in a.iter().zip(b.iter()) {
        match cmp_points(p, q) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Deterministic ordering of polygons: lower-left bounding-box corner in
/// scanline order (y, then x), then full content. Used to fix enumeration
/// order of boolean-operation results.
pub(crate) fn cmp_polygons(a: &Polygon, b: &Polygon) -> Ordering {
    let ba = a.bbox();
    let bb = b.bbox();
    (ba.min.y, ba.min.x, ba.max.y, ba.max.x)
        .cmp(&(bb.min.y, bb.min.x, bb.max.y, bb.max.x))
        .then_with(|| cmp_contours(&a.outer, &b.outer))
        .then_with(|| a.holes.len().cmp(&b.holes.len()))
        .then_with(|| {
            for (ha, hb) in a.holes.iter().zip(b.holes.iter()) {
                match cmp_contours(ha, hb) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            Ordering::Equal
        })
}

/// Remove the closing vertex, consecutive duplicates and collinear
/// vertices (including spikes). Returns `None` if fewer than 3 vertices
/// remain or the contour has zero area.
fn simplify(mut contour: Contour) -> Option<Contour> {
    // Drop an explicit closing vertex.
    if contour.len() > 1 && contour.first() == contour.last() {
        contour.pop();
    }
    contour.dedup();
    // Collinear removal can expose new collinear triples; iterate to a
    // fixpoint.
    loop {
        let n = contour.len();
        if n < 3 {
            return None;
        }
        let mut kept: Contour = Vec::with_capacity(n);
        for i in 0..n {
            let prev = &contour[(i + n - 1) % n];
            let curr = &contour[i];
            let next = &contour[(i + 1) % n];
            if cross(prev, curr, next) != 0 {
                kept.push(*curr);
            }
        }
        if kept.len() == n {
            break;
        }
        contour = kept;
    }
    if signed_area_2x(&contour) == 0 {
        return None;
    }
    Some(contour)
}

/// Simplify a contour, enforce the requested winding (`ccw` for outers,
/// clockwise for holes) and rotate it to start at its lexicographically
/// smallest vertex.
fn canonical_contour(contour: Contour, ccw: bool) -> Option<Contour> {
    let mut contour = simplify(contour)?;
    let area = signed_area_2x(&contour);
    if (area > 0) != ccw {
        contour.reverse();
    }
    let min_idx = contour
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.x, p.y))
        .map(|(i, _)| i)
        .unwrap_or(0);
    contour.rotate_left(min_idx);
    Some(contour)
}
