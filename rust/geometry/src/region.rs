// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon regions and boolean operations.
//!
//! A region is an ordered collection of polygons. Boolean operations go
//! through the i_overlay float overlay; layout coordinates sit far below
//! the 2^53 range where f64 is exact, and results are rounded back onto
//! the integer grid. Boolean results are enumerated in a fixed order
//! (scanline order of the bounding boxes) so repeated runs over the same
//! input produce identical regions.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::error::{Error, Result};
use crate::polygon::{cmp_polygons, cross};
use crate::{BBox, Contour, Coord, LayoutPoint, LayoutVector, Polygon};

/// A set of polygons in a shared coordinate space.
#[derive(Debug, Clone, Default)]
pub struct Region {
    polygons: Vec<Polygon>,
}

impl Region {
    /// Empty region.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_polygon(polygon: Polygon) -> Self {
        Self {
            polygons: vec![polygon],
        }
    }

    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Enumerate the constituent polygons.
    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Bounding box of all polygons, `None` for an empty region.
    pub fn bbox(&self) -> Option<BBox> {
        let mut iter = self.polygons.iter();
        let first = iter.next()?.bbox();
        Some(iter.fold(first, |acc, p| acc.join(&p.bbox())))
    }

    /// Translate all polygons in place.
    pub fn translate(&mut self, v: LayoutVector) {
        for p in &mut self.polygons {
            p.translate(v);
        }
    }

    /// Translated copy.
    pub fn translated(&self, v: LayoutVector) -> Self {
        let mut r = self.clone();
        r.translate(v);
        r
    }

    /// Merge self-overlaps: coalesce touching and overlapping polygons into
    /// maximal connected polygons (holes preserved). The result enumerates
    /// one polygon per connected component, in scanline order.
    pub fn merged(&self) -> Result<Region> {
        if self.polygons.len() <= 1 {
            return Ok(self.clone());
        }
        let subject = polygon_paths(&self.polygons[0]);
        let mut clip = Vec::new();
        for p in &self.polygons[1..] {
            clip.extend(polygon_paths(p));
        }
        let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
        Ok(Self::from_shapes(shapes))
    }

    /// Boolean AND: the parts of `self` inside `other`.
    pub fn and(&self, other: &Region) -> Result<Region> {
        if self.is_empty() || other.is_empty() {
            return Ok(Region::new());
        }
        let subject = self.to_paths();
        let clip = other.to_paths();
        let shapes = subject.overlay(&clip, OverlayRule::Intersect, FillRule::NonZero);
        Ok(Self::from_shapes(shapes))
    }

    /// Isotropic outward sizing: the Minkowski sum of the region with the
    /// square `[-d, d]²`. Outer boundaries grow by `d` on every side, holes
    /// shrink accordingly. Overlaps created by growing are merged.
    pub fn sized(&self, d: Coord) -> Result<Region> {
        if d < 0 {
            return Err(Error::InvalidSizing(d));
        }
        if d == 0 || self.is_empty() {
            return Ok(self.clone());
        }
        let subject = self.to_paths();
        // Sweep every boundary edge with the square: the union of the
        // region with the per-edge hulls is the Minkowski sum, since the
        // square is convex and contains the origin.
        let mut clip = Vec::new();
        for polygon in &self.polygons {
            edge_sweep_paths(polygon.outer(), d, &mut clip);
            for hole in polygon.holes() {
                edge_sweep_paths(hole, d, &mut clip);
            }
        }
        let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
        Ok(Self::from_shapes(shapes))
    }

    /// All contours of all polygons in i_overlay path format.
    fn to_paths(&self) -> Vec<Vec<[f64; 2]>> {
        let mut paths = Vec::new();
        for p in &self.polygons {
            paths.extend(polygon_paths(p));
        }
        paths
    }

    /// Decode an i_overlay result (one entry per connected shape, first
    /// contour outer, rest holes), snap to the integer grid and fix the
    /// enumeration order. Degenerate contours produced by snapping are
    /// dropped.
    fn from_shapes(shapes: Vec<Vec<Vec<[f64; 2]>>>) -> Region {
        let mut polygons = Vec::with_capacity(shapes.len());
        for shape in shapes {
            let mut contours = shape.into_iter().map(path_to_contour);
            let Some(outer) = contours.next() else {
                continue;
            };
            let holes: Vec<Contour> = contours.collect();
            if let Some(polygon) = Polygon::build_lenient(outer, holes) {
                polygons.push(polygon);
            }
        }
        polygons.sort_by(cmp_polygons);
        Region { polygons }
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Contours of one polygon (outer CCW, holes CW) as i_overlay paths.
fn polygon_paths(polygon: &Polygon) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(1 + polygon.holes().len());
    paths.push(contour_to_path(polygon.outer()));
    for hole in polygon.holes() {
        paths.push(contour_to_path(hole));
    }
    paths
}

fn contour_to_path(contour: &[LayoutPoint]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x as f64, p.y as f64]).collect()
}

fn path_to_contour(path: Vec<[f64; 2]>) -> Contour {
    path.into_iter()
        .map(|p| LayoutPoint::new(p[0].round() as Coord, p[1].round() as Coord))
        .collect()
}

/// For every edge of `contour`, append the convex hull of the edge swept by
/// the square `[-d, d]²` (the hull of the 8 translated endpoints).
fn edge_sweep_paths(contour: &[LayoutPoint], d: Coord, out: &mut Vec<Vec<[f64; 2]>>) {
    let corners = [
        LayoutVector::new(d, d),
        LayoutVector::new(d, -d),
        LayoutVector::new(-d, -d),
        LayoutVector::new(-d, d),
    ];
    let n = contour.len();
    for i in 0..n {
        let p = contour[i];
        let q = contour[(i + 1) % n];
        let mut points = Vec::with_capacity(8);
        for c in &corners {
            points.push(p + *c);
            points.push(q + *c);
        }
        let hull = convex_hull(points);
        if hull.len() >= 3 {
            out.push(contour_to_path(&hull));
        }
    }
}

/// Monotone-chain convex hull, counter-clockwise.
fn convex_hull(mut points: Vec<LayoutPoint>) -> Vec<LayoutPoint> {
    points.sort_by_key(|p| (p.x, p.y));
    points.dedup();
    if points.len() < 3 {
        return points;
    }
    let mut lower: Vec<LayoutPoint> = Vec::with_capacity(points.len());
    for p in &points {
        while lower.len() >= 2
            && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<LayoutPoint> = Vec::with_capacity(points.len());
    for p in points.iter().rev() {
        while upper.len() >= 2
            && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_of_overlapping_boxes() {
        let a = Region::from_polygon(Polygon::rect(0, 0, 100, 100));
        let b = Region::from_polygon(Polygon::rect(50, 50, 150, 150));
        let r = a.and(&b).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.polygons()[0], Polygon::rect(50, 50, 100, 100));
    }

    #[test]
    fn test_and_of_disjoint_boxes_is_empty() {
        let a = Region::from_polygon(Polygon::rect(0, 0, 100, 100));
        let b = Region::from_polygon(Polygon::rect(200, 200, 300, 300));
        assert!(a.and(&b).unwrap().is_empty());
        assert!(a.and(&Region::new()).unwrap().is_empty());
    }

    #[test]
    fn test_merged_coalesces_touching_boxes() {
        let mut r = Region::new();
        r.push(Polygon::rect(0, 0, 100, 100));
        r.push(Polygon::rect(100, 0, 200, 100));
        let m = r.merged().unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.polygons()[0], Polygon::rect(0, 0, 200, 100));
    }

    #[test]
    fn test_merged_keeps_disjoint_components() {
        let mut r = Region::new();
        r.push(Polygon::rect(500, 500, 600, 600));
        r.push(Polygon::rect(0, 0, 100, 100));
        r.push(Polygon::rect(50, 50, 150, 150));
        let m = r.merged().unwrap();
        assert_eq!(m.len(), 2);
        // Scanline enumeration order: lower component first
        assert_eq!(m.polygons()[0].bbox(), BBox::from_coords(0, 0, 150, 150));
        assert_eq!(m.polygons()[1].bbox(), BBox::from_coords(500, 500, 600, 600));
    }

    #[test]
    fn test_sized_grows_every_side() {
        let r = Region::from_polygon(Polygon::rect(100, 100, 900, 900));
        let s = r.sized(200).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.polygons()[0], Polygon::rect(-100, -100, 1100, 1100));
    }

    #[test]
    fn test_sized_zero_is_identity() {
        let r = Region::from_polygon(Polygon::rect(0, 0, 100, 100));
        let s = r.sized(0).unwrap();
        assert_eq!(s.polygons(), r.polygons());
    }

    #[test]
    fn test_sized_negative_is_rejected() {
        let r = Region::from_polygon(Polygon::rect(0, 0, 100, 100));
        assert!(matches!(r.sized(-1), Err(Error::InvalidSizing(-1))));
    }

    #[test]
    fn test_sized_merges_grown_neighbors() {
        // Two boxes 100 apart merge once grown by 60 each
        let mut r = Region::new();
        r.push(Polygon::rect(0, 0, 100, 100));
        r.push(Polygon::rect(200, 0, 300, 100));
        let s = r.sized(60).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.bbox(), Some(BBox::from_coords(-60, -60, 360, 160)));
    }

    #[test]
    fn test_bbox_and_translate() {
        let mut r = Region::new();
        r.push(Polygon::rect(0, 0, 10, 10));
        r.push(Polygon::rect(50, 50, 60, 80));
        assert_eq!(r.bbox(), Some(BBox::from_coords(0, 0, 60, 80)));
        let t = r.translated(LayoutVector::new(-5, 5));
        assert_eq!(t.bbox(), Some(BBox::from_coords(-5, 5, 55, 85)));
        assert!(Region::new().bbox().is_none());
    }

    #[test]
    fn test_convex_hull_is_ccw() {
        let hull = convex_hull(vec![
            LayoutPoint::new(0, 0),
            LayoutPoint::new(10, 0),
            LayoutPoint::new(10, 10),
            LayoutPoint::new(0, 10),
            LayoutPoint::new(5, 5),
        ]);
        assert_eq!(hull.len(), 4);
        assert!(crate::polygon::signed_area_2x(&hull) > 0);
    }
}
