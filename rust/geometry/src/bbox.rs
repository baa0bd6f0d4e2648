// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integer axis-aligned bounding boxes.

use crate::{Coord, LayoutPoint, LayoutVector};

/// An axis-aligned bounding box in layout coordinates.
///
/// `min` and `max` are inclusive corners; a box with `min == max` is a
/// single point. The constructor orders the corners, so any two opposite
/// corners may be passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BBox {
    pub min: LayoutPoint,
    pub max: LayoutPoint,
}

impl BBox {
    /// Create a box from two opposite corners (in any order).
    pub fn new(a: LayoutPoint, b: LayoutPoint) -> Self {
        Self {
            min: LayoutPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: LayoutPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a box from corner coordinates.
    pub fn from_coords(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Self::new(LayoutPoint::new(x1, y1), LayoutPoint::new(x2, y2))
    }

    /// Smallest box enclosing all given points, or `None` for an empty set.
    pub fn from_points<'a, I: IntoIterator<Item = &'a LayoutPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(*first, *first);
        for p in iter {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> Coord {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Coord {
        self.max.y - self.min.y
    }

    /// Center point, rounded towards the lower-left on odd extents.
    pub fn center(&self) -> LayoutPoint {
        LayoutPoint::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    /// Smallest box enclosing both boxes.
    pub fn join(&self, other: &BBox) -> BBox {
        BBox {
            min: LayoutPoint::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: LayoutPoint::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// True if the boxes share at least one point (closed intervals, so
    /// abutting boxes touch).
    pub fn touches(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn translated(&self, v: LayoutVector) -> BBox {
        BBox {
            min: self.min + v,
            max: self.max + v,
        }
    }

    /// Box grown outward by `d` on every side.
    pub fn expanded(&self, d: Coord) -> BBox {
        BBox {
            min: LayoutPoint::new(self.min.x - d, self.min.y - d),
            max: LayoutPoint::new(self.max.x + d, self.max.y + d),
        }
    }
}
