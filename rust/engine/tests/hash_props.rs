// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use facet_lite_engine::{compare_region, hash_of_region};
use facet_lite_geometry::{LayoutVector, Polygon, Region};
use proptest::prelude::*;

fn boxes() -> impl Strategy<Value = Vec<Polygon>> {
    prop::collection::vec(
        (-1000i64..1000, -1000i64..1000, 1i64..500, 1i64..500),
        1..8,
    )
    .prop_map(|boxes| {
        boxes
            .into_iter()
            .map(|(x, y, w, h)| Polygon::rect(x, y, x + w, y + h))
            .collect()
    })
}

proptest! {
    #[test]
    fn region_hash_ignores_enumeration_order(
        (original, shuffled) in boxes().prop_flat_map(|v| {
            let shuffled = Just(v.clone()).prop_shuffle();
            (Just(v), shuffled)
        })
    ) {
        let a = Region::from_polygons(original);
        let b = Region::from_polygons(shuffled);
        prop_assert!(compare_region(&a, &b));
        prop_assert_eq!(hash_of_region(&a), hash_of_region(&b));
    }

    #[test]
    fn translated_region_is_different_content(
        polygons in boxes(),
        dx in -500i64..500,
        dy in -500i64..500,
    ) {
        prop_assume!(dx != 0 || dy != 0);
        let a = Region::from_polygons(polygons);
        let b = a.translated(LayoutVector::new(dx, dy));
        prop_assert!(!compare_region(&a, &b));
        prop_assert_ne!(hash_of_region(&a), hash_of_region(&b));
    }

    #[test]
    fn duplicated_polygons_do_not_change_identity(polygons in boxes()) {
        let a = Region::from_polygons(polygons.clone());
        let mut doubled = polygons.clone();
        doubled.extend(polygons);
        let b = Region::from_polygons(doubled);
        prop_assert!(compare_region(&a, &b));
        prop_assert_eq!(hash_of_region(&a), hash_of_region(&b));
    }
}
