// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facet-Lite Engine
//!
//! Extracts, canonicalizes and deduplicates local neighborhoods
//! ("facets") from a hierarchical polygon layout. Each seed shape on a
//! seed layer is captured together with the nearby content of auxiliary
//! side layers, normalized to a canonical origin, and grouped with every
//! other occurrence that is identical up to translation. Downstream work
//! then runs once per distinct neighborhood instead of once per
//! occurrence.
//!
//! The engine never chooses a geometry provider itself: callers inject
//! one through the [`LayoutQuery`] trait. The reference provider is
//! `facet_lite_geometry::Layout`.

pub mod error;
pub mod facet;
pub mod hash;
pub mod ops;
pub mod provider;
pub mod separator;

pub use error::{Error, Result};
pub use facet::Facet;
pub use hash::{compare_region, hash_of_region};
pub use ops::{Integrator, Operator};
pub use provider::LayoutQuery;
pub use separator::{Separator, SeparatorConfig};
