// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operator and integrator capability contracts.
//!
//! Both are plain traits so callers can plug in structs with state or bare
//! closures. The separator drives them: an operator sees every *distinct*
//! canonical facet exactly once, an integrator additionally receives the
//! offsets at which that facet occurred.

use facet_lite_geometry::LayoutVector;

use crate::facet::Facet;

/// Per-facet computation step.
pub trait Operator<R> {
    /// Visit one distinct canonical facet. Called exactly once per facet,
    /// never once per occurrence, in no guaranteed order. Expected to set
    /// `facet.result`; offsets are not visible here.
    fn apply(&mut self, facet: &mut Facet<R>);
}

impl<R, F> Operator<R> for F
where
    F: FnMut(&mut Facet<R>),
{
    fn apply(&mut self, facet: &mut Facet<R>) {
        self(facet)
    }
}

/// Per-facet fan-out step.
pub trait Integrator<R> {
    /// Receive one distinct canonical facet together with every offset at
    /// which it occurred, in extraction order. Called exactly once per
    /// facet.
    fn integrate(&mut self, facet: &Facet<R>, offsets: &[LayoutVector]);
}

impl<R, F> Integrator<R> for F
where
    F: FnMut(&Facet<R>, &[LayoutVector]),
{
    fn integrate(&mut self, facet: &Facet<R>, offsets: &[LayoutVector]) {
        self(facet, offsets)
    }
}
