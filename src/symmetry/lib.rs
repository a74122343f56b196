/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Symmetry reduction for three-body terms.
//!
//! A three-body symmetry function centered on species `A` with neighbor species `B, C`
//! must see every physically distinct triplet of atoms exactly once.  When species repeat
//! inside the triplet, a single cluster `(i, j, k)` found by the neighbor search stands in
//! for several orderings of the same atoms.  This crate says which orderings those are
//! ([`OrderingPlan`]) and how much each must be weighted.
//!
//! Everything here is a pure function of its inputs; [`PlanTable`] caches the plans for
//! one choice of flags.

#[macro_use]
extern crate enum_map;
#[macro_use]
extern crate log;

pub use crate::species::{RepeatedSpecies, JkIndistinguishable, CompatibilityMode};
pub use crate::species::{classify, ordering_count};
mod species;

pub use crate::perm::{PairPermutation, TripletPermutation};
mod perm;

pub use crate::plan::{OrderingPlan, PlanEntry, PlanTable};
pub use crate::plan::{build_ordering_plan, build_ordering_plan_for};
mod plan;

#[cold]
#[track_caller]
pub(crate) fn unknown_pattern() -> ! {
    panic!("species repetition is Unknown; patterns must come from `classify`")
}
