/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Building blocks for atomic-environment descriptors.
//!
//! * `special`: modified spherical Bessel radial kernels, evaluated at a fixed set
//!   of anchors for one neighbor distance at a time.
//! * `symmetry`: which index orderings of a three-body cluster must be evaluated,
//!   and with what weight, given the species of its atoms.
//! * `config`: YAML settings for both.

#[macro_use] extern crate log;

pub use desckern_config as config;
pub use desckern_special as special;
pub use desckern_symmetry as symmetry;

use crate::config::Settings;
use crate::special::batch::{self, Evaluation};
use crate::special::ModifiedSphericalBessel;
use crate::symmetry::{CompatibilityMode, JkIndistinguishable, PlanTable};

pub type FailResult<T> = Result<T, failure::Error>;

/// A radial kernel engine, precomputed for the configured orders and anchors.
pub fn radial_engine(settings: &Settings) -> FailResult<ModifiedSphericalBessel> {
    let basis = &settings.radial_basis;
    let anchors = basis.anchors.to_vec();

    let mut engine = ModifiedSphericalBessel::new().with_non_finite_policy(basis.non_finite);
    engine.precompute(basis.max_order, &anchors, basis.gradients)?;
    info!(
        "radial kernels: orders 0..={} on {} anchors (gradients: {})",
        basis.max_order, anchors.len(), basis.gradients,
    );
    Ok(engine)
}

/// Ordering plans for every species pattern under the configured conventions.
pub fn triplet_plans(settings: &Settings) -> PlanTable {
    PlanTable::new(
        JkIndistinguishable(settings.triplets.jk_indistinguishable),
        CompatibilityMode(settings.triplets.compatibility_mode),
    )
}

/// Evaluate `engine` at each `(distance, scale)`, in parallel if so configured.
pub fn evaluate_radial(
    settings: &Settings,
    engine: &ModifiedSphericalBessel,
    inputs: &[(f64, f64)],
) -> FailResult<Vec<Evaluation>> {
    batch::evaluate(engine, inputs, settings.parallel)
}
