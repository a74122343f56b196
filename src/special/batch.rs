/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Evaluating many `(distance, scale)` pairs against one precomputed engine.

use crate::{FailResult, Hyp1f1Seed, ModifiedSphericalBessel, Table};

use rayon::prelude::*;

/// Results of one `calc`, copied out of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub distance: f64,
    pub scale: f64,
    pub values: Table,
    /// Present when the engine computes gradients.
    pub gradients: Option<Table>,
}

/// Evaluate every `(distance, scale)` pair in `inputs`, in order.
///
/// Each worker gets its own clone of `template`; the template itself is not
/// modified.  The first failing `calc` (see `NonFinitePolicy`) fails the batch.
///
/// # Panics
///
/// Panics if `template` has not been precomputed.
pub fn evaluate<H: Hyp1f1Seed>(
    template: &ModifiedSphericalBessel<H>,
    inputs: &[(f64, f64)],
    parallel: bool,
) -> FailResult<Vec<Evaluation>> {
    assert!(template.is_precomputed(), "batch evaluation needs a precomputed engine");
    debug!(
        "evaluating {} radial kernels on {} anchors ({})",
        inputs.len(), template.num_anchors(),
        if parallel { "parallel" } else { "serial" },
    );

    let eval_one = |engine: &mut ModifiedSphericalBessel<H>, &(distance, scale): &(f64, f64)| -> FailResult<_> {
        engine.calc(distance, scale)?;
        Ok(Evaluation {
            distance,
            scale,
            values: engine.values().to_table(),
            gradients: match engine.computes_gradients() {
                true => Some(engine.gradients().to_table()),
                false => None,
            },
        })
    };

    if parallel {
        inputs.par_iter()
            .map_init(|| template.clone(), eval_one)
            .collect()
    } else {
        let mut engine = template.clone();
        inputs.iter()
            .map(|input| eval_one(&mut engine, input))
            .collect()
    }
}
