/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Checks that run after deserialization.
//!
//! The radial kernel engine checks its inputs again in `precompute`; doing it here
//! as well puts the error at config-reading time, with the config's names in it.

use crate::settings::*;
use crate::FailResult;

use desckern_special::MAX_ORDER;

impl Settings {
    pub fn validate(self) -> FailResult<ValidatedSettings> {
        self.radial_basis.validate()?;
        Ok(ValidatedSettings(self))
    }
}

impl RadialBasis {
    fn validate(&self) -> FailResult<()> {
        ensure!(
            self.max_order <= MAX_ORDER,
            "radial-basis.max-order: {} exceeds the supported maximum of {}",
            self.max_order, MAX_ORDER,
        );
        self.anchors.validate()
    }
}

impl Anchors {
    fn validate(&self) -> FailResult<()> {
        match self {
            Anchors::Explicit(anchors) => {
                ensure!(!anchors.is_empty(), "radial-basis.anchors.explicit: list is empty");
                for (i, &x) in anchors.iter().enumerate() {
                    ensure!(
                        x.is_finite() && x >= 0.0,
                        "radial-basis.anchors.explicit[{}]: not a finite non-negative number ({})", i, x,
                    );
                }
                if let Some(i) = (1..anchors.len()).find(|&i| anchors[i] < anchors[i - 1]) {
                    bail!("radial-basis.anchors.explicit[{}]: anchors must be in ascending order", i);
                }
            },
            Anchors::Uniform(UniformAnchors { count, cutoff }) => {
                ensure!(*count >= 1, "radial-basis.anchors.uniform.count: must be at least 1");
                ensure!(
                    cutoff.is_finite() && *cutoff > 0.0,
                    "radial-basis.anchors.uniform.cutoff: must be finite and positive ({})", cutoff,
                );
            },
        }
        Ok(())
    }
}
