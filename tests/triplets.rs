/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use desckern::symmetry::{
    build_ordering_plan, classify, ordering_count, CompatibilityMode,
    JkIndistinguishable, PlanTable, RepeatedSpecies,
};
use itertools::iproduct;

const FLAGS: [bool; 2] = [false, true];

#[test]
fn every_labelling_gets_a_complete_plan() {
    let _ = env_logger::try_init();
    for (&jk, &compat) in iproduct!(&FLAGS, &FLAGS) {
        let (jk, compat) = (JkIndistinguishable(jk), CompatibilityMode(compat));
        let table = PlanTable::new(jk, compat);

        for (a, b, c) in iproduct!(0..3, 0..3, 0..3) {
            let pattern = classify(&a, &b, &c);
            assert_ne!(pattern, RepeatedSpecies::Unknown);

            let plan = table.for_species(&a, &b, &c);
            assert_eq!(plan, &build_ordering_plan(pattern, jk, compat));
            assert_eq!(plan.evaluations().count(), ordering_count(pattern, jk));
            assert!((1..=3).contains(&plan.orderings().len()));

            // every ordering starts from a distinct center
            let mut centers: Vec<_> = plan.orderings().iter().map(|e| e.ordering.leading()).collect();
            centers.sort();
            centers.dedup();
            assert_eq!(centers.len(), plan.orderings().len());

            // and visiting them keeps the species pattern intact
            let labels = [a, b, c];
            for entry in plan.orderings() {
                let [x, y, z] = entry.ordering.apply(&labels);
                assert_eq!(entry.ordering.permute_species(pattern), classify(&x, &y, &z));
            }
        }
    }
}
