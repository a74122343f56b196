/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{RepeatedSpecies, TripletPermutation, JkIndistinguishable, CompatibilityMode};
use crate::unknown_pattern;

use enum_map::EnumMap;

/// One ordering in which a triplet cluster must be evaluated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlanEntry {
    pub ordering: TripletPermutation,
    /// `ordering.pair_inversion()`; tells which stored pair vectors must be negated.
    pub inverted: [bool; 3],
}

impl PlanEntry {
    fn new(ordering: TripletPermutation) -> Self {
        PlanEntry { ordering, inverted: ordering.pair_inversion() }
    }
}

/// The orderings needed to evaluate a triplet exactly once per physically distinct
/// configuration, and the weight to multiply each evaluation by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingPlan {
    // one, two or three entries, one per atom that may act as the center
    entries: Vec<PlanEntry>,
    weight: u32,
    jk_indistinguishable: JkIndistinguishable,
}

impl OrderingPlan {
    /// The orderings, one per atom that can act as the center.
    pub fn orderings(&self) -> &[PlanEntry] { &self.entries }

    /// Multiplicity of every evaluation; either 1 or 2.
    pub fn weight(&self) -> u32 { self.weight }

    pub fn jk_indistinguishable(&self) -> JkIndistinguishable { self.jk_indistinguishable }

    /// All evaluations to perform.
    ///
    /// When `j` and `k` are distinguishable, each ordering is followed by its
    /// `j`/`k`-swapped counterpart; otherwise this is just `orderings()`.
    /// The length always equals `ordering_count` for the plan's pattern.
    pub fn evaluations(&self) -> impl Iterator<Item=PlanEntry> + '_ {
        let with_swap = !self.jk_indistinguishable.0;
        self.entries.iter().flat_map(move |&entry| {
            let swapped = match with_swap {
                true => Some(PlanEntry::new(entry.ordering.swap_jk())),
                false => None,
            };
            std::iter::once(entry).chain(swapped)
        })
    }

    /// `weight * evaluations().count()`.
    pub fn total_weight(&self) -> u32 {
        self.weight * self.evaluations().count() as u32
    }
}

// canonical orderings per pattern; the leading atom runs over all atoms
// sharing the center's species
const ORDERINGS_ONE: &[[usize; 3]] = &[[0, 1, 2]];
const ORDERINGS_FIRST_TWO: &[[usize; 3]] = &[[0, 1, 2], [1, 0, 2]];
const ORDERINGS_OUTER_TWO: &[[usize; 3]] = &[[0, 1, 2], [2, 1, 0]];
const ORDERINGS_ALL: &[[usize; 3]] = &[[0, 1, 2], [1, 2, 0], [2, 0, 1]];

/// Build the ordering plan for a cluster stored in canonical order.
///
/// # Panics
///
/// Panics if `pattern` is `Unknown`.
pub fn build_ordering_plan(
    pattern: RepeatedSpecies,
    jk_indistinguishable: JkIndistinguishable,
    compatibility_mode: CompatibilityMode,
) -> OrderingPlan {
    build_ordering_plan_for(TripletPermutation::IDENTITY, pattern, jk_indistinguishable, compatibility_mode)
}

/// Build the ordering plan for a cluster that is itself read through `base`.
///
/// Entries are expressed in terms of the stored cluster, so their inversion flags
/// refer to the stored pairs.
///
/// # Panics
///
/// Panics if `pattern` is `Unknown`.
pub fn build_ordering_plan_for(
    base: TripletPermutation,
    pattern: RepeatedSpecies,
    jk_indistinguishable: JkIndistinguishable,
    compatibility_mode: CompatibilityMode,
) -> OrderingPlan {
    let canonical = match pattern {
        RepeatedSpecies::Not |
        RepeatedSpecies::SecondTwo => ORDERINGS_ONE,
        RepeatedSpecies::FirstTwo => ORDERINGS_FIRST_TWO,
        RepeatedSpecies::OuterTwo => ORDERINGS_OUTER_TWO,
        RepeatedSpecies::All => ORDERINGS_ALL,
        RepeatedSpecies::Unknown => unknown_pattern(),
    };

    // A triplet ABB (or BBB) stands for both AB₁B₂ and AB₂B₁.  The older convention
    // ignored this.
    let count_same_species = {
        jk_indistinguishable.0
            && pattern.jk_same_species()
            && !compatibility_mode.0
    };

    let entries = canonical.iter()
        .map(|&[i, j, k]| PlanEntry::new(TripletPermutation::new(i, j, k).reindex(&base)))
        .collect();

    let plan = OrderingPlan {
        entries,
        weight: if count_same_species { 2 } else { 1 },
        jk_indistinguishable,
    };
    debug_assert_eq!(plan.evaluations().count(), pattern.num_orderings(jk_indistinguishable));
    plan
}

/// Ordering plans for all patterns under one choice of flags.
#[derive(Debug, Clone)]
pub struct PlanTable {
    jk_indistinguishable: JkIndistinguishable,
    compatibility_mode: CompatibilityMode,
    plans: EnumMap<RepeatedSpecies, Option<OrderingPlan>>,
}

impl PlanTable {
    pub fn new(
        jk_indistinguishable: JkIndistinguishable,
        compatibility_mode: CompatibilityMode,
    ) -> Self {
        let build = |pattern| Some(build_ordering_plan(pattern, jk_indistinguishable, compatibility_mode));
        let plans = enum_map! {
            RepeatedSpecies::Unknown => None,
            RepeatedSpecies::Not => build(RepeatedSpecies::Not),
            RepeatedSpecies::All => build(RepeatedSpecies::All),
            RepeatedSpecies::FirstTwo => build(RepeatedSpecies::FirstTwo),
            RepeatedSpecies::SecondTwo => build(RepeatedSpecies::SecondTwo),
            RepeatedSpecies::OuterTwo => build(RepeatedSpecies::OuterTwo),
        };
        trace!(
            "built triplet plans ({:?}, {:?})",
            jk_indistinguishable, compatibility_mode,
        );
        PlanTable { jk_indistinguishable, compatibility_mode, plans }
    }

    pub fn jk_indistinguishable(&self) -> JkIndistinguishable { self.jk_indistinguishable }
    pub fn compatibility_mode(&self) -> CompatibilityMode { self.compatibility_mode }

    /// # Panics
    ///
    /// Panics if `pattern` is `Unknown`.
    pub fn get(&self, pattern: RepeatedSpecies) -> &OrderingPlan {
        match &self.plans[pattern] {
            Some(plan) => plan,
            None => unknown_pattern(),
        }
    }

    /// Plan for a cluster whose atoms have the given species.
    pub fn for_species<T: Eq + ?Sized>(&self, a: &T, b: &T, c: &T) -> &OrderingPlan {
        self.get(RepeatedSpecies::classify(a, b, c))
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const INDIST: JkIndistinguishable = JkIndistinguishable(true);
    const DIST: JkIndistinguishable = JkIndistinguishable(false);
    const MODERN: CompatibilityMode = CompatibilityMode(false);
    const LEGACY: CompatibilityMode = CompatibilityMode(true);

    // Brute force: the orderings of the three atoms that leave the species labels unchanged.
    fn label_preserving(pattern: RepeatedSpecies) -> HashSet<TripletPermutation> {
        let labels = pattern.representation();
        TripletPermutation::all().iter().cloned()
            .filter(|p| p.apply(&labels) == labels)
            .collect()
    }

    // Brute force: the orderings whose leading atom has the center's species.
    fn center_preserving(pattern: RepeatedSpecies) -> HashSet<TripletPermutation> {
        let labels = pattern.representation();
        TripletPermutation::all().iter().cloned()
            .filter(|p| labels[p.leading()] == labels[0])
            .collect()
    }

    fn unique(entries: impl IntoIterator<Item=TripletPermutation>) -> HashSet<TripletPermutation> {
        let vec: Vec<_> = entries.into_iter().collect();
        let set: HashSet<_> = vec.iter().cloned().collect();
        assert_eq!(vec.len(), set.len(), "duplicate orderings: {:?}", vec);
        set
    }

    #[test]
    fn all_same_species() {
        let plan = build_ordering_plan(RepeatedSpecies::All, INDIST, MODERN);
        assert_eq!(ordering_count_of(&plan), 3);
        assert_eq!(plan.weight(), 2);
        let orderings: Vec<_> = plan.orderings().iter().map(|e| e.ordering).collect();
        assert_eq!(orderings, TripletPermutation::rotations().to_vec());
    }

    fn ordering_count_of(plan: &OrderingPlan) -> usize { plan.evaluations().count() }

    #[test]
    fn indistinguishable_covers_label_preserving_orderings() {
        let mut total = 0;
        for &pattern in &RepeatedSpecies::KNOWN {
            let plan = build_ordering_plan(pattern, INDIST, MODERN);
            let expected = label_preserving(pattern);

            // every evaluation stands in for itself, and (with weight 2) for its j/k swap
            let covered = unique(plan.evaluations().flat_map(|e| match plan.weight() {
                1 => vec![e.ordering],
                2 => vec![e.ordering, e.ordering.swap_jk()],
                w => panic!("bad weight {}", w),
            }));
            assert_eq!(covered, expected, "{:?}", pattern);
            assert_eq!(plan.total_weight() as usize, expected.len(), "{:?}", pattern);
            total += plan.total_weight();
        }
        // 1 + 2 + 2 + 2 + 6
        assert_eq!(total, 13);
    }

    #[test]
    fn distinguishable_covers_center_preserving_orderings() {
        for &compat in &[MODERN, LEGACY] {
            let mut total = 0;
            for &pattern in &RepeatedSpecies::KNOWN {
                let plan = build_ordering_plan(pattern, DIST, compat);
                let expected = center_preserving(pattern);

                assert_eq!(plan.weight(), 1);
                assert_eq!(unique(plan.evaluations().map(|e| e.ordering)), expected, "{:?}", pattern);
                assert_eq!(ordering_count_of(&plan), pattern.num_orderings(DIST));
                total += plan.total_weight();
            }
            // 2 + 2 + 4 + 4 + 6
            assert_eq!(total, 18);
        }
    }

    #[test]
    fn legacy_counts_jk_pairs_once() {
        let mut total = 0;
        for &pattern in &RepeatedSpecies::KNOWN {
            let plan = build_ordering_plan(pattern, INDIST, LEGACY);
            assert_eq!(plan.weight(), 1);

            // one representative per {ijk, ikj} class of label-preserving orderings
            let classes: HashSet<_> = label_preserving(pattern).into_iter()
                .map(|p| std::cmp::min(p.indices(), p.swap_jk().indices()))
                .collect();
            assert_eq!(plan.orderings().len(), classes.len(), "{:?}", pattern);
            total += plan.total_weight();
        }
        assert_eq!(total, 9);
    }

    #[test]
    fn weights() {
        for &pattern in &RepeatedSpecies::KNOWN {
            let doubled = pattern == RepeatedSpecies::All || pattern == RepeatedSpecies::SecondTwo;
            let expected = if doubled { 2 } else { 1 };
            assert_eq!(build_ordering_plan(pattern, INDIST, MODERN).weight(), expected);
            assert_eq!(build_ordering_plan(pattern, INDIST, LEGACY).weight(), 1);
            assert_eq!(build_ordering_plan(pattern, DIST, MODERN).weight(), 1);
        }
    }

    #[test]
    fn entries_carry_inversion_flags() {
        for &jk in &[INDIST, DIST] {
            let plan = build_ordering_plan(RepeatedSpecies::FirstTwo, jk, MODERN);
            for entry in plan.evaluations() {
                assert_eq!(entry.inverted, entry.ordering.pair_inversion());
            }
        }
        let plan = build_ordering_plan(RepeatedSpecies::FirstTwo, INDIST, MODERN);
        assert_eq!(plan.orderings()[1].ordering, TripletPermutation::new(1, 0, 2));
        assert_eq!(plan.orderings()[1].inverted, [true, false, true]);
    }

    #[test]
    fn plan_relative_to_base() {
        let base = TripletPermutation::new(2, 0, 1);
        let plan = build_ordering_plan_for(base, RepeatedSpecies::OuterTwo, INDIST, MODERN);
        let orderings: Vec<_> = plan.orderings().iter().map(|e| e.ordering.indices()).collect();
        assert_eq!(orderings, vec![[2, 0, 1], [1, 0, 2]]);
        assert_eq!(plan.orderings()[1].inverted, [true, false, true]);
    }

    #[test]
    fn plans_are_deterministic() {
        for &pattern in &RepeatedSpecies::KNOWN {
            for &jk in &[INDIST, DIST] {
                for &compat in &[MODERN, LEGACY] {
                    assert_eq!(
                        build_ordering_plan(pattern, jk, compat),
                        build_ordering_plan(pattern, jk, compat),
                    );
                }
            }
        }
    }

    #[test]
    fn table_lookup() {
        let table = PlanTable::new(INDIST, MODERN);
        for &pattern in &RepeatedSpecies::KNOWN {
            assert_eq!(table.get(pattern), &build_ordering_plan(pattern, INDIST, MODERN));
        }
        assert_eq!(table.for_species("H", "C", "C").weight(), 2);
        assert_eq!(table.for_species("C", "H", "C").orderings().len(), 2);
    }

    #[test]
    #[should_panic(expected = "Unknown")]
    fn table_rejects_unknown() {
        PlanTable::new(INDIST, MODERN).get(RepeatedSpecies::Unknown);
    }

    #[test]
    #[should_panic(expected = "Unknown")]
    fn build_rejects_unknown() {
        build_ordering_plan(RepeatedSpecies::Unknown, DIST, LEGACY);
    }
}
