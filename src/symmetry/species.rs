/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::unknown_pattern;

/// The pattern of repeated species in a triplet `(i, j, k)`.
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, enum_map::Enum)]
pub enum RepeatedSpecies {
    /// Has not been evaluated yet.
    Unknown,
    /// All three species differ.
    Not,
    /// All three atoms share one species.
    All,
    /// `i` and `j` share a species.
    FirstTwo,
    /// `j` and `k` share a species.
    SecondTwo,
    /// `i` and `k` share a species.
    OuterTwo,
}

impl Default for RepeatedSpecies {
    fn default() -> Self { RepeatedSpecies::Unknown }
}

/// Whether a three-body term is symmetric under exchange of its last two atoms,
/// i.e. whether evaluating `ijk` and `ikj` gives twice the evaluation of `ijk`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JkIndistinguishable(pub bool);

/// Reproduces the older counting convention, in which a triplet whose last two atoms
/// share a species is only counted once.
///
/// This only exists for comparison against results produced under that convention.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CompatibilityMode(pub bool);

impl RepeatedSpecies {
    /// Every pattern that `classify` can produce.
    pub const KNOWN: [RepeatedSpecies; 5] = [
        RepeatedSpecies::Not,
        RepeatedSpecies::All,
        RepeatedSpecies::FirstTwo,
        RepeatedSpecies::SecondTwo,
        RepeatedSpecies::OuterTwo,
    ];

    /// Classify the equality structure of three species labels.
    ///
    /// `All` takes precedence over the single-pair patterns.
    pub fn classify<T: Eq + ?Sized>(a: &T, b: &T, c: &T) -> Self {
        if a == b {
            match b == c {
                true => RepeatedSpecies::All,
                false => RepeatedSpecies::FirstTwo,
            }
        } else if a == c {
            RepeatedSpecies::OuterTwo
        } else if b == c {
            RepeatedSpecies::SecondTwo
        } else {
            RepeatedSpecies::Not
        }
    }

    pub fn from_representation<T: Eq>(labels: &[T; 3]) -> Self {
        RepeatedSpecies::classify(&labels[0], &labels[1], &labels[2])
    }

    /// Smallest labels (in lexicographic order) that reproduce this pattern.
    ///
    /// # Panics
    ///
    /// Panics on `Unknown`.
    pub fn representation(self) -> [u8; 3] {
        match self {
            RepeatedSpecies::Not => [0, 1, 2],
            RepeatedSpecies::All => [0, 0, 0],
            RepeatedSpecies::FirstTwo => [0, 0, 1],
            RepeatedSpecies::SecondTwo => [0, 1, 1],
            RepeatedSpecies::OuterTwo => [0, 1, 0],
            RepeatedSpecies::Unknown => unknown_pattern(),
        }
    }

    /// Do the last two atoms share a species?
    pub fn jk_same_species(self) -> bool {
        let [_, j, k] = self.representation();
        j == k
    }

    /// Number of times a cluster with this pattern has to be evaluated.
    ///
    /// A triplet must be evaluated in every ordering whose leading atom could play the
    /// role of the center.  If the term distinguishes `ijk` from `ikj`, each of those
    /// orderings is evaluated a second time with `j` and `k` swapped.
    pub fn num_orderings(self, jk_indistinguishable: JkIndistinguishable) -> usize {
        let per_center = match jk_indistinguishable {
            JkIndistinguishable(true) => 1,
            JkIndistinguishable(false) => 2,
        };
        let num_centers = match self {
            RepeatedSpecies::Not | RepeatedSpecies::SecondTwo => 1,
            RepeatedSpecies::FirstTwo | RepeatedSpecies::OuterTwo => 2,
            RepeatedSpecies::All => 3,
            RepeatedSpecies::Unknown => unknown_pattern(),
        };
        num_centers * per_center
    }
}

/// Free-function form of [`RepeatedSpecies::classify`].
pub fn classify<T: Eq + ?Sized>(a: &T, b: &T, c: &T) -> RepeatedSpecies {
    RepeatedSpecies::classify(a, b, c)
}

/// Free-function form of [`RepeatedSpecies::num_orderings`].
pub fn ordering_count(pattern: RepeatedSpecies, jk_indistinguishable: JkIndistinguishable) -> usize {
    pattern.num_orderings(jk_indistinguishable)
}
