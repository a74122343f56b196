/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::RepeatedSpecies;

/// An ordering of the two atoms of a pair cluster.
///
/// Pairs are stored once in the neighbor list, in ascending index order; an inverted
/// permutation refers to the stored pair read backwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PairPermutation {
    first: usize,
    second: usize,
}

impl PairPermutation {
    pub const IDENTITY: Self = PairPermutation { first: 0, second: 1 };
    pub const SWAPPED: Self = PairPermutation { first: 1, second: 0 };

    /// # Panics
    ///
    /// Panics unless `(first, second)` is `(0, 1)` or `(1, 0)`.
    pub fn new(first: usize, second: usize) -> Self {
        assert!(
            first != second && first < 2 && second < 2,
            "not a valid pair permutation: ({}, {})", first, second,
        );
        PairPermutation { first, second }
    }

    pub fn leading(&self) -> usize { self.first }
    pub fn second(&self) -> usize { self.second }
    pub fn indices(&self) -> [usize; 2] { [self.first, self.second] }

    /// Whether this ordering reads the stored pair backwards.
    pub fn pair_inversion(&self) -> [bool; 1] { [self.first > self.second] }

    /// Express a stored pair direction vector in this ordering.
    pub fn flip_direction(&self, direction: [f64; 3]) -> [f64; 3] {
        match self.pair_inversion() {
            [true] => [-direction[0], -direction[1], -direction[2]],
            [false] => direction,
        }
    }
}

/// An ordering of the three atoms of a triplet cluster.
///
/// `TripletPermutation::new(1, 2, 0)` puts the cluster's second atom in the leading
/// position, its third atom second, and its first atom last.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TripletPermutation([usize; 3]);

impl TripletPermutation {
    pub const IDENTITY: Self = TripletPermutation([0, 1, 2]);

    /// # Panics
    ///
    /// Panics unless the indices are a permutation of `0, 1, 2`.
    pub fn new(first: usize, second: usize, third: usize) -> Self {
        assert!(
            first < 3 && second < 3 && third < 3
                && first != second && second != third && first != third,
            "not a valid triplet permutation: ({}, {}, {})", first, second, third,
        );
        TripletPermutation([first, second, third])
    }

    /// The three cyclic rotations, starting with the identity.
    pub fn rotations() -> [Self; 3] {
        [
            TripletPermutation([0, 1, 2]),
            TripletPermutation([1, 2, 0]),
            TripletPermutation([2, 0, 1]),
        ]
    }

    /// Every ordering of three atoms.
    pub fn all() -> [Self; 6] {
        let [a, b, c] = Self::rotations();
        [a, b, c, a.swap_jk(), b.swap_jk(), c.swap_jk()]
    }

    pub fn leading(&self) -> usize { self.0[0] }
    pub fn second(&self) -> usize { self.0[1] }
    pub fn third(&self) -> usize { self.0[2] }
    pub fn indices(&self) -> [usize; 3] { self.0 }

    /// For each pair of this ordering (leading-second, second-third, third-leading),
    /// whether it runs opposite to the stored (ascending) pair.
    pub fn pair_inversion(&self) -> [bool; 3] {
        let [i, j, k] = self.0;
        [i > j, j > k, k > i]
    }

    /// Read a triplet of per-atom values in this ordering.
    pub fn apply<T: Clone>(&self, values: &[T; 3]) -> [T; 3] {
        let [i, j, k] = self.0;
        [values[i].clone(), values[j].clone(), values[k].clone()]
    }

    /// Exchange the last two atoms.
    pub fn swap_jk(&self) -> Self {
        let [i, j, k] = self.0;
        TripletPermutation([i, k, j])
    }

    /// Apply this ordering on top of `base`, so that `a.reindex(&b).apply(x) == a.apply(&b.apply(x))`.
    pub fn reindex(&self, base: &Self) -> Self {
        TripletPermutation(self.apply(&base.0))
    }

    /// The repetition pattern seen when a triplet with `pattern` is read in this ordering.
    pub fn permute_species(&self, pattern: RepeatedSpecies) -> RepeatedSpecies {
        RepeatedSpecies::from_representation(&self.apply(&pattern.representation()))
    }
}

impl Default for TripletPermutation {
    fn default() -> Self { TripletPermutation::IDENTITY }
}
