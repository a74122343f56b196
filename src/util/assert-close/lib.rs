/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! `assert_close!` and friends.
//!
//! ```
//! # #[macro_use] extern crate desckern_assert_close;
//! # fn main() {
//! assert_close!(1.0, 1.0 + 1e-12);
//! assert_close!(rel=1e-6, abs=1e-12, vec![1.0, 2.0], vec![1.0, 2.0 + 1e-8]);
//! # }
//! ```

#[macro_use]
extern crate failure;

use std::fmt;

/// Relative tolerance used when none is given.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Asserts that two values are equal up to a relative and absolute tolerance.
///
/// Tolerances are given as leading `rel=` and `abs=` arguments (in either order).
/// Anything after the two compared values is used as a format string for the panic.
#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {
        $crate::__assert_close_impl!{@parse [$($t)*] [[@rel $crate::DEFAULT_REL_TOL] [@abs 0.0]]}
    };
}

/// `assert_close!` that is only checked when `debug_assertions` are on.
#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            $crate::assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __assert_close_impl {
    (@parse [rel=$tol:expr, $($rest:tt)*] [$($tols:tt)*]) => {
        $crate::__assert_close_impl!(@parse [$($rest)*] [$($tols)* [@rel $tol]])
    };
    (@parse [abs=$tol:expr, $($rest:tt)*] [$($tols:tt)*]) => {
        $crate::__assert_close_impl!(@parse [$($rest)*] [$($tols)* [@abs $tol]])
    };
    (@parse [$a:expr, $b:expr $(,)*] $tols:tt) => {
        $crate::__assert_close_impl!(@emit $tols [$a, $b] ["values are not close"])
    };
    (@parse [$a:expr, $b:expr, $($fmt:tt)+] $tols:tt) => {
        $crate::__assert_close_impl!(@emit $tols [$a, $b] [$($fmt)+])
    };
    (@emit [$($tol:tt)*] [$a:expr, $b:expr] [$($fmt:tt)+]) => {
        #[allow(unused_mut, unused_assignments)]
        {
            let (a, b) = (&$a, &$b);
            let mut rel = 0.0;
            let mut abs = 0.0;
            $( $crate::__assert_close_impl!(@set [rel, abs] $tol); )*

            let tol = $crate::Tolerances { rel, abs };
            if let Err(e) = $crate::CheckClose::check_close(a, b, tol) {
                panic!("{} ({:?})\n{}", format!($($fmt)+), tol, e);
            }
        }
    };
    (@set [$rel:ident, $abs:ident] [@rel $tol:expr]) => { $rel = $tol; };
    (@set [$rel:ident, $abs:ident] [@abs $tol:expr]) => { $abs = $tol; };
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub rel: f64,
    pub abs: f64,
}

/// `math.isclose` from Python.
///
/// Equal infinities compare close; NaN is never close to anything.
pub fn is_close(a: f64, b: f64, Tolerances { rel, abs }: Tolerances) -> bool {
    assert!(rel >= 0.0 && abs >= 0.0, "negative tolerance");
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

/// The first pair of elements that failed a comparison.
#[derive(Debug, Fail)]
pub struct CheckCloseError {
    /// Position of the failing element when comparing sequences.
    pub index: Option<usize>,
    pub values: (f64, f64),
    pub tol: Tolerances,
}

impl fmt::Display for CheckCloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.index {
            writeln!(f, "first mismatch at index {}", index)?;
        }
        write!(f, "  left: {:?}\n right: {:?}", self.values.0, self.values.1)
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError { index: None, values: (*self, *other), tol }),
        }
    }
}

impl<'a, A: ?Sized + CheckClose<B>, B: ?Sized> CheckClose<&'a B> for &'a A {
    fn check_close(&self, other: &&'a B, tol: Tolerances) -> Result<(), CheckCloseError> {
        (**self).check_close(*other, tol)
    }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError> {
        assert_eq!(self.len(), other.len(), "compared sequences differ in length");
        for (index, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| CheckCloseError {
                // report the outermost position for nested sequences
                index: Some(index),
                ..e
            })?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError> {
        self[..].check_close(&other[..], tol)
    }
}

impl<T: CheckClose> CheckClose<[T]> for Vec<T> {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError> {
        self[..].check_close(other, tol)
    }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    fn check_close(&self, other: &[T; N], tol: Tolerances) -> Result<(), CheckCloseError> {
        self[..].check_close(&other[..], tol)
    }
}
