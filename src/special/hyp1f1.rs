/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;

/// A confluent hypergeometric function `₁F₁(a; b; z)` with fixed parameters.
///
/// The radial kernel uses these to seed its downward recursion, with `a = n + 1` and
/// `b = 2n + 2`, at arguments `0 <= z <= 2 * ARGUMENT_SWITCH`.  Implementations
/// only need to be accurate there.
pub trait Hyp1f1Seed: Clone + Send + Sync + fmt::Debug {
    fn new(a: f64, b: f64) -> Self;

    fn evaluate(&self, z: f64) -> f64;
}

/// Kummer's series,
///
/// ```text
/// ₁F₁(a; b; z) = Σₖ (a)ₖ / (b)ₖ zᵏ / k!
/// ```
///
/// For `a, b > 0` and `z >= 0` every term is positive, so the sum does not suffer
/// from cancellation; it is simply summed until the terms stop mattering.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyp1f1 {
    a: f64,
    b: f64,
}

impl Hyp1f1 {
    const MAX_TERMS: u32 = 10_000;
}

impl Hyp1f1Seed for Hyp1f1 {
    fn new(a: f64, b: f64) -> Self {
        assert!(a > 0.0 && b > 0.0, "Hyp1f1 needs positive parameters (a = {}, b = {})", a, b);
        Hyp1f1 { a, b }
    }

    fn evaluate(&self, z: f64) -> f64 {
        let mut term = 1.0;
        let mut sum = 1.0;
        for k in 0..Self::MAX_TERMS {
            let k = f64::from(k);
            term *= (self.a + k) / (self.b + k) * z / (k + 1.0);
            sum += term;
            // while the terms are still growing, term > sum / (k + 1), so this
            // cannot trigger before the peak
            if term.abs() <= f64::EPSILON * sum.abs() {
                break;
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::uniform;

    #[test]
    fn elementary_cases() {
        for _ in 0..20 {
            let z = uniform(0.0, 100.0);
            // 1F1(a; a; z) = e^z
            let a = uniform(0.5, 20.0);
            assert_close!(rel=1e-13, Hyp1f1::new(a, a).evaluate(z), z.exp());
            // 1F1(1; 2; z) = (e^z - 1) / z
            assert_close!(rel=1e-13, Hyp1f1::new(1.0, 2.0).evaluate(z), z.exp_m1() / z);
        }
    }

    #[test]
    fn zero_argument() {
        assert_eq!(Hyp1f1::new(3.0, 8.0).evaluate(0.0), 1.0);
    }

    #[test]
    fn first_spherical_bessel() {
        // i_1(z) = (z/3) e^{-z} 1F1(2; 4; 2z) = (z cosh z - sinh z) / z^2
        let hyp = Hyp1f1::new(2.0, 4.0);
        for &z in &[0.1f64, 1.3, 7.0, 25.0, 50.0] {
            let expected = (z * z.cosh() - z.sinh()) / (z * z);
            assert_close!(rel=1e-12, z / 3.0 * (-z).exp() * hyp.evaluate(2.0 * z), expected);
        }
    }

    #[test]
    #[should_panic(expected = "positive parameters")]
    fn bad_parameters() {
        Hyp1f1::new(1.0, -2.0);
    }
}
