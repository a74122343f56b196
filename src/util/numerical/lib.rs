/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Utilities for numeric differentiation.
//!
//! These exist mostly so that analytic derivatives (such as the radial kernel
//! gradients) can be checked in tests and while debugging.

/// Approximation method for a numerical 1D derivative.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DerivativeKind {
    /// n-point central stencil. `n` must be odd. Only implemented for `n = 3, 5, 7, 9`.
    Stencil(u32),
}

impl Default for DerivativeKind {
    fn default() -> DerivativeKind { DerivativeKind::Stencil(5) }
}

// (offset, coeff) pairs for central first-derivative stencils.
// http://www.holoborodko.com/pavel/numerical-methods/numerical-derivative/central-differences/
const STENCIL_3: &[(f64, f64)] = &[(-1.0, -1.0), (1.0, 1.0)];
const STENCIL_5: &[(f64, f64)] = &[(-2.0, 1.0), (-1.0, -8.0), (1.0, 8.0), (2.0, -1.0)];
const STENCIL_7: &[(f64, f64)] = &[
    (-3.0, -1.0), (-2.0, 9.0), (-1.0, -45.0),
    (1.0, 45.0), (2.0, -9.0), (3.0, 1.0),
];
const STENCIL_9: &[(f64, f64)] = &[
    (-4.0, 3.0), (-3.0, -32.0), (-2.0, 168.0), (-1.0, -672.0),
    (1.0, 672.0), (2.0, -168.0), (3.0, 32.0), (4.0, -3.0),
];

/// Stencil terms together with the denominator, in units of the step.
fn first_derivative_stencil(points: u32) -> (&'static [(f64, f64)], f64) {
    match points {
        3 => (STENCIL_3, 2.0),
        5 => (STENCIL_5, 12.0),
        7 => (STENCIL_7, 60.0),
        9 => (STENCIL_9, 840.0),
        n if n < 3 || n % 2 == 0 => panic!("{}-point stencil does not exist", n),
        n => panic!("{}-point stencil is not implemented", n),
    }
}

enum Never {}

/// Compute a numerical derivative using finite differences.
pub fn slope(
    step: f64,
    kind: Option<DerivativeKind>,
    point: f64,
    mut value_fn: impl FnMut(f64) -> f64,
) -> f64 {
    try_slope::<Never, _>(step, kind, point, |x| Ok(value_fn(x)))
        .unwrap_or_else(|e| match e {})
}

/// `slope` for functions that can fail.
pub fn try_slope<E, F>(
    step: f64,
    kind: Option<DerivativeKind>,
    point: f64,
    mut value_fn: F,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let DerivativeKind::Stencil(points) = kind.unwrap_or_default();
    let (terms, denom) = first_derivative_stencil(points);

    let mut numer = 0.0;
    for &(offset, coeff) in terms {
        numer += coeff * value_fn(point + offset * step)?;
    }
    Ok(numer / (denom * step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use desckern_assert_close::assert_close;

    fn uniform(a: f64, b: f64) -> f64 { a + rand::random::<f64>() * (b - a) }

    /// Evaluates `(value, derivative)` of a polynomial with the given coefficients.
    fn poly(coeffs: &[f64], x: f64) -> (f64, f64) {
        let value = coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c);
        let deriv = coeffs.iter().enumerate().skip(1).rev()
            .fold(0.0, |acc, (k, &c)| acc * x + k as f64 * c);
        (value, deriv)
    }

    #[test]
    fn stencils_are_exact_for_low_degree_polynomials() {
        for &n in &[3, 5, 7, 9] {
            for _ in 0..10 {
                let coeffs: Vec<f64> = (0..n).map(|_| uniform(-2.0, 2.0)).collect();
                let x = uniform(-5.0, 5.0);

                let expected = poly(&coeffs, x).1;
                let actual = slope(1e-1, Some(DerivativeKind::Stencil(n)), x, |x| poly(&coeffs, x).0);
                assert_close!(rel=1e-9, abs=1e-9, expected, actual, "{}-point", n);
            }
        }
    }

    #[test]
    fn errors_are_propagated() {
        let result = try_slope(1e-3, None, 0.0, |x| if x > 0.0 { Err("right side") } else { Ok(x) });
        assert_eq!(result, Err("right side"));
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn even_stencil() {
        slope(1e-3, Some(DerivativeKind::Stencil(4)), 0.0, |x| x);
    }
}
