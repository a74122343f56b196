/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Radial kernels built from modified spherical Bessel functions of the first kind.
//!
//! For a neighbor at distance `r`, a Gaussian width parameter `a` and an anchor
//! point `x`, the kernel of order `n` is
//!
//! ```text
//! f_n(x) = exp(-a r²) exp(-a x²) i_n(2 a r x)
//! ```
//!
//! The product is well-behaved even where its factors are not, so it is never
//! formed from the factors directly.  Small and moderate arguments `z = 2 a r x`
//! use a downward recursion seeded from Kummer's function, and large arguments use
//! an upward recursion whose starting values fold the exponential prefactor into
//! two Gaussians.

use crate::{FailResult, Hyp1f1, Hyp1f1Seed, TableRef};

use std::f64::consts::PI;
use std::ops::Range;

/// Arguments at or below this use the downward recursion.
pub const ARGUMENT_SWITCH: f64 = 50.0;

/// Computed values below this are stored as exactly zero.
pub const VALUE_FLOOR: f64 = 1e-100;

/// Largest `max_order` accepted by `precompute`.
///
/// The upward recursion loses accuracy once the order grows past the argument.
/// Up to this order (plus one for gradients) it still agrees with the downward
/// recursion at `ARGUMENT_SWITCH` to near machine precision.
pub const MAX_ORDER: usize = 24;

/// What `calc` does when it produces an infinity or NaN.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "kebab-case"))]
pub enum NonFinitePolicy {
    /// Abort the program.
    Panic,
    /// Store zero in place of the bad value and log a warning.
    Zero,
    /// Return an error from `calc`.
    Error,
}

impl Default for NonFinitePolicy {
    fn default() -> Self { NonFinitePolicy::Error }
}

/// Seed for one of the two highest orders of the downward recursion.
#[derive(Debug, Clone)]
struct Seed<H> {
    order: usize,
    /// `1 / Γ(order + 3/2)`
    inv_gamma: f64,
    hyp1f1: H,
}

impl<H: Hyp1f1Seed> Seed<H> {
    fn new(order: usize) -> Self {
        let n = order as f64;
        // 1/Γ(3/2) = 2/√π, and Γ(x + 1) = x Γ(x)
        let inv_gamma = (1..=order).fold(2.0 / PI.sqrt(), |acc, k| acc / (k as f64 + 0.5));
        Seed { order, inv_gamma, hyp1f1: H::new(n + 1.0, 2.0 * n + 2.0) }
    }

    /// `i_n(z) / zⁿ`
    ///
    /// Uses `i_n(z) = √π/2 (z/2)ⁿ / Γ(n + 3/2) e^{-z} ₁F₁(n + 1; 2n + 2; 2z)`.
    fn scaled_bessel(&self, z: f64) -> f64 {
        0.5 * PI.sqrt()
            * self.inv_gamma
            * 0.5f64.powi(self.order as i32)
            * (-z).exp()
            * self.hyp1f1.evaluate(2.0 * z)
    }
}

/// Computes radial kernels of orders `0..=max_order` at a fixed list of anchors.
///
/// Usage follows a two-phase contract.  `precompute` fixes the orders and anchors
/// and sizes the output tables; after that, each call to `calc` overwrites the
/// tables for a new distance and width.  One engine is not meant to be shared
/// between threads while calculating; clone it instead.
#[derive(Debug, Clone)]
pub struct ModifiedSphericalBessel<H = Hyp1f1> {
    anchors: Vec<f64>,
    max_order: usize,
    // one more than max_order + 1 when gradients need f_{n+1}
    num_orders: usize,
    compute_gradients: bool,
    non_finite: NonFinitePolicy,
    precomputed: bool,

    // column-major; column `n` holds order `n` for every anchor
    values: Vec<f64>,
    gradients: Vec<f64>,

    seeds: Vec<Seed<H>>,
    // per-anchor scratch
    args: Vec<f64>,
    scaled: Vec<f64>,
}

impl<H: Hyp1f1Seed> Default for ModifiedSphericalBessel<H> {
    fn default() -> Self {
        ModifiedSphericalBessel {
            anchors: vec![],
            max_order: 0,
            num_orders: 0,
            compute_gradients: false,
            non_finite: NonFinitePolicy::default(),
            precomputed: false,
            values: vec![],
            gradients: vec![],
            seeds: vec![],
            args: vec![],
            scaled: vec![],
        }
    }
}

impl ModifiedSphericalBessel<Hyp1f1> {
    pub fn new() -> Self { Default::default() }
}

impl<H: Hyp1f1Seed> ModifiedSphericalBessel<H> {
    pub fn with_non_finite_policy(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    pub fn set_non_finite_policy(&mut self, policy: NonFinitePolicy) {
        self.non_finite = policy;
    }

    pub fn non_finite_policy(&self) -> NonFinitePolicy { self.non_finite }

    /// Fix the orders and anchors for subsequent calls to `calc`.
    ///
    /// Anchors must be finite, non-negative, and sorted in ascending order.
    /// On error, the engine is left exactly as it was.
    pub fn precompute(
        &mut self,
        max_order: usize,
        anchors: &[f64],
        compute_gradients: bool,
    ) -> FailResult<()> {
        ensure!(!anchors.is_empty(), "radial kernel needs at least one anchor");
        ensure!(
            max_order <= MAX_ORDER,
            "max_order {} exceeds the supported maximum of {}", max_order, MAX_ORDER,
        );
        for (i, &x) in anchors.iter().enumerate() {
            ensure!(x.is_finite() && x >= 0.0, "anchor {} is not a finite non-negative number: {}", i, x);
        }
        if let Some(i) = (1..anchors.len()).find(|&i| anchors[i] < anchors[i - 1]) {
            bail!(
                "anchors must be sorted in ascending order (anchor {} = {} follows {})",
                i, anchors[i], anchors[i - 1],
            );
        }

        let num_anchors = anchors.len();
        let num_orders = max_order + 1 + compute_gradients as usize;

        self.anchors.clear();
        self.anchors.extend_from_slice(anchors);
        self.max_order = max_order;
        self.num_orders = num_orders;
        self.compute_gradients = compute_gradients;

        self.values.clear();
        self.values.resize(num_anchors * num_orders, 0.0);
        self.gradients.clear();
        if compute_gradients {
            self.gradients.resize(num_anchors * (max_order + 1), 0.0);
        }
        self.args.clear();
        self.args.resize(num_anchors, 0.0);
        self.scaled.clear();
        self.scaled.resize(num_orders, 0.0);

        // a lone order 0 has a closed form and needs no seeds
        self.seeds = match num_orders {
            1 => vec![],
            _ => (num_orders - 2..num_orders).map(Seed::new).collect(),
        };

        debug!(
            "radial kernel: {} anchors in [{}, {}], orders 0..={} ({} computed), gradients: {}",
            num_anchors, anchors[0], anchors[num_anchors - 1],
            max_order, num_orders, compute_gradients,
        );
        self.precomputed = true;
        Ok(())
    }

    /// Compute kernels (and gradients, if requested) for one distance and width.
    ///
    /// # Panics
    ///
    /// Panics if `precompute` has not succeeded yet, if `distance` is negative or
    /// non-finite, or if `scale` is not a finite positive number.
    pub fn calc(&mut self, distance: f64, scale: f64) -> FailResult<()> {
        assert!(self.precomputed, "ModifiedSphericalBessel::calc called before precompute");
        assert!(
            distance.is_finite() && distance >= 0.0,
            "distance must be finite and non-negative, got {}", distance,
        );
        assert!(scale.is_finite() && scale > 0.0, "scale must be finite and positive, got {}", scale);

        let num_anchors = self.anchors.len();
        self.set_arguments(distance, scale);

        if self.num_orders == 1 {
            self.order_zero(distance, scale);
        } else {
            // anchors are sorted, and so are the arguments
            let num_down = self.args.iter().take_while(|&&z| z <= ARGUMENT_SWITCH).count();
            trace!(
                "radial kernel at r = {}, a = {}: {} downward, {} upward",
                distance, scale, num_down, num_anchors - num_down,
            );
            self.downward_recursion(distance, scale, 0..num_down);
            self.upward_recursion(distance, scale, num_down..num_anchors);
        }

        enforce_finite(self.non_finite, "value", &mut self.values, num_anchors, distance, scale)?;
        for value in &mut self.values {
            if *value < VALUE_FLOOR {
                *value = 0.0;
            }
        }

        if self.compute_gradients {
            self.gradient_recursion(distance, scale);
            enforce_finite(self.non_finite, "gradient", &mut self.gradients, num_anchors, distance, scale)?;
        }
        Ok(())
    }

    /// Kernel values for orders `0..=max_order`, as of the last `calc`.
    pub fn values(&self) -> TableRef<'_> {
        assert!(self.precomputed, "ModifiedSphericalBessel::values called before precompute");
        let num_anchors = self.anchors.len();
        let len = num_anchors * (self.max_order + 1);
        TableRef::new(&self.values[..len], num_anchors, self.max_order + 1)
    }

    /// Derivatives of the kernel values with respect to the distance.
    ///
    /// # Panics
    ///
    /// Panics unless gradients were requested in `precompute`.
    pub fn gradients(&self) -> TableRef<'_> {
        assert!(self.compute_gradients, "radial kernel gradients were not requested in precompute");
        TableRef::new(&self.gradients, self.anchors.len(), self.max_order + 1)
    }

    pub fn max_order(&self) -> usize { self.max_order }
    pub fn num_anchors(&self) -> usize { self.anchors.len() }
    pub fn anchors(&self) -> &[f64] { &self.anchors }
    pub fn computes_gradients(&self) -> bool { self.compute_gradients }
    pub fn is_precomputed(&self) -> bool { self.precomputed }
}

// Regimes.  Each writes every order of `num_orders` for the anchors it is given.
impl<H: Hyp1f1Seed> ModifiedSphericalBessel<H> {
    pub(crate) fn set_arguments(&mut self, distance: f64, scale: f64) {
        for (z, &x) in self.args.iter_mut().zip(&self.anchors) {
            *z = 2.0 * scale * distance * x;
        }
    }

    fn order_zero(&mut self, distance: f64, scale: f64) {
        for (row, &x) in self.anchors.iter().enumerate() {
            let z = self.args[row];
            self.values[row] = if z == 0.0 {
                (-scale * (distance * distance + x * x)).exp()
            } else if z <= ARGUMENT_SWITCH {
                // exp(-a (x + r)²) exp(2z) = exp(-a (x - r)²)
                0.5 * (-scale * (x + distance).powi(2)).exp() * (2.0 * z).exp_m1() / z
            } else {
                let near = (-scale * (x - distance).powi(2)).exp();
                let far = (-scale * (x + distance).powi(2)).exp();
                0.5 * (near - far) / z
            };
        }
    }

    /// Recurses on `g_n = i_n(z) / zⁿ`, which is finite at `z = 0` and does not
    /// underflow for high orders:
    ///
    /// ```text
    /// g_n = z² g_{n+2} + (2n + 3) g_{n+1}
    /// ```
    pub(crate) fn downward_recursion(&mut self, distance: f64, scale: f64, rows: Range<usize>) {
        let num_anchors = self.anchors.len();
        let top = self.num_orders - 1;
        for row in rows {
            let x = self.anchors[row];
            let z = self.args[row];
            let efac = (-scale * distance * distance).exp() * (-scale * x * x).exp();

            for seed in &self.seeds {
                self.scaled[seed.order] = seed.scaled_bessel(z);
            }
            for n in (0..top - 1).rev() {
                self.scaled[n] = z * z * self.scaled[n + 2] + (2 * n + 3) as f64 * self.scaled[n + 1];
            }

            let mut z_pow = 1.0;
            for n in 0..self.num_orders {
                self.values[n * num_anchors + row] = efac * z_pow * self.scaled[n];
                z_pow *= z;
            }
        }
    }

    /// ```text
    /// f_n = f_{n-2} - (2n - 1)/z f_{n-1}
    /// ```
    ///
    /// Only stable while `z` is large compared to the orders involved.
    pub(crate) fn upward_recursion(&mut self, distance: f64, scale: f64, rows: Range<usize>) {
        let num_anchors = self.anchors.len();
        for row in rows {
            let x = self.anchors[row];
            let z_inv = 1.0 / self.args[row];
            let near = (-scale * (x - distance).powi(2)).exp();
            let far = (-scale * (x + distance).powi(2)).exp();

            let f0 = 0.5 * (near - far) * z_inv;
            self.values[row] = f0;
            self.values[num_anchors + row] = 0.5 * (near + far) * z_inv - f0 * z_inv;
            for n in 2..self.num_orders {
                let below = self.values[(n - 2) * num_anchors + row];
                let prev = self.values[(n - 1) * num_anchors + row];
                self.values[n * num_anchors + row] = below - (2 * n - 1) as f64 * z_inv * prev;
            }
        }
    }

    /// `d/dr f_n = -2 a r f_n + 2 a x e^{...} i_n'(z)`, using
    ///
    /// ```text
    /// i_0' = i_1
    /// i_n' = (n i_{n-1} + (n + 1) i_{n+1}) / (2n + 1)
    /// ```
    fn gradient_recursion(&mut self, distance: f64, scale: f64) {
        let num_anchors = self.anchors.len();
        let values = &self.values;
        for n in 0..=self.max_order {
            for (row, &x) in self.anchors.iter().enumerate() {
                let f = |n: usize| values[n * num_anchors + row];
                let d_bessel = match n {
                    0 => f(1),
                    _ => (n as f64 * f(n - 1) + (n + 1) as f64 * f(n + 1)) / (2 * n + 1) as f64,
                };
                self.gradients[n * num_anchors + row] =
                    -2.0 * scale * distance * f(n) + 2.0 * scale * x * d_bessel;
            }
        }
    }
}

fn enforce_finite(
    policy: NonFinitePolicy,
    what: &str,
    data: &mut [f64],
    num_anchors: usize,
    distance: f64,
    scale: f64,
) -> FailResult<()> {
    let first = match data.iter().position(|x| !x.is_finite()) {
        None => return Ok(()),
        Some(i) => i,
    };
    let (order, anchor) = (first / num_anchors, first % num_anchors);
    let bad = data[first];

    match policy {
        NonFinitePolicy::Panic => panic!(
            "non-finite radial kernel {} {} at anchor {}, order {} (r = {}, a = {})",
            what, bad, anchor, order, distance, scale,
        ),
        NonFinitePolicy::Error => bail!(
            "non-finite radial kernel {} {} at anchor {}, order {} (r = {}, a = {})",
            what, bad, anchor, order, distance, scale,
        ),
        NonFinitePolicy::Zero => {
            let mut count = 0;
            for x in data.iter_mut().filter(|x| !x.is_finite()) {
                *x = 0.0;
                count += 1;
            }
            warn!(
                "zeroed {} non-finite radial kernel {}s (first at anchor {}, order {}; r = {}, a = {})",
                count, what, anchor, order, distance, scale,
            );
            Ok(())
        },
    }
}
