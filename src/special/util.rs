/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

pub(crate) fn uniform(a: f64, b: f64) -> f64 { ::rand::random::<f64>() * (b - a) + a }

/// `count` sorted values drawn from `[a, b)`.
pub(crate) fn sorted_uniform(count: usize, a: f64, b: f64) -> Vec<f64> {
    let mut out: Vec<_> = (0..count).map(|_| uniform(a, b)).collect();
    out.sort_by(|x, y| x.partial_cmp(y).expect("NaN in uniform sample"));
    out
}

pub(crate) fn init_logger() {
    let _ = ::env_logger::try_init();
}
