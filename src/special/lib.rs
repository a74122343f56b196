/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate desckern_assert_close;

pub use crate::bessel::{ModifiedSphericalBessel, NonFinitePolicy};
pub use crate::bessel::{ARGUMENT_SWITCH, VALUE_FLOOR, MAX_ORDER};
mod bessel;

pub use crate::hyp1f1::{Hyp1f1, Hyp1f1Seed};
mod hyp1f1;

pub use crate::table::{Table, TableRef};
mod table;

pub mod batch;

#[cfg(test)]
pub(crate) mod util;

pub type FailResult<T> = Result<T, failure::Error>;
