/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate failure;
#[macro_use] extern crate serde;
#[macro_use] extern crate log;

pub use self::monomorphize::YamlRead;
#[macro_use]
mod monomorphize;

pub use self::settings::*;
mod settings;

mod validation;

#[doc(hidden)] // used by macro
pub mod reexports {
    pub use serde_ignored;
    pub use serde_yaml;
}

pub type FailResult<T> = Result<T, failure::Error>;
