/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

use failure::Error;

use std::io::Read;

/// Reads settings from YAML, warning about keys that nothing uses.
///
/// Prefer this to `serde_yaml::from_reader`.  All of the serde codegen for a type
/// happens once, in the crate that invokes `derive_yaml_read!` for it, and unknown
/// keys (usually typos) are reported through `serde_ignored` instead of being
/// silently dropped.
pub trait YamlRead: for <'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, Error> {
        // serde_ignored needs a Deserializer, and serde_yaml only offers one
        // through Value.  Keep the text around for a second pass.
        let mut s = String::new();
        r.read_to_string(&mut s)?;

        let value = value_from_str(&s)?;

        match Self::__serde_ignored__from_value(value) {
            Ok(out) => Ok(out),
            // errors from Value have no line numbers; let serde_yaml produce
            // the message from the text instead
            Err(_) => Self::__serde_yaml__from_str(&s),
        }
    }

    fn from_str(s: &str) -> Result<Self, Error>
    { YamlRead::from_dyn_reader(&mut s.as_bytes()) }

    // trait-provided function definitions are lazily monomorphized, so the
    // parts that need codegen go directly in the impls
    #[doc(hidden)]
    fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<Self, Error>;
    #[doc(hidden)]
    fn __serde_yaml__from_str(s: &str) -> Result<Self, Error>;
}

#[macro_export]
macro_rules! derive_yaml_read {
    ($Type:ty) => {
        const _: () = {
            use std::result::Result;
            use std::convert::Into;
            use $crate::reexports::serde_yaml;
            use $crate::reexports::serde_ignored;
            use failure::Error;
            use log::warn;

            impl $crate::YamlRead for $Type {
                fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<$Type, Error> {
                    serde_ignored::deserialize(
                        value,
                        |path| warn!("Unused config item (possible typo?): {}", path),
                    ).map_err(Into::into)
                }

                fn __serde_yaml__from_str(s: &str) -> Result<$Type, Error> {
                    serde_yaml::from_str(s)
                        .map_err(Into::into)
                }
            }
        };
    };
}

derive_yaml_read!{serde_yaml::Value}

fn value_from_str(r: &str) -> Result<serde_yaml::Value, Error>
{ serde_yaml::from_str(r).map_err(Into::into) }
