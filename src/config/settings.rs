/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

// NOTE: Deserialize these through the YamlRead trait, not serde_yaml directly,
//       so that typos in the config get reported.

use serde::de;

pub use desckern_special::NonFinitePolicy;

/// Root settings object.
///
/// This is what you should deserialize.
#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSettings(pub Settings);

/// Raw deserialized form of settings.
///
/// Deserialize `ValidatedSettings` instead, which runs `Settings::validate`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub radial_basis: RadialBasis,

    #[serde(default)]
    pub triplets: Triplets,

    /// Evaluate batches of distances on the rayon thread pool.
    #[serde(default = "_settings__parallel")]
    pub parallel: bool,
}
fn _settings__parallel() -> bool { true }
derive_yaml_read!{Settings}

derive_yaml_read!{ValidatedSettings}

impl<'de> de::Deserialize<'de> for ValidatedSettings {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cereal: Settings = de::Deserialize::deserialize(deserializer)?;

        cereal.validate().map_err(de::Error::custom)
    }
}

impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Settings { &self.0 }
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RadialBasis {
    /// Highest order of the radial kernels.
    pub max_order: usize,

    pub anchors: Anchors,

    /// Also compute derivatives with respect to the distance.
    #[serde(default)]
    pub gradients: bool,

    #[serde(default)]
    pub non_finite: NonFinitePolicy,
}

/// Points at which the radial kernels are evaluated.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Anchors {
    /// Must be non-negative and in ascending order.
    Explicit(Vec<f64>),
    Uniform(UniformAnchors),
}

/// `count` anchors `cutoff * k / count` for `k = 0..count`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct UniformAnchors {
    pub count: usize,
    pub cutoff: f64,
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Triplets {
    /// Treat the second and third atoms of a triplet as an unordered pair.
    #[serde(default = "_triplets__jk_indistinguishable")]
    pub jk_indistinguishable: bool,

    /// Use the older convention that counts a same-species j/k pair only once.
    #[serde(default)]
    pub compatibility_mode: bool,
}
fn _triplets__jk_indistinguishable() -> bool { true }

impl Anchors {
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Anchors::Explicit(anchors) => anchors.clone(),
            Anchors::Uniform(UniformAnchors { count, cutoff }) => {
                (0..*count).map(|k| cutoff * k as f64 / *count as f64).collect()
            },
        }
    }
}

// --------------------------------------------------------

impl Default for Triplets {
    fn default() -> Self { from_empty_mapping().unwrap() }
}

fn from_empty_mapping<T: for<'de> serde::Deserialize<'de>>() -> serde_yaml::Result<T> {
    use serde_yaml::{from_value, Value, Mapping};
    from_value(Value::Mapping(Mapping::new()))
}
