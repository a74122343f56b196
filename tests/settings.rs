/* ************************************************************************ **
** This file is part of desckern, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use desckern::config::{ValidatedSettings, YamlRead};
use desckern::special::NonFinitePolicy;
use desckern::symmetry::{classify, RepeatedSpecies};
use desckern_assert_close::assert_close;

const SETTINGS: &str = "
radial-basis:
  max-order: 4
  anchors:
    uniform:
      count: 8
      cutoff: 8.0
  gradients: true
triplets:
  jk-indistinguishable: true
";

fn settings() -> ValidatedSettings {
    let _ = env_logger::try_init();
    ValidatedSettings::from_str(SETTINGS).unwrap()
}

#[test]
fn engine_from_settings() {
    let settings = settings();
    let mut engine = desckern::radial_engine(&settings).unwrap();
    assert_eq!(engine.anchors(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(engine.max_order(), 4);
    assert!(engine.computes_gradients());
    assert_eq!(engine.non_finite_policy(), NonFinitePolicy::Error);

    let (distance, scale) = (1.0, 0.5);
    engine.calc(distance, scale).unwrap();
    for (row, &x) in engine.anchors().iter().enumerate().skip(1) {
        let z = 2.0 * scale * distance * x;
        let near = (-scale * (x - distance).powi(2)).exp();
        let far = (-scale * (x + distance).powi(2)).exp();
        assert_close!(rel=1e-12, engine.values().get(row, 0), 0.5 * (near - far) / z);
    }
}

#[test]
fn batch_from_settings() {
    let settings = settings();
    let engine = desckern::radial_engine(&settings).unwrap();
    let inputs: Vec<_> = (1..=20).map(|i| (0.25 * i as f64, 0.7)).collect();

    let out = desckern::evaluate_radial(&settings, &engine, &inputs).unwrap();
    assert_eq!(out.len(), inputs.len());
    for (evaluation, &(distance, _)) in out.iter().zip(&inputs) {
        assert_eq!(evaluation.distance, distance);
        assert_eq!(evaluation.values.num_anchors(), 8);
        assert_eq!(evaluation.values.num_orders(), 5);
        assert!(evaluation.gradients.is_some());
    }
}

#[test]
fn plans_from_settings() {
    let settings = settings();
    let plans = desckern::triplet_plans(&settings);

    let plan = plans.for_species("C", "H", "H");
    assert_eq!(classify("C", "H", "H"), RepeatedSpecies::SecondTwo);
    assert_eq!(plan.orderings().len(), 1);
    assert_eq!(plan.weight(), 2);

    let plan = plans.for_species("H", "H", "H");
    assert_eq!(plan.orderings().len(), 3);
}

#[test]
fn bad_settings_are_reported() {
    let text = SETTINGS.replace("count: 8", "count: 0");
    assert!(ValidatedSettings::from_str(&text).is_err());
}
