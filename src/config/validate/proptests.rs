//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_spec;
use crate::config::schema::*;
use crate::quant::{CodeRange, ObserverMethod};
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = CalibrationSpec> {
    (
        2u8..=16,                              // bits
        any::<bool>(),                         // signed
        proptest::option::of(0.001f32..=1.0),  // momentum
        any::<bool>(),                         // parallel
    )
        .prop_map(|(bits, signed, momentum, parallel)| CalibrationSpec {
            precision: PrecisionSpec { bits, signed },
            observer: momentum.map_or(ObserverMethod::MinMax, |momentum| {
                ObserverMethod::MovingAverage { momentum }
            }),
            parallel,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_spec(&spec).is_ok());
        prop_assert!(spec.precision.code_range().is_ok());
    }

    #[test]
    fn prop_oversized_bits_fail(spec in arb_valid_spec(), bits in 17u8..=u8::MAX) {
        let mut spec = spec;
        spec.precision.bits = bits;
        prop_assert_eq!(validate_spec(&spec), Err(ValidationError::InvalidBits(bits)));
    }

    #[test]
    fn prop_momentum_above_one_fails(spec in arb_valid_spec(), momentum in 1.001f32..100.0) {
        let mut spec = spec;
        spec.observer = ObserverMethod::MovingAverage { momentum };
        prop_assert!(matches!(
            validate_spec(&spec),
            Err(ValidationError::InvalidMomentum(_))
        ));
    }

    #[test]
    fn prop_bits_rule_matches_code_range(bits in any::<u8>(), signed in any::<bool>()) {
        let spec = CalibrationSpec {
            precision: PrecisionSpec { bits, signed },
            ..Default::default()
        };
        prop_assert_eq!(
            validate_spec(&spec).is_ok(),
            CodeRange::from_precision(signed, bits).is_ok()
        );
    }

    #[test]
    fn prop_momentum_rule_matches_observer(momentum in any::<f32>()) {
        let observer = ObserverMethod::MovingAverage { momentum };
        let spec = CalibrationSpec {
            observer,
            ..Default::default()
        };
        prop_assert_eq!(validate_spec(&spec).is_ok(), observer.validate().is_ok());
    }
}
