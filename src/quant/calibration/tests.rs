//! Tests for quantization parameter calibration

use super::*;
use crate::quant::types::{CodeRange, ValueRange};
use approx::assert_abs_diff_eq;
use calibrar_common::{CalibrarError, ErrorKind};
use ndarray::array;
use proptest::prelude::*;

fn code_range() -> impl Strategy<Value = CodeRange> {
    prop_oneof![
        Just(CodeRange::I8),
        Just(CodeRange::U8),
        (any::<bool>(), 2u8..=16).prop_map(|(signed, bits)| {
            CodeRange::from_precision(signed, bits).unwrap()
        }),
        (-1000i32..1000, 1i32..1000).prop_map(|(qmin, width)| CodeRange {
            qmin,
            qmax: qmin + width,
        }),
    ]
}

fn value_range() -> impl Strategy<Value = ValueRange> {
    (-1.0e6f32..1.0e6, -1.0e6f32..1.0e6).prop_map(|(a, b)| ValueRange::new(a.min(b), a.max(b)))
}

// ========================================================================
// PROPERTY TESTS - Calibration invariants
// ========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Zero-point always lands inside the code range
    #[test]
    fn prop_zero_point_within_codes(range in value_range(), codes in code_range()) {
        let params = calibrate(range, codes).unwrap();
        prop_assert!(codes.contains(params.zero_point));
    }

    /// Scale is strictly positive and finite
    #[test]
    fn prop_scale_positive(range in value_range(), codes in code_range()) {
        let params = calibrate(range, codes).unwrap();
        prop_assert!(params.scale > 0.0);
        prop_assert!(params.scale.is_finite());
    }

    /// The real value 0.0 quantizes to exactly the zero-point
    #[test]
    fn prop_zero_is_exactly_representable(range in value_range(), codes in code_range()) {
        let params = calibrate(range, codes).unwrap();
        prop_assert_eq!(params.quantize(0.0, codes), params.zero_point);
        prop_assert_eq!(params.dequantize(params.zero_point), 0.0);
    }

    /// Scale covers the zero-extended range
    #[test]
    fn prop_scale_matches_extended_spread(range in value_range(), codes in code_range()) {
        let params = calibrate(range, codes).unwrap();
        let extended = range.including_zero();
        let spread = f64::from(extended.max) - f64::from(extended.min);
        let expected = (spread / codes.span()) as f32;
        if expected > 0.0 {
            prop_assert!((params.scale - expected).abs() <= expected * 1e-6);
        }
    }

    /// Over the whole f32 domain a successful calibration has a finite scale
    /// that `quantize` accepts
    #[test]
    fn prop_any_finite_range_yields_usable_scale(
        a in proptest::num::f32::NORMAL | proptest::num::f32::ZERO,
        b in proptest::num::f32::NORMAL | proptest::num::f32::ZERO,
        codes in code_range(),
    ) {
        let range = ValueRange::new(a.min(b), a.max(b));
        match calibrate(range, codes) {
            Ok(params) => {
                prop_assert!(params.scale > 0.0 && params.scale.is_finite());
                prop_assert!(codes.contains(params.zero_point));
            }
            Err(err) => prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument),
        }
    }

    /// Calibration is deterministic
    #[test]
    fn prop_calibrate_is_pure(range in value_range(), codes in code_range()) {
        prop_assert_eq!(calibrate(range, codes).unwrap(), calibrate(range, codes).unwrap());
    }
}

// ========================================================================
// UNIT TESTS
// ========================================================================

#[test]
fn test_degenerate_range_uses_fallback_scale() {
    let params = calibrate(ValueRange::new(0.0, 0.0), CodeRange::U8).unwrap();

    assert_eq!(params.scale, 0.1f32);
    assert_eq!(params.zero_point, 0);
}

#[test]
fn test_degenerate_range_signed_codes() {
    // Both candidates are exact; the min anchor has the larger error estimate
    let params = calibrate(ValueRange::new(0.0, 0.0), CodeRange::I8).unwrap();

    assert_eq!(params.scale, DEFAULT_FALLBACK_SCALE as f32);
    assert_eq!(params.zero_point, 127);
}

#[test]
fn test_symmetric_range() {
    let params = calibrate(ValueRange::new(-1.0, 1.0), CodeRange::I8).unwrap();

    assert_abs_diff_eq!(params.scale, 2.0 / 255.0, epsilon = 1e-7);
    assert!([-1, 0, 1].contains(&params.zero_point));
}

#[test]
fn test_asymmetric_non_negative_range() {
    let params = calibrate(ValueRange::new(0.0, 6.0), CodeRange::U8).unwrap();

    assert_abs_diff_eq!(params.scale, 6.0 / 255.0, epsilon = 1e-7);
    assert_eq!(params.zero_point, 0);
}

#[test]
fn test_positive_range_is_extended_to_zero() {
    // [2, 5] is treated as [0, 5]
    let params = calibrate(ValueRange::new(2.0, 5.0), CodeRange::U8).unwrap();

    assert_abs_diff_eq!(params.scale, 5.0 / 255.0, epsilon = 1e-7);
    assert_eq!(params.zero_point, 0);
}

#[test]
fn test_negative_range_anchors_at_qmax() {
    let unsigned = calibrate(ValueRange::new(-6.0, 0.0), CodeRange::U8).unwrap();
    assert_eq!(unsigned.zero_point, 255);

    let signed = calibrate(ValueRange::new(-3.0, -1.0), CodeRange::I8).unwrap();
    assert_eq!(signed.zero_point, 127);
    assert_abs_diff_eq!(signed.scale, 3.0 / 255.0, epsilon = 1e-7);
}

#[test]
fn test_fractional_zero_point_rounds_to_nearest() {
    // Candidate -64.25
    let params = calibrate(ValueRange::new(-1.0, 3.0), CodeRange::I8).unwrap();
    assert_eq!(params.zero_point, -64);

    // Candidate 51.0
    let params = calibrate(ValueRange::new(-0.5, 2.0), CodeRange::U8).unwrap();
    assert_eq!(params.zero_point, 51);
}

#[test]
fn test_half_way_zero_point_rounds_to_even() {
    // Candidate 127.5 rounds to 128, not 127
    let params = calibrate(ValueRange::new(-1.0, 1.0), CodeRange::U8).unwrap();
    assert_eq!(params.zero_point, 128);
}

#[test]
fn test_reference_operator_values() {
    let params = calibrate(ValueRange::new(-0.0456, 0.4556), CodeRange::I8).unwrap();

    assert_eq!(params.zero_point, -105);
    assert_abs_diff_eq!(params.scale, 0.001_965_490_2, epsilon = 1e-9);
}

#[test]
fn test_equal_code_bounds_is_invalid_argument() {
    let err = calibrate(ValueRange::new(-1.0, 1.0), CodeRange { qmin: 7, qmax: 7 }).unwrap_err();

    assert!(matches!(err, CalibrarError::InvalidCodeRange { qmin: 7, qmax: 7 }));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_inverted_code_bounds_is_invalid_argument() {
    let err = calibrate(ValueRange::new(-1.0, 1.0), CodeRange { qmin: 10, qmax: -10 }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_non_finite_bounds_are_invalid_argument() {
    for range in [
        ValueRange::new(f32::NAN, 1.0),
        ValueRange::new(-1.0, f32::INFINITY),
        ValueRange::new(f32::NEG_INFINITY, f32::NAN),
    ] {
        let err = calibrate(range, CodeRange::U8).unwrap_err();
        assert!(matches!(err, CalibrarError::NonFiniteRange { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_extreme_finite_range() {
    let params = calibrate(ValueRange::new(f32::MIN, f32::MAX), CodeRange::I8).unwrap();

    assert!(params.scale.is_finite());
    assert!(params.scale > 0.0);
    assert!(CodeRange::I8.contains(params.zero_point));
}

#[test]
fn test_scale_overflowing_f32_is_invalid_argument() {
    let codes = CodeRange::new(0, 1).unwrap();
    let err = calibrate(ValueRange::new(f32::MIN, f32::MAX), codes).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    match err {
        CalibrarError::InvalidArgument { field, message } => {
            assert_eq!(field, "codes");
            assert!(message.contains("[0, 1]"));
        }
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn test_widest_range_on_two_step_codes_stays_finite() {
    let codes = CodeRange::new(0, 2).unwrap();
    let params = calibrate(ValueRange::new(f32::MIN, f32::MAX), codes).unwrap();

    assert!(params.scale.is_finite());
    assert!(codes.contains(params.zero_point));
}

#[test]
fn test_subnormal_spread_uses_fallback() {
    let tiny = f32::from_bits(1);
    let params = calibrate(ValueRange::new(0.0, tiny), CodeRange::U8).unwrap();
    assert_eq!(params.scale, 0.1f32);
}

#[test]
fn test_calibrate_tensor_matches_reduce_then_calibrate() {
    let tensor = array![[3.0f32, -1.0, 4.0], [1.0, 5.0, 9.0]];
    let params = calibrate_tensor(tensor.view(), CodeRange::U8).unwrap();

    let expected = calibrate(ValueRange::new(-1.0, 9.0), CodeRange::U8).unwrap();
    assert_eq!(params, expected);
    assert_abs_diff_eq!(params.scale, 10.0 / 255.0, epsilon = 1e-7);
}

#[test]
fn test_calibrate_tensor_empty_is_invalid_argument() {
    let tensor = ndarray::Array2::<f32>::zeros((0, 0));
    let err = calibrate_tensor(tensor.view(), CodeRange::I8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
