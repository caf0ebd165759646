//! Property tests for range reduction and calibration
//!
//! - Reduced bounds are tight and attained
//! - Calibrated zero-point lies in the code range and represents zero exactly
//! - Quantized codes never leave the code range

use calibrar::{calibrate, calibrate_tensor, quantize, reduce, CodeRange, ValueRange};
use ndarray::Array2;
use proptest::prelude::*;

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Finite 2-D tensor with up to 8×8 elements
fn tensor() -> impl Strategy<Value = Array2<f32>> {
    (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(-1.0e3f32..1.0e3, rows * cols).prop_map(move |values| {
            Array2::from_shape_vec((rows, cols), values).expect("shape matches length")
        })
    })
}

/// Signed or unsigned code range of 2 to 16 bits
fn code_range() -> impl Strategy<Value = CodeRange> {
    (any::<bool>(), 2u8..=16)
        .prop_map(|(signed, bits)| CodeRange::from_precision(signed, bits).expect("valid bits"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_reduce_bounds_attained(t in tensor()) {
        let range = reduce(t.view()).unwrap();

        prop_assert!(t.iter().all(|&v| range.min <= v && v <= range.max));
        prop_assert!(t.iter().any(|&v| v == range.min));
        prop_assert!(t.iter().any(|&v| v == range.max));
    }

    #[test]
    fn prop_zero_point_in_code_range(
        min in -1.0e4f32..1.0e4,
        spread in 0.0f32..1.0e4,
        codes in code_range(),
    ) {
        let params = calibrate(ValueRange::new(min, min + spread), codes).unwrap();

        prop_assert!(codes.contains(params.zero_point));
        prop_assert!(params.scale > 0.0 && params.scale.is_finite());
    }

    #[test]
    fn prop_zero_dequantizes_to_zero(t in tensor(), codes in code_range()) {
        let params = calibrate_tensor(t.view(), codes).unwrap();
        let zero_code = params.quantize(0.0, codes);

        prop_assert_eq!(zero_code, params.zero_point);
        prop_assert_eq!(params.dequantize(zero_code), 0.0);
    }

    #[test]
    fn prop_quantized_codes_within_range(t in tensor(), codes in code_range()) {
        let params = calibrate_tensor(t.view(), codes).unwrap();
        let quantized = quantize(t.view(), params, codes).unwrap();

        prop_assert!(quantized.codes.iter().all(|&c| codes.contains(c)));
        let sums: Vec<i32> = quantized.codes.rows().into_iter().map(|r| r.sum()).collect();
        prop_assert_eq!(quantized.row_acc.to_vec(), sums);
    }
}
