//! Property-based tests for curve evaluation.
//!
//! Each property runs at least 256 cases over randomized curves drawn
//! from the valid parameter domain, with proptest shrinking to minimal
//! failing examples.
//!
//! Invariants tested:
//! - Thresholds stay within `[0, FULL_PROPORTION]`
//! - Thresholds never increase as time elapses
//! - The threshold at the origin is the curve's starting level
//! - Linear and reciprocal delays never exceed the unreachable sentinel
//! - Linear and stepped delays never overshoot the time they were derived from
//! - Stepped and reciprocal delays are always long enough to pass

use proptest::prelude::*;
use referenda_core::arith::{clamp_parts, fixed_div, Rounding};
use referenda_core::constants::{FULL_PROPORTION, PERBILL, UNREACHABLE_DELAY};
use referenda_core::traits::CurveEvaluator;
use referenda_core::types::Curve;
use referenda_curve::{curve_delay, curve_threshold, CurveEngine};
use referenda_tests::helpers::{
    linear_curve, reciprocal_curve, stepped_curve, valid_curve,
};

// ---------------------------------------------------------------------------
// Bounds and monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn threshold_within_full_proportion(curve in valid_curve(), x in 0u128..=4 * PERBILL) {
        let y = curve_threshold(&curve, x).unwrap();
        prop_assert!(y <= FULL_PROPORTION);
    }

    #[test]
    fn threshold_non_increasing(
        curve in valid_curve(),
        a in 0u128..=4 * PERBILL,
        b in 0u128..=4 * PERBILL,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let y_lo = curve_threshold(&curve, lo).unwrap();
        let y_hi = curve_threshold(&curve, hi).unwrap();
        prop_assert!(
            y_hi <= y_lo,
            "{:?}: threshold({}) = {} > threshold({}) = {}",
            curve, hi, y_hi, lo, y_lo
        );
    }

    #[test]
    fn delay_within_sentinel(
        curve in prop_oneof![linear_curve(), reciprocal_curve()],
        y in 0u128..=PERBILL,
    ) {
        prop_assert!(curve_delay(&curve, y).unwrap() <= UNREACHABLE_DELAY);
    }

    #[test]
    fn evaluation_is_deterministic(curve in valid_curve(), v in 0u128..=PERBILL) {
        let engine = CurveEngine::new();
        prop_assert_eq!(engine.threshold(&curve, v).unwrap(), curve_threshold(&curve, v).unwrap());
        prop_assert_eq!(engine.delay(&curve, v).unwrap(), curve_delay(&curve, v).unwrap());
    }
}

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn origin_is_starting_level(curve in valid_curve()) {
        let expected = match curve {
            Curve::LinearDecreasing { ceil, .. } => ceil,
            Curve::SteppedDecreasing { begin, .. } => begin,
            Curve::Reciprocal { factor, x_offset, y_offset } => {
                clamp_parts(fixed_div(factor, x_offset, Rounding::Low).unwrap() + y_offset)
            }
        };
        prop_assert_eq!(curve_threshold(&curve, 0).unwrap(), expected);
    }
}

// ---------------------------------------------------------------------------
// Inverse relationship
//
// Threshold and delay round in opposite directions, so the round trip is
// an inequality rather than an identity.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn linear_delay_of_threshold_not_after_x(curve in linear_curve(), x in 0u128..=2 * PERBILL) {
        let y = curve_threshold(&curve, x).unwrap();
        let back = curve_delay(&curve, y).unwrap();
        prop_assert!(back <= x, "{:?}: delay({}) = {} > {}", curve, y, back, x);
    }

    #[test]
    fn stepped_delay_of_threshold_not_after_x(curve in stepped_curve(), x in 0u128..=2 * PERBILL) {
        let y = curve_threshold(&curve, x).unwrap();
        let back = curve_delay(&curve, y).unwrap();
        prop_assert!(back <= x, "{:?}: delay({}) = {} > {}", curve, y, back, x);
    }

    #[test]
    fn stepped_delay_is_sufficient(curve in stepped_curve(), y in 0u128..=PERBILL) {
        let engine = CurveEngine::new();
        let x = engine.delay(&curve, y).unwrap();
        let Curve::SteppedDecreasing { end, .. } = curve else { unreachable!() };
        prop_assume!(y >= end);
        prop_assert!(
            engine.passing(&curve, x, y).unwrap(),
            "{:?}: level {} not passing at its delay {}",
            curve, y, x
        );
    }

    #[test]
    fn reciprocal_delay_is_sufficient(curve in reciprocal_curve(), y in 0u128..=PERBILL) {
        let engine = CurveEngine::new();
        let x = engine.delay(&curve, y).unwrap();
        prop_assume!(x < UNREACHABLE_DELAY);
        prop_assert!(
            engine.passing(&curve, x, y).unwrap(),
            "{:?}: level {} not passing at its delay {}",
            curve, y, x
        );
    }

    #[test]
    fn threshold_level_passes_immediately(curve in valid_curve(), x in 0u128..=PERBILL) {
        let engine = CurveEngine::new();
        let y = engine.threshold(&curve, x).unwrap();
        prop_assert!(engine.passing(&curve, x, y).unwrap());
    }
}
