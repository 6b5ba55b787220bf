//! Shared strategies and fixtures for curve tests.

use proptest::prelude::*;
use referenda_core::constants::PERBILL;
use referenda_core::types::{Curve, TrackCurves};

/// Linear curves with `floor < ceil <= PERBILL` and non-zero length.
pub fn linear_curve() -> impl Strategy<Value = Curve> {
    (0u128..PERBILL, 1u128..=PERBILL, 1u128..=PERBILL).prop_map(|(floor, span, length)| {
        Curve::linear_decreasing(length, floor, (floor + span).min(PERBILL))
    })
}

/// Stepped curves with `end <= begin <= PERBILL` and non-zero step and period.
pub fn stepped_curve() -> impl Strategy<Value = Curve> {
    (
        0u128..=PERBILL,
        0u128..=PERBILL,
        1u128..=PERBILL,
        1u128..=PERBILL,
    )
        .prop_map(|(end, extra, step, period)| {
            Curve::stepped_decreasing((end + extra).min(PERBILL), end, step, period)
        })
}

/// Reciprocal curves with positive factor and positive `x_offset`, so the
/// divisor never reaches zero for `x >= 0`.
pub fn reciprocal_curve() -> impl Strategy<Value = Curve> {
    (
        1i128..=10 * PERBILL as i128,
        1i128..=PERBILL as i128,
        -(PERBILL as i128)..=PERBILL as i128,
    )
        .prop_map(|(factor, x_offset, y_offset)| Curve::reciprocal(factor, x_offset, y_offset))
}

/// Any curve from the valid parameter domain.
pub fn valid_curve() -> impl Strategy<Value = Curve> {
    prop_oneof![linear_curve(), stepped_curve(), reciprocal_curve()]
}

/// A root-style track: reciprocal approval falling from 100% toward 50%
/// and linear support falling from 50% to 0% over the whole period.
pub fn root_track() -> TrackCurves {
    TrackCurves {
        min_approval: Curve::reciprocal(222_222_224, 333_333_335, 333_333_332),
        min_support: Curve::linear_decreasing(PERBILL, 0, 500_000_000),
    }
}
