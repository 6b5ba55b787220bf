//! Curve engine implementing the [`CurveEvaluator`] trait.
//!
//! Dispatches over the curve kinds with an exhaustive match; adding a kind
//! is a compile error here until both directions are implemented. Unknown
//! kinds can only come from metadata and are rejected while decoding.

use referenda_core::arith::{mul_div, Rounding};
use referenda_core::error::CurveError;
use referenda_core::traits::CurveEvaluator;
use referenda_core::types::Curve;
use serde_json::Value;
use tracing::trace;

use crate::{linear, reciprocal, stepped};

/// The production curve evaluator.
///
/// Stateless; every call is a pure function of its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveEngine;

impl CurveEngine {
    /// Create a new CurveEngine.
    pub fn new() -> Self {
        Self
    }
}

impl CurveEvaluator for CurveEngine {
    fn threshold(&self, curve: &Curve, x: u128) -> Result<u128, CurveError> {
        curve_threshold(curve, x)
    }

    fn delay(&self, curve: &Curve, y: u128) -> Result<u128, CurveError> {
        curve_delay(curve, y)
    }
}

/// The proportion required once `x` has elapsed.
///
/// # Examples
///
/// ```
/// use referenda_core::types::Curve;
/// use referenda_curve::curve_threshold;
///
/// let curve = Curve::linear_decreasing(100, 500_000_000, 1_000_000_000);
/// assert_eq!(curve_threshold(&curve, 50).unwrap(), 750_000_000);
/// ```
pub fn curve_threshold(curve: &Curve, x: u128) -> Result<u128, CurveError> {
    let y = match *curve {
        Curve::LinearDecreasing {
            length,
            floor,
            ceil,
        } => linear::threshold(length, floor, ceil, x)?,
        Curve::SteppedDecreasing {
            begin,
            end,
            step,
            period,
        } => stepped::threshold(begin, end, step, period, x)?,
        Curve::Reciprocal {
            factor,
            x_offset,
            y_offset,
        } => reciprocal::threshold(factor, x_offset, y_offset, x)?,
    };
    trace!(kind = %curve.kind(), x = %x, y = %y, "curve threshold");
    Ok(y)
}

/// How much must elapse before `y` meets the curve.
///
/// # Examples
///
/// ```
/// use referenda_core::constants::UNREACHABLE_DELAY;
/// use referenda_core::types::Curve;
/// use referenda_curve::curve_delay;
///
/// let curve = Curve::linear_decreasing(100, 500_000_000, 1_000_000_000);
/// assert_eq!(curve_delay(&curve, 600_000_000).unwrap(), 80);
/// assert_eq!(curve_delay(&curve, 400_000_000).unwrap(), UNREACHABLE_DELAY);
/// ```
pub fn curve_delay(curve: &Curve, y: u128) -> Result<u128, CurveError> {
    let x = match *curve {
        Curve::LinearDecreasing {
            length,
            floor,
            ceil,
        } => linear::delay(length, floor, ceil, y)?,
        Curve::SteppedDecreasing {
            begin,
            end,
            step,
            period,
        } => stepped::delay(begin, end, step, period, y)?,
        Curve::Reciprocal {
            factor,
            x_offset,
            y_offset,
        } => reciprocal::delay(factor, x_offset, y_offset, y)?,
    };
    trace!(kind = %curve.kind(), y = %y, x = %x, "curve delay");
    Ok(x)
}

/// Decode `metadata` and evaluate its threshold at `x`.
pub fn threshold_from_metadata(metadata: &Value, x: u128) -> Result<u128, CurveError> {
    curve_threshold(&Curve::from_metadata(metadata)?, x)
}

/// Decode `metadata` and evaluate its delay for `y`.
pub fn delay_from_metadata(metadata: &Value, y: u128) -> Result<u128, CurveError> {
    curve_delay(&Curve::from_metadata(metadata)?, y)
}

/// Tabulate `points + 1` evenly spaced `(x, threshold)` pairs over
/// `[0, span]`. A `points` of zero samples only the origin.
pub fn sample(curve: &Curve, span: u128, points: u32) -> Result<Vec<(u128, u128)>, CurveError> {
    if points == 0 {
        return Ok(vec![(0, curve_threshold(curve, 0)?)]);
    }
    (0..=points)
        .map(|i| {
            let x = mul_div(span, i as u128, points as u128, Rounding::Down)?;
            Ok((x, curve_threshold(curve, x)?))
        })
        .collect()
}
