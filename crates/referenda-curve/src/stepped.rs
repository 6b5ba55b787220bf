//! Stepped decreasing curves.
//!
//! The threshold starts at `begin` and drops by `step` at the end of every
//! whole `period`, never going below `end`.

use referenda_core::arith::int_mul;
use referenda_core::constants::{PERBILL, UNREACHABLE_DELAY};
use referenda_core::error::CurveError;
use tracing::trace;

/// `max(end, begin - min(begin, step * (x / period)))`.
pub fn threshold(
    begin: u128,
    end: u128,
    step: u128,
    period: u128,
    x: u128,
) -> Result<u128, CurveError> {
    if period == 0 {
        return Err(CurveError::DivisionByZero { operand: "period" });
    }
    let (begin, end, step) = (begin.min(PERBILL), end.min(PERBILL), step.min(PERBILL));

    let dropped = int_mul(step, x / period).min(begin);
    Ok((begin - dropped).max(end))
}

/// `period * ceil((begin - min(y, begin)) / step)`.
///
/// The ceiling is folded into the numerator as `step - 1`. The result is
/// not capped at a full proportion, since `period` may exceed one.
pub fn delay(
    begin: u128,
    end: u128,
    step: u128,
    period: u128,
    y: u128,
) -> Result<u128, CurveError> {
    let (begin, end, step) = (begin.min(PERBILL), end.min(PERBILL), step.min(PERBILL));

    if y < end {
        trace!(y = %y, end = %end, "level below stepped end");
        return Ok(UNREACHABLE_DELAY);
    }
    if step == 0 {
        return Err(CurveError::DivisionByZero { operand: "step" });
    }

    let shortfall = begin - y.min(begin);
    let steps = shortfall.saturating_add(step - 1) / step;
    period.checked_mul(steps).ok_or(CurveError::ArithmeticOverflow)
}
