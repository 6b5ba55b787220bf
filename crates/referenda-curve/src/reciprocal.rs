//! Reciprocal curves: `y = factor / (x + x_offset) + y_offset`.
//!
//! Parameters are signed fixed-point values with 10^9 accuracy, so the
//! intermediate terms may be negative. Results are clamped into
//! `[0, FULL_PROPORTION]`.

use referenda_core::arith::{clamp_parts, fixed_div, Rounding};
use referenda_core::constants::{FULL_PROPORTION, UNREACHABLE_DELAY};
use referenda_core::error::CurveError;
use tracing::trace;

fn signed(value: u128) -> Result<i128, CurveError> {
    i128::try_from(value).map_err(|_| CurveError::ArithmeticOverflow)
}

/// `factor / (x + x_offset) + y_offset`, quotient rounded toward negative
/// infinity.
///
/// A zero divisor or an overflowing quotient yields a full proportion. A
/// divisor beyond the signed range leaves only `y_offset`.
pub fn threshold(
    factor: i128,
    x_offset: i128,
    y_offset: i128,
    x: u128,
) -> Result<u128, CurveError> {
    let Some(divisor) = i128::try_from(x).ok().and_then(|x| x.checked_add(x_offset)) else {
        trace!(x = %x, x_offset = %x_offset, "reciprocal quotient vanished");
        return Ok(clamp_parts(y_offset));
    };

    let Ok(quotient) = fixed_div(factor, divisor, Rounding::Low) else {
        trace!(divisor = %divisor, "reciprocal threshold saturated");
        return Ok(FULL_PROPORTION);
    };
    Ok(clamp_parts(quotient.saturating_add(y_offset)))
}

/// `factor / (y - y_offset) - x_offset`, quotient rounded toward positive
/// infinity.
///
/// At or below the `y_offset` asymptote the level is never reached. A
/// negative result means the level is met from the start and clamps to
/// zero.
pub fn delay(factor: i128, x_offset: i128, y_offset: i128, y: u128) -> Result<u128, CurveError> {
    let divisor = signed(y)?
        .checked_sub(y_offset)
        .ok_or(CurveError::ArithmeticOverflow)?;
    if divisor <= 0 {
        trace!(y = %y, y_offset = %y_offset, "level at or below reciprocal asymptote");
        return Ok(UNREACHABLE_DELAY);
    }

    let Ok(term) = fixed_div(factor, divisor, Rounding::High) else {
        return Ok(UNREACHABLE_DELAY);
    };
    Ok(clamp_parts(term.saturating_sub(x_offset)))
}
