//! Linearly decreasing curves.
//!
//! The threshold falls in a straight line from `ceil` at `x = 0` to
//! `floor` at `x = length` and stays at `floor` afterwards.
//!
//! The elapsed proportion is rounded down when evaluating the threshold
//! and the required proportion is rounded up when evaluating the delay,
//! so a delay computed from a threshold never exceeds the original `x`.

use referenda_core::arith::{mul_parts, ratio, Rounding};
use referenda_core::constants::{PERBILL, UNREACHABLE_DELAY};
use referenda_core::error::CurveError;
use tracing::trace;

/// `ceil - (min(x, length) / length) * (ceil - floor)`.
///
/// A zero `length` saturates the elapsed proportion, so the curve sits at
/// `floor` from the start.
pub fn threshold(length: u128, floor: u128, ceil: u128, x: u128) -> Result<u128, CurveError> {
    let (floor, ceil) = (floor.min(PERBILL), ceil.min(PERBILL));

    let elapsed = ratio(x.min(length), length, Rounding::Down);
    let decayed = mul_parts(elapsed, ceil.saturating_sub(floor))?;
    Ok(ceil.saturating_sub(decayed))
}

/// `((ceil - y) / (ceil - floor)) * length` with the proportion rounded up.
///
/// Below `floor` the level is never reached; above `ceil` it already is.
pub fn delay(length: u128, floor: u128, ceil: u128, y: u128) -> Result<u128, CurveError> {
    let (floor, ceil) = (floor.min(PERBILL), ceil.min(PERBILL));

    if y < floor {
        trace!(y = %y, floor = %floor, "level below linear floor");
        return Ok(UNREACHABLE_DELAY);
    }
    if y > ceil {
        return Ok(0);
    }

    // floor <= y <= ceil, so neither subtraction underflows.
    let required = ratio(ceil - y, ceil - floor, Rounding::Up);
    mul_parts(required, length)
}
