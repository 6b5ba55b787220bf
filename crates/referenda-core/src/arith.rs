//! Fixed-point arithmetic for billion-scaled proportions.
//!
//! Every product is taken in a 256-bit intermediate so that two 128-bit
//! operands never overflow before the division. All divisions go through
//! one helper parameterised by [`Rounding`], which keeps the rounding
//! direction of each call site explicit.
//!
//! The proportion helpers ([`ratio`], [`mul_parts`], [`int_mul`],
//! [`clamp_parts`]) reproduce the saturating behaviour of the on-chain
//! per-billion type.

use uint::construct_uint;

use crate::constants::{FIXED_ACCURACY, PERBILL};
use crate::error::CurveError;

construct_uint! {
    /// 256-bit unsigned integer for exact intermediate products.
    pub struct U256(4);
}

/// Direction in which a non-exact quotient is rounded.
///
/// `Down`/`Up` are relative to zero, `Low`/`High` relative to the number
/// line. For non-negative quotients `Down == Low` and `Up == High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Toward zero (truncation).
    Down,
    /// Away from zero.
    Up,
    /// Toward negative infinity (floor).
    Low,
    /// Toward positive infinity (ceiling).
    High,
}

impl Rounding {
    /// Whether a non-zero remainder increases the magnitude of a quotient
    /// with the given sign.
    fn rounds_away(self, negative: bool) -> bool {
        match self {
            Rounding::Down => false,
            Rounding::Up => true,
            Rounding::Low => negative,
            Rounding::High => !negative,
        }
    }
}

/// Divide magnitudes, bumping the quotient when the remainder is non-zero
/// and `away` is set. `d` must be non-zero.
fn div_magnitude(n: U256, d: U256, away: bool) -> U256 {
    let (q, r) = n.div_mod(d);
    if away && !r.is_zero() {
        q + U256::one()
    } else {
        q
    }
}

fn narrow(value: U256) -> Result<u128, CurveError> {
    if value > U256::from(u128::MAX) {
        Err(CurveError::ArithmeticOverflow)
    } else {
        Ok(value.low_u128())
    }
}

/// Compute `a * b / d` with the given rounding.
///
/// Fails with [`CurveError::DivisionByZero`] if `d == 0` and with
/// [`CurveError::ArithmeticOverflow`] if the quotient exceeds `u128`.
///
/// # Examples
///
/// ```
/// use referenda_core::arith::{mul_div, Rounding};
/// assert_eq!(mul_div(2, 5, 3, Rounding::Down).unwrap(), 3);
/// assert_eq!(mul_div(2, 5, 3, Rounding::Up).unwrap(), 4);
/// ```
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> Result<u128, CurveError> {
    if d == 0 {
        return Err(CurveError::DivisionByZero { operand: "divisor" });
    }
    let product = U256::from(a) * U256::from(b);
    narrow(div_magnitude(
        product,
        U256::from(d),
        rounding.rounds_away(false),
    ))
}

/// Signed variant of [`mul_div`]: `a * b / d` rounded per `rounding`,
/// where `Low`/`High` follow the sign of the exact quotient.
///
/// # Examples
///
/// ```
/// use referenda_core::arith::{signed_mul_div, Rounding};
/// assert_eq!(signed_mul_div(-7, 1, 2, Rounding::Low).unwrap(), -4);
/// assert_eq!(signed_mul_div(-7, 1, 2, Rounding::High).unwrap(), -3);
/// assert_eq!(signed_mul_div(-7, 1, 2, Rounding::Down).unwrap(), -3);
/// ```
pub fn signed_mul_div(a: i128, b: i128, d: i128, rounding: Rounding) -> Result<i128, CurveError> {
    if d == 0 {
        return Err(CurveError::DivisionByZero { operand: "divisor" });
    }
    let negative = a != 0 && b != 0 && ((a < 0) ^ (b < 0) ^ (d < 0));
    let product = U256::from(a.unsigned_abs()) * U256::from(b.unsigned_abs());
    let magnitude = div_magnitude(
        product,
        U256::from(d.unsigned_abs()),
        rounding.rounds_away(negative),
    );

    if negative {
        if magnitude > U256::from(i128::MIN.unsigned_abs()) {
            return Err(CurveError::ArithmeticOverflow);
        }
        // 2^127 maps onto i128::MIN, which wrapping_neg leaves unchanged.
        Ok((magnitude.low_u128() as i128).wrapping_neg())
    } else {
        if magnitude > U256::from(i128::MAX as u128) {
            return Err(CurveError::ArithmeticOverflow);
        }
        Ok(magnitude.low_u128() as i128)
    }
}

/// Fixed-point division `a / b` of two signed 10^9-accuracy values.
pub fn fixed_div(a: i128, b: i128, rounding: Rounding) -> Result<i128, CurveError> {
    signed_mul_div(a, FIXED_ACCURACY, b, rounding)
}

/// The proportion `p / q` in parts-per-billion.
///
/// Saturates at a full proportion when `q == 0` or `p > q`.
///
/// # Examples
///
/// ```
/// use referenda_core::arith::{ratio, Rounding};
/// assert_eq!(ratio(1, 3, Rounding::Down), 333_333_333);
/// assert_eq!(ratio(1, 3, Rounding::Up), 333_333_334);
/// assert_eq!(ratio(5, 0, Rounding::Down), 1_000_000_000);
/// ```
pub fn ratio(p: u128, q: u128, rounding: Rounding) -> u128 {
    if q == 0 || p > q {
        return PERBILL;
    }
    // p <= q keeps the quotient within [0, PERBILL].
    div_magnitude(
        U256::from(p) * U256::from(PERBILL),
        U256::from(q),
        rounding.rounds_away(false),
    )
    .low_u128()
}

/// Multiply `value` by a proportion given in parts, truncating.
pub fn mul_parts(parts: u128, value: u128) -> Result<u128, CurveError> {
    mul_div(parts, value, PERBILL, Rounding::Down)
}

/// `parts * n`, saturating at a full proportion.
pub fn int_mul(parts: u128, n: u128) -> u128 {
    parts.saturating_mul(n).min(PERBILL)
}

/// Clamp a signed fixed-point value into `[0, PERBILL]`.
pub fn clamp_parts(value: i128) -> u128 {
    value.clamp(0, FIXED_ACCURACY) as u128
}
