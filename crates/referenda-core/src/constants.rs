//! Fixed-point constants. All proportions are parts-per-billion
//! (1.0 = 10^9 parts).

/// Denominator of every billion-scaled proportion.
///
/// # Examples
///
/// ```
/// use referenda_core::constants::PERBILL;
/// assert_eq!(PERBILL, 1_000_000_000);
/// ```
pub const PERBILL: u128 = 1_000_000_000;

/// A full proportion (`1.0`), the largest threshold a curve can return.
pub const FULL_PROPORTION: u128 = PERBILL;

/// Returned by delay evaluation when a support level is never reached
/// within the decision period.
///
/// Shares its value with [`FULL_PROPORTION`]; callers interpret it as
/// "maximal delay", not as a literal number of blocks.
pub const UNREACHABLE_DELAY: u128 = FULL_PROPORTION;

/// Same denominator for signed fixed-point values (reciprocal curves).
pub const FIXED_ACCURACY: i128 = PERBILL as i128;
