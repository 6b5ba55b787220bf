//! Trait interfaces for referenda curves.
//!
//! - [`CurveEvaluator`]: forward and inverse curve evaluation (referenda-curve implements)
//! - [`DecidingEnd`]: the point at which a referendum's decision period
//!   would end given its tally; an extension hook with no formula yet

use crate::error::CurveError;
use crate::types::{Curve, Tally, TrackCurves};

/// Pure evaluation of threshold curves.
///
/// All values are parts-per-billion. Implementations must be
/// deterministic: the results gate governance decisions and have to agree
/// with the on-chain computation bit for bit.
pub trait CurveEvaluator: Send + Sync {
    /// Minimum approval or support required after `x` has elapsed.
    ///
    /// Always within `[0, FULL_PROPORTION]`.
    fn threshold(&self, curve: &Curve, x: u128) -> Result<u128, CurveError>;

    /// Elapsed time after which `y` meets the threshold.
    ///
    /// Returns [`UNREACHABLE_DELAY`](crate::constants::UNREACHABLE_DELAY)
    /// when `y` is never sufficient.
    fn delay(&self, curve: &Curve, y: u128) -> Result<u128, CurveError>;

    /// Whether `y` meets the threshold at `x`.
    ///
    /// Default implementation delegates to [`threshold`](Self::threshold).
    fn passing(&self, curve: &Curve, x: u128, y: u128) -> Result<bool, CurveError> {
        Ok(y >= self.threshold(curve, x)?)
    }
}

/// Combines a tally with a track's curves into the block at which the
/// decision period would end.
pub trait DecidingEnd: Send + Sync {
    /// `None` when no end can be determined.
    fn deciding_end(&self, total_issuance: u128, tally: &Tally, track: &TrackCurves)
        -> Option<u64>;
}
