//! Extension point for the end of a referendum's decision period.
//!
//! Combining a tally with the total issuance and a track's approval and
//! support curves into a concrete end block has no agreed formula yet, so
//! the only provided implementation declines to answer.

use referenda_core::traits::DecidingEnd;
use referenda_core::types::{Tally, TrackCurves};
use tracing::debug;

/// [`DecidingEnd`] that never determines an end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Undecided;

impl DecidingEnd for Undecided {
    fn deciding_end(
        &self,
        total_issuance: u128,
        _tally: &Tally,
        _track: &TrackCurves,
    ) -> Option<u64> {
        debug!(total_issuance = %total_issuance, "deciding end not determined");
        None
    }
}
