//! # referenda-curve: Decision curve evaluation.
//!
//! All calculations use integer arithmetic only for determinism.
//!
//! A governance track describes its required approval and support as
//! curves that decrease while a referendum is deciding. This crate
//! evaluates them in both directions:
//! - **Threshold**: the proportion required once `x` of the decision
//!   period has elapsed.
//! - **Delay**: how much of the period must elapse before a given
//!   proportion `y` is enough.
//!
//! Each curve kind has its own module; [`engine`] dispatches over them.
//! Rounding follows the on-chain pallet exactly: linear thresholds round
//! down and linear delays round up, reciprocal thresholds round toward
//! negative infinity and reciprocal delays toward positive infinity.

pub mod deciding;
pub mod engine;
pub mod linear;
pub mod reciprocal;
pub mod stepped;

pub use deciding::Undecided;
pub use engine::{
    curve_delay, curve_threshold, delay_from_metadata, sample, threshold_from_metadata,
    CurveEngine,
};
