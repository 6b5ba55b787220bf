//! Property and scenario test suite for referenda curves.
//!
//! This crate contains integration tests that drive the public evaluation
//! API with randomized curves and with real track configurations. The
//! rounding and saturation invariants the governance runtime relies on are
//! checked across the whole valid parameter domain.

pub mod helpers;
