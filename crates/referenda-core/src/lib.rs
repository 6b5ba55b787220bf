//! # referenda-core
//! Foundation types, fixed-point arithmetic and traits for referenda curves.

pub mod arith;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
