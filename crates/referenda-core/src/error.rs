//! Error types for referenda curve evaluation.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("unknown curve kind: {0}")] UnknownCurveKind(String),
    #[error("division by zero: {operand} is zero")]
    DivisionByZero { operand: &'static str },
    #[error("arithmetic overflow")] ArithmeticOverflow,
    #[error("invalid curve parameters: {0}")] InvalidParameters(String),
    #[error("malformed curve metadata: {0}")] Metadata(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    #[error("missing track curve: {0}")] MissingCurve(&'static str),
    #[error("{which}: {source}")]
    Curve { which: &'static str, source: CurveError },
}

#[derive(Error, Debug)]
pub enum ReferendaError {
    #[error(transparent)] Curve(#[from] CurveError),
    #[error(transparent)] Track(#[from] TrackError),
    #[error("json: {0}")] Json(#[from] serde_json::Error),
}
