//! Error types for ephemeris access.

use thiserror::Error;

use crate::body::{Body, ChartAngle};

/// Errors from an ephemeris provider or from frame lookups.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Requested instant is outside the provider's coverage.
    #[error("JD {jd} is outside the ephemeris coverage")]
    OutOfRange { jd: f64 },
    /// The frame carries no sample for this body.
    #[error("no sample for body {0}")]
    MissingBody(Body),
    /// The frame carries no longitude for this chart angle.
    #[error("no longitude for angle {0}")]
    MissingAngle(ChartAngle),
    /// Civil time could not be resolved to a universal instant.
    #[error("invalid time: {0}")]
    InvalidTime(&'static str),
    /// Table or document parsing failed.
    #[error("parse error: {0}")]
    Parse(String),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EphemerisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for EphemerisError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
