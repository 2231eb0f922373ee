//! Error types for profile-level computations.

use aethos_ephem::{ChartPoint, EphemerisError};
use aethos_search::SearchError;
use thiserror::Error;

/// Errors from profile loading, timing bundles and activation layers.
///
/// Missing astrological input is always an error; nothing is defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProfileError {
    /// Error from a search or solver.
    #[error("search error: {0}")]
    Search(#[from] SearchError),
    /// Error from the ephemeris provider.
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    /// Invalid settings passed to a builder.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// A required natal point is absent from the profile.
    #[error("profile is missing required point {0}")]
    MissingPoint(ChartPoint),
    /// The profile names a point this engine does not know.
    #[error("profile contains unknown point `{0}`")]
    UnknownPoint(String),
    /// The gate wheel table does not cover all 64 gates.
    #[error("gate wheel mapping is not initialized ({entries} of 64 gates)")]
    GateWheelUninitialized { entries: usize },
    /// Gate number outside 1..=64.
    #[error("gate must be 1..64; got {0}")]
    InvalidGate(u8),
    /// Document parsing failed.
    #[error("JSON error: {0}")]
    Json(String),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
