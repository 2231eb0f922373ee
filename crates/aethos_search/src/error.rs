//! Error types for event search.

use aethos_ephem::EphemerisError;
use thiserror::Error;

/// Errors from aspect detection and the event solvers.
///
/// An angle crossing that is not bracketed by the window is not an error;
/// those solvers return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Error from the ephemeris provider.
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    /// Invalid search configuration or window.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The design-date walk never reached the target arc.
    #[error("target solar arc not reached within {lookback_days} days before birth")]
    NoBracket { lookback_days: f64 },
}
