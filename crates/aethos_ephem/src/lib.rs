//! Ephemeris boundary for the aethos timing engine.
//!
//! This crate provides:
//! - Body, chart-angle and chart-point identifiers
//! - `LongitudeSample` / `TransitFrame` snapshots and the `NatalPointSet`
//! - The [`EphemerisProvider`] trait every solver samples through
//! - Julian Day <-> civil time conversions
//! - [`TabulatedEphemeris`], a deterministic provider backed by a JSON table
//!
//! Raw longitudes are never computed here; they come from whatever provider
//! the host plugs in.

pub mod body;
pub mod error;
pub mod frame;
pub mod julian;
pub mod points;
pub mod provider;
pub mod tabulated;

pub use body::{ALL_ANGLES, ALL_BODIES, Body, ChartAngle, ChartPoint, UnknownName};
pub use error::EphemerisError;
pub use frame::{LongitudeSample, Site, TransitFrame};
pub use julian::{jd_from_utc, local_to_jd, utc_from_jd};
pub use points::NatalPointSet;
pub use provider::EphemerisProvider;
pub use tabulated::TabulatedEphemeris;
