//! The ephemeris provider contract.

use chrono::NaiveDateTime;

use crate::body::Body;
use crate::error::EphemerisError;
use crate::frame::{LongitudeSample, Site, TransitFrame};

/// Source of tropical longitudes and chart angles.
///
/// Implementations must be deterministic for a fixed (instant, site): the
/// solvers call them repeatedly while bisecting and rely on identical
/// answers for identical queries. Calls may block.
pub trait EphemerisProvider {
    /// Resolve a local civil time at `site` to a Julian Day (UT).
    fn julian_day(&self, local: NaiveDateTime, site: &Site) -> Result<f64, EphemerisError>;

    /// Snapshot of every body and angle at `jd_ut`.
    fn frame_at_jd(&self, jd_ut: f64, site: &Site) -> Result<TransitFrame, EphemerisError>;

    /// Snapshot at a local civil time.
    fn frame_at_local(
        &self,
        local: NaiveDateTime,
        site: &Site,
    ) -> Result<TransitFrame, EphemerisError> {
        let jd = self.julian_day(local, site)?;
        self.frame_at_jd(jd, site)
    }

    /// A single body's sample at `jd_ut`.
    fn sample(
        &self,
        body: Body,
        jd_ut: f64,
        site: &Site,
    ) -> Result<LongitudeSample, EphemerisError> {
        Ok(*self.frame_at_jd(jd_ut, site)?.sample(body)?)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn julian_day(&self, local: NaiveDateTime, site: &Site) -> Result<f64, EphemerisError> {
        (**self).julian_day(local, site)
    }

    fn frame_at_jd(&self, jd_ut: f64, site: &Site) -> Result<TransitFrame, EphemerisError> {
        (**self).frame_at_jd(jd_ut, site)
    }

    fn sample(
        &self,
        body: Body,
        jd_ut: f64,
        site: &Site,
    ) -> Result<LongitudeSample, EphemerisError> {
        (**self).sample(body, jd_ut, site)
    }
}
