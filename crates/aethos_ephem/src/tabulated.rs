//! Tabulated ephemeris: frames interpolated from a pre-computed JSON table.
//!
//! The table lists rows of body longitudes/speeds and angle longitudes at
//! increasing Julian Days. Between rows, bodies are interpolated with a cubic
//! Hermite polynomial on the unwrapped longitude (the tabulated speeds are the
//! end-point derivatives); angles are interpolated linearly on the shortest
//! arc. Angles sweep the zodiac once a day, so rows meant to drive angle
//! queries should be spaced well under twelve hours apart.
//!
//! ```json
//! {
//!   "utc_offset_minutes": -300,
//!   "rows": [
//!     { "jd_ut": 2461085.5,
//!       "bodies": { "Sun": { "lon": 325.1, "speed": 1.01 } },
//!       "angles": { "Asc": 120.4, "MC": 30.2 } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use aethos_math::{normalize_360, signed_diff};
use chrono::{FixedOffset, NaiveDateTime};
use serde::Deserialize;

use crate::body::{Body, ChartAngle};
use crate::error::EphemerisError;
use crate::frame::{LongitudeSample, Site, TransitFrame};
use crate::julian::{local_to_jd, utc_from_jd};
use crate::provider::EphemerisProvider;

#[derive(Debug, Clone, Deserialize)]
struct TableDoc {
    #[serde(default)]
    utc_offset_minutes: i32,
    rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct TableRow {
    jd_ut: f64,
    bodies: BTreeMap<Body, BodyEntry>,
    #[serde(default)]
    angles: BTreeMap<ChartAngle, f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct BodyEntry {
    lon: f64,
    #[serde(default)]
    speed: f64,
}

/// Deterministic provider over a fixed table of frames for one site.
///
/// The site passed to queries is not consulted: the table was computed for
/// a single location and timezone offset.
#[derive(Debug, Clone)]
pub struct TabulatedEphemeris {
    offset: FixedOffset,
    rows: Vec<TableRow>,
}

/// Cubic Hermite basis for p(0)=0, p(1)=p1, p'(0)=m0, p'(1)=m1 (all in
/// normalized time). Returns (value, derivative w.r.t. s).
fn hermite(s: f64, m0: f64, p1: f64, m1: f64) -> (f64, f64) {
    let s2 = s * s;
    let s3 = s2 * s;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    let d10 = 3.0 * s2 - 4.0 * s + 1.0;
    let d01 = -6.0 * s2 + 6.0 * s;
    let d11 = 3.0 * s2 - 2.0 * s;
    (h10 * m0 + h01 * p1 + h11 * m1, d10 * m0 + d01 * p1 + d11 * m1)
}

fn interpolate_body(a: BodyEntry, b: BodyEntry, h: f64, s: f64) -> (f64, f64) {
    // Unwrap the row-to-row motion around the advance the speed predicts, so
    // fast bodies and retrograde loops keep the right number of turns.
    let expected = a.speed * h;
    let delta = expected + signed_diff(b.lon, a.lon + expected);
    let (p, dp) = hermite(s, a.speed * h, delta, b.speed * h);
    (normalize_360(a.lon + p), dp / h)
}

impl TabulatedEphemeris {
    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, EphemerisError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a table from JSON text.
    pub fn parse(content: &str) -> Result<Self, EphemerisError> {
        let doc: TableDoc = serde_json::from_str(content)?;
        let offset = FixedOffset::east_opt(doc.utc_offset_minutes * 60)
            .ok_or_else(|| EphemerisError::Parse("utc_offset_minutes out of range".into()))?;
        if doc.rows.is_empty() {
            return Err(EphemerisError::Parse("table has no rows".into()));
        }
        if doc.rows.iter().any(|r| !r.jd_ut.is_finite()) {
            return Err(EphemerisError::Parse("jd_ut must be finite".into()));
        }
        if doc.rows.windows(2).any(|w| w[1].jd_ut <= w[0].jd_ut) {
            return Err(EphemerisError::Parse(
                "rows must be in strictly ascending jd_ut order".into(),
            ));
        }
        tracing::debug!(
            rows = doc.rows.len(),
            first = doc.rows[0].jd_ut,
            last = doc.rows[doc.rows.len() - 1].jd_ut,
            "loaded ephemeris table"
        );
        Ok(Self {
            offset,
            rows: doc.rows,
        })
    }

    /// First and last tabulated Julian Days.
    pub fn coverage(&self) -> (f64, f64) {
        (self.rows[0].jd_ut, self.rows[self.rows.len() - 1].jd_ut)
    }

    /// UTC offset the table's local timestamps use.
    pub fn utc_offset(&self) -> FixedOffset {
        self.offset
    }

    /// Locate the row pair bracketing `jd`.
    ///
    /// Returns `(a, b, s)` with `s` in [0, 1]; `b` is `None` when `jd`
    /// falls exactly on the last row.
    fn locate(&self, jd: f64) -> Result<(&TableRow, Option<&TableRow>, f64), EphemerisError> {
        let (first, last) = self.coverage();
        if !(first..=last).contains(&jd) {
            return Err(EphemerisError::OutOfRange { jd });
        }
        let idx = self.rows.partition_point(|r| r.jd_ut <= jd);
        if idx == self.rows.len() {
            return Ok((&self.rows[idx - 1], None, 0.0));
        }
        let a = &self.rows[idx - 1];
        let b = &self.rows[idx];
        Ok((a, Some(b), (jd - a.jd_ut) / (b.jd_ut - a.jd_ut)))
    }

    fn body_at(
        a: &TableRow,
        b: Option<&TableRow>,
        s: f64,
        body: Body,
    ) -> Option<(f64, f64)> {
        let ea = *a.bodies.get(&body)?;
        match b {
            None => Some((normalize_360(ea.lon), ea.speed)),
            Some(b) => {
                let eb = *b.bodies.get(&body)?;
                Some(interpolate_body(ea, eb, b.jd_ut - a.jd_ut, s))
            }
        }
    }
}

impl EphemerisProvider for TabulatedEphemeris {
    fn julian_day(&self, local: NaiveDateTime, _site: &Site) -> Result<f64, EphemerisError> {
        local_to_jd(local, self.offset)
    }

    fn frame_at_jd(&self, jd_ut: f64, _site: &Site) -> Result<TransitFrame, EphemerisError> {
        let (a, b, s) = self.locate(jd_ut)?;
        let utc = utc_from_jd(jd_ut)?;
        let local = utc.with_timezone(&self.offset);

        let samples = a.bodies.keys().filter_map(|&body| {
            Self::body_at(a, b, s, body)
                .map(|(lon, speed)| LongitudeSample::new(body, lon, speed, jd_ut))
        });
        let angles = a.angles.iter().filter_map(|(&angle, &lon_a)| match b {
            None => Some((angle, lon_a)),
            Some(b) => {
                let lon_b = *b.angles.get(&angle)?;
                Some((angle, lon_a + s * signed_diff(lon_b, lon_a)))
            }
        });
        Ok(TransitFrame::new(jd_ut, local, utc, samples, angles))
    }

    fn sample(
        &self,
        body: Body,
        jd_ut: f64,
        _site: &Site,
    ) -> Result<LongitudeSample, EphemerisError> {
        let (a, b, s) = self.locate(jd_ut)?;
        let (lon, speed) =
            Self::body_at(a, b, s, body).ok_or(EphemerisError::MissingBody(body))?;
        Ok(LongitudeSample::new(body, lon, speed, jd_ut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn hermite_endpoints() {
        let (p0, d0) = hermite(0.0, 2.0, 5.0, 3.0);
        let (p1, d1) = hermite(1.0, 2.0, 5.0, 3.0);
        assert!(p0.abs() < EPS);
        assert!((d0 - 2.0).abs() < EPS);
        assert!((p1 - 5.0).abs() < EPS);
        assert!((d1 - 3.0).abs() < EPS);
    }

    #[test]
    fn hermite_reproduces_linear_motion() {
        let (p, d) = hermite(0.25, 4.0, 4.0, 4.0);
        assert!((p - 1.0).abs() < EPS);
        assert!((d - 4.0).abs() < EPS);
    }

    #[test]
    fn body_unwraps_across_aries() {
        let a = BodyEntry { lon: 359.0, speed: 2.0 };
        let b = BodyEntry { lon: 1.0, speed: 2.0 };
        let (lon, speed) = interpolate_body(a, b, 1.0, 0.5);
        assert!(lon.abs() < 1e-9 || (lon - 360.0).abs() < 1e-9, "lon = {lon}");
        assert!((speed - 2.0).abs() < EPS);
    }

    #[test]
    fn fast_body_keeps_full_turns() {
        // 200 degrees in one step: the shortest arc alone would go backwards.
        let a = BodyEntry { lon: 0.0, speed: 200.0 };
        let b = BodyEntry { lon: 200.0, speed: 200.0 };
        let (lon, _) = interpolate_body(a, b, 1.0, 0.5);
        assert!((lon - 100.0).abs() < 1e-9, "lon = {lon}");
    }
}
