//! Snapshot types produced by an ephemeris provider.

use std::collections::BTreeMap;

use aethos_math::normalize_360;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::body::{Body, ChartAngle};
use crate::error::EphemerisError;

/// Observer site: timezone label plus geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// IANA timezone name, e.g. `America/Detroit`.
    pub tz_name: String,
    /// Geographic latitude in degrees (north positive).
    pub lat_deg: f64,
    /// Geographic longitude in degrees (east positive).
    pub lon_deg: f64,
}

/// One body's tropical longitude and speed at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LongitudeSample {
    pub body: Body,
    /// Ecliptic longitude in degrees [0, 360).
    pub lon_deg: f64,
    /// Longitude speed in degrees per day (negative when retrograde).
    pub speed_deg_per_day: f64,
    /// Julian Day (UT) of the sample.
    pub jd_ut: f64,
}

impl LongitudeSample {
    /// Build a sample, normalizing the longitude into [0, 360).
    pub fn new(body: Body, lon_deg: f64, speed_deg_per_day: f64, jd_ut: f64) -> Self {
        Self {
            body,
            lon_deg: normalize_360(lon_deg),
            speed_deg_per_day,
            jd_ut,
        }
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed_deg_per_day < 0.0
    }
}

/// All body samples and angle longitudes at a single instant.
///
/// Fields are private; a frame is built once by a provider and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitFrame {
    jd_ut: f64,
    local: DateTime<FixedOffset>,
    utc: DateTime<Utc>,
    bodies: BTreeMap<Body, LongitudeSample>,
    angles: BTreeMap<ChartAngle, f64>,
}

impl TransitFrame {
    /// Assemble a frame. Angle longitudes are normalized into [0, 360).
    pub fn new(
        jd_ut: f64,
        local: DateTime<FixedOffset>,
        utc: DateTime<Utc>,
        samples: impl IntoIterator<Item = LongitudeSample>,
        angles: impl IntoIterator<Item = (ChartAngle, f64)>,
    ) -> Self {
        Self {
            jd_ut,
            local,
            utc,
            bodies: samples.into_iter().map(|s| (s.body, s)).collect(),
            angles: angles
                .into_iter()
                .map(|(a, lon)| (a, normalize_360(lon)))
                .collect(),
        }
    }

    /// Julian Day (UT) of the snapshot instant.
    pub fn jd_ut(&self) -> f64 {
        self.jd_ut
    }

    /// Local civil timestamp of the frame.
    pub fn local(&self) -> DateTime<FixedOffset> {
        self.local
    }

    /// Universal timestamp of the frame.
    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Sample for `body`, or [`EphemerisError::MissingBody`].
    pub fn sample(&self, body: Body) -> Result<&LongitudeSample, EphemerisError> {
        self.bodies
            .get(&body)
            .ok_or(EphemerisError::MissingBody(body))
    }

    /// Longitude of `angle`, or [`EphemerisError::MissingAngle`].
    pub fn angle(&self, angle: ChartAngle) -> Result<f64, EphemerisError> {
        self.angles
            .get(&angle)
            .copied()
            .ok_or(EphemerisError::MissingAngle(angle))
    }

    /// Body samples in body order.
    pub fn samples(&self) -> impl Iterator<Item = &LongitudeSample> {
        self.bodies.values()
    }

    /// Angle longitudes in chart order.
    pub fn angles(&self) -> impl Iterator<Item = (ChartAngle, f64)> + '_ {
        self.angles.iter().map(|(a, lon)| (*a, *lon))
    }
}
