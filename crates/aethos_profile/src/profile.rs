//! Natal profile documents.
//!
//! ```json
//! {
//!   "profile_id": "p-001",
//!   "canonical_chart": {
//!     "meta": { "tz_name": "America/New_York", "lat": 40.7, "lon": -74.0 },
//!     "western_tropical": {
//!       "points": { "Sun": { "lon": 280.4 }, "Asc": { "lon": 101.2 } }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use aethos_ephem::{ChartAngle, ChartPoint, NatalPointSet, Site};
use serde::Deserialize;

use crate::error::ProfileError;

#[derive(Debug, Deserialize)]
struct ProfileDoc {
    #[serde(default)]
    profile_id: Option<String>,
    canonical_chart: CanonicalChart,
}

#[derive(Debug, Deserialize)]
struct CanonicalChart {
    meta: ChartMeta,
    western_tropical: WesternTropical,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    tz_name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct WesternTropical {
    points: BTreeMap<String, PointDoc>,
}

#[derive(Debug, Deserialize)]
struct PointDoc {
    lon: f64,
}

/// Longitudes of the four natal angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NatalAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
}

impl NatalAngles {
    pub fn get(&self, angle: ChartAngle) -> f64 {
        match angle {
            ChartAngle::Ascendant => self.ascendant,
            ChartAngle::Midheaven => self.midheaven,
            ChartAngle::Descendant => self.descendant,
            ChartAngle::ImumCoeli => self.imum_coeli,
        }
    }
}

/// A loaded natal profile: birth site and natal point longitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalProfile {
    pub profile_id: Option<String>,
    pub site: Site,
    pub points: NatalPointSet,
}

impl NatalProfile {
    /// Parse a profile from JSON text.
    ///
    /// Point names must be known chart points; an unknown name is rejected
    /// rather than skipped.
    pub fn from_json(content: &str) -> Result<Self, ProfileError> {
        let doc: ProfileDoc = serde_json::from_str(content)?;
        let chart = doc.canonical_chart;

        let mut points = Vec::with_capacity(chart.western_tropical.points.len());
        for (name, p) in chart.western_tropical.points {
            let Ok(point) = name.parse::<ChartPoint>() else {
                return Err(ProfileError::UnknownPoint(name));
            };
            if !p.lon.is_finite() {
                return Err(ProfileError::Json(format!("{name}: lon must be finite")));
            }
            points.push((point, p.lon));
        }

        Ok(Self {
            profile_id: doc.profile_id,
            site: Site {
                tz_name: chart.meta.tz_name,
                lat_deg: chart.meta.lat,
                lon_deg: chart.meta.lon,
            },
            points: NatalPointSet::new(points),
        })
    }

    /// Load a profile from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        let profile = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            profile_id = ?profile.profile_id,
            points = profile.points.len(),
            "loaded profile"
        );
        Ok(profile)
    }

    /// Longitude of one natal angle.
    pub fn angle(&self, angle: ChartAngle) -> Result<f64, ProfileError> {
        self.points
            .angle(angle)
            .ok_or(ProfileError::MissingPoint(ChartPoint::Angle(angle)))
    }

    /// All four natal angles; any one missing is an error.
    pub fn natal_angles(&self) -> Result<NatalAngles, ProfileError> {
        Ok(NatalAngles {
            ascendant: self.angle(ChartAngle::Ascendant)?,
            midheaven: self.angle(ChartAngle::Midheaven)?,
            descendant: self.angle(ChartAngle::Descendant)?,
            imum_coeli: self.angle(ChartAngle::ImumCoeli)?,
        })
    }
}
