//! Types for angle-crossing and house-ingress search.

use aethos_ephem::{Body, ChartAngle};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Apparent direction of motion at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Retrograde,
}

impl Direction {
    /// Retrograde for negative speed, forward otherwise.
    pub fn from_speed(speed_deg_per_day: f64) -> Self {
        if speed_deg_per_day < 0.0 {
            Self::Retrograde
        } else {
            Self::Forward
        }
    }
}

/// A transiting body reaching the longitude of a natal angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleCrossing {
    pub body: Body,
    pub natal_angle: ChartAngle,
    pub direction: Direction,
    pub at_local: DateTime<FixedOffset>,
    pub at_utc: DateTime<Utc>,
    pub jd_ut: f64,
    /// Body longitude at the accepted instant, degrees [0, 360), rounded to
    /// 6 decimal places.
    pub lon_at_cross: f64,
    /// Signed distance from the natal angle at the accepted instant.
    pub residual_deg: f64,
    /// False when the iteration budget ran out before the tolerance was met.
    pub converged: bool,
}

/// A transiting body moving from one whole-sign house into the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseIngress {
    pub body: Body,
    pub from_house: u8,
    pub to_house: u8,
    pub at_local: DateTime<FixedOffset>,
    pub at_utc: DateTime<Utc>,
    pub jd_ut: f64,
}

/// Configuration for crossing and ingress bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossingConfig {
    /// Maximum bisection iterations (default 40).
    pub max_iterations: u32,
    /// Accept a midpoint once |signed diff| <= this many degrees (default 1e-4).
    pub tolerance_deg: f64,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 40,
            tolerance_deg: 1e-4,
        }
    }
}

impl CrossingConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        Ok(())
    }
}
