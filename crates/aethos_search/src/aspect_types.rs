//! Types for transit-to-natal aspect detection.

use aethos_ephem::{Body, ChartPoint};
use serde::{Deserialize, Serialize};

/// The five major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Conjunction,
    Opposition,
    Square,
    Trine,
    Sextile,
}

/// All aspects in detection order.
pub const ALL_ASPECTS: [Aspect; 5] = [
    Aspect::Conjunction,
    Aspect::Opposition,
    Aspect::Square,
    Aspect::Trine,
    Aspect::Sextile,
];

impl Aspect {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Opposition => "opposition",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Sextile => "sextile",
        }
    }

    /// Exact angular separation in degrees.
    pub const fn exact_deg(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Opposition => 180.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Sextile => 60.0,
        }
    }
}

/// Hard (conjunction, opposition, square) or soft (trine, sextile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hardness {
    Hard,
    Soft,
}

/// Orb-magnitude classification, tightest first.
///
/// `Background` only occurs for non-angle hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Exact,
    High,
    Medium,
    Low,
    Background,
}

/// One transiting body aspecting one natal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectHit {
    pub transiting_body: Body,
    pub natal_point: ChartPoint,
    pub aspect: Aspect,
    /// |separation - exact| in degrees, always >= 0.
    pub orb_deg: f64,
    /// The aspect's exact separation in degrees.
    pub exact_deg: f64,
    pub tier: Tier,
    pub hardness: Hardness,
    /// Whether the natal point is a chart angle.
    pub angle_hit: bool,
    /// Whole-sign house of the transiting body from the transit ascendant.
    pub transit_house: u8,
    /// Whole-sign house of the natal point from the natal ascendant.
    pub natal_house: u8,
}
