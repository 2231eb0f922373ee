//! Orb policy tables and classification.
//!
//! The tables and tier ladders are fixed astrological convention. They are
//! compiled in and never mutated.

use serde::Serialize;

use crate::aspect_types::{Aspect, Hardness, Tier};

/// Maximum orb per aspect, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbTable {
    /// Maximum orb of a conjunction (0 degrees).
    pub conjunction: f64,
    /// Maximum orb of an opposition (180 degrees).
    pub opposition: f64,
    /// Maximum orb of a square (90 degrees).
    pub square: f64,
    /// Maximum orb of a trine (120 degrees).
    pub trine: f64,
    /// Maximum orb of a sextile (60 degrees).
    pub sextile: f64,
}

impl OrbTable {
    pub const fn get(&self, aspect: Aspect) -> f64 {
        match aspect {
            Aspect::Conjunction => self.conjunction,
            Aspect::Opposition => self.opposition,
            Aspect::Square => self.square,
            Aspect::Trine => self.trine,
            Aspect::Sextile => self.sextile,
        }
    }
}

/// Orbs for ordinary point pairs.
pub const DEFAULT_ORBS: OrbTable = OrbTable {
    conjunction: 3.0,
    opposition: 3.0,
    square: 3.0,
    trine: 2.5,
    sextile: 2.0,
};

/// Tighter orbs when the natal point is a chart angle.
pub const ANGLE_ORBS: OrbTable = OrbTable {
    conjunction: 1.5,
    opposition: 1.5,
    square: 1.5,
    trine: 1.0,
    sextile: 1.0,
};

/// Both orb tables; serialized as `{ "default": {..}, "angles": {..} }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbPolicy {
    /// Orbs for ordinary natal points.
    pub default: OrbTable,
    /// Orbs when the natal point is a chart angle.
    pub angles: OrbTable,
}

pub const ORB_POLICY: OrbPolicy = OrbPolicy {
    default: DEFAULT_ORBS,
    angles: ANGLE_ORBS,
};

impl OrbPolicy {
    /// Orb bound for `aspect`, using the angle table when `angle_hit`.
    pub const fn limit(&self, aspect: Aspect, angle_hit: bool) -> f64 {
        if angle_hit {
            self.angles.get(aspect)
        } else {
            self.default.get(aspect)
        }
    }
}

/// Orb as reported and ranked: rounded to 4 decimal places.
///
/// Orb limits and tiers use the unrounded value.
pub fn round_orb(orb: f64) -> f64 {
    (orb * 1e4).round() / 1e4
}

/// Fixed hard/soft classification of an aspect.
pub const fn hardness(aspect: Aspect) -> Hardness {
    match aspect {
        Aspect::Conjunction | Aspect::Opposition | Aspect::Square => Hardness::Hard,
        Aspect::Trine | Aspect::Sextile => Hardness::Soft,
    }
}

/// Tier of an orb. Each threshold is inclusive.
///
/// Angle hits: 0.25 / 0.75 / 1.25, then `Low`.
/// Other hits: 0.5 / 1.0 / 2.0 / 3.0, then `Background`.
pub fn orb_tier(orb: f64, angle_hit: bool) -> Tier {
    if angle_hit {
        if orb <= 0.25 {
            Tier::Exact
        } else if orb <= 0.75 {
            Tier::High
        } else if orb <= 1.25 {
            Tier::Medium
        } else {
            Tier::Low
        }
    } else if orb <= 0.5 {
        Tier::Exact
    } else if orb <= 1.0 {
        Tier::High
    } else if orb <= 2.0 {
        Tier::Medium
    } else if orb <= 3.0 {
        Tier::Low
    } else {
        Tier::Background
    }
}
