//! Identifiers for transiting bodies, chart angles and natal chart points.
//!
//! Names follow the profile document convention: bodies by their English
//! name (`"Sun"`, `"NorthNode"`), angles by their short form (`"Asc"`,
//! `"MC"`, `"Desc"`, `"IC"`).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A name that does not identify any known body, angle or chart point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart point `{0}`")]
pub struct UnknownName(pub String);

/// Bodies an ephemeris provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Earth,
    NorthNode,
    SouthNode,
}

/// All bodies in declaration order.
pub const ALL_BODIES: [Body; 13] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::Earth,
    Body::NorthNode,
    Body::SouthNode,
];

impl Body {
    /// Canonical name as used in profile and table documents.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::Earth => "Earth",
            Self::NorthNode => "NorthNode",
            Self::SouthNode => "SouthNode",
        }
    }

    /// Look a body up by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_BODIES.iter().copied().find(|b| b.name() == name)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// The four chart angles. Aspects to these use the tighter orb table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChartAngle {
    #[serde(rename = "Asc")]
    Ascendant,
    #[serde(rename = "MC")]
    Midheaven,
    #[serde(rename = "Desc")]
    Descendant,
    #[serde(rename = "IC")]
    ImumCoeli,
}

/// All four angles in chart order.
pub const ALL_ANGLES: [ChartAngle; 4] = [
    ChartAngle::Ascendant,
    ChartAngle::Midheaven,
    ChartAngle::Descendant,
    ChartAngle::ImumCoeli,
];

impl ChartAngle {
    /// Short name (`Asc`, `MC`, `Desc`, `IC`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascendant => "Asc",
            Self::Midheaven => "MC",
            Self::Descendant => "Desc",
            Self::ImumCoeli => "IC",
        }
    }

    /// Look an angle up by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_ANGLES.iter().copied().find(|a| a.name() == name)
    }
}

impl Display for ChartAngle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartAngle {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// A named point of a natal chart: either a body or an angle.
///
/// Serialized as its bare name, so it can key JSON objects directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartPoint {
    Body(Body),
    Angle(ChartAngle),
}

impl ChartPoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body(b) => b.name(),
            Self::Angle(a) => a.name(),
        }
    }

    /// True for the four chart angles.
    pub const fn is_angle(self) -> bool {
        matches!(self, Self::Angle(_))
    }
}

impl Display for ChartPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartPoint {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(a) = ChartAngle::from_name(s) {
            return Ok(Self::Angle(a));
        }
        Body::from_name(s)
            .map(Self::Body)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for ChartPoint {
    type Error = UnknownName;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ChartPoint> for String {
    fn from(p: ChartPoint) -> Self {
        p.name().to_string()
    }
}

impl From<Body> for ChartPoint {
    fn from(b: Body) -> Self {
        Self::Body(b)
    }
}

impl From<ChartAngle> for ChartPoint {
    fn from(a: ChartAngle) -> Self {
        Self::Angle(a)
    }
}
