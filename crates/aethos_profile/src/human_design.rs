//! Human Design activations: gate and line of each body at birth and at the
//! design instant.
//!
//! Gates follow the mandala order around the zodiac, not 64 bins counted
//! from 0° Aries, so the mapping comes from a [`GateWheel`] table of start
//! degrees. The wheel refuses to exist until every gate has a start.

use std::collections::BTreeMap;
use std::path::Path;

use aethos_ephem::{Body, EphemerisProvider, Site, TransitFrame};
use aethos_math::normalize_360;
use aethos_search::{DesignDate, DesignDateConfig, solve_design_jd_with};
use serde::Serialize;

use crate::error::ProfileError;

/// Number of gates on the wheel.
pub const GATE_COUNT: usize = 64;

/// Arc covered by one gate.
pub const GATE_SPAN_DEG: f64 = 360.0 / GATE_COUNT as f64;

/// Arc covered by one of a gate's six lines.
pub const LINE_SPAN_DEG: f64 = GATE_SPAN_DEG / 6.0;

/// Bodies every activation map must carry.
pub const ACTIVATION_BODIES: [Body; 11] = [
    Body::Sun,
    Body::Earth,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

/// Lunar nodes, activated when the provider supplies them.
const OPTIONAL_BODIES: [Body; 2] = [Body::NorthNode, Body::SouthNode];

/// Gate and line (1..=6) of one longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub gate: u8,
    pub line: u8,
}

/// Line of `lon` within the gate starting at `gate_start`.
///
/// Distance into the gate is measured circularly and folded into one gate
/// span; the result is clamped to 1..=6.
pub fn line_of(lon: f64, gate_start: f64) -> u8 {
    let mut d = normalize_360(lon - gate_start);
    if d >= GATE_SPAN_DEG {
        d %= GATE_SPAN_DEG;
    }
    let line = 1.0 + (d / LINE_SPAN_DEG).floor();
    line.clamp(1.0, 6.0) as u8
}

/// Immutable gate wheel: gate number to start degree, in mandala order.
#[derive(Debug, Clone, PartialEq)]
pub struct GateWheel {
    /// (start, gate) sorted by start.
    by_start: Vec<(f64, u8)>,
    /// Start degree indexed by gate - 1.
    starts: [f64; GATE_COUNT],
}

impl GateWheel {
    /// Build a wheel from (gate, start degree) pairs.
    ///
    /// Fails with [`ProfileError::InvalidGate`] for gates outside 1..=64 and
    /// [`ProfileError::GateWheelUninitialized`] unless all 64 gates are
    /// present.
    pub fn from_starts(
        entries: impl IntoIterator<Item = (u8, f64)>,
    ) -> Result<Self, ProfileError> {
        let mut table = BTreeMap::new();
        for (gate, start) in entries {
            if !(1..=GATE_COUNT as u8).contains(&gate) {
                return Err(ProfileError::InvalidGate(gate));
            }
            table.insert(gate, normalize_360(start));
        }
        if table.len() < GATE_COUNT {
            return Err(ProfileError::GateWheelUninitialized {
                entries: table.len(),
            });
        }

        let mut starts = [0.0; GATE_COUNT];
        for (&gate, &start) in &table {
            starts[usize::from(gate - 1)] = start;
        }
        let mut by_start: Vec<(f64, u8)> = table.into_iter().map(|(g, s)| (s, g)).collect();
        by_start.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Ok(Self { by_start, starts })
    }

    /// Parse a wheel from a JSON object of gate number to start degree.
    ///
    /// ```json
    /// { "41": 302.0, "19": 307.625, "13": 313.25 }
    /// ```
    pub fn from_json(content: &str) -> Result<Self, ProfileError> {
        let table: BTreeMap<u8, f64> = serde_json::from_str(content)?;
        Self::from_starts(table)
    }

    /// Load a wheel from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        let wheel = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), "loaded gate wheel");
        Ok(wheel)
    }

    /// Start degree of `gate`, if it is 1..=64.
    pub fn start_of(&self, gate: u8) -> Option<f64> {
        let idx = usize::from(gate.checked_sub(1)?);
        self.starts.get(idx).copied()
    }

    /// Gate whose start is the greatest start <= `lon`.
    ///
    /// Longitudes before the first start wrap to the gate with the last
    /// start.
    pub fn gate_of(&self, lon: f64) -> u8 {
        let lon = normalize_360(lon);
        let idx = self.by_start.partition_point(|&(s, _)| s <= lon);
        let slot = if idx == 0 { self.by_start.len() - 1 } else { idx - 1 };
        self.by_start[slot].1
    }

    /// Gate and line of `lon`.
    pub fn activation(&self, lon: f64) -> Activation {
        let gate = self.gate_of(lon);
        let start = self.starts[usize::from(gate - 1)];
        Activation {
            gate,
            line: line_of(lon, start),
        }
    }

    /// Activations for a set of body longitudes.
    pub fn activations(
        &self,
        positions: impl IntoIterator<Item = (Body, f64)>,
    ) -> BTreeMap<Body, Activation> {
        positions
            .into_iter()
            .map(|(body, lon)| (body, self.activation(lon)))
            .collect()
    }
}

/// Activations of the bodies in `frame`.
///
/// Every body in [`ACTIVATION_BODIES`] must be present; the lunar nodes are
/// included when the frame carries them.
pub fn activations_from_frame(
    wheel: &GateWheel,
    frame: &TransitFrame,
) -> Result<BTreeMap<Body, Activation>, ProfileError> {
    let mut positions = Vec::with_capacity(ACTIVATION_BODIES.len() + OPTIONAL_BODIES.len());
    for body in ACTIVATION_BODIES {
        positions.push((body, frame.sample(body)?.lon_deg));
    }
    for body in OPTIONAL_BODIES {
        if let Ok(sample) = frame.sample(body) {
            positions.push((body, sample.lon_deg));
        }
    }
    Ok(wheel.activations(positions))
}

/// Personality and design activations for one birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanDesignLayer {
    pub birth_jd_ut: f64,
    pub design: DesignDate,
    pub personality_activations: BTreeMap<Body, Activation>,
    pub design_activations: BTreeMap<Body, Activation>,
}

/// Solve the design instant and compute both activation maps.
pub fn human_design_layer<P: EphemerisProvider + ?Sized>(
    provider: &P,
    site: &Site,
    wheel: &GateWheel,
    birth_jd: f64,
    config: &DesignDateConfig,
) -> Result<HumanDesignLayer, ProfileError> {
    let design = solve_design_jd_with(provider, site, birth_jd, config)?;
    if !design.converged {
        tracing::warn!(
            birth_jd,
            design_jd = design.jd_ut,
            residual = design.residual_deg,
            "design date did not converge; using best estimate"
        );
    }

    let personality = activations_from_frame(wheel, &provider.frame_at_jd(birth_jd, site)?)?;
    let design_acts = activations_from_frame(wheel, &provider.frame_at_jd(design.jd_ut, site)?)?;
    tracing::info!(birth_jd, design_jd = design.jd_ut, "human design layer computed");

    Ok(HumanDesignLayer {
        birth_jd_ut: birth_jd,
        design,
        personality_activations: personality,
        design_activations: design_acts,
    })
}
