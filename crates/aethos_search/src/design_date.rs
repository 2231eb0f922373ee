//! Design-date solver: the instant the Sun stood a fixed arc behind its
//! birth longitude.
//!
//! arc(jd) = normalize(sun(birth) - sun(jd)). Walk back from birth in whole
//! steps until arc >= target, then bisect arc(jd) - target inside
//! [jd_found, birth]. The Sun's daily motion varies with orbital
//! eccentricity, so a fixed day offset would be biased; bisecting the
//! sampled longitude is not.

use aethos_ephem::{Body, EphemerisProvider, Site};
use aethos_math::normalize_360;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::root::find_root_bracketed;

/// Configuration for the design-date search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignDateConfig {
    /// Solar arc to recede, degrees (default 88).
    pub target_arc_deg: f64,
    /// Backward walk step in days (default 1).
    pub step_days: f64,
    /// Give up bracketing after this many days (default 120).
    pub max_lookback_days: f64,
    /// Maximum bisection iterations (default 60).
    pub max_iterations: u32,
    /// Accept once |arc - target| <= this many degrees (default 0.01).
    pub tolerance_deg: f64,
}

impl Default for DesignDateConfig {
    fn default() -> Self {
        Self {
            target_arc_deg: 88.0,
            step_days: 1.0,
            max_lookback_days: 120.0,
            max_iterations: 60,
            tolerance_deg: 0.01,
        }
    }
}

impl DesignDateConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.target_arc_deg.is_finite()
            || self.target_arc_deg <= 0.0
            || self.target_arc_deg >= 360.0
        {
            return Err("target_arc_deg must be in (0, 360)");
        }
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        if !self.max_lookback_days.is_finite() || self.max_lookback_days <= 0.0 {
            return Err("max_lookback_days must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        Ok(())
    }
}

/// Result of the design-date search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignDate {
    /// Design instant as a Julian Day (UT).
    pub jd_ut: f64,
    /// Solar arc actually receded at `jd_ut`.
    pub arc_deg: f64,
    /// `arc_deg - target_arc_deg`.
    pub residual_deg: f64,
    /// Bisection iterations used.
    pub iterations: u32,
    /// False when the budget ran out before the tolerance was met.
    pub converged: bool,
}

/// Solve for the design Julian Day given a Sun-longitude function.
///
/// Fails with [`SearchError::NoBracket`] when the target arc is not
/// reached within `max_lookback_days`; once bracketed it always returns
/// the best estimate found.
pub fn solve_design_jd<F>(
    birth_jd: f64,
    mut sun_lon_at: F,
    config: &DesignDateConfig,
) -> Result<DesignDate, SearchError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !birth_jd.is_finite() {
        return Err(SearchError::InvalidConfig("birth_jd must be finite"));
    }

    let sun_birth = normalize_360(sun_lon_at(birth_jd)?);
    let mut arc = |jd: f64| -> Result<f64, SearchError> {
        Ok(normalize_360(sun_birth - normalize_360(sun_lon_at(jd)?)))
    };
    let target = config.target_arc_deg;

    // Walk back until arc >= target.
    let mut days = 0.0;
    let mut bracket = None;
    while days < config.max_lookback_days {
        let jd_lo = birth_jd - days;
        let a = arc(jd_lo)?;
        if a >= target {
            bracket = Some((jd_lo, a));
            break;
        }
        days += config.step_days;
    }
    let Some((jd_lo, arc_lo)) = bracket else {
        return Err(SearchError::NoBracket {
            lookback_days: config.max_lookback_days,
        });
    };
    tracing::debug!(birth_jd, jd_lo, arc_lo, "design date bracketed");

    let root = find_root_bracketed(
        jd_lo,
        arc_lo - target,
        birth_jd,
        -target,
        config.max_iterations,
        config.tolerance_deg,
        |jd| -> Result<(f64, f64), SearchError> {
            let a = arc(jd)?;
            Ok((a - target, a))
        },
    )?
    .ok_or(SearchError::NoBracket {
        lookback_days: config.max_lookback_days,
    })?;

    Ok(DesignDate {
        jd_ut: root.t,
        arc_deg: root.payload,
        residual_deg: root.value,
        iterations: root.iterations,
        converged: root.converged,
    })
}

/// Solve for the design Julian Day sampling the Sun from `provider`.
pub fn solve_design_jd_with<P: EphemerisProvider + ?Sized>(
    provider: &P,
    site: &Site,
    birth_jd: f64,
    config: &DesignDateConfig,
) -> Result<DesignDate, SearchError> {
    solve_design_jd(
        birth_jd,
        |jd| Ok(provider.sample(Body::Sun, jd, site)?.lon_deg),
        config,
    )
}
