//! Angle-crossing and house-ingress solvers.
//!
//! Both bisect f(t) = signed_diff(lon(body, t), target) over a caller-chosen
//! window. signed_diff lives on the (-180, 180] branch, so f also flips sign
//! at the antipode of the target; such a jump is not a crossing and the
//! window is reported empty. The window should hold at most one crossing.

use aethos_ephem::{Body, ChartAngle, EphemerisProvider, Site};
use aethos_math::{SIGN_SPAN_DEG, normalize_360, signed_diff, whole_sign_house};
use chrono::{DateTime, FixedOffset, Utc};

use crate::crossing_types::{AngleCrossing, CrossingConfig, Direction, HouseIngress};
use crate::error::SearchError;
use crate::root::{Root, find_root_bracketed};

/// One provider evaluation carried through the bisection.
#[derive(Debug, Clone, Copy)]
struct BodyState {
    lon: f64,
    speed: f64,
    local: DateTime<FixedOffset>,
    utc: DateTime<Utc>,
    jd: f64,
}

fn body_state_at<P: EphemerisProvider + ?Sized>(
    provider: &P,
    site: &Site,
    body: Body,
    jd: f64,
) -> Result<BodyState, SearchError> {
    let frame = provider.frame_at_jd(jd, site)?;
    let sample = frame.sample(body)?;
    Ok(BodyState {
        lon: sample.lon_deg,
        speed: sample.speed_deg_per_day,
        local: frame.local(),
        utc: frame.utc(),
        jd: frame.jd_ut(),
    })
}

/// Check if a sign change is a genuine zero crossing vs a wrap-around discontinuity.
///
/// A jump from ~+180 to ~-180 has a negative product but sits at the
/// antipode. A genuine crossing has both values relatively small.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b <= 0.0 && (f_a - f_b).abs() < 270.0
}

/// Crossing longitude as reported: rounded to 6 decimal places.
fn round_lon(lon: f64) -> f64 {
    normalize_360((lon * 1e6).round() / 1e6)
}

fn validate_window(jd_start: f64, jd_end: f64) -> Result<(), SearchError> {
    if !jd_start.is_finite() || !jd_end.is_finite() {
        return Err(SearchError::InvalidConfig("window bounds must be finite"));
    }
    if jd_end <= jd_start {
        return Err(SearchError::InvalidConfig("jd_end must be after jd_start"));
    }
    Ok(())
}

/// Bisect for the instant `body` reaches `target_lon` inside the window.
fn bisect_longitude<P: EphemerisProvider + ?Sized>(
    provider: &P,
    site: &Site,
    body: Body,
    target_lon: f64,
    jd_start: f64,
    jd_end: f64,
    config: &CrossingConfig,
) -> Result<Option<Root<BodyState>>, SearchError> {
    let objective = |jd: f64| -> Result<(f64, BodyState), SearchError> {
        let p = body_state_at(provider, site, body, jd)?;
        Ok((signed_diff(p.lon, target_lon), p))
    };

    let (f_a, _) = objective(jd_start)?;
    let (f_b, _) = objective(jd_end)?;
    if !is_genuine_crossing(f_a, f_b) {
        tracing::debug!(%body, target_lon, f_a, f_b, "no crossing bracketed in window");
        return Ok(None);
    }

    find_root_bracketed(
        jd_start,
        f_a,
        jd_end,
        f_b,
        config.max_iterations,
        config.tolerance_deg,
        objective,
    )
}

/// Find when `body` crosses the natal angle at `natal_angle_lon` within
/// [`jd_start`, `jd_end`].
///
/// Returns `Ok(None)` when no crossing is bracketed. When the iteration
/// budget runs out first, the last midpoint is returned with
/// `converged = false`.
#[allow(clippy::too_many_arguments)]
pub fn solve_angle_crossing<P: EphemerisProvider + ?Sized>(
    provider: &P,
    site: &Site,
    body: Body,
    natal_angle: ChartAngle,
    natal_angle_lon: f64,
    jd_start: f64,
    jd_end: f64,
    config: &CrossingConfig,
) -> Result<Option<AngleCrossing>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_window(jd_start, jd_end)?;

    let target = normalize_360(natal_angle_lon);
    let Some(root) = bisect_longitude(provider, site, body, target, jd_start, jd_end, config)?
    else {
        return Ok(None);
    };

    let p = root.payload;
    tracing::debug!(
        %body,
        angle = %natal_angle,
        jd = p.jd,
        residual = root.value,
        iterations = root.iterations,
        "angle crossing found"
    );
    Ok(Some(AngleCrossing {
        body,
        natal_angle,
        direction: Direction::from_speed(p.speed),
        at_local: p.local,
        at_utc: p.utc,
        jd_ut: p.jd,
        lon_at_cross: round_lon(p.lon),
        residual_deg: root.value,
        converged: root.converged,
    }))
}

/// Find when `body` leaves the whole-sign house it occupies at `jd_start`,
/// houses counted from `natal_asc_lon`.
///
/// The net motion across the window picks the cusp: the far cusp of the
/// starting house when moving forward, its own cusp when moving retrograde.
/// Returns `Ok(None)` when the body ends the window in its starting house
/// or that cusp is not bracketed.
pub fn solve_house_ingress<P: EphemerisProvider + ?Sized>(
    provider: &P,
    site: &Site,
    body: Body,
    natal_asc_lon: f64,
    jd_start: f64,
    jd_end: f64,
    config: &CrossingConfig,
) -> Result<Option<HouseIngress>, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_window(jd_start, jd_end)?;

    let start = provider.sample(body, jd_start, site)?;
    let end = provider.sample(body, jd_end, site)?;
    let from_house = whole_sign_house(natal_asc_lon, start.lon_deg);
    if whole_sign_house(natal_asc_lon, end.lon_deg) == from_house {
        return Ok(None);
    }

    let forward = signed_diff(end.lon_deg, start.lon_deg) >= 0.0;
    let (cusp, to_house) = if forward {
        (
            natal_asc_lon + SIGN_SPAN_DEG * f64::from(from_house),
            from_house % 12 + 1,
        )
    } else {
        (
            natal_asc_lon + SIGN_SPAN_DEG * f64::from(from_house - 1),
            (from_house + 10) % 12 + 1,
        )
    };

    let target = normalize_360(cusp);
    let Some(root) = bisect_longitude(provider, site, body, target, jd_start, jd_end, config)?
    else {
        return Ok(None);
    };

    let p = root.payload;
    Ok(Some(HouseIngress {
        body,
        from_house,
        to_house,
        at_local: p.local,
        at_utc: p.utc,
        jd_ut: p.jd,
    }))
}
