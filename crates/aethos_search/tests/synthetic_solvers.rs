//! Solver tests over a synthetic constant-rate ephemeris.
//!
//! Each body moves linearly: lon(t) = lon0 + speed * (t - JD0). No kernel
//! files are involved, so expected instants follow in closed form.

use aethos_ephem::{
    Body, ChartAngle, ChartPoint, EphemerisError, EphemerisProvider, LongitudeSample,
    NatalPointSet, Site, TransitFrame, local_to_jd, utc_from_jd,
};
use aethos_search::{
    CrossingConfig, DEFAULT_MAX_HITS, DesignDateConfig, Direction, SearchError, find_aspects,
    solve_angle_crossing, solve_design_jd_with, solve_house_ingress,
};
use chrono::{FixedOffset, NaiveDateTime};

const JD0: f64 = 2_461_000.5;

struct LinearSky {
    bodies: Vec<(Body, f64, f64)>,
    asc0: f64,
}

impl LinearSky {
    fn new(bodies: &[(Body, f64, f64)]) -> Self {
        Self {
            bodies: bodies.to_vec(),
            asc0: 0.0,
        }
    }

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }
}

impl EphemerisProvider for LinearSky {
    fn julian_day(&self, local: NaiveDateTime, _site: &Site) -> Result<f64, EphemerisError> {
        local_to_jd(local, Self::offset())
    }

    fn frame_at_jd(&self, jd_ut: f64, _site: &Site) -> Result<TransitFrame, EphemerisError> {
        let utc = utc_from_jd(jd_ut)?;
        let dt = jd_ut - JD0;
        Ok(TransitFrame::new(
            jd_ut,
            utc.with_timezone(&Self::offset()),
            utc,
            self.bodies
                .iter()
                .map(|&(b, lon0, speed)| LongitudeSample::new(b, lon0 + speed * dt, speed, jd_ut)),
            [(ChartAngle::Ascendant, self.asc0 + 360.98 * dt)],
        ))
    }
}

fn site() -> Site {
    Site {
        tz_name: "Europe/Athens".into(),
        lat_deg: 37.98,
        lon_deg: 23.73,
    }
}

#[test]
fn forward_crossing_of_natal_ascendant() {
    let sky = LinearSky::new(&[(Body::Mars, 90.0, 1.0)]);
    let config = CrossingConfig::default();
    let crossing = solve_angle_crossing(
        &sky,
        &site(),
        Body::Mars,
        ChartAngle::Ascendant,
        100.0,
        JD0,
        JD0 + 20.0,
        &config,
    )
    .unwrap()
    .expect("crossing inside window");

    assert!(crossing.converged);
    assert!(crossing.residual_deg.abs() <= config.tolerance_deg);
    assert!((crossing.jd_ut - (JD0 + 10.0)).abs() < 1e-3);
    assert!((crossing.lon_at_cross - 100.0).abs() <= config.tolerance_deg);
    assert_eq!(crossing.direction, Direction::Forward);
    assert_eq!(crossing.natal_angle, ChartAngle::Ascendant);
    assert_eq!(crossing.at_local.offset().local_minus_utc(), 7200);
}

#[test]
fn exhausted_budget_reports_best_estimate() {
    // Midpoints land at JD0 + 7.5 (97.5) then JD0 + 11.25 (101.25).
    let sky = LinearSky::new(&[(Body::Mars, 90.0, 1.0)]);
    let config = CrossingConfig {
        max_iterations: 2,
        ..CrossingConfig::default()
    };
    let crossing = solve_angle_crossing(
        &sky,
        &site(),
        Body::Mars,
        ChartAngle::Ascendant,
        100.0,
        JD0,
        JD0 + 15.0,
        &config,
    )
    .unwrap()
    .expect("crossing bracketed");

    assert!(!crossing.converged);
    assert!(crossing.residual_deg.abs() > config.tolerance_deg);
    assert!((crossing.residual_deg - 1.25).abs() < 1e-6);
    assert!((crossing.jd_ut - (JD0 + 11.25)).abs() < 1e-6);
    assert!((crossing.lon_at_cross - 101.25).abs() < 1e-6);
    let scaled = crossing.lon_at_cross * 1e6;
    assert!((scaled - scaled.round()).abs() < 1e-6);
}

#[test]
fn retrograde_crossing() {
    let sky = LinearSky::new(&[(Body::Mercury, 105.0, -0.5)]);
    let crossing = solve_angle_crossing(
        &sky,
        &site(),
        Body::Mercury,
        ChartAngle::Midheaven,
        100.0,
        JD0,
        JD0 + 20.0,
        &CrossingConfig::default(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(crossing.direction, Direction::Retrograde);
    assert!((crossing.jd_ut - (JD0 + 10.0)).abs() < 1e-3);
}

#[test]
fn crossing_across_aries() {
    let sky = LinearSky::new(&[(Body::Venus, 355.0, 1.2)]);
    let crossing = solve_angle_crossing(
        &sky,
        &site(),
        Body::Venus,
        ChartAngle::ImumCoeli,
        2.0,
        JD0,
        JD0 + 10.0,
        &CrossingConfig::default(),
    )
    .unwrap()
    .unwrap();
    let expected = JD0 + 7.0 / 1.2;
    assert!((crossing.jd_ut - expected).abs() < 1e-3);
}

#[test]
fn no_crossing_in_window_is_none() {
    let sky = LinearSky::new(&[(Body::Mars, 90.0, 1.0)]);
    let result = solve_angle_crossing(
        &sky,
        &site(),
        Body::Mars,
        ChartAngle::Ascendant,
        100.0,
        JD0,
        JD0 + 5.0,
        &CrossingConfig::default(),
    )
    .unwrap();
    assert!(result.is_none());
}

#[test]
fn antipode_is_not_a_crossing() {
    // signed diff runs 170 -> -170 through the antipode of the target.
    let sky = LinearSky::new(&[(Body::Jupiter, 270.0, 1.0)]);
    let result = solve_angle_crossing(
        &sky,
        &site(),
        Body::Jupiter,
        ChartAngle::Descendant,
        100.0,
        JD0,
        JD0 + 20.0,
        &CrossingConfig::default(),
    )
    .unwrap();
    assert!(result.is_none());
}

#[test]
fn inverted_window_rejected() {
    let sky = LinearSky::new(&[(Body::Mars, 90.0, 1.0)]);
    let err = solve_angle_crossing(
        &sky,
        &site(),
        Body::Mars,
        ChartAngle::Ascendant,
        100.0,
        JD0 + 5.0,
        JD0,
        &CrossingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::InvalidConfig(_)));
}

#[test]
fn missing_body_is_error() {
    let sky = LinearSky::new(&[(Body::Mars, 90.0, 1.0)]);
    let err = solve_angle_crossing(
        &sky,
        &site(),
        Body::Saturn,
        ChartAngle::Ascendant,
        100.0,
        JD0,
        JD0 + 5.0,
        &CrossingConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        SearchError::Ephemeris(EphemerisError::MissingBody(Body::Saturn))
    );
}

#[test]
fn forward_house_ingress() {
    let sky = LinearSky::new(&[(Body::Sun, 25.0, 1.0)]);
    let ingress = solve_house_ingress(
        &sky,
        &site(),
        Body::Sun,
        0.0,
        JD0,
        JD0 + 10.0,
        &CrossingConfig::default(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(ingress.from_house, 1);
    assert_eq!(ingress.to_house, 2);
    assert!((ingress.jd_ut - (JD0 + 5.0)).abs() < 1e-3);
}

#[test]
fn retrograde_house_ingress_wraps_to_twelfth() {
    let sky = LinearSky::new(&[(Body::Saturn, 12.0, -0.1)]);
    let ingress = solve_house_ingress(
        &sky,
        &site(),
        Body::Saturn,
        10.0,
        JD0,
        JD0 + 40.0,
        &CrossingConfig::default(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(ingress.from_house, 1);
    assert_eq!(ingress.to_house, 12);
    assert!((ingress.jd_ut - (JD0 + 20.0)).abs() < 1e-2);
}

#[test]
fn no_ingress_when_house_unchanged() {
    let sky = LinearSky::new(&[(Body::Sun, 5.0, 1.0)]);
    let result = solve_house_ingress(
        &sky,
        &site(),
        Body::Sun,
        0.0,
        JD0,
        JD0 + 10.0,
        &CrossingConfig::default(),
    )
    .unwrap();
    assert!(result.is_none());
}

#[test]
fn design_date_over_provider() {
    let sky = LinearSky::new(&[(Body::Sun, 300.0, 1.0)]);
    let birth = JD0 + 100.0;
    let design = solve_design_jd_with(&sky, &site(), birth, &DesignDateConfig::default()).unwrap();
    assert!((design.jd_ut - (birth - 88.0)).abs() <= 0.01);
    assert!((design.arc_deg - 88.0).abs() <= 0.01);
}

#[test]
fn aspects_are_idempotent() {
    let sky = LinearSky::new(&[
        (Body::Sun, 10.0, 1.0),
        (Body::Moon, 100.5, 13.0),
        (Body::Mars, 191.0, 0.5),
        (Body::Venus, 70.2, 1.1),
    ]);
    let points = NatalPointSet::new([
        (ChartPoint::Body(Body::Sun), 10.0),
        (ChartPoint::Body(Body::Moon), 130.0),
        (ChartPoint::Angle(ChartAngle::Ascendant), 100.0),
        (ChartPoint::Angle(ChartAngle::Midheaven), 10.5),
    ]);
    let frame = sky.frame_at_jd(JD0, &site()).unwrap();
    let a = find_aspects(&points, 100.0, &frame, DEFAULT_MAX_HITS).unwrap();
    let b = find_aspects(&points, 100.0, &frame, DEFAULT_MAX_HITS).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, b);
    assert!(a.len() <= DEFAULT_MAX_HITS);
    for w in a.windows(2) {
        assert!(
            w[0].orb_deg < w[1].orb_deg
                || (w[0].orb_deg == w[1].orb_deg && (w[0].angle_hit || !w[1].angle_hit))
        );
    }
}
