//! Daily bundle tests over a two-row tabulated ephemeris.
//!
//! Bodies and the ascendant move linearly between the rows, so the 09:00
//! snapshot positions follow in closed form:
//! Sun 335.375, Mars 79.8125, transit Asc 103.75.

use std::io::Write;

use aethos_config::TimingSettings;
use aethos_ephem::{Body, ChartAngle, ChartPoint, EphemerisError, TabulatedEphemeris};
use aethos_profile::{DailyTimingBuilder, NatalProfile, ProfileError};
use aethos_search::{Aspect, Hardness, Tier};
use chrono::{NaiveDate, NaiveTime};

const EPS: f64 = 1e-9;

const TABLE: &str = r#"{
  "utc_offset_minutes": 0,
  "rows": [
    { "jd_ut": 2460000.5,
      "bodies": { "Sun": { "lon": 335.0, "speed": 1.0 },
                  "Mars": { "lon": 80.0, "speed": -0.5 } },
      "angles": { "Asc": 100.0, "MC": 10.0 } },
    { "jd_ut": 2460001.5,
      "bodies": { "Sun": { "lon": 336.0, "speed": 1.0 },
                  "Mars": { "lon": 79.5, "speed": -0.5 } },
      "angles": { "Asc": 110.0, "MC": 20.0 } }
  ]
}"#;

const PROFILE: &str = r#"{
  "profile_id": "demo",
  "canonical_chart": {
    "meta": { "tz_name": "Etc/UTC", "lat": 51.5, "lon": 0.0 },
    "western_tropical": {
      "points": {
        "Sun":  { "lon": 335.0 },
        "Asc":  { "lon": 156.0 },
        "MC":   { "lon": 66.5 },
        "Desc": { "lon": 337.2 },
        "IC":   { "lon": 240.0 }
      }
    }
  }
}"#;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 2, 25).unwrap()
}

fn setup() -> (TabulatedEphemeris, NatalProfile) {
    (
        TabulatedEphemeris::parse(TABLE).unwrap(),
        NatalProfile::from_json(PROFILE).unwrap(),
    )
}

#[test]
fn bundle_at_nine_local() {
    let (eph, profile) = setup();
    let bundle = DailyTimingBuilder::new(&eph).build(&profile, day()).unwrap();

    assert_eq!(bundle.profile_id.as_deref(), Some("demo"));
    assert_eq!(bundle.date_local, day());
    assert_eq!(bundle.meta.reference_local, day().and_hms_opt(9, 0, 0).unwrap());
    assert!((bundle.meta.reference_jd_ut - 2_460_000.875).abs() < 1e-6);
    assert!(bundle.meta.no_guessing_policy);

    let a = &bundle.aspects;
    assert_eq!(a.len(), 3, "{a:#?}");

    assert_eq!(a[0].transiting_body, Body::Sun);
    assert_eq!(a[0].natal_point, ChartPoint::Body(Body::Sun));
    assert_eq!(a[0].aspect, Aspect::Conjunction);
    assert!((a[0].orb_deg - 0.375).abs() < EPS);
    assert_eq!(a[0].tier, Tier::Exact);
    assert!(!a[0].angle_hit);
    assert_eq!(a[0].transit_house, 8);
    assert_eq!(a[0].natal_house, 6);

    assert_eq!(a[1].natal_point, ChartPoint::Angle(ChartAngle::Ascendant));
    assert_eq!(a[1].aspect, Aspect::Opposition);
    assert!((a[1].orb_deg - 0.625).abs() < EPS);
    assert_eq!(a[1].tier, Tier::High);
    assert_eq!(a[1].hardness, Hardness::Hard);
    assert!(a[1].angle_hit);
    assert_eq!(a[1].natal_house, 1);

    assert_eq!(a[2].natal_point, ChartPoint::Angle(ChartAngle::Midheaven));
    assert_eq!(a[2].aspect, Aspect::Square);
    assert!((a[2].orb_deg - 1.125).abs() < EPS);
    assert_eq!(a[2].tier, Tier::Medium);
    assert_eq!(a[2].natal_house, 10);
}

#[test]
fn bundle_json_echoes_orb_policy() {
    let (eph, profile) = setup();
    let bundle = DailyTimingBuilder::new(&eph).build(&profile, day()).unwrap();
    let json = serde_json::to_value(&bundle).unwrap();

    assert_eq!(json["date_local"], "2023-02-25");
    assert_eq!(json["meta"]["no_guessing_policy"], true);
    assert_eq!(json["meta"]["orb_policy"]["default"]["conjunction"], 3.0);
    assert_eq!(json["meta"]["orb_policy"]["angles"]["sextile"], 1.0);
    assert_eq!(json["aspects"][0]["aspect"], "conjunction");
    assert_eq!(json["aspects"][0]["natal_point"], "Sun");
    assert_eq!(json["aspects"][1]["natal_point"], "Asc");
    assert_eq!(json["aspects"][1]["tier"], "High");
}

#[test]
fn max_hits_bounds_the_feed() {
    let (eph, profile) = setup();
    let settings = TimingSettings {
        max_hits: 1,
        ..TimingSettings::default()
    };
    let bundle = DailyTimingBuilder::new(&eph)
        .with_settings(settings)
        .build(&profile, day())
        .unwrap();
    assert_eq!(bundle.aspects.len(), 1);
    assert_eq!(bundle.aspects[0].natal_point, ChartPoint::Body(Body::Sun));
}

#[test]
fn reference_time_override() {
    let (eph, profile) = setup();
    let at = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    let bundle = DailyTimingBuilder::new(&eph)
        .build_at(&profile, day(), at)
        .unwrap();
    assert!((bundle.meta.reference_jd_ut - 2_460_000.5).abs() < 1e-6);
    // Sun sits exactly on its natal place at the first row.
    assert!(bundle.aspects[0].orb_deg.abs() < EPS);
}

#[test]
fn builds_are_idempotent() {
    let (eph, profile) = setup();
    let builder = DailyTimingBuilder::new(&eph);
    assert_eq!(
        builder.build(&profile, day()).unwrap(),
        builder.build(&profile, day()).unwrap()
    );
}

#[test]
fn missing_natal_angle_fails() {
    let (eph, _) = setup();
    let profile = NatalProfile::from_json(&PROFILE.replace(r#""IC":   { "lon": 240.0 }"#, r#""Moon": { "lon": 1.0 }"#))
        .unwrap();
    let err = DailyTimingBuilder::new(&eph)
        .build(&profile, day())
        .unwrap_err();
    assert_eq!(
        err,
        ProfileError::MissingPoint(ChartPoint::Angle(ChartAngle::ImumCoeli))
    );
}

#[test]
fn day_outside_table_fails() {
    let (eph, profile) = setup();
    let err = DailyTimingBuilder::new(&eph)
        .build(&profile, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        ProfileError::Ephemeris(EphemerisError::OutOfRange { .. })
    ));
}

#[test]
fn zero_max_hits_is_invalid() {
    let (eph, profile) = setup();
    let settings = TimingSettings {
        max_hits: 0,
        ..TimingSettings::default()
    };
    let err = DailyTimingBuilder::new(&eph)
        .with_settings(settings)
        .build(&profile, day())
        .unwrap_err();
    assert!(matches!(err, ProfileError::InvalidConfig(_)));
}

#[test]
fn build_from_path_loads_profile() {
    let (eph, _) = setup();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PROFILE.as_bytes()).unwrap();
    let bundle = DailyTimingBuilder::new(&eph)
        .build_from_path(file.path(), day())
        .unwrap();
    assert_eq!(bundle.aspects.len(), 3);
}

#[test]
fn missing_profile_file_is_io_error() {
    let (eph, _) = setup();
    let err = DailyTimingBuilder::new(&eph)
        .build_from_path(std::path::Path::new("/nonexistent/profile.json"), day())
        .unwrap_err();
    assert!(matches!(err, ProfileError::Io(_)));
}
