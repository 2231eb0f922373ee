//! Daily timing bundles.
//!
//! One bundle per (profile, day): a single transit snapshot at the reference
//! local time, run through aspect detection and packaged with the orb
//! policy that produced it. Nothing is cached between builds.

use std::path::Path;

use aethos_config::TimingSettings;
use aethos_ephem::{Body, ChartPoint, EphemerisProvider};
use aethos_search::{
    Aspect, AspectHit, Hardness, ORB_POLICY, OrbPolicy, Tier, find_aspects, round_orb,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::ProfileError;
use crate::profile::NatalProfile;

/// Output form of one aspect hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectRecord {
    pub transiting_body: Body,
    pub natal_point: ChartPoint,
    pub aspect: Aspect,
    /// Orb rounded to 4 decimal places.
    pub orb_deg: f64,
    pub exact_deg: f64,
    pub tier: Tier,
    pub hardness: Hardness,
    pub angle_hit: bool,
    pub transit_house: u8,
    pub natal_house: u8,
}

impl From<&AspectHit> for AspectRecord {
    fn from(h: &AspectHit) -> Self {
        Self {
            transiting_body: h.transiting_body,
            natal_point: h.natal_point,
            aspect: h.aspect,
            orb_deg: round_orb(h.orb_deg),
            exact_deg: h.exact_deg,
            tier: h.tier,
            hardness: h.hardness,
            angle_hit: h.angle_hit,
            transit_house: h.transit_house,
            natal_house: h.natal_house,
        }
    }
}

/// Audit metadata attached to every bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingMeta {
    pub orb_policy: OrbPolicy,
    /// Missing inputs fail the build; nothing is guessed.
    pub no_guessing_policy: bool,
    pub reference_local: NaiveDateTime,
    pub reference_jd_ut: f64,
}

/// Aspects of one day for one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingBundle {
    pub profile_id: Option<String>,
    pub date_local: NaiveDate,
    pub aspects: Vec<AspectRecord>,
    pub meta: TimingMeta,
}

/// Builds [`TimingBundle`]s from a provider.
#[derive(Debug)]
pub struct DailyTimingBuilder<'a, P: ?Sized> {
    provider: &'a P,
    settings: TimingSettings,
}

impl<'a, P: EphemerisProvider + ?Sized> DailyTimingBuilder<'a, P> {
    /// Builder with the default settings (09:00 local, 32 hits).
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            settings: TimingSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TimingSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &TimingSettings {
        &self.settings
    }

    /// Bundle for `day`, snapshotting at the configured reference time.
    pub fn build(&self, profile: &NatalProfile, day: NaiveDate) -> Result<TimingBundle, ProfileError> {
        self.build_at(profile, day, self.settings.reference_time)
    }

    /// Bundle for `day`, snapshotting at local time `at`.
    pub fn build_at(
        &self,
        profile: &NatalProfile,
        day: NaiveDate,
        at: NaiveTime,
    ) -> Result<TimingBundle, ProfileError> {
        self.settings.validate().map_err(ProfileError::InvalidConfig)?;
        let angles = profile.natal_angles()?;

        let local = day.and_time(at);
        let frame = self.provider.frame_at_local(local, &profile.site)?;
        let hits = find_aspects(
            &profile.points,
            angles.ascendant,
            &frame,
            self.settings.max_hits,
        )?;

        tracing::info!(
            profile_id = ?profile.profile_id,
            %day,
            jd_ut = frame.jd_ut(),
            hits = hits.len(),
            "timing bundle built"
        );

        Ok(TimingBundle {
            profile_id: profile.profile_id.clone(),
            date_local: day,
            aspects: hits.iter().map(AspectRecord::from).collect(),
            meta: TimingMeta {
                orb_policy: ORB_POLICY,
                no_guessing_policy: true,
                reference_local: local,
                reference_jd_ut: frame.jd_ut(),
            },
        })
    }

    /// Load the profile at `path`, then build its bundle for `day`.
    pub fn build_from_path(&self, path: &Path, day: NaiveDate) -> Result<TimingBundle, ProfileError> {
        let profile = NatalProfile::load(path)?;
        self.build(&profile, day)
    }
}
