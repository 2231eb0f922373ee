//! Transit-to-natal aspect detection.
//!
//! Every (transiting body, natal point, aspect) triple whose orb falls
//! within the policy bound becomes an [`AspectHit`]. Hits are sorted into a
//! total order and truncated to a top-K feed.

use std::cmp::Ordering;

use aethos_ephem::{ChartAngle, NatalPointSet, TransitFrame};
use aethos_math::{shortest_angle, whole_sign_house};

use crate::aspect_types::{ALL_ASPECTS, AspectHit};
use crate::error::SearchError;
use crate::orb::{ORB_POLICY, hardness, orb_tier, round_orb};

/// Default bound on the number of hits returned.
pub const DEFAULT_MAX_HITS: usize = 32;

/// Total order over hits: reported (4 dp) orb ascending, angle hits first
/// at equal orb, then natal point name, transiting body name and exact
/// separation.
fn compare_hits(a: &AspectHit, b: &AspectHit) -> Ordering {
    round_orb(a.orb_deg)
        .total_cmp(&round_orb(b.orb_deg))
        .then_with(|| b.angle_hit.cmp(&a.angle_hit))
        .then_with(|| a.natal_point.name().cmp(b.natal_point.name()))
        .then_with(|| a.transiting_body.name().cmp(b.transiting_body.name()))
        .then_with(|| a.exact_deg.total_cmp(&b.exact_deg))
}

/// Find aspects from the bodies in `frame` to the natal `points`.
///
/// `natal_asc_lon` anchors the natal houses; transit houses are counted from
/// the frame's own ascendant, which must be present.
pub fn find_aspects(
    points: &NatalPointSet,
    natal_asc_lon: f64,
    frame: &TransitFrame,
    max_hits: usize,
) -> Result<Vec<AspectHit>, SearchError> {
    let transit_asc = frame.angle(ChartAngle::Ascendant)?;
    let mut hits = Vec::new();

    for sample in frame.samples() {
        let transit_house = whole_sign_house(transit_asc, sample.lon_deg);

        for (point, natal_lon) in points.iter() {
            let angle_hit = point.is_angle();
            let separation = shortest_angle(sample.lon_deg, natal_lon);

            for aspect in ALL_ASPECTS {
                let orb = (separation - aspect.exact_deg()).abs();
                if orb > ORB_POLICY.limit(aspect, angle_hit) {
                    continue;
                }
                hits.push(AspectHit {
                    transiting_body: sample.body,
                    natal_point: point,
                    aspect,
                    orb_deg: orb,
                    exact_deg: aspect.exact_deg(),
                    tier: orb_tier(orb, angle_hit),
                    hardness: hardness(aspect),
                    angle_hit,
                    transit_house,
                    natal_house: whole_sign_house(natal_asc_lon, natal_lon),
                });
            }
        }
    }

    let total = hits.len();
    hits.sort_by(compare_hits);
    hits.truncate(max_hits);
    tracing::debug!(
        jd_ut = frame.jd_ut(),
        total,
        kept = hits.len(),
        "aspect detection complete"
    );
    Ok(hits)
}
