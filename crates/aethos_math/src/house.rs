//! Whole-sign house placement.

use crate::angle::normalize_360;

/// Width of one sign (and one whole-sign house) in degrees.
pub const SIGN_SPAN_DEG: f64 = 30.0;

/// House index (1..=12) of `lon` counted from `ascendant_lon`.
///
/// House = 1 + floor(normalize(lon - asc) / 30), folded into 1..12.
pub fn whole_sign_house(ascendant_lon: f64, lon: f64) -> u8 {
    let offset = normalize_360(lon - ascendant_lon);
    let idx = (offset / SIGN_SPAN_DEG).floor() as u8 % 12;
    idx + 1
}
