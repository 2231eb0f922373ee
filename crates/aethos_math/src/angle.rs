//! Normalization and distance on a 360-degree periodic domain.

/// Normalize an angle to [0, 360) degrees.
///
/// Tiny negative inputs round up to exactly 360.0 under `rem_euclid`;
/// those are folded back to 0.0 so the half-open range always holds.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Minimal undirected separation between two longitudes, in [0, 180].
pub fn shortest_angle(a: f64, b: f64) -> f64 {
    let diff = (normalize_360(a) - normalize_360(b)).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Separation of `a` relative to `b`, mapped into (-180, 180].
///
/// Positive when `a` lies ahead of `b` along the zodiac. This is the
/// objective the crossing solvers bisect on: it changes sign where the
/// two longitudes coincide, and jumps by 360 at the antipode.
pub fn signed_diff(a: f64, b: f64) -> f64 {
    let x = normalize_360(normalize_360(a) - normalize_360(b));
    if x > 180.0 { x - 360.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < EPS);
        assert!((normalize_360(-370.0) - 350.0).abs() < EPS);
    }

    #[test]
    fn normalize_tiny_negative_stays_half_open() {
        let r = normalize_360(-1e-20);
        assert!((0.0..360.0).contains(&r), "r = {r}");
    }

    #[test]
    fn normalize_is_periodic() {
        for k in -5..=5 {
            let x = 123.456 + 360.0 * k as f64;
            assert!((normalize_360(x) - 123.456).abs() < 1e-9, "k = {k}");
        }
    }

    #[test]
    fn shortest_across_zero() {
        assert!((shortest_angle(359.0, 1.0) - 2.0).abs() < EPS);
        assert!((shortest_angle(1.0, 359.0) - 2.0).abs() < EPS);
    }

    #[test]
    fn shortest_opposition() {
        assert!((shortest_angle(10.0, 190.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn shortest_equal_after_normalization() {
        assert!(shortest_angle(-30.0, 330.0).abs() < EPS);
        assert!(shortest_angle(45.0, 45.000001) > 0.0);
    }

    #[test]
    fn signed_diff_range() {
        assert!((signed_diff(10.0, 0.0) - 10.0).abs() < EPS);
        assert!((signed_diff(0.0, 10.0) + 10.0).abs() < EPS);
        assert!((signed_diff(350.0, 10.0) + 20.0).abs() < EPS);
        assert!((signed_diff(190.0, 10.0) - 180.0).abs() < EPS);
        assert!((signed_diff(10.0, 190.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn signed_diff_sign_change_at_coincidence() {
        assert!(signed_diff(99.9, 100.0) < 0.0);
        assert!(signed_diff(100.1, 100.0) > 0.0);
        assert!(signed_diff(100.0, 100.0).abs() < EPS);
    }
}
