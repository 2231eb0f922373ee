//! Generic bracket-and-bisect root finder.
//!
//! Algorithm: evaluate f at both ends of [t0, t1]; a shared sign means no
//! root in the window. Otherwise halve the interval, keeping the half across
//! which f still changes sign, until |f(mid)| <= tolerance or the iteration
//! budget runs out. On exhaustion the last midpoint is returned as a
//! best-effort estimate with `converged = false`.

/// A located root.
///
/// `payload` is whatever the objective attached to its evaluation at `t`
/// (e.g. the full longitude sample), so callers need not re-query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root<T> {
    /// Accepted abscissa (Julian Day for the time solvers).
    pub t: f64,
    /// Objective value at `t`; compare against the tolerance to see the
    /// convergence shortfall.
    pub value: f64,
    pub payload: T,
    /// Midpoint evaluations performed.
    pub iterations: u32,
    /// Whether |value| <= tolerance was reached.
    pub converged: bool,
}

/// Bisect a bracket whose end values are already known.
///
/// Returns `Ok(None)` when `f_a * f_b > 0` or when `max_iter` is zero.
pub fn find_root_bracketed<T, E, F>(
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    f_b: f64,
    max_iter: u32,
    tolerance: f64,
    mut f_at: F,
) -> Result<Option<Root<T>>, E>
where
    F: FnMut(f64) -> Result<(f64, T), E>,
{
    if f_a * f_b > 0.0 {
        return Ok(None);
    }

    let mut best = None;
    for i in 1..=max_iter {
        let t_mid = 0.5 * (t_a + t_b);
        let (f_mid, payload) = f_at(t_mid)?;

        if f_mid.abs() <= tolerance {
            return Ok(Some(Root {
                t: t_mid,
                value: f_mid,
                payload,
                iterations: i,
                converged: true,
            }));
        }

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }

        best = Some(Root {
            t: t_mid,
            value: f_mid,
            payload,
            iterations: i,
            converged: false,
        });
    }

    if let Some(root) = &best {
        tracing::warn!(
            t = root.t,
            residual = root.value,
            tolerance,
            iterations = root.iterations,
            "bisection budget exhausted; returning best estimate"
        );
    }
    Ok(best)
}

/// Evaluate f at both ends of [t0, t1], then bisect.
pub fn find_root<T, E, F>(
    t0: f64,
    t1: f64,
    max_iter: u32,
    tolerance: f64,
    mut f_at: F,
) -> Result<Option<Root<T>>, E>
where
    F: FnMut(f64) -> Result<(f64, T), E>,
{
    let (f0, _) = f_at(t0)?;
    let (f1, _) = f_at(t1)?;
    find_root_bracketed(t0, f0, t1, f1, max_iter, tolerance, f_at)
}
