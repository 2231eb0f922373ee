//! The natal point set: named longitudes fixed for one chart.

use std::collections::BTreeMap;

use aethos_math::normalize_360;

use crate::body::{ChartAngle, ChartPoint};

/// Longitudes of a natal chart's points, normalized into [0, 360).
///
/// Built once per profile and read-only afterwards. Iteration order is the
/// `ChartPoint` order, so every consumer sees the points in the same
/// sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NatalPointSet {
    points: BTreeMap<ChartPoint, f64>,
}

impl NatalPointSet {
    /// Build a set, normalizing every longitude into [0, 360).
    ///
    /// A point given twice keeps its last longitude.
    pub fn new(points: impl IntoIterator<Item = (ChartPoint, f64)>) -> Self {
        Self {
            points: points
                .into_iter()
                .map(|(p, lon)| (p, normalize_360(lon)))
                .collect(),
        }
    }

    /// Longitude of `point`, if the chart carries it.
    pub fn get(&self, point: ChartPoint) -> Option<f64> {
        self.points.get(&point).copied()
    }

    /// Longitude of a chart angle, if the chart carries it.
    pub fn angle(&self, angle: ChartAngle) -> Option<f64> {
        self.get(ChartPoint::Angle(angle))
    }

    /// Points with their longitudes, in chart-point order.
    pub fn iter(&self) -> impl Iterator<Item = (ChartPoint, f64)> + '_ {
        self.points.iter().map(|(p, lon)| (*p, *lon))
    }

    /// Number of points in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the chart carries no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
