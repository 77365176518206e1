//! Brute-force closest-pair search inside a cluster.

use crate::core::SeriesSet;
use crate::error::Result;
use crate::metrics::Distance;

/// The most similar pair of series inside one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestPair {
    /// The two series identifiers, in cluster enumeration order.
    pub pair: (String, String),
    /// Their distance under the metric used for the scan.
    pub distance: f64,
}

/// Exhaustively find the closest pair among `ids`.
///
/// Every unordered pair `(i, j)` with `i < j` in the given order is
/// evaluated; ties keep the first pair encountered, so the result is
/// deterministic for a fixed input order. Clusters with fewer than two
/// members have no pair and yield `None`.
///
/// # Errors
/// [`crate::ClusterError::UnknownSeries`] if an id is missing from `series`;
/// any error raised by the metric.
pub fn closest_pair(
    ids: &[String],
    series: &SeriesSet,
    metric: &dyn Distance,
) -> Result<Option<ClosestPair>> {
    if ids.len() < 2 {
        return Ok(None);
    }

    let mut best: Option<ClosestPair> = None;
    for i in 0..ids.len() {
        let a = series.require(&ids[i])?;
        for j in (i + 1)..ids.len() {
            let b = series.require(&ids[j])?;
            let d = metric.distance(a, b)?;
            if best.as_ref().map_or(true, |p| d < p.distance) {
                best = Some(ClosestPair {
                    pair: (ids[i].clone(), ids[j].clone()),
                    distance: d,
                });
            }
        }
    }
    Ok(best)
}
