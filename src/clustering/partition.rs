//! Recursive divide-and-conquer partitioning of a series set.
//!
//! The partitioner splits an id set top-down: a random pivot is drawn, every
//! other member is measured against it, and the set is divided at the median
//! distance. Recursion stops when a subset is small enough, deep enough, or
//! (optionally) tight enough, and the subset is emitted as one cluster.

use crate::core::SeriesSet;
use crate::error::Result;
use crate::metrics::Distance;
use crate::utils::stats::median;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Partitioner configuration.
#[derive(Debug, Clone)]
pub struct PartitionConfig {
    /// Maximum recursion depth.
    pub max_depth: usize,
    /// Subsets at or below this size are emitted without splitting.
    pub min_cluster_size: usize,
    /// Optional early stop: subsets whose average pairwise distance is at or
    /// below this value are emitted without splitting.
    pub max_dispersion: Option<f64>,
    /// Random seed for pivot selection (None for a fresh stream per run).
    pub seed: Option<u64>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            min_cluster_size: 20,
            max_dispersion: None,
            seed: None,
        }
    }
}

impl PartitionConfig {
    /// Set the maximum recursion depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum cluster size.
    pub fn min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Set the dispersion early-stop threshold.
    pub fn max_dispersion(mut self, max_dispersion: f64) -> Self {
        self.max_dispersion = Some(max_dispersion);
        self
    }

    /// Set the random seed for reproducible pivot draws.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Partition `ids` into disjoint clusters covering every id exactly once.
///
/// The pivot RNG is owned by this call and threaded through the depth-first
/// recursion, so a fixed [`PartitionConfig::seed`] reproduces the partition
/// exactly.
///
/// # Errors
/// [`crate::ClusterError::UnknownSeries`] if an id is missing from `series`;
/// any error raised by the metric.
pub fn partition(
    ids: &[String],
    series: &SeriesSet,
    metric: &dyn Distance,
    config: &PartitionConfig,
) -> Result<Vec<Vec<String>>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    for id in ids {
        series.require(id)?;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut clusters = Vec::new();
    split_recursive(
        ids.to_vec(),
        series,
        metric,
        config,
        0,
        &mut rng,
        &mut clusters,
    )?;
    Ok(clusters)
}

fn split_recursive(
    ids: Vec<String>,
    series: &SeriesSet,
    metric: &dyn Distance,
    config: &PartitionConfig,
    depth: usize,
    rng: &mut StdRng,
    clusters: &mut Vec<Vec<String>>,
) -> Result<()> {
    if ids.len() <= config.min_cluster_size || depth >= config.max_depth {
        clusters.push(ids);
        return Ok(());
    }
    if let Some(max_dispersion) = config.max_dispersion {
        if within_dispersion(&ids, series, metric)? <= max_dispersion {
            clusters.push(ids);
            return Ok(());
        }
    }

    let (left, right) = median_split(&ids, series, metric, rng)?;
    // All distances tied at or below the median: splitting again would only
    // reproduce the same subset.
    if right.is_empty() {
        clusters.push(left);
        return Ok(());
    }

    split_recursive(left, series, metric, config, depth + 1, rng, clusters)?;
    split_recursive(right, series, metric, config, depth + 1, rng, clusters)?;
    Ok(())
}

/// Split `ids` around a random pivot at the median distance-to-pivot.
///
/// Members at a distance less than or equal to the median go left together
/// with the pivot; the rest go right. Right may come back empty when all
/// distances tie at the median.
fn median_split(
    ids: &[String],
    series: &SeriesSet,
    metric: &dyn Distance,
    rng: &mut StdRng,
) -> Result<(Vec<String>, Vec<String>)> {
    let pivot_id = &ids[rng.gen_range(0..ids.len())];
    let pivot = series.require(pivot_id)?;

    let mut dists = Vec::with_capacity(ids.len().saturating_sub(1));
    for id in ids.iter().filter(|id| *id != pivot_id) {
        let d = metric.distance(series.require(id)?, pivot)?;
        dists.push((id.clone(), d));
    }
    if dists.is_empty() {
        return Ok((ids.to_vec(), Vec::new()));
    }

    let values: Vec<f64> = dists.iter().map(|(_, d)| *d).collect();
    let med = median(&values);

    let mut left: Vec<String> = dists
        .iter()
        .filter(|(_, d)| *d <= med)
        .map(|(id, _)| id.clone())
        .collect();
    let right: Vec<String> = dists
        .into_iter()
        .filter(|(_, d)| *d > med)
        .map(|(id, _)| id)
        .collect();
    left.push(pivot_id.clone());

    Ok((left, right))
}

/// Average pairwise distance inside `ids` over all C(k, 2) pairs.
///
/// Sets with fewer than two members have zero dispersion.
pub fn within_dispersion(
    ids: &[String],
    series: &SeriesSet,
    metric: &dyn Distance,
) -> Result<f64> {
    if ids.len() < 2 {
        return Ok(0.0);
    }

    let mut sum = 0.0;
    let mut pairs = 0usize;
    for i in 0..ids.len() {
        let a = series.require(&ids[i])?;
        for j in (i + 1)..ids.len() {
            let b = series.require(&ids[j])?;
            sum += metric.distance(a, b)?;
            pairs += 1;
        }
    }
    Ok(sum / pairs as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CorrelationDistance;
    use approx::assert_relative_eq;
    use std::collections::BTreeSet;

    fn sine_family(n: usize, len: usize) -> SeriesSet {
        let mut set = SeriesSet::new();
        for i in 0..n {
            let phase = 0.1 * i as f64;
            let values: Vec<f64> = (0..len)
                .map(|t| (2.0 * std::f64::consts::PI * t as f64 / len as f64 + phase).sin())
                .collect();
            set.insert(format!("s{i:03}"), values).unwrap();
        }
        set
    }

    fn assert_exact_cover(clusters: &[Vec<String>], ids: &[String]) {
        let total: usize = clusters.iter().map(|c| c.len()).sum();
        assert_eq!(total, ids.len());

        let covered: BTreeSet<&String> = clusters.iter().flatten().collect();
        let expected: BTreeSet<&String> = ids.iter().collect();
        assert_eq!(covered, expected);
    }

    #[test]
    fn partition_covers_input_exactly_once() {
        let series = sine_family(24, 64);
        let ids = series.ids();
        let config = PartitionConfig::default()
            .max_depth(4)
            .min_cluster_size(3)
            .seed(7);

        let clusters = partition(&ids, &series, &CorrelationDistance, &config).unwrap();

        assert!(clusters.len() > 1);
        assert_exact_cover(&clusters, &ids);
    }

    #[test]
    fn small_input_is_a_single_cluster() {
        let series = sine_family(5, 32);
        let ids = series.ids();
        let config = PartitionConfig::default().min_cluster_size(5).seed(1);

        let clusters = partition(&ids, &series, &CorrelationDistance, &config).unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0], ids);
    }

    #[test]
    fn depth_zero_never_splits() {
        let series = sine_family(12, 32);
        let ids = series.ids();
        let config = PartitionConfig::default()
            .max_depth(0)
            .min_cluster_size(1)
            .seed(1);

        let clusters = partition(&ids, &series, &CorrelationDistance, &config).unwrap();
        assert_eq!(clusters.len(), 1);
    }

    #[test]
    fn tied_distances_trigger_degenerate_guard() {
        // All members identical: every distance to the pivot is equal, so
        // everything lands left of the median and recursion must stop.
        let mut series = SeriesSet::new();
        let values: Vec<f64> = (0..32).map(|t| (t as f64 * 0.2).sin()).collect();
        for i in 0..8 {
            series.insert(format!("dup{i}"), values.clone()).unwrap();
        }
        let ids = series.ids();
        let config = PartitionConfig::default()
            .max_depth(8)
            .min_cluster_size(1)
            .seed(3);

        let clusters = partition(&ids, &series, &CorrelationDistance, &config).unwrap();

        assert_eq!(clusters.len(), 1);
        assert_exact_cover(&clusters, &ids);
    }

    #[test]
    fn dispersion_early_stop_emits_single_cluster() {
        // Near-identical series have dispersion close to 0; a generous
        // threshold stops recursion before any split.
        let series = sine_family(10, 64);
        let ids = series.ids();
        let config = PartitionConfig::default()
            .max_depth(6)
            .min_cluster_size(1)
            .max_dispersion(2.0)
            .seed(11);

        let clusters = partition(&ids, &series, &CorrelationDistance, &config).unwrap();
        assert_eq!(clusters.len(), 1);
    }

    #[test]
    fn same_seed_reproduces_partition() {
        let series = sine_family(30, 64);
        let ids = series.ids();
        let config = PartitionConfig::default()
            .max_depth(5)
            .min_cluster_size(2)
            .seed(42);

        let first = partition(&ids, &series, &CorrelationDistance, &config).unwrap();
        let second = partition(&ids, &series, &CorrelationDistance, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        let series = SeriesSet::new();
        let clusters = partition(
            &[],
            &series,
            &CorrelationDistance,
            &PartitionConfig::default(),
        )
        .unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn unknown_id_is_reported() {
        let series = sine_family(3, 32);
        let mut ids = series.ids();
        ids.push("ghost".to_string());

        let err = partition(
            &ids,
            &series,
            &CorrelationDistance,
            &PartitionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, crate::ClusterError::UnknownSeries("ghost".to_string()));
    }

    #[test]
    fn dispersion_of_identical_members_is_zero() {
        let mut series = SeriesSet::new();
        let values: Vec<f64> = (0..16).map(|t| t as f64).collect();
        series.insert("a".to_string(), values.clone()).unwrap();
        series.insert("b".to_string(), values).unwrap();

        let d = within_dispersion(&series.ids(), &series, &CorrelationDistance).unwrap();
        assert_relative_eq!(d, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn dispersion_below_two_members_is_zero() {
        let series = sine_family(1, 16);
        let d = within_dispersion(&series.ids(), &series, &CorrelationDistance).unwrap();
        assert_relative_eq!(d, 0.0, epsilon = 1e-12);
    }
}
