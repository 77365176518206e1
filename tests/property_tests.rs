//! Property-based tests for the clustering core.
//!
//! These verify the invariants that must hold for all valid inputs: the
//! partition covers its input exactly once, metric results stay inside
//! their contractual bounds, and the activity scan returns true maxima.

use proptest::prelude::*;
use pulse_cluster::activity::{max_subarray, most_active_interval, DiffTransform};
use pulse_cluster::clustering::{partition, PartitionConfig};
use pulse_cluster::core::SeriesSet;
use pulse_cluster::metrics::{
    correlation_distance, dtw_distance, dtw_distance_windowed, CorrelationDistance,
};
use std::collections::BTreeSet;

/// Strategy for a batch of series sharing one length.
fn series_set_strategy(
    max_series: usize,
    max_len: usize,
) -> impl Strategy<Value = SeriesSet> {
    (2..max_series, 2..max_len).prop_flat_map(|(n, len)| {
        prop::collection::vec(prop::collection::vec(-100.0..100.0f64, len), n).prop_map(
            |rows| {
                SeriesSet::from_pairs(
                    rows.into_iter()
                        .enumerate()
                        .map(|(i, values)| (format!("s{i:03}"), values)),
                )
                .unwrap()
            },
        )
    })
}

/// Strategy for one finite series.
fn values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len)
        .prop_flat_map(|len| prop::collection::vec(-1000.0..1000.0f64, len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ==================== partition ====================

    #[test]
    fn partition_covers_input_exactly_once(
        series in series_set_strategy(16, 24),
        max_depth in 0usize..5,
        min_cluster_size in 0usize..6,
        seed in any::<u64>()
    ) {
        let ids = series.ids();
        let config = PartitionConfig::default()
            .max_depth(max_depth)
            .min_cluster_size(min_cluster_size)
            .seed(seed);

        let clusters = partition(&ids, &series, &CorrelationDistance, &config).unwrap();

        let total: usize = clusters.iter().map(|c| c.len()).sum();
        prop_assert_eq!(total, ids.len());

        let covered: BTreeSet<String> = clusters.iter().flatten().cloned().collect();
        let expected: BTreeSet<String> = ids.iter().cloned().collect();
        prop_assert_eq!(covered, expected);

        for cluster in &clusters {
            prop_assert!(!cluster.is_empty());
        }
    }

    #[test]
    fn partition_is_deterministic_for_a_seed(
        series in series_set_strategy(12, 16),
        seed in any::<u64>()
    ) {
        let ids = series.ids();
        let config = PartitionConfig::default()
            .max_depth(4)
            .min_cluster_size(1)
            .seed(seed);

        let first = partition(&ids, &series, &CorrelationDistance, &config).unwrap();
        let second = partition(&ids, &series, &CorrelationDistance, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn small_sets_never_split(
        series in series_set_strategy(8, 16),
        seed in any::<u64>()
    ) {
        let ids = series.ids();
        let config = PartitionConfig::default()
            .min_cluster_size(ids.len())
            .seed(seed);

        let clusters = partition(&ids, &series, &CorrelationDistance, &config).unwrap();
        prop_assert_eq!(clusters.len(), 1);
        prop_assert_eq!(&clusters[0], &ids);
    }

    // ==================== metrics ====================

    #[test]
    fn correlation_distance_stays_in_bounds(
        a in values_strategy(2, 64),
        b in values_strategy(2, 64)
    ) {
        let d = correlation_distance(&a, &b).unwrap();
        prop_assert!((0.0..=2.0).contains(&d));

        let reversed = correlation_distance(&b, &a).unwrap();
        prop_assert!((d - reversed).abs() < 1e-9);
    }

    #[test]
    fn dtw_self_distance_is_zero(
        a in values_strategy(1, 48),
        window in 0usize..8
    ) {
        let d = dtw_distance_windowed(&a, &a, window).unwrap();
        prop_assert!(d.abs() < 1e-9);
    }

    #[test]
    fn dtw_is_symmetric_and_non_negative(
        a in values_strategy(1, 32),
        b in values_strategy(1, 32)
    ) {
        let d_ab = dtw_distance(&a, &b).unwrap();
        let d_ba = dtw_distance(&b, &a).unwrap();

        prop_assert!(d_ab >= 0.0);
        prop_assert!((d_ab - d_ba).abs() < 1e-9);
    }

    // ==================== activity ====================

    #[test]
    fn kadane_matches_brute_force(arr in prop::collection::vec(-50.0..50.0f64, 1..12)) {
        let result = max_subarray(&arr).unwrap();

        let mut best = f64::NEG_INFINITY;
        for l in 0..arr.len() {
            for r in (l + 1)..=arr.len() {
                best = best.max(arr[l..r].iter().sum::<f64>());
            }
        }
        prop_assert!((result.score - best).abs() < 1e-9);

        let claimed: f64 = arr[result.l..result.r].iter().sum();
        prop_assert!((result.score - claimed).abs() < 1e-9);
    }

    #[test]
    fn active_interval_bounds_hold(x in values_strategy(2, 64)) {
        let result = most_active_interval(&x, DiffTransform::AbsDiff).unwrap();

        prop_assert!(result.l < result.r);
        prop_assert!(result.r <= x.len() - 1);

        // The best interval is at least as good as every single element of
        // the transformed sequence.
        for w in x.windows(2) {
            prop_assert!(result.score >= (w[1] - w[0]).abs() - 1e-9);
        }
    }
}
