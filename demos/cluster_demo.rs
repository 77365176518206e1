//! Time Series Clustering Walkthrough
//!
//! Generates synthetic archetype data, partitions it under both metrics,
//! and prints the closest pairs, activity intervals and serialized reports.
//!
//! Run with: cargo run --example cluster_demo

use pulse_cluster::activity::DiffTransform;
use pulse_cluster::clustering::{partition, PartitionConfig};
use pulse_cluster::io::synthetic_series;
use pulse_cluster::metrics::{
    correlation_distance, dtw_distance_windowed, BoundedDtw, CorrelationDistance,
};
use pulse_cluster::report::{activity_report, markdown_summary, pair_report, to_json_pretty, ClusterReport};
use pulse_cluster::transform::preprocess;

fn main() {
    println!("=== Time Series Clustering Walkthrough ===\n");

    // =========================================================================
    // Distance metrics
    // =========================================================================
    println!("--- Distance metrics ---\n");

    let a: Vec<f64> = (0..64).map(|t| (0.2 * t as f64).sin()).collect();
    let b: Vec<f64> = (0..64).map(|t| (0.2 * t as f64 + 0.4).sin()).collect();
    let c: Vec<f64> = (0..64).map(|t| -(0.2 * t as f64).sin()).collect();

    println!(
        "correlation(a, shifted a) = {:.4}",
        correlation_distance(&a, &b).unwrap()
    );
    println!(
        "correlation(a, -a)        = {:.4} (anti-correlated)",
        correlation_distance(&a, &c).unwrap()
    );
    println!(
        "dtw(a, shifted a, w=6)    = {:.4}",
        dtw_distance_windowed(&a, &b, 6).unwrap()
    );
    println!();

    // =========================================================================
    // Partitioning synthetic archetypes
    // =========================================================================
    println!("--- Divide-and-conquer partition ---\n");

    let raw = synthetic_series(30, 96, 7);
    let series = preprocess(&raw, Some(64)).expect("synthetic data is well-formed");
    let ids = series.ids();

    let config = PartitionConfig::default()
        .max_depth(5)
        .min_cluster_size(4)
        .seed(7);
    let clusters =
        partition(&ids, &series, &CorrelationDistance, &config).expect("partition succeeds");

    println!("{} series -> {} clusters", series.len(), clusters.len());
    for (i, cluster) in clusters.iter().enumerate() {
        println!("  c{i}: {} members", cluster.len());
    }
    println!();

    // Same data under bounded DTW.
    let dtw_metric = BoundedDtw::from_fraction(64, 0.1);
    let dtw_clusters =
        partition(&ids, &series, &dtw_metric, &config).expect("partition succeeds");
    println!(
        "bounded DTW (window {}): {} clusters\n",
        dtw_metric.window,
        dtw_clusters.len()
    );

    // =========================================================================
    // Closest pairs and activity intervals
    // =========================================================================
    println!("--- Closest pairs per cluster ---\n");

    let pairs = pair_report(&clusters, &series, &CorrelationDistance).expect("pairs compute");
    for (cluster_id, entry) in &pairs {
        match (&entry.pair, entry.distance) {
            (Some((x, y)), Some(d)) => println!("  {cluster_id}: ({x}, {y}) at {d:.4}"),
            _ => println!("  {cluster_id}: no pair (fewer than two members)"),
        }
    }
    println!();

    println!("--- Most active intervals (first five series) ---\n");
    let activity = activity_report(&series, DiffTransform::AbsDiff).expect("activity computes");
    for (id, entry) in activity.iter().take(5) {
        println!("  {id}: [{}, {}) score={:.3}", entry.l, entry.r, entry.score);
    }
    println!();

    // =========================================================================
    // Reports
    // =========================================================================
    println!("--- Serialized reports ---\n");

    let report = ClusterReport::build(clusters.clone(), &series).expect("report builds");
    let json = to_json_pretty(&report).expect("report serializes");
    println!(
        "clusters.json preview:\n{}\n...\n",
        json.lines().take(12).collect::<Vec<_>>().join("\n")
    );

    print!("{}", markdown_summary(&series, &clusters));
}
