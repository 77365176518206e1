//! Divide-and-conquer clustering and per-cluster closest-pair search.
//!
//! # Example
//!
//! ```
//! use pulse_cluster::clustering::{closest_pair, partition, PartitionConfig};
//! use pulse_cluster::core::SeriesSet;
//! use pulse_cluster::metrics::CorrelationDistance;
//!
//! let mut series = SeriesSet::new();
//! for i in 0..8 {
//!     let values: Vec<f64> = (0..32)
//!         .map(|t| (0.3 * t as f64 + 0.05 * i as f64).sin())
//!         .collect();
//!     series.insert(format!("s{i}"), values).unwrap();
//! }
//!
//! let config = PartitionConfig::default().min_cluster_size(2).seed(42);
//! let clusters = partition(&series.ids(), &series, &CorrelationDistance, &config).unwrap();
//!
//! let total: usize = clusters.iter().map(|c| c.len()).sum();
//! assert_eq!(total, series.len());
//!
//! for cluster in &clusters {
//!     let pair = closest_pair(cluster, &series, &CorrelationDistance).unwrap();
//!     assert_eq!(pair.is_some(), cluster.len() >= 2);
//! }
//! ```

pub mod closest_pair;
pub mod partition;

pub use closest_pair::{closest_pair, ClosestPair};
pub use partition::{partition, within_dispersion, PartitionConfig};
