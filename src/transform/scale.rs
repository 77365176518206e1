//! Z-score normalization for time series segments.

use crate::utils::stats::{mean, population_std};

/// Guard added to the denominator so constant series map to zeros instead
/// of dividing by zero.
const EPS: f64 = 1e-8;

/// Standardize a series to zero mean and (near) unit variance.
///
/// `x_scaled = (x - mean) / (std + 1e-8)` with the population standard
/// deviation, so a constant series comes back as all zeros.
pub fn zscore(series: &[f64]) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }

    let mu = mean(series);
    let sigma = population_std(series);
    series.iter().map(|&x| (x - mu) / (sigma + EPS)).collect()
}
