//! Pearson correlation distance for time series.

use crate::error::{ClusterError, Result};
use crate::utils::stats::{mean, population_std};

/// Standard deviation below which a signal is treated as constant and the
/// correlation is considered undefined.
const STD_THRESHOLD: f64 = 1e-8;

/// Distance returned when either input is near-constant.
const UNDEFINED_CORRELATION: f64 = 1.0;

/// Compute the correlation distance `1 - r` between two series.
///
/// `r` is the Pearson correlation coefficient, so the result lies in
/// `[0, 2]`: 0 for perfectly positively correlated series, 2 for perfectly
/// anti-correlated ones.
///
/// Sequences of unequal length are truncated to the shorter length (the
/// prefix of each is compared). This is lossy but deterministic and is part
/// of the metric's contract; no error is raised for a length mismatch.
///
/// If either side's standard deviation falls below `1e-8` (near-constant
/// signal), the correlation is undefined and a fixed distance of `1.0` is
/// returned instead of dividing by zero.
///
/// # Errors
/// [`ClusterError::EmptyData`] if either sequence is empty.
pub fn correlation_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.is_empty() || b.is_empty() {
        return Err(ClusterError::EmptyData);
    }

    let len = a.len().min(b.len());
    let a = &a[..len];
    let b = &b[..len];

    let std_a = population_std(a);
    let std_b = population_std(b);
    if std_a < STD_THRESHOLD || std_b < STD_THRESHOLD {
        return Ok(UNDEFINED_CORRELATION);
    }

    let mean_a = mean(a);
    let mean_b = mean(b);
    let cov = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / len as f64;

    let r = (cov / (std_a * std_b)).clamp(-1.0, 1.0);
    Ok(1.0 - r)
}
