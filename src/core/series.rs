//! Validated series storage: the boundary type between the loader and the
//! clustering core.

use crate::error::{ClusterError, Result};
use std::collections::BTreeMap;

/// Minimum number of samples a series must carry (the first-difference
/// transform is undefined below this).
pub const MIN_SERIES_LEN: usize = 2;

/// An ordered collection of named time series segments.
///
/// Keys iterate in lexicographic order, so every enumeration over the set
/// (partitioning, closest-pair scans, reports) is deterministic. Sequences
/// are validated on insertion and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    series: BTreeMap<String, Vec<f64>>,
}

impl SeriesSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(id, values)` pairs, validating every series.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut set = Self::new();
        for (id, values) in pairs {
            set.insert(id, values)?;
        }
        Ok(set)
    }

    /// Insert a series, replacing any previous entry under the same id.
    ///
    /// # Errors
    /// - [`ClusterError::InsufficientData`] if the sequence has fewer than
    ///   [`MIN_SERIES_LEN`] samples.
    /// - [`ClusterError::NonFiniteValue`] if any sample is NaN or infinite.
    pub fn insert(&mut self, id: String, values: Vec<f64>) -> Result<()> {
        if values.len() < MIN_SERIES_LEN {
            return Err(ClusterError::InsufficientData {
                needed: MIN_SERIES_LEN,
                got: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ClusterError::NonFiniteValue { id, index });
        }
        self.series.insert(id, values);
        Ok(())
    }

    /// Look up a series by id.
    pub fn get(&self, id: &str) -> Option<&[f64]> {
        self.series.get(id).map(|v| v.as_slice())
    }

    /// Look up a series by id, failing with [`ClusterError::UnknownSeries`].
    pub fn require(&self, id: &str) -> Result<&[f64]> {
        self.get(id)
            .ok_or_else(|| ClusterError::UnknownSeries(id.to_string()))
    }

    /// All ids in lexicographic order.
    pub fn ids(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    /// Iterate over `(id, values)` in lexicographic id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<f64>)> {
        self.series.iter()
    }

    /// Number of series in the set.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the set contains no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.series.contains_key(id)
    }
}
