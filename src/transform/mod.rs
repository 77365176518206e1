//! Preprocessing transforms applied before clustering.
//!
//! Raw series are z-scored (so distances compare shape, not level) and
//! optionally resampled to a common length.
//!
//! # Example
//!
//! ```
//! use pulse_cluster::core::SeriesSet;
//! use pulse_cluster::transform::preprocess;
//!
//! let mut raw = SeriesSet::new();
//! raw.insert("a".to_string(), vec![10.0, 20.0, 30.0, 40.0]).unwrap();
//! raw.insert("b".to_string(), vec![1.0, 2.0, 3.0]).unwrap();
//!
//! let ready = preprocess(&raw, Some(16)).unwrap();
//! assert!(ready.iter().all(|(_, v)| v.len() == 16));
//! ```

pub mod resample;
pub mod scale;

pub use resample::resample_linear;
pub use scale::zscore;

use crate::core::SeriesSet;
use crate::error::Result;

/// Z-score every series in the set and, when `target_len` is given, resample
/// each to that length.
pub fn preprocess(series: &SeriesSet, target_len: Option<usize>) -> Result<SeriesSet> {
    let mut out = SeriesSet::new();
    for (id, values) in series.iter() {
        let mut scaled = zscore(values);
        if let Some(len) = target_len {
            if scaled.len() != len {
                scaled = resample_linear(&scaled, len)?;
            }
        }
        out.insert(id.clone(), scaled)?;
    }
    Ok(out)
}
