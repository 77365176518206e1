//! Report shapes for downstream JSON/Markdown consumers.
//!
//! The shapes here are the external contract: `clusters.json`,
//! `closest_pairs.json` and `kadane.json` produced by the reporting driver
//! all serialize from these types, keyed by `c<index>` cluster ids.

use crate::activity::{most_active_interval, DiffTransform};
use crate::clustering::closest_pair;
use crate::core::SeriesSet;
use crate::error::{ClusterError, Result};
use crate::metrics::Distance;
use crate::utils::stats::median;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Per-cluster size digest.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClusterSummary {
    /// `c<index>` in partition order.
    pub cluster_id: String,
    /// Number of member series.
    pub size: usize,
    /// Median raw length of the members.
    pub median_len: usize,
}

/// The full partition plus its summary, as serialized to `clusters.json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClusterReport {
    pub clusters: Vec<Vec<String>>,
    pub summary: Vec<ClusterSummary>,
}

impl ClusterReport {
    /// Assemble the report for a computed partition.
    ///
    /// # Errors
    /// [`ClusterError::UnknownSeries`] if a cluster names an id missing from
    /// `series`.
    pub fn build(clusters: Vec<Vec<String>>, series: &SeriesSet) -> Result<Self> {
        let mut summary = Vec::with_capacity(clusters.len());
        for (index, ids) in clusters.iter().enumerate() {
            let mut lengths = Vec::with_capacity(ids.len());
            for id in ids {
                lengths.push(series.require(id)?.len() as f64);
            }
            summary.push(ClusterSummary {
                cluster_id: format!("c{index}"),
                size: ids.len(),
                median_len: median(&lengths) as usize,
            });
        }
        Ok(Self { clusters, summary })
    }
}

/// One cluster's closest pair, `null`s for clusters below two members.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PairEntry {
    pub pair: Option<(String, String)>,
    pub distance: Option<f64>,
}

/// Closest pair of every cluster, keyed by `c<index>`.
///
/// # Errors
/// Propagates [`ClusterError::UnknownSeries`] and metric errors.
pub fn pair_report(
    clusters: &[Vec<String>],
    series: &SeriesSet,
    metric: &dyn Distance,
) -> Result<BTreeMap<String, PairEntry>> {
    let mut out = BTreeMap::new();
    for (index, ids) in clusters.iter().enumerate() {
        let entry = match closest_pair(ids, series, metric)? {
            Some(found) => PairEntry {
                pair: Some(found.pair),
                distance: Some(found.distance),
            },
            None => PairEntry {
                pair: None,
                distance: None,
            },
        };
        out.insert(format!("c{index}"), entry);
    }
    Ok(out)
}

/// One series' most active interval, as serialized to `kadane.json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityEntry {
    pub l: usize,
    pub r: usize,
    pub score: f64,
}

/// Most active interval of every series, keyed by series id.
///
/// # Errors
/// Propagates [`ClusterError::InsufficientData`] for series shorter than two
/// samples (unreachable for sets built through [`SeriesSet`]).
pub fn activity_report(
    series: &SeriesSet,
    transform: DiffTransform,
) -> Result<BTreeMap<String, ActivityEntry>> {
    let mut out = BTreeMap::new();
    for (id, values) in series.iter() {
        let interval = most_active_interval(values, transform)?;
        out.insert(
            id.clone(),
            ActivityEntry {
                l: interval.l,
                r: interval.r,
                score: interval.score,
            },
        );
    }
    Ok(out)
}

/// Serialize any report shape to pretty-printed JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ClusterError::Io(e.to_string()))
}

/// Serialize a report shape and write it to `path`.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = to_json_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Render the run summary Markdown.
pub fn markdown_summary(series: &SeriesSet, clusters: &[Vec<String>]) -> String {
    let lines = [
        "# Run Summary".to_string(),
        format!("- total series: **{}**", series.len()),
        format!("- clusters formed: **{}**", clusters.len()),
        "- closest-pair computed per cluster".to_string(),
        "- Kadane intervals saved to `kadane.json`".to_string(),
    ];
    lines.join("\n") + "\n"
}

/// Write Markdown text to `path`.
pub fn write_markdown(text: &str, path: &Path) -> Result<()> {
    std::fs::write(path, text)?;
    Ok(())
}
