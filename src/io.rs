//! Loading series from CSV files and generating synthetic demo data.
//!
//! Input files are single-column CSVs (with a `value` header, a bare
//! header-less column, or a multi-column file containing a `value` column).
//! Every file stem becomes the series id.

use crate::core::{SeriesSet, MIN_SERIES_LEN};
use crate::error::{ClusterError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a single series from a CSV file.
///
/// Accepted layouts, in order of detection: a `value` column (any position),
/// a header-less numeric first column, or a single named column.
///
/// # Errors
/// - [`ClusterError::Io`] if the file cannot be read.
/// - [`ClusterError::EmptyData`] if no data rows are present.
/// - [`ClusterError::Parse`] for a multi-column file without a `value`
///   column, or a cell that is not a number.
pub fn read_csv_series(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    parse_csv(&text, path)
}

fn parse_csv(text: &str, path: &Path) -> Result<Vec<f64>> {
    let mut rows = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = rows.next().ok_or(ClusterError::EmptyData)?;
    let header: Vec<&str> = first.split(',').map(str::trim).collect();

    let mut values = Vec::new();
    let column = if let Some(idx) = header.iter().position(|c| *c == "value") {
        idx
    } else if let Ok(v) = header[0].parse::<f64>() {
        // No header at all: the first row is already data.
        values.push(v);
        0
    } else if header.len() == 1 {
        0
    } else {
        return Err(ClusterError::Parse {
            path: path.display().to_string(),
            msg: format!("{} columns and no 'value' column", header.len()),
        });
    };

    for row in rows {
        let cell = row.split(',').nth(column).map(str::trim).unwrap_or("");
        let v = cell.parse::<f64>().map_err(|_| ClusterError::Parse {
            path: path.display().to_string(),
            msg: format!("cannot parse {cell:?} as a number"),
        })?;
        values.push(v);
    }

    if values.is_empty() {
        return Err(ClusterError::EmptyData);
    }
    Ok(values)
}

/// Recursively load every `*.csv` under `dir` into a [`SeriesSet`].
///
/// Files that cannot be read or parsed, and series shorter than `min_len`
/// samples, are skipped silently; the file stem is used as the series id.
/// Paths are visited in sorted order so repeated loads agree on which file
/// wins a duplicate stem.
pub fn load_series_from_dir(dir: &Path, min_len: usize) -> Result<SeriesSet> {
    let mut paths = Vec::new();
    collect_csv_paths(dir, &mut paths)?;
    paths.sort();

    let min_len = min_len.max(MIN_SERIES_LEN);
    let mut set = SeriesSet::new();
    for path in paths {
        let Ok(values) = read_csv_series(&path) else {
            continue;
        };
        if values.len() < min_len {
            continue;
        }
        let Some(stem) = path.file_stem() else {
            continue;
        };
        let _ = set.insert(stem.to_string_lossy().into_owned(), values);
    }
    Ok(set)
}

fn collect_csv_paths(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_csv_paths(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "csv") {
            out.push(path);
        }
    }
    Ok(())
}

/// Generate `n` synthetic series of length `len`: three archetypes (sine,
/// square-ish, ramp) cycled round-robin, each overlaid with Gaussian noise.
///
/// Useful for demos and integration tests when no data directory is
/// available; a fixed `seed` reproduces the set exactly.
pub fn synthetic_series(n: usize, len: usize, seed: u64) -> SeriesSet {
    let len = len.max(MIN_SERIES_LEN);
    let mut rng = StdRng::seed_from_u64(seed);
    let t: Vec<f64> = (0..len)
        .map(|i| 2.0 * std::f64::consts::PI * i as f64 / (len - 1) as f64)
        .collect();

    let sine: Vec<f64> = t.iter().map(|&x| x.sin()).collect();
    let square: Vec<f64> = t
        .iter()
        .map(|&x| (3.0 * x).sin().signum() * 0.5 + 0.2 * (7.0 * x).sin())
        .collect();
    let ramp: Vec<f64> = t
        .iter()
        .enumerate()
        .map(|(i, &x)| -1.0 + 2.0 * i as f64 / (len - 1) as f64 + 0.1 * (5.0 * x).sin())
        .collect();
    let archetypes = [sine, square, ramp];

    let mut set = SeriesSet::new();
    for i in 0..n {
        let base = &archetypes[i % archetypes.len()];
        let values: Vec<f64> = base
            .iter()
            .map(|&v| v + 0.15 * gaussian(&mut rng))
            .collect();
        set.insert(format!("synth_{i:04}"), values)
            .expect("synthetic series are finite and long enough");
    }
    set
}

/// Standard normal sample via the Box-Muller transform.
fn gaussian(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
