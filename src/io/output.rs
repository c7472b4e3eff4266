use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

use crate::error::AnalysisError;

/// Accumulated roughness series across runs with an explicit run × frame
/// shape contract: every pushed run must contain exactly `frames_per_run`
/// values, so the cross-run mean is always well defined.
#[derive(Debug, Clone)]
pub struct RoughnessTable {
    frames_per_run: usize,
    rows: Vec<Vec<f64>>,
}

impl RoughnessTable {
    pub fn new(frames_per_run: usize) -> Self {
        RoughnessTable {
            frames_per_run,
            rows: Vec::new(),
        }
    }

    pub fn frames_per_run(&self) -> usize {
        self.frames_per_run
    }

    pub fn num_runs(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Appends one run's per-frame series, enforcing the shape contract.
    pub fn push_run(&mut self, series: Vec<f64>) -> Result<(), AnalysisError> {
        if series.len() != self.frames_per_run {
            return Err(AnalysisError::InputShape(format!(
                "run series has {} frames, table expects {}",
                series.len(),
                self.frames_per_run
            )));
        }
        self.rows.push(series);
        Ok(())
    }

    /// Mean roughness per frame across all accumulated runs. Empty for an
    /// empty table.
    pub fn mean_curve(&self) -> Vec<f64> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let n = self.rows.len() as f64;
        (0..self.frames_per_run)
            .map(|frame| self.rows.iter().map(|row| row[frame]).sum::<f64>() / n)
            .collect()
    }
}

/// Writes a scalar series as a headerless single-column table, one value per
/// row, matching the layout the per-run exports have always used.
pub fn write_series_csv<P: AsRef<Path>>(path: P, series: &[f64]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("failed to create series file {:?}", path.as_ref()))?;
    for value in series {
        wtr.write_record(&[value.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads back a series previously written by `write_series_csv`, so earlier
/// runs can be merged into the table without recomputing them.
pub fn read_series_csv<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("failed to open series file {:?}", path.as_ref()))?;

    let mut series = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = record
            .get(0)
            .with_context(|| "series row had no value column")?;
        let value: f64 = field
            .trim()
            .parse()
            .with_context(|| format!("invalid series value {:?}", field))?;
        series.push(value);
    }
    Ok(series)
}
