//! Batch missing-value resolution
//!
//! Fills (or rejects) missing columns across a batch before validation.
//! Row-level failures are reported per row; one bad observation never
//! aborts the batch.

use crate::config::ImputePolicy;
use crate::error::ValidationError;
use crate::features::score::habitability_score;

use super::record::{ExoplanetRecord, RawObservation, RAW_COLUMNS};
use super::validate::{derive_luminosity, validate};

/// A row excluded during resolution, with its typed cause.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub index: usize,
    pub name: String,
    pub error: ValidationError,
}

/// Resolve a batch of raw observations under the given policy.
///
/// Returns the validated records (input order preserved) and the skipped
/// rows. Luminosity is derived from stellar radius/temperature before any
/// imputation, so a derivable column never counts as missing.
pub fn resolve(
    batch: &[RawObservation],
    policy: ImputePolicy,
) -> (Vec<ExoplanetRecord>, Vec<SkippedRow>) {
    let n_cols = RAW_COLUMNS.len();

    // Work on copies with luminosity pre-derived.
    let mut rows: Vec<RawObservation> = batch
        .iter()
        .map(|raw| {
            let mut row = raw.clone();
            if row.st_lum.is_none() {
                if let Some(l) = derive_luminosity(&row) {
                    row.st_lum = Some(l);
                }
            }
            row
        })
        .collect();

    match policy {
        ImputePolicy::DropRow => {}
        ImputePolicy::MeanImpute => {
            let fills: Vec<Option<f64>> =
                (0..n_cols).map(|j| column_stat(&rows, j, mean)).collect();
            fill_missing(&mut rows, &fills);
        }
        ImputePolicy::MedianImpute => {
            let fills: Vec<Option<f64>> =
                (0..n_cols).map(|j| column_stat(&rows, j, median)).collect();
            fill_missing(&mut rows, &fills);
        }
        ImputePolicy::ImportanceWeighted => importance_impute(&mut rows),
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        match validate(row) {
            Ok(record) => records.push(record),
            Err(error) => {
                log::warn!("skipping row {} ({}): {}", index, row.name(), error);
                skipped.push(SkippedRow {
                    index,
                    name: row.name().to_string(),
                    error,
                });
            }
        }
    }

    (records, skipped)
}

fn column_stat(
    rows: &[RawObservation],
    col: usize,
    stat: fn(&mut Vec<f64>) -> Option<f64>,
) -> Option<f64> {
    let mut values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.column(col))
        .filter(|v| v.is_finite())
        .collect();
    stat(&mut values)
}

fn fill_missing(rows: &mut [RawObservation], fills: &[Option<f64>]) {
    for row in rows.iter_mut() {
        for (j, fill) in fills.iter().enumerate() {
            if row.column(j).is_none() {
                if let Some(v) = fill {
                    row.set_column(j, *v);
                }
            }
        }
    }
}

/// Importance-weighted imputation.
///
/// A missing cell in column `j` becomes
/// `(1 - |c_j|) * mean_j + |c_j| * ols_jk(row[k])`, where `c_j` is column
/// `j`'s correlation with the rule-based habitability score over complete
/// rows and `k` is the available column most correlated with `j`. Falls
/// back to the column mean when the batch has too few complete rows to fit
/// the regression.
fn importance_impute(rows: &mut [RawObservation]) {
    let n_cols = RAW_COLUMNS.len();
    let means: Vec<Option<f64>> = (0..n_cols).map(|j| column_stat(rows, j, mean)).collect();

    // Complete rows give us the label correlations and regression fits.
    let complete: Vec<(usize, ExoplanetRecord)> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| (0..n_cols).all(|j| r.column(j).is_some()))
        .filter_map(|(i, r)| validate(r).ok().map(|rec| (i, rec)))
        .collect();

    if complete.len() < 3 {
        log::warn!(
            "importance imputation: only {} complete rows, falling back to column means",
            complete.len()
        );
        fill_missing(rows, &means);
        return;
    }

    let scores: Vec<f64> = complete
        .iter()
        .map(|(_, rec)| habitability_score(rec))
        .collect();
    let columns: Vec<Vec<f64>> = (0..n_cols)
        .map(|j| {
            complete
                .iter()
                .map(|(i, _)| rows[*i].column(j).unwrap_or(0.0))
                .collect()
        })
        .collect();

    // |corr(column, habitability score)| per column
    let label_corr: Vec<f64> = columns
        .iter()
        .map(|col| pearson(col, &scores).abs())
        .collect();

    for i in 0..rows.len() {
        for j in 0..n_cols {
            if rows[i].column(j).is_some() {
                continue;
            }
            let Some(mean_j) = means[j] else { continue };

            // Best available partner column by absolute correlation.
            let partner = (0..n_cols)
                .filter(|&k| k != j && rows[i].column(k).is_some())
                .map(|k| (k, pearson(&columns[j], &columns[k]).abs()))
                .filter(|(_, c)| c.is_finite() && *c > 0.0)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(k, _)| k);

            let value = match partner {
                Some(k) => {
                    let (slope, intercept) = ols(&columns[k], &columns[j]);
                    let predicted = slope * rows[i].column(k).unwrap() + intercept;
                    let w = label_corr[j].clamp(0.0, 1.0);
                    (1.0 - w) * mean_j + w * predicted
                }
                None => mean_j,
            };
            rows[i].set_column(j, value);
        }
    }
}

// ============================================
// Small statistics helpers
// ============================================

fn mean(values: &mut Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &mut Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Pearson correlation; 0.0 when either side is constant.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let mx = xs[..n].iter().sum::<f64>() / n as f64;
    let my = ys[..n].iter().sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for i in 0..n {
        let dx = xs[i] - mx;
        let dy = ys[i] - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx <= f64::EPSILON || vy <= f64::EPSILON {
        return 0.0;
    }
    cov / (vx.sqrt() * vy.sqrt())
}

/// Least-squares fit of `y = slope * x + intercept`.
fn ols(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return (0.0, ys.first().copied().unwrap_or(0.0));
    }
    let mx = xs[..n].iter().sum::<f64>() / n as f64;
    let my = ys[..n].iter().sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut vx = 0.0;
    for i in 0..n {
        cov += (xs[i] - mx) * (ys[i] - my);
        vx += (xs[i] - mx) * (xs[i] - mx);
    }
    if vx <= f64::EPSILON {
        return (0.0, my);
    }
    let slope = cov / vx;
    (slope, my - slope * mx)
}
