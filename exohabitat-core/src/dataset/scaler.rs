//! Robust scaler
//!
//! Per-column `(x - median) / IQR` transform. Outlier-heavy astrophysical
//! columns (orbital periods spanning decades) make mean/std scaling
//! unstable; median/IQR is insensitive to the tails.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// Fitted scaling parameters. A zero IQR (constant column) scales by 1.0
/// so the column passes through centered but unstretched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustScaler {
    pub medians: Vec<f64>,
    pub iqrs: Vec<f64>,
}

impl RobustScaler {
    /// Fit on a feature matrix (rows = samples, columns = features).
    pub fn fit(x: ArrayView2<'_, f64>) -> Self {
        let n_cols = x.ncols();
        let mut medians = Vec::with_capacity(n_cols);
        let mut iqrs = Vec::with_capacity(n_cols);

        for j in 0..n_cols {
            let mut column: Vec<f64> = x.column(j).iter().copied().collect();
            column.sort_by(f64::total_cmp);
            medians.push(quantile(&column, 0.5));
            let iqr = quantile(&column, 0.75) - quantile(&column, 0.25);
            iqrs.push(if iqr > f64::EPSILON { iqr } else { 1.0 });
        }

        Self { medians, iqrs }
    }

    pub fn n_features(&self) -> usize {
        self.medians.len()
    }

    /// Apply the fitted transform to a matrix.
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        Array2::from_shape_fn((x.nrows(), x.ncols()), |(i, j)| {
            (x[[i, j]] - self.medians[j]) / self.iqrs[j]
        })
    }

    /// Apply the fitted transform to a single row in layout order.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.medians.iter().zip(self.iqrs.iter()))
            .map(|(v, (m, iqr))| (v - m) / iqr)
            .collect()
    }
}

/// Quantile of a sorted slice, linear interpolation between order
/// statistics.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
