//! Logistic regression baseline
//!
//! Full-batch gradient descent with light L2 regularization. Zero
//! initialization and a fixed epoch count keep the fit deterministic.
//! Inputs are robust-scaled upstream, so a flat learning rate converges.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::boosting::sigmoid;
use super::forest::{has_both_classes, normalize};
use super::FitError;

#[derive(Debug, Clone, Copy)]
pub struct LogisticParams {
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            epochs: 500,
            learning_rate: 0.1,
            l2: 1e-4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticRegression {
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[f64],
        params: LogisticParams,
    ) -> Result<Self, FitError> {
        let n = x.nrows();
        if n == 0 {
            return Err(FitError("empty training matrix".into()));
        }
        if !has_both_classes(y) {
            return Err(FitError("training labels contain a single class".into()));
        }

        let n_features = x.ncols();
        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let inv_n = 1.0 / n as f64;

        for _ in 0..params.epochs {
            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;

            for i in 0..n {
                let mut z = bias;
                for j in 0..n_features {
                    z += weights[j] * x[[i, j]];
                }
                let err = sigmoid(z) - y[i];
                for j in 0..n_features {
                    grad_w[j] += err * x[[i, j]];
                }
                grad_b += err;
            }

            for j in 0..n_features {
                weights[j] -=
                    params.learning_rate * (grad_w[j] * inv_n + params.l2 * weights[j]);
            }
            bias -= params.learning_rate * grad_b * inv_n;
        }

        Ok(Self { weights, bias })
    }

    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(row.iter())
                .map(|(w, v)| w * v)
                .sum::<f64>();
        sigmoid(z)
    }

    /// |weight| magnitudes, normalized.
    pub fn importances(&self) -> Vec<f64> {
        let mut imp: Vec<f64> = self.weights.iter().map(|w| w.abs()).collect();
        normalize(&mut imp);
        imp
    }

    pub fn n_parameters(&self) -> usize {
        self.weights.len() + 1
    }
}
