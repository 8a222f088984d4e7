//! Gradient-boosted trees (binary logit objective)
//!
//! Shallow regression trees fitted to the logistic gradient, leaves taking
//! the Newton step `sum(residual) / sum(p(1-p))`. Fully deterministic: no
//! row or feature sampling.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::forest::{has_both_classes, normalize};
use super::tree::{grow_tree, DecisionTree, TreeParams};
use super::FitError;

#[derive(Debug, Clone, Copy)]
pub struct BoostingParams {
    pub n_rounds: usize,
    pub learning_rate: f64,
    pub tree: TreeParams,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_rounds: 40,
            learning_rate: 0.1,
            tree: TreeParams {
                max_depth: 3,
                min_samples_split: 4,
                min_samples_leaf: 2,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    pub trees: Vec<DecisionTree>,
    pub learning_rate: f64,
    /// Initial logit (log-odds of the training base rate)
    pub init_score: f64,
    pub n_features: usize,
    pub importances: Vec<f64>,
}

impl GradientBoosting {
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[f64],
        params: BoostingParams,
    ) -> Result<Self, FitError> {
        let n = x.nrows();
        if n == 0 {
            return Err(FitError("empty training matrix".into()));
        }
        if !has_both_classes(y) {
            return Err(FitError("training labels contain a single class".into()));
        }

        let base_rate = y.iter().sum::<f64>() / n as f64;
        let init_score = (base_rate / (1.0 - base_rate)).ln();

        let all_indices: Vec<usize> = (0..n).collect();
        let mut scores = vec![init_score; n];
        let mut trees = Vec::with_capacity(params.n_rounds);
        let mut importances = vec![0.0; x.ncols()];

        for _ in 0..params.n_rounds {
            let probs: Vec<f64> = scores.iter().map(|&s| sigmoid(s)).collect();
            let gradients: Vec<f64> = y.iter().zip(&probs).map(|(&yi, &p)| yi - p).collect();
            let hessians: Vec<f64> = probs.iter().map(|&p| (p * (1.0 - p)).max(1e-6)).collect();

            let (tree, imp) = grow_tree(
                x,
                &gradients,
                Some(&hessians),
                &all_indices,
                params.tree,
                None,
                None,
            );
            for (acc, v) in importances.iter_mut().zip(imp.iter()) {
                *acc += v;
            }

            for (i, score) in scores.iter_mut().enumerate() {
                let row: Vec<f64> = x.row(i).iter().copied().collect();
                *score += params.learning_rate * tree.predict_row(&row);
            }
            trees.push(tree);
        }

        normalize(&mut importances);

        Ok(Self {
            trees,
            learning_rate: params.learning_rate,
            init_score,
            n_features: x.ncols(),
            importances,
        })
    }

    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut score = self.init_score;
        for tree in &self.trees {
            score += self.learning_rate * tree.predict_row(row);
        }
        sigmoid(score)
    }

    pub fn n_parameters(&self) -> usize {
        2 + self.trees.iter().map(DecisionTree::n_nodes).sum::<usize>()
    }
}

pub(super) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
