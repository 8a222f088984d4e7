//! Random forest classifier
//!
//! Seeded bagging over CART trees with sqrt-feature subsampling. Tree `t`
//! draws its RNG from `seed + t`, so a fixed seed reproduces the forest
//! exactly regardless of build parallelism.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tree::{grow_tree, DecisionTree, TreeParams};
use super::FitError;

#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_trees: usize,
    pub tree: TreeParams,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 60,
            tree: TreeParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
    pub n_features: usize,
    /// Normalized impurity-decrease importances
    pub importances: Vec<f64>,
}

impl RandomForest {
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[f64],
        params: ForestParams,
        seed: u64,
    ) -> Result<Self, FitError> {
        let n = x.nrows();
        if n == 0 {
            return Err(FitError("empty training matrix".into()));
        }
        if !has_both_classes(y) {
            return Err(FitError("training labels contain a single class".into()));
        }

        let n_features = x.ncols();
        let subset = (n_features as f64).sqrt().round().max(1.0) as usize;

        let grown: Vec<(DecisionTree, Vec<f64>)> = (0..params.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t as u64));
                let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                grow_tree(x, y, None, &indices, params.tree, Some(subset), Some(&mut rng))
            })
            .collect();

        let mut importances = vec![0.0; n_features];
        for (_, imp) in &grown {
            for (acc, v) in importances.iter_mut().zip(imp.iter()) {
                *acc += v;
            }
        }
        normalize(&mut importances);

        Ok(Self {
            trees: grown.into_iter().map(|(tree, _)| tree).collect(),
            n_features,
            importances,
        })
    }

    /// Probability of the habitable class: mean of per-tree leaf fractions.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }

    pub fn n_parameters(&self) -> usize {
        self.trees.iter().map(DecisionTree::n_nodes).sum()
    }
}

pub(super) fn has_both_classes(y: &[f64]) -> bool {
    y.iter().any(|&v| v >= 0.5) && y.iter().any(|&v| v < 0.5)
}

pub(super) fn normalize(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > f64::EPSILON {
        for v in values.iter_mut() {
            *v /= total;
        }
    }
}
