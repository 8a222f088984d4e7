//! CART decision tree
//!
//! One builder serves both ensemble families: for binary labels the
//! variance criterion is equivalent to gini gain, and boosting supplies
//! per-sample hessians so leaves take a Newton step instead of the mean.
//! Nodes live in a flat vec (root at index 0) so fitted trees serialize
//! cleanly.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_samples_split: 4,
            min_samples_leaf: 2,
        }
    }
}

/// Grow a tree over `indices` of the sample matrix.
///
/// `hessians` switches leaves from the target mean to the Newton step
/// `sum(target) / sum(hessian)`. `feature_subset` (with an RNG) samples
/// that many candidate features per split, which is what de-correlates
/// forest trees. Returns the tree and the per-feature impurity decrease.
pub fn grow_tree<'a, 'b>(
    x: ArrayView2<'a, f64>,
    targets: &'b [f64],
    hessians: Option<&'b [f64]>,
    indices: &[usize],
    params: TreeParams,
    feature_subset: Option<usize>,
    mut rng: Option<&mut StdRng>,
) -> (DecisionTree, Vec<f64>) {
    let mut builder = TreeBuilder {
        x,
        targets,
        hessians,
        params,
        feature_subset,
        rng: rng.as_deref_mut(),
        nodes: Vec::new(),
        importances: vec![0.0; x.ncols()],
    };
    builder.build(indices.to_vec(), 0);
    (
        DecisionTree {
            nodes: builder.nodes,
        },
        builder.importances,
    )
}

struct TreeBuilder<'a, 'b, 'r> {
    x: ArrayView2<'a, f64>,
    targets: &'b [f64],
    hessians: Option<&'b [f64]>,
    params: TreeParams,
    feature_subset: Option<usize>,
    rng: Option<&'r mut StdRng>,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

impl TreeBuilder<'_, '_, '_> {
    fn build(&mut self, indices: Vec<usize>, depth: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            value: self.leaf_value(&indices),
        });

        if depth >= self.params.max_depth || indices.len() < self.params.min_samples_split {
            return id;
        }

        let Some(split) = self.best_split(&indices) else {
            return id;
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.x[[i, split.feature]] <= split.threshold);

        self.importances[split.feature] += split.gain;

        let left = self.build(left_idx, depth + 1);
        let right = self.build(right_idx, depth + 1);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn leaf_value(&self, indices: &[usize]) -> f64 {
        if indices.is_empty() {
            return 0.0;
        }
        let sum_t: f64 = indices.iter().map(|&i| self.targets[i]).sum();
        match self.hessians {
            // Newton step with unit L2 regularization in the denominator,
            // which keeps near-pure leaves from blowing up the logit.
            Some(h) => {
                let sum_h: f64 = indices.iter().map(|&i| h[i]).sum();
                sum_t / (sum_h + 1.0)
            }
            None => sum_t / indices.len() as f64,
        }
    }

    fn candidate_features(&mut self) -> Vec<usize> {
        let n = self.x.ncols();
        match (self.feature_subset, self.rng.as_deref_mut()) {
            (Some(k), Some(rng)) if k < n => {
                let mut all: Vec<usize> = (0..n).collect();
                all.shuffle(rng);
                let mut chosen = all[..k].to_vec();
                chosen.sort_unstable();
                chosen
            }
            _ => (0..n).collect(),
        }
    }

    /// Exhaustive threshold scan per candidate feature; first strictly-best
    /// gain wins, which keeps growth deterministic.
    fn best_split(&mut self, indices: &[usize]) -> Option<BestSplit> {
        let n = indices.len();
        let min_leaf = self.params.min_samples_leaf;

        let total_sum: f64 = indices.iter().map(|&i| self.targets[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| self.targets[i].powi(2)).sum();
        let parent_sse = total_sq - total_sum.powi(2) / n as f64;
        if parent_sse <= 1e-12 {
            return None; // already pure
        }

        let mut best: Option<BestSplit> = None;
        for feature in self.candidate_features() {
            let mut order: Vec<usize> = indices.to_vec();
            order.sort_by(|&a, &b| self.x[[a, feature]].total_cmp(&self.x[[b, feature]]));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for s in 1..n {
                let i = order[s - 1];
                left_sum += self.targets[i];
                left_sq += self.targets[i].powi(2);

                let v_prev = self.x[[order[s - 1], feature]];
                let v_next = self.x[[order[s], feature]];
                if v_prev == v_next || s < min_leaf || n - s < min_leaf {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let sse_left = left_sq - left_sum.powi(2) / s as f64;
                let sse_right = right_sq - right_sum.powi(2) / (n - s) as f64;
                let gain = parent_sse - sse_left - sse_right;

                if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (v_prev + v_next) / 2.0,
                        gain,
                    });
                }
            }
        }
        best
    }
}
