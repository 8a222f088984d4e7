//! Evaluation metrics
//!
//! The uniform metric set every model family is judged by: accuracy,
//! precision, recall, F1 and ROC-AUC, all computed on the held-out test
//! partition. Positive class = habitable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
}

/// Evaluate predicted probabilities against 0/1 labels at the given
/// decision threshold.
pub fn evaluate(probs: &[f64], labels: &[f64], threshold: f64) -> EvalMetrics {
    let mut tp = 0usize;
    let mut tn = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;

    for (&p, &y) in probs.iter().zip(labels.iter()) {
        let predicted = p >= threshold;
        let actual = y >= 0.5;
        match (predicted, actual) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_ += 1,
            (false, false) => tn += 1,
        }
    }

    let total = (tp + tn + fp + fn_) as f64;
    let accuracy = if total > 0.0 { (tp + tn) as f64 / total } else { 0.0 };
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    EvalMetrics {
        accuracy,
        precision,
        recall,
        f1,
        roc_auc: roc_auc(probs, labels),
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Rank-based ROC-AUC (Mann-Whitney U). Tied scores get half credit.
/// Returns 0.5 when the labels contain a single class.
pub fn roc_auc(probs: &[f64], labels: &[f64]) -> f64 {
    let n_pos = labels.iter().filter(|&&y| y >= 0.5).count();
    let n_neg = labels.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut u = 0.0;
    for (i, (&pi, &yi)) in probs.iter().zip(labels.iter()).enumerate() {
        if yi < 0.5 {
            continue;
        }
        for (j, (&pj, &yj)) in probs.iter().zip(labels.iter()).enumerate() {
            if i == j || yj >= 0.5 {
                continue;
            }
            if pi > pj {
                u += 1.0;
            } else if pi == pj {
                u += 0.5;
            }
        }
    }
    u / (n_pos * n_neg) as f64
}
