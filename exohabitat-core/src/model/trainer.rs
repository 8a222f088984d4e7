//! Roster training and model selection
//!
//! Trains every family on the same prepared split, evaluates them
//! uniformly, and selects by F1 with deterministic tie-breaks (accuracy,
//! then the simpler family). A family that fails to fit is reported and
//! skipped; only a fully failed roster aborts the run.

use chrono::Utc;

use crate::dataset::TrainingDataset;
use crate::error::TrainingError;
use crate::features::{FEATURE_VERSION, layout::layout_hash};

use super::boosting::{BoostingParams, GradientBoosting};
use super::forest::{ForestParams, RandomForest};
use super::logistic::{LogisticParams, LogisticRegression};
use super::metrics::{evaluate, EvalMetrics};
use super::{FitError, ModelFamily, ModelParams, TrainedModel};

/// One roster entry's evaluation, kept for the comparison report.
#[derive(Debug, Clone)]
pub struct FamilyReport {
    pub family: ModelFamily,
    pub metrics: EvalMetrics,
    pub n_parameters: usize,
}

/// The selected model plus the full roster comparison.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: TrainedModel,
    pub reports: Vec<FamilyReport>,
}

impl TrainingOutcome {
    /// Human-readable comparison table for the training CLI.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str("model                 accuracy  precision  recall    f1        roc_auc\n");
        for r in &self.reports {
            out.push_str(&format!(
                "{:<20}  {:<8.4}  {:<9.4}  {:<8.4}  {:<8.4}  {:<8.4}\n",
                r.family.as_str(),
                r.metrics.accuracy,
                r.metrics.precision,
                r.metrics.recall,
                r.metrics.f1,
                r.metrics.roc_auc,
            ));
        }
        out.push_str(&format!(
            "selected: {} (f1 {:.4})\n",
            self.model.family.as_str(),
            self.model.metrics.f1
        ));
        out
    }
}

fn fit_family(
    family: ModelFamily,
    dataset: &TrainingDataset,
) -> Result<ModelParams, FitError> {
    let x = dataset.x_train.view();
    let y: Vec<f64> = dataset.y_train.to_vec();
    match family {
        ModelFamily::LogisticRegression => {
            LogisticRegression::fit(x, &y, LogisticParams::default()).map(ModelParams::Logistic)
        }
        ModelFamily::RandomForest => {
            RandomForest::fit(x, &y, ForestParams::default(), dataset.seed)
                .map(ModelParams::Forest)
        }
        ModelFamily::GradientBoosting => {
            GradientBoosting::fit(x, &y, BoostingParams::default()).map(ModelParams::Boosted)
        }
    }
}

/// Train the fixed roster and select the best model.
///
/// Each family trains in isolation on the shared immutable partitions.
/// Selection: max F1, then max accuracy, then earliest roster position.
pub fn train(dataset: &TrainingDataset) -> Result<TrainingOutcome, TrainingError> {
    let y_test: Vec<f64> = dataset.y_test.to_vec();
    let mut fitted: Vec<(ModelFamily, ModelParams, EvalMetrics)> = Vec::new();
    let mut failures: Vec<String> = Vec::new();

    for family in ModelFamily::ROSTER {
        match fit_family(family, dataset) {
            Ok(params) => {
                let probs: Vec<f64> = dataset
                    .x_test
                    .rows()
                    .into_iter()
                    .map(|row| {
                        let row: Vec<f64> = row.iter().copied().collect();
                        params.predict_proba(&row)
                    })
                    .collect();
                let metrics = evaluate(&probs, &y_test, 0.5);
                log::info!(
                    "{}: f1 {:.4}, accuracy {:.4}, roc_auc {:.4}",
                    family.as_str(),
                    metrics.f1,
                    metrics.accuracy,
                    metrics.roc_auc
                );
                fitted.push((family, params, metrics));
            }
            Err(e) => {
                log::warn!("{} failed to fit: {}", family.as_str(), e);
                failures.push(format!("{}: {}", family.as_str(), e));
            }
        }
    }

    if fitted.is_empty() {
        return Err(TrainingError::NoViableModel(failures.join("; ")));
    }

    let reports: Vec<FamilyReport> = fitted
        .iter()
        .map(|(family, params, metrics)| FamilyReport {
            family: *family,
            metrics: *metrics,
            n_parameters: params.n_parameters(),
        })
        .collect();

    // Max F1; ties fall to higher accuracy, then the simpler family
    // (earlier roster position). min_by keeps the first of equals, so the
    // comparison orders best-first.
    let best_index = (0..fitted.len())
        .min_by(|&a, &b| {
            let (fa, _, ma) = &fitted[a];
            let (fb, _, mb) = &fitted[b];
            mb.f1
                .total_cmp(&ma.f1)
                .then(mb.accuracy.total_cmp(&ma.accuracy))
                .then(fa.roster_position().cmp(&fb.roster_position()))
        })
        .unwrap();
    let (family, params, metrics) = fitted.swap_remove(best_index);

    Ok(TrainingOutcome {
        model: TrainedModel {
            family,
            params,
            feature_names: dataset.feature_names.clone(),
            layout_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            metrics,
            seed: dataset.seed,
            trained_at: Utc::now(),
        },
        reports,
    })
}
