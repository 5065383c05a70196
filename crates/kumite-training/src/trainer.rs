//! Final fit and validation evaluation.

use kumite_model::{MultiLabelClassifier, TrainConfig};
use rand::Rng;

use crate::{Dataset, GridSearch, ValidationReport};

/// The selected classifier plus everything the operator needs to judge it.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub classifier: MultiLabelClassifier,
    pub config: TrainConfig,
    /// Cross-validated subset accuracy of the winning candidate.
    pub cv_accuracy: f32,
    pub report: ValidationReport,
}

/// Runs the grid search on the train partition, fits the winning candidate on
/// the full train partition, and evaluates per button on validation.
#[must_use]
pub fn train<R>(dataset: &Dataset, search: &GridSearch, rng: &mut R) -> TrainedModel
where
    R: Rng + ?Sized,
{
    eprintln!(
        "Searching {} candidates over {} train samples ({} folds)...",
        search.candidates.len(),
        dataset.train_features.len(),
        search.folds
    );
    let outcome = search.run(&dataset.train_features, &dataset.train_labels, rng);
    eprintln!(
        "Best candidate: lr={:.3} epochs={} l2={:.0e} (CV accuracy {:.3})",
        outcome.config.learning_rate,
        outcome.config.epochs,
        outcome.config.l2,
        outcome.mean_accuracy
    );

    let classifier = MultiLabelClassifier::fit(
        &outcome.config,
        &dataset.train_features,
        &dataset.train_labels,
        rng,
    );
    let report =
        ValidationReport::evaluate(&classifier, &dataset.val_features, &dataset.val_labels);

    TrainedModel {
        classifier,
        config: outcome.config,
        cv_accuracy: outcome.mean_accuracy,
        report,
    }
}
