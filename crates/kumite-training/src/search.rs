//! Grid search with k-fold cross-validation.
//!
//! The candidate set is small and fixed; each candidate is scored by mean
//! subset accuracy (all 12 buttons correct on a frame) across the folds of
//! the train partition. Validation data never enters the search.

use kumite_features::{ButtonLabels, FEATURE_COUNT};
use kumite_model::{MultiLabelClassifier, TrainConfig};
use rand::Rng;

/// Cross-validated hyperparameter search over a bounded candidate set.
#[derive(Debug, Clone)]
pub struct GridSearch {
    pub candidates: Vec<TrainConfig>,
    pub folds: usize,
}

impl Default for GridSearch {
    fn default() -> Self {
        let mut candidates = vec![];
        for &learning_rate in &[0.05, 0.1] {
            for &epochs in &[100, 150] {
                for &l2 in &[0.0, 1e-3] {
                    candidates.push(TrainConfig {
                        learning_rate,
                        epochs,
                        l2,
                    });
                }
            }
        }
        Self {
            candidates,
            folds: 3,
        }
    }
}

/// The winning candidate and its cross-validated score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub config: TrainConfig,
    pub mean_accuracy: f32,
}

impl GridSearch {
    /// Scores every candidate and returns the best one.
    ///
    /// # Panics
    ///
    /// Panics if the candidate set is empty or there are fewer samples than
    /// folds.
    #[must_use]
    pub fn run<R>(
        &self,
        features: &[[f32; FEATURE_COUNT]],
        labels: &[ButtonLabels],
        rng: &mut R,
    ) -> SearchOutcome
    where
        R: Rng + ?Sized,
    {
        assert!(!self.candidates.is_empty());
        assert!(self.folds > 0 && features.len() >= self.folds);
        assert_eq!(features.len(), labels.len());

        let mut best: Option<SearchOutcome> = None;
        for (i, config) in self.candidates.iter().enumerate() {
            let mean_accuracy = self.cross_validate(config, features, labels, rng);
            eprintln!(
                "Candidate {:2}/{}: lr={:.3} epochs={} l2={:.0e} => CV accuracy {:.3}",
                i + 1,
                self.candidates.len(),
                config.learning_rate,
                config.epochs,
                config.l2,
                mean_accuracy
            );
            if best.is_none_or(|b| mean_accuracy > b.mean_accuracy) {
                best = Some(SearchOutcome {
                    config: *config,
                    mean_accuracy,
                });
            }
        }
        best.unwrap()
    }

    /// Mean held-out subset accuracy over contiguous folds.
    ///
    /// The dataset builder already shuffles samples, so contiguous folds are
    /// unbiased here.
    #[expect(clippy::cast_precision_loss)]
    fn cross_validate<R>(
        &self,
        config: &TrainConfig,
        features: &[[f32; FEATURE_COUNT]],
        labels: &[ButtonLabels],
        rng: &mut R,
    ) -> f32
    where
        R: Rng + ?Sized,
    {
        let fold_size = features.len().div_ceil(self.folds);
        let mut fold_accuracies = vec![];
        for fold in features.chunks(fold_size).zip(labels.chunks(fold_size)).enumerate() {
            let (i, (fold_features, fold_labels)) = fold;
            let start = i * fold_size;
            let end = start + fold_features.len();

            let mut train_features =
                Vec::with_capacity(features.len() - fold_features.len());
            let mut train_labels = Vec::with_capacity(train_features.capacity());
            train_features.extend_from_slice(&features[..start]);
            train_features.extend_from_slice(&features[end..]);
            train_labels.extend_from_slice(&labels[..start]);
            train_labels.extend_from_slice(&labels[end..]);

            let model =
                MultiLabelClassifier::fit(config, &train_features, &train_labels, rng);
            fold_accuracies.push(subset_accuracy(&model, fold_features, fold_labels));
        }
        fold_accuracies.iter().sum::<f32>() / fold_accuracies.len() as f32
    }
}

/// Fraction of frames where all 12 predicted buttons match the labels.
#[expect(clippy::cast_precision_loss)]
fn subset_accuracy(
    model: &MultiLabelClassifier,
    features: &[[f32; FEATURE_COUNT]],
    labels: &[ButtonLabels],
) -> f32 {
    if features.is_empty() {
        return 0.0;
    }
    let hits = features
        .iter()
        .zip(labels)
        .filter(|(f, l)| model.predict(f) == **l)
        .count();
    hits as f32 / features.len() as f32
}

#[cfg(test)]
mod tests {
    use kumite_features::BUTTON_COUNT;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn separable_data() -> (Vec<[f32; FEATURE_COUNT]>, Vec<ButtonLabels>) {
        let mut features = vec![];
        let mut labels = vec![];
        for i in 0..30i16 {
            let x = f32::from(i) / 15.0 - 1.0 + 0.03;
            let mut values = [0.0; FEATURE_COUNT];
            values[0] = x;
            features.push(values);
            let mut pressed = [false; BUTTON_COUNT];
            pressed[3] = x > 0.0;
            labels.push(ButtonLabels::new(pressed));
        }
        (features, labels)
    }

    #[test]
    fn test_default_grid_is_bounded() {
        let search = GridSearch::default();
        assert_eq!(search.candidates.len(), 8);
        assert_eq!(search.folds, 3);
    }

    #[test]
    fn test_search_finds_accurate_candidate_on_separable_data() {
        let (features, labels) = separable_data();
        let search = GridSearch::default();
        let mut rng = Pcg64Mcg::new(42);
        let outcome = search.run(&features, &labels, &mut rng);
        assert!(outcome.mean_accuracy > 0.8, "got {}", outcome.mean_accuracy);
    }

    #[test]
    fn test_subset_accuracy_requires_all_buttons_correct() {
        let (features, labels) = separable_data();
        let mut rng = Pcg64Mcg::new(1);
        let model = MultiLabelClassifier::fit(
            &TrainConfig {
                learning_rate: 0.5,
                epochs: 300,
                l2: 0.0,
            },
            &features,
            &labels,
            &mut rng,
        );
        let accuracy = subset_accuracy(&model, &features, &labels);
        assert!(accuracy > 0.9, "got {accuracy}");
    }
}
