//! Multi-label button classifier.
//!
//! The classifier is a bank of 12 independent logistic scorers, one per
//! button, over the scaled 14-feature vector. Each scorer is trained by
//! stochastic gradient descent with L2 regularization; the bank is treated as
//! an opaque trainable scorer by the rest of the system.
//!
//! Output order is positional: scorer `i` predicts button `i` of
//! [`BUTTON_NAMES`](kumite_features::BUTTON_NAMES), for whichever model the
//! scorers were trained with. The artifact layer persists and validates that
//! ordering.

use kumite_features::{BUTTON_COUNT, ButtonLabels, FEATURE_COUNT};
use rand::{Rng, seq::SliceRandom};
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

/// Hyperparameters for one training run.
///
/// These form the axes of the grid search in the offline trainer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// SGD step size.
    pub learning_rate: f32,
    /// Full passes over the training partition.
    pub epochs: usize,
    /// L2 regularization strength.
    pub l2: f32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 100,
            l2: 0.0,
        }
    }
}

/// A single logistic scorer: one weight per feature plus a bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticScorer {
    weights: [f32; FEATURE_COUNT],
    bias: f32,
}

impl LogisticScorer {
    fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        // small Gaussian init breaks symmetry without saturating the sigmoid
        let normal = Normal::new(0.0, 0.01).unwrap();
        let mut weights = [0.0; FEATURE_COUNT];
        for w in &mut weights {
            *w = rng.sample(normal);
        }
        Self { weights, bias: 0.0 }
    }

    fn score(&self, features: &[f32; FEATURE_COUNT]) -> f32 {
        let dot: f32 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        dot + self.bias
    }

    fn sgd_step(&mut self, features: &[f32; FEATURE_COUNT], target: bool, config: &TrainConfig) {
        let predicted = sigmoid(self.score(features));
        let error = predicted - f32::from(u8::from(target));
        for (w, x) in self.weights.iter_mut().zip(features) {
            *w -= config.learning_rate * (error * x + config.l2 * *w);
        }
        self.bias -= config.learning_rate * error;
    }

    /// Decision at the 0.5 probability threshold.
    #[must_use]
    pub fn predict(&self, features: &[f32; FEATURE_COUNT]) -> bool {
        self.score(features) >= 0.0
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

/// A fitted multi-label scorer: 12 [`LogisticScorer`]s in canonical button
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLabelClassifier {
    scorers: Vec<LogisticScorer>,
}

impl MultiLabelClassifier {
    /// Trains all 12 scorers on the given scaled samples.
    ///
    /// Samples are visited in a freshly shuffled order each epoch; every
    /// sample updates all scorers, so the buttons remain independently
    /// scored but share one pass over the data.
    ///
    /// # Panics
    ///
    /// Panics if `features` and `labels` have different lengths.
    #[must_use]
    pub fn fit<R>(
        config: &TrainConfig,
        features: &[[f32; FEATURE_COUNT]],
        labels: &[ButtonLabels],
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        assert_eq!(features.len(), labels.len());

        let mut scorers: Vec<LogisticScorer> =
            (0..BUTTON_COUNT).map(|_| LogisticScorer::random(rng)).collect();

        let mut order: Vec<usize> = (0..features.len()).collect();
        for _ in 0..config.epochs {
            order.shuffle(rng);
            for &i in &order {
                let sample = &features[i];
                let targets = labels[i].values();
                for (scorer, &target) in scorers.iter_mut().zip(targets) {
                    scorer.sgd_step(sample, target, config);
                }
            }
        }

        Self { scorers }
    }

    /// Predicts all 12 button states for one scaled vector.
    #[must_use]
    pub fn predict(&self, features: &[f32; FEATURE_COUNT]) -> ButtonLabels {
        let mut values = [false; BUTTON_COUNT];
        for (v, scorer) in values.iter_mut().zip(&self.scorers) {
            *v = scorer.predict(features);
        }
        ButtonLabels::new(values)
    }

    /// Number of scorers in the bank. Always [`BUTTON_COUNT`] for models
    /// produced by [`fit`](Self::fit).
    #[must_use]
    pub fn scorer_count(&self) -> usize {
        self.scorers.len()
    }
}

#[cfg(test)]
mod tests {
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn toy_sample(x: f32) -> [f32; FEATURE_COUNT] {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = x;
        values
    }

    /// Labels: button 0 pressed iff x > 0, button 3 pressed iff x < 0,
    /// everything else never pressed.
    fn toy_labels(x: f32) -> ButtonLabels {
        let mut values = [false; BUTTON_COUNT];
        values[0] = x > 0.0;
        values[3] = x < 0.0;
        ButtonLabels::new(values)
    }

    #[test]
    fn test_fit_memorizes_separable_data() {
        let xs: Vec<f32> = vec![-2.0, -1.5, -1.0, -0.5, 0.5, 1.0, 1.5, 2.0];
        let features: Vec<_> = xs.iter().map(|&x| toy_sample(x)).collect();
        let labels: Vec<_> = xs.iter().map(|&x| toy_labels(x)).collect();

        let mut rng = Pcg64Mcg::new(42);
        let config = TrainConfig {
            learning_rate: 0.5,
            epochs: 200,
            l2: 0.0,
        };
        let model = MultiLabelClassifier::fit(&config, &features, &labels, &mut rng);

        for (sample, expected) in features.iter().zip(&labels) {
            assert_eq!(model.predict(sample), *expected);
        }
    }

    #[test]
    fn test_predict_decodes_in_scorer_order() {
        let xs = vec![-1.0, 1.0];
        let features: Vec<_> = xs.iter().map(|&x| toy_sample(x)).collect();
        let labels: Vec<_> = xs.iter().map(|&x| toy_labels(x)).collect();

        let mut rng = Pcg64Mcg::new(7);
        let model =
            MultiLabelClassifier::fit(&TrainConfig::default(), &features, &labels, &mut rng);
        assert_eq!(model.scorer_count(), BUTTON_COUNT);

        let prediction = model.predict(&toy_sample(3.0));
        assert!(prediction.values()[0]);
        assert!(!prediction.values()[3]);
    }
}
