//! Per-button validation metrics.
//!
//! Buttons are scored independently: a model that gets 11 of 12 buttons right
//! shows up as 11 good reports and one bad one, never as a single joint
//! failure. Each button gets an accuracy, a 2x2 confusion matrix, and
//! precision/recall/F1 for both the released and pressed classes, in the
//! shape operators know from offline tooling.

use std::fmt;

use kumite_features::{BUTTON_NAMES, ButtonLabels, FEATURE_COUNT};
use kumite_model::MultiLabelClassifier;

/// 2x2 confusion matrix for one button. "Positive" means pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub true_negatives: u32,
    pub false_positives: u32,
    pub false_negatives: u32,
    pub true_positives: u32,
}

impl ConfusionMatrix {
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (bool, bool)>,
    {
        let mut matrix = Self::default();
        for (actual, predicted) in outcomes {
            match (actual, predicted) {
                (false, false) => matrix.true_negatives += 1,
                (false, true) => matrix.false_positives += 1,
                (true, false) => matrix.false_negatives += 1,
                (true, true) => matrix.true_positives += 1,
            }
        }
        matrix
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_negatives + self.true_positives) as f32 / total as f32
    }
}

/// Precision/recall/F1/support for one class of one button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub support: u32,
}

impl ClassMetrics {
    fn from_counts(true_hits: u32, predicted: u32, actual: u32) -> Self {
        let precision = ratio(true_hits, predicted);
        let recall = ratio(true_hits, actual);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
            support: actual,
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(numerator: u32, denominator: u32) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 / denominator as f32
    }
}

/// Full classification breakdown for one button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonReport {
    pub button: &'static str,
    pub accuracy: f32,
    pub released: ClassMetrics,
    pub pressed: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl ButtonReport {
    #[must_use]
    pub fn from_confusion(button: &'static str, confusion: ConfusionMatrix) -> Self {
        let released = ClassMetrics::from_counts(
            confusion.true_negatives,
            confusion.true_negatives + confusion.false_negatives,
            confusion.true_negatives + confusion.false_positives,
        );
        let pressed = ClassMetrics::from_counts(
            confusion.true_positives,
            confusion.true_positives + confusion.false_positives,
            confusion.true_positives + confusion.false_negatives,
        );
        Self {
            button,
            accuracy: confusion.accuracy(),
            released,
            pressed,
            confusion,
        }
    }
}

impl fmt::Display for ButtonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation accuracy for {}: {:.2}", self.button, self.accuracy)?;
        writeln!(f, "              precision  recall      f1  support")?;
        for (label, m) in [("released", &self.released), ("pressed", &self.pressed)] {
            writeln!(
                f,
                "    {label:<9} {:>9.2} {:>7.2} {:>7.2} {:>8}",
                m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f, "Confusion matrix for {}:", self.button)?;
        writeln!(
            f,
            "    [[{:>6} {:>6}]",
            self.confusion.true_negatives, self.confusion.false_positives
        )?;
        write!(
            f,
            "     [{:>6} {:>6}]]",
            self.confusion.false_negatives, self.confusion.true_positives
        )
    }
}

/// Validation breakdown for all 12 buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub buttons: Vec<ButtonReport>,
}

impl ValidationReport {
    /// Scores the classifier on a validation partition, one button at a time.
    ///
    /// # Panics
    ///
    /// Panics if `features` and `labels` have different lengths.
    #[must_use]
    pub fn evaluate(
        classifier: &MultiLabelClassifier,
        features: &[[f32; FEATURE_COUNT]],
        labels: &[ButtonLabels],
    ) -> Self {
        assert_eq!(features.len(), labels.len());
        let predictions: Vec<ButtonLabels> =
            features.iter().map(|f| classifier.predict(f)).collect();

        let buttons = BUTTON_NAMES
            .iter()
            .enumerate()
            .map(|(i, &button)| {
                let confusion = ConfusionMatrix::from_outcomes(
                    labels
                        .iter()
                        .zip(&predictions)
                        .map(|(actual, predicted)| (actual.values()[i], predicted.values()[i])),
                );
                ButtonReport::from_confusion(button, confusion)
            })
            .collect();
        Self { buttons }
    }

    /// Mean accuracy across the 12 buttons, recorded into the artifact.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_accuracy(&self) -> f32 {
        if self.buttons.is_empty() {
            return 0.0;
        }
        self.buttons.iter().map(|b| b.accuracy).sum::<f32>() / self.buttons.len() as f32
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.buttons {
            writeln!(f, "{report}")?;
            writeln!(f)?;
        }
        write!(f, "Mean accuracy over {} buttons: {:.2}", self.buttons.len(), self.mean_accuracy())
    }
}

#[cfg(test)]
mod tests {
    use kumite_features::BUTTON_COUNT;

    use super::*;

    #[test]
    fn test_confusion_matrix_counts() {
        let matrix = ConfusionMatrix::from_outcomes([
            (false, false),
            (false, false),
            (false, true),
            (true, false),
            (true, true),
            (true, true),
            (true, true),
        ]);
        assert_eq!(matrix.true_negatives, 2);
        assert_eq!(matrix.false_positives, 1);
        assert_eq!(matrix.false_negatives, 1);
        assert_eq!(matrix.true_positives, 3);
        assert_eq!(matrix.total(), 7);
        assert!((matrix.accuracy() - 5.0 / 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_class_metrics_from_confusion() {
        let confusion = ConfusionMatrix {
            true_negatives: 6,
            false_positives: 2,
            false_negatives: 1,
            true_positives: 3,
        };
        let report = ButtonReport::from_confusion("left", confusion);

        // pressed: precision 3/5, recall 3/4
        assert!((report.pressed.precision - 0.6).abs() < 1e-6);
        assert!((report.pressed.recall - 0.75).abs() < 1e-6);
        assert_eq!(report.pressed.support, 4);
        // released: precision 6/7, recall 6/8
        assert!((report.released.precision - 6.0 / 7.0).abs() < 1e-6);
        assert!((report.released.recall - 0.75).abs() < 1e-6);
        assert_eq!(report.released.support, 8);
    }

    #[test]
    fn test_empty_class_yields_zero_metrics_not_nan() {
        // never-pressed button, never predicted
        let confusion = ConfusionMatrix {
            true_negatives: 10,
            ..ConfusionMatrix::default()
        };
        let report = ButtonReport::from_confusion("select", confusion);
        assert_eq!(report.pressed.precision, 0.0);
        assert_eq!(report.pressed.recall, 0.0);
        assert_eq!(report.pressed.f1, 0.0);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_report_covers_all_buttons_in_order() {
        let buttons: Vec<ButtonReport> = BUTTON_NAMES
            .iter()
            .map(|&b| ButtonReport::from_confusion(b, ConfusionMatrix::default()))
            .collect();
        let report = ValidationReport { buttons };
        assert_eq!(report.buttons.len(), BUTTON_COUNT);

        let rendered = report.to_string();
        for button in BUTTON_NAMES {
            assert!(rendered.contains(&format!("Validation accuracy for {button}:")));
        }
    }
}
