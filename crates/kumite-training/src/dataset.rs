//! Symmetric dataset construction and the train/validation split.
//!
//! Every log row becomes two training samples, one per player role, so the
//! classifier learns a player-agnostic policy. Both samples are produced by
//! the shared extractor in `kumite-features`; this module never maps columns
//! by hand.

use anyhow::bail;
use kumite_features::{ButtonLabels, FEATURE_COUNT, FeatureVector};
use kumite_model::StandardScaler;
use kumite_state::PlayerId;
use rand::seq::SliceRandom as _;
use rand_pcg::Pcg64Mcg;

use crate::log::MatchLogRow;

/// Fraction of samples held out for validation.
pub const VALIDATION_FRACTION: f64 = 0.2;

/// Fixed seed for the shuffle that precedes the split, so repeated runs on
/// the same log produce the same partitions.
pub const SPLIT_SEED: u128 = 42;

/// One feature vector plus its 12 button targets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub features: FeatureVector,
    pub labels: ButtonLabels,
}

impl TrainingSample {
    /// Mirrors one log row into its two player-perspective samples.
    ///
    /// Both samples carry the same label vector: the log records the buttons
    /// pressed on that frame, and the mirroring teaches the classifier to
    /// reproduce them from either seat.
    #[must_use]
    pub fn from_row(row: &MatchLogRow) -> [TrainingSample; 2] {
        let labels = row.labels();
        [PlayerId::One, PlayerId::Two].map(|player| TrainingSample {
            features: row.features(player),
            labels,
        })
    }
}

/// The scaled, partitioned training set plus the scaler that produced it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub train_features: Vec<[f32; FEATURE_COUNT]>,
    pub val_features: Vec<[f32; FEATURE_COUNT]>,
    pub train_labels: Vec<ButtonLabels>,
    pub val_labels: Vec<ButtonLabels>,
    /// Fit on the train partition only; this exact scaler is persisted in the
    /// artifact and reused at inference.
    pub scaler: StandardScaler,
}

/// Builds the scaled train/validation partitions from log rows.
///
/// Rows are mirrored into two samples each, shuffled with [`SPLIT_SEED`],
/// split by [`VALIDATION_FRACTION`], and scaled with a
/// [`StandardScaler`] fit on the train partition only.
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn build_dataset(rows: &[MatchLogRow]) -> anyhow::Result<Dataset> {
    if rows.is_empty() {
        bail!("cannot build a dataset from an empty match log");
    }

    let mut samples: Vec<TrainingSample> =
        rows.iter().flat_map(TrainingSample::from_row).collect();

    let mut rng = Pcg64Mcg::new(SPLIT_SEED);
    samples.shuffle(&mut rng);

    let val_len = (samples.len() as f64 * VALIDATION_FRACTION).round() as usize;
    let train_len = samples.len() - val_len;
    if train_len == 0 {
        bail!("match log too small: no samples left for the train partition");
    }
    let (train, val) = samples.split_at(train_len);

    let train_raw: Vec<FeatureVector> = train.iter().map(|s| s.features).collect();
    let val_raw: Vec<FeatureVector> = val.iter().map(|s| s.features).collect();
    let scaler = StandardScaler::fit(&train_raw)?;

    Ok(Dataset {
        train_features: scaler.transform_all(&train_raw),
        val_features: scaler.transform_all(&val_raw),
        train_labels: train.iter().map(|s| s.labels).collect(),
        val_labels: val.iter().map(|s| s.labels).collect(),
        scaler,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_rows(count: usize) -> Vec<MatchLogRow> {
        let header = crate::log::tests::HEADER;
        let mut data = String::from(header);
        for i in 0..count {
            let x1 = 100 + (i as i32 % 40);
            let x2 = 200 - (i as i32 % 25);
            let left = u8::from(i % 3 == 0);
            let b = u8::from(i % 2 == 0);
            data.push_str(&format!(
                "\n{x1},{x2},0,0,80,80,0,0,0,0,0,0,0,0,{},{},0,0,{left},0,0,{b},0,0,0,0,0,0",
                x2 - x1,
                60 + i % 30,
            ));
        }
        csv::Reader::from_reader(data.as_bytes())
            .deserialize()
            .collect::<Result<Vec<MatchLogRow>, _>>()
            .unwrap()
    }

    #[test]
    fn test_mirroring_doubles_rows_and_flips_diff() {
        let rows = synthetic_rows(1);
        let [p1, p2] = TrainingSample::from_row(&rows[0]);

        assert_eq!(p1.labels, p2.labels);
        assert_eq!(p1.features.get("diff"), Some(100.0));
        assert_eq!(p2.features.get("diff"), Some(-100.0));
        assert_eq!(p1.features.get("player_x"), p2.features.get("opponent_x"));
    }

    #[test]
    fn test_split_proportions() {
        let dataset = build_dataset(&synthetic_rows(50)).unwrap();
        // 50 rows -> 100 samples -> 80/20
        assert_eq!(dataset.train_features.len(), 80);
        assert_eq!(dataset.val_features.len(), 20);
        assert_eq!(dataset.train_labels.len(), 80);
        assert_eq!(dataset.val_labels.len(), 20);
    }

    #[test]
    fn test_split_is_deterministic() {
        let rows = synthetic_rows(25);
        let a = build_dataset(&rows).unwrap();
        let b = build_dataset(&rows).unwrap();
        assert_eq!(a.train_features, b.train_features);
        assert_eq!(a.val_labels, b.val_labels);
        assert_eq!(a.scaler, b.scaler);
    }

    #[test]
    fn test_scaler_is_fit_on_train_partition_only() {
        let rows = synthetic_rows(50);
        let dataset = build_dataset(&rows).unwrap();

        // refit on the train partition by hand and compare
        let mut samples: Vec<TrainingSample> =
            rows.iter().flat_map(TrainingSample::from_row).collect();
        let mut rng = Pcg64Mcg::new(SPLIT_SEED);
        samples.shuffle(&mut rng);
        let train_raw: Vec<FeatureVector> =
            samples[..80].iter().map(|s| s.features).collect();
        let expected = StandardScaler::fit(&train_raw).unwrap();
        assert_eq!(dataset.scaler, expected);
    }

    #[test]
    fn test_empty_log_is_rejected() {
        assert!(build_dataset(&[]).is_err());
    }
}
