//! Per-feature standardization.
//!
//! The scaler removes the mean and scales to unit variance, column by column.
//! It is fit exactly once, on the training partition, and the fitted values
//! travel inside the model artifact so inference applies the same basis.

use kumite_features::{FEATURE_COUNT, FeatureVector};
use serde::{Deserialize, Serialize};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ScalerError {
    #[display("cannot fit a scaler on an empty sample set")]
    EmptySampleSet,
}

/// Standardizes features to zero mean and unit variance.
///
/// Columns with (near-)zero variance are centered but not scaled, so constant
/// fields pass through without blowing up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: [f32; FEATURE_COUNT],
    scale: [f32; FEATURE_COUNT],
}

const MIN_SCALE: f32 = 1e-6;

impl StandardScaler {
    /// Fits mean and scale from the given samples.
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(samples: &[FeatureVector]) -> Result<Self, ScalerError> {
        if samples.is_empty() {
            return Err(ScalerError::EmptySampleSet);
        }
        let n = samples.len() as f32;

        let mut mean = [0.0; FEATURE_COUNT];
        for sample in samples {
            for (m, v) in mean.iter_mut().zip(sample.values()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut scale = [0.0; FEATURE_COUNT];
        for sample in samples {
            for ((s, v), m) in scale.iter_mut().zip(sample.values()).zip(&mean) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut scale {
            *s = (*s / n).sqrt();
            if *s < MIN_SCALE {
                *s = 1.0;
            }
        }

        Ok(Self { mean, scale })
    }

    /// Applies the fitted transform to one vector.
    #[must_use]
    pub fn transform(&self, features: &FeatureVector) -> [f32; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, v) in features.values().iter().enumerate() {
            out[i] = (v - self.mean[i]) / self.scale[i];
        }
        out
    }

    /// Applies the fitted transform to a batch.
    #[must_use]
    pub fn transform_all(&self, samples: &[FeatureVector]) -> Vec<[f32; FEATURE_COUNT]> {
        samples.iter().map(|s| self.transform(s)).collect()
    }

    #[must_use]
    pub fn mean(&self) -> &[f32; FEATURE_COUNT] {
        &self.mean
    }

    #[must_use]
    pub fn scale(&self) -> &[f32; FEATURE_COUNT] {
        &self.scale
    }
}
