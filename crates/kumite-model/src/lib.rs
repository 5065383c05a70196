//! Scaler, classifier, and artifact persistence for the kumite bot.
//!
//! This crate owns the trainable half of the system:
//!
//! - [`StandardScaler`] - per-feature normalization fit once on training data
//!   and applied unchanged at inference
//! - [`MultiLabelClassifier`] - 12 independent logistic scorers mapping a
//!   scaled feature vector to button predictions
//! - [`ModelArtifact`] - the serialized scaler/classifier pair, stamped with
//!   the feature and button orderings it was trained against
//!
//! The artifact persists both orderings and [`ModelArtifact::load`] rejects
//! files whose orderings differ from the compiled-in schema, so positional
//! decoding of classifier outputs is validated rather than assumed.

pub use self::{
    artifact::{ArtifactError, ModelArtifact, SchemaError},
    classifier::{LogisticScorer, MultiLabelClassifier, TrainConfig},
    scaler::{ScalerError, StandardScaler},
};

pub mod artifact;
pub mod classifier;
pub mod scaler;
