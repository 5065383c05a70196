//! Offline training pipeline for the kumite bot.
//!
//! This crate turns a historical match log into a persisted scaler/classifier
//! pair:
//!
//! 1. **Ingest** ([`log`]): read the CSV match log into typed rows
//! 2. **Build dataset** ([`dataset`]): mirror every row into two
//!    player-perspective samples through the shared feature extractor, split
//!    80/20 with a fixed seed, fit the scaler on the train partition only
//! 3. **Search** ([`search`]): grid search over a bounded hyperparameter set
//!    with k-fold cross-validation on the train partition
//! 4. **Train and evaluate** ([`trainer`], [`report`]): fit the selected
//!    candidate, score each of the 12 buttons independently on the validation
//!    partition (accuracy, precision/recall/F1, confusion matrix)
//!
//! The trainer runs offline and is allowed to fail loudly; everything here
//! propagates errors instead of degrading.

pub use self::{
    dataset::{Dataset, SPLIT_SEED, TrainingSample, VALIDATION_FRACTION, build_dataset},
    log::{MatchLogRow, read_match_log},
    report::{ButtonReport, ClassMetrics, ConfusionMatrix, ValidationReport},
    search::{GridSearch, SearchOutcome},
    trainer::{TrainedModel, train},
};

pub mod dataset;
pub mod log;
pub mod report;
pub mod search;
pub mod trainer;
