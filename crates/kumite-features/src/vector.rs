use serde::{Deserialize, Serialize};

/// Number of fields in the canonical feature schema.
pub const FEATURE_COUNT: usize = 14;

/// Canonical field names, in the exact order values appear in a
/// [`FeatureVector`]. This order is part of the persisted model contract and
/// must never change for artifacts that aim to stay compatible.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "player_x",
    "opponent_x",
    "player_y",
    "opponent_y",
    "player_health",
    "opponent_health",
    "player_is_jumping",
    "player_is_crouching",
    "player_in_move",
    "opponent_in_move",
    "player_move_id",
    "opponent_move_id",
    "diff",
    "game_time",
];

/// An ordered, fixed-size encoding of one player's situation relative to an
/// opponent at one instant.
///
/// Constructed fresh per training row or per inference call and never mutated
/// afterwards. Boolean fields encode as `0.0` / `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Wraps raw values already in canonical order.
    #[must_use]
    pub fn new(values: [f32; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Returns the values in canonical order.
    #[must_use]
    pub fn values(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Looks up a value by its canonical field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.values[i])
    }
}
