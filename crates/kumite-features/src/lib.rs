//! The feature schema shared by offline training and online inference.
//!
//! Both the dataset builder and the inference engine must derive an identical,
//! ordered feature vector from differently-shaped raw data (a historical log
//! row vs. a live [`GameSnapshot`]). Any drift in column order, sign
//! convention, or scaling basis silently corrupts predictions without raising
//! an error, so the mapping exists exactly once: [`extract`].
//!
//! # Schema
//!
//! A [`FeatureVector`] holds 14 scalars in the canonical order given by
//! [`FEATURE_NAMES`]. All values are relative to the *acting* player:
//! `player_*` fields describe whichever player the bot controls for this
//! call, `opponent_*` the other one, and `diff` is always
//! `opponent_x - player_x` (so its sign flips when the acting player flips).
//!
//! Button labels use the fixed order given by [`BUTTON_NAMES`]; the
//! classifier's 12 outputs are decoded positionally in that order regardless
//! of which player the input vector was extracted for.

pub use self::{
    buttons::{BUTTON_COUNT, BUTTON_NAMES, ButtonLabels},
    vector::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector},
};

pub mod buttons;
pub mod vector;

use kumite_state::{GameSnapshot, PlayerId};

/// Extracts the canonical feature vector for one player from a live snapshot.
///
/// This is the single shared implementation of the feature schema. The
/// offline trainer builds its samples by reconstructing a [`GameSnapshot`]
/// per log row and calling this function for each player role; the inference
/// engine calls it per frame. Neither side may re-derive the column mapping.
///
/// Extraction is player-symmetric: extracting for player 1 on a snapshot is
/// identical to extracting for player 2 on the swapped snapshot.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn extract(snapshot: &GameSnapshot, player: PlayerId) -> FeatureVector {
    let me = snapshot.player(player);
    let opponent = snapshot.player(player.opponent());
    let diff = opponent.x_coord - me.x_coord;

    FeatureVector::new([
        me.x_coord as f32,
        opponent.x_coord as f32,
        me.y_coord as f32,
        opponent.y_coord as f32,
        me.health as f32,
        opponent.health as f32,
        f32::from(u8::from(me.is_jumping)),
        f32::from(u8::from(me.is_crouching)),
        f32::from(u8::from(me.is_in_move)),
        f32::from(u8::from(opponent.is_in_move)),
        me.move_id as f32,
        opponent.move_id as f32,
        diff as f32,
        snapshot.timer as f32,
    ])
}
