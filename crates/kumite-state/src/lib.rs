//! Shared state types for the kumite bot.
//!
//! This crate defines the plain data types exchanged between the game-control
//! layer, the offline trainer, and the online inference engine:
//!
//! - [`GameSnapshot`] / [`PlayerSnapshot`] - one frame of match state
//! - [`PlayerId`] - which physical player the bot is acting as
//! - [`Buttons`] / [`Command`] - the per-frame control output
//!
//! These types carry no behaviour beyond accessors; feature extraction and
//! prediction live in the `kumite-features` and `kumite-model` crates.

pub use self::{command::*, snapshot::*};

pub mod command;
pub mod snapshot;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("player identifier must be \"1\" or \"2\"")]
pub struct ParsePlayerIdError;
