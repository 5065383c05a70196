//! The online inference engine.
//!
//! [`Bot`] is invoked once per game frame by an external driver. Its contract
//! is best-effort, always-returns-a-command: no error in the inference path
//! ever reaches the caller, because keeping the match running matters more
//! than the correctness of any single frame's action. Degradation is encoded
//! in the returned [`Decision`] rather than hidden behind logging:
//!
//! - missing/invalid model artifact at startup → permanent degraded mode,
//!   every call returns the neutral command ([`DegradeReason::NoModel`])
//! - absent frame (`state == None`) → the last-held buttons are returned
//!   unchanged ([`DegradeReason::AbsentFrame`])
//! - a per-call prediction failure → a fresh neutral command for that player
//!   only ([`DegradeReason::PredictionFailed`]); the other player's slot is
//!   untouched
//!
//! Whatever the model says, `select` and `start` are forced off so the bot
//! can never pause or interrupt the match.
//!
//! The engine is single-threaded and call-and-return; the only persistent
//! state is the loaded artifact and the last-emitted command per player.

use std::path::Path;

use kumite_model::ModelArtifact;
use kumite_state::{Buttons, Command, GameSnapshot, PlayerId};

/// Why a call fell back instead of acting on a model prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DegradeReason {
    /// No frame was available; the last-held command is returned unchanged.
    #[display("no game state for this frame")]
    AbsentFrame,
    /// The model artifact failed to load at startup. Permanent for the
    /// process lifetime; not retried per frame.
    #[display("model artifact unavailable")]
    NoModel,
    /// Extraction, scaling, or prediction failed for this call only.
    #[display("prediction failed")]
    PredictionFailed,
}

/// Outcome of one [`Bot::decide`] call. Always carries usable buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The model ran and produced these buttons.
    Acted(Buttons),
    /// A fallback command, with the reason the model was bypassed.
    Degraded(Buttons, DegradeReason),
}

impl Decision {
    /// The buttons to dispatch, whichever path produced them.
    #[must_use]
    pub fn buttons(&self) -> &Buttons {
        match self {
            Decision::Acted(buttons) | Decision::Degraded(buttons, _) => buttons,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Decision::Degraded(..))
    }
}

/// Per-frame control policy for one match, serving both players from one
/// command container.
#[derive(Debug)]
pub struct Bot {
    model: Option<ModelArtifact>,
    command: Command,
}

impl Bot {
    /// Loads the model artifact once. A missing or invalid artifact is logged
    /// and puts the bot in permanent degraded mode instead of crashing.
    #[must_use]
    pub fn from_artifact_path<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let model = match ModelArtifact::load(path) {
            Ok(artifact) => {
                log::info!(
                    "loaded model \"{}\" (validation accuracy {:.2}) from {}",
                    artifact.name,
                    artifact.validation_accuracy,
                    path.display()
                );
                Some(artifact)
            }
            Err(err) => {
                log::warn!(
                    "failed to load model from {}: {err}; running in degraded mode",
                    path.display()
                );
                None
            }
        };
        Self {
            model,
            command: Command::default(),
        }
    }

    /// Wraps an already-loaded artifact.
    #[must_use]
    pub fn with_artifact(artifact: ModelArtifact) -> Self {
        Self {
            model: Some(artifact),
            command: Command::default(),
        }
    }

    /// A bot with no model: every decision is neutral. This is the same mode
    /// a failed artifact load ends up in.
    #[must_use]
    pub fn without_model() -> Self {
        Self {
            model: None,
            command: Command::default(),
        }
    }

    /// Decides the button states for one player at one frame.
    ///
    /// Never panics and never returns an error; see the crate docs for the
    /// fallback ladder.
    pub fn decide(&mut self, state: Option<&GameSnapshot>, player: PlayerId) -> Decision {
        let Some(state) = state else {
            log::warn!("no game state received; holding last command for player {player}");
            return Decision::Degraded(*self.command.buttons(player), DegradeReason::AbsentFrame);
        };

        let Some(model) = &self.model else {
            return Decision::Degraded(Buttons::neutral(), DegradeReason::NoModel);
        };

        match predict_buttons(model, state, player) {
            Ok(buttons) => {
                self.command.set_buttons(player, buttons);
                Decision::Acted(buttons)
            }
            Err(err) => {
                log::warn!("prediction failed for player {player}: {err}; substituting neutral");
                self.command.set_buttons(player, Buttons::neutral());
                Decision::Degraded(Buttons::neutral(), DegradeReason::PredictionFailed)
            }
        }
    }

    /// The last-emitted command for both players, read-only.
    #[must_use]
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Interface-compatibility stub for the game-control layer. Accepts its
    /// arguments and does nothing; all decision logic lives in
    /// [`decide`](Self::decide).
    pub fn apply_unused(&mut self, _buttons: &Buttons, _player: PlayerId) {}
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
enum PredictionError {
    #[display("scaled feature vector contains non-finite values")]
    NonFiniteFeatures,
}

/// The full extract → scale → predict → decode path, with the select/start
/// safety override applied last.
fn predict_buttons(
    model: &ModelArtifact,
    state: &GameSnapshot,
    player: PlayerId,
) -> Result<Buttons, PredictionError> {
    let features = kumite_features::extract(state, player);
    let scaled = model.scaler.transform(&features);
    if scaled.iter().any(|v| !v.is_finite()) {
        return Err(PredictionError::NonFiniteFeatures);
    }

    let labels = model.classifier.predict(&scaled);
    let mut buttons = labels.to_buttons();
    // always disabled to prevent pausing or resetting the match
    buttons.select = false;
    buttons.start = false;
    Ok(buttons)
}
