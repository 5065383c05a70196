use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Requested control states for one player at one frame.
///
/// Field names follow the controller layout of the game process. A
/// default-constructed value is the neutral command (no button pressed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub y: bool,
    pub b: bool,
    pub a: bool,
    pub r: bool,
    pub l: bool,
    pub x: bool,
    pub select: bool,
    pub start: bool,
}

impl Buttons {
    /// The neutral command: every button released.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    /// True if no button is pressed.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Button states for both players, one slot per player.
///
/// One inference engine serves both players from a single container; each
/// call writes exactly one slot and leaves the other untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Command {
    pub player1_buttons: Buttons,
    pub player2_buttons: Buttons,
}

impl Command {
    /// Returns the button slot of the given player.
    #[must_use]
    pub fn buttons(&self, id: PlayerId) -> &Buttons {
        match id {
            PlayerId::One => &self.player1_buttons,
            PlayerId::Two => &self.player2_buttons,
        }
    }

    /// Overwrites the button slot of the given player.
    pub fn set_buttons(&mut self, id: PlayerId, buttons: Buttons) {
        match id {
            PlayerId::One => self.player1_buttons = buttons,
            PlayerId::Two => self.player2_buttons = buttons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_buttons() {
        let neutral = Buttons::neutral();
        assert!(neutral.is_neutral());
        assert!(!neutral.up && !neutral.start && !neutral.select);

        let pressed = Buttons {
            a: true,
            ..Buttons::neutral()
        };
        assert!(!pressed.is_neutral());
    }

    #[test]
    fn test_command_slots_are_independent() {
        let mut command = Command::default();
        let pressed = Buttons {
            left: true,
            b: true,
            ..Buttons::neutral()
        };

        command.set_buttons(PlayerId::One, pressed);
        assert_eq!(*command.buttons(PlayerId::One), pressed);
        assert!(command.buttons(PlayerId::Two).is_neutral());

        command.set_buttons(PlayerId::Two, pressed);
        command.set_buttons(PlayerId::One, Buttons::neutral());
        assert!(command.buttons(PlayerId::One).is_neutral());
        assert_eq!(*command.buttons(PlayerId::Two), pressed);
    }
}
