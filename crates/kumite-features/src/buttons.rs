use kumite_state::Buttons;
use serde::{Deserialize, Serialize};

/// Number of button labels predicted by the classifier.
pub const BUTTON_COUNT: usize = 12;

/// Canonical button order for classifier outputs and training labels.
///
/// The classifier's 12 outputs are decoded positionally in this order, so it
/// is persisted alongside the model artifact and validated at load time.
/// Names match the column headers of the historical match log.
pub const BUTTON_NAMES: [&str; BUTTON_COUNT] = [
    "up", "down", "left", "right", "Y", "B", "A", "R", "L", "X", "select", "start",
];

/// A label vector of 12 independent boolean button targets, in
/// [`BUTTON_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonLabels {
    values: [bool; BUTTON_COUNT],
}

impl ButtonLabels {
    #[must_use]
    pub fn new(values: [bool; BUTTON_COUNT]) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[bool; BUTTON_COUNT] {
        &self.values
    }

    /// Encodes a button record into label order.
    #[must_use]
    pub fn from_buttons(buttons: &Buttons) -> Self {
        Self::new([
            buttons.up,
            buttons.down,
            buttons.left,
            buttons.right,
            buttons.y,
            buttons.b,
            buttons.a,
            buttons.r,
            buttons.l,
            buttons.x,
            buttons.select,
            buttons.start,
        ])
    }

    /// Decodes label order back into a button record.
    ///
    /// No safety override is applied here; forcing `select`/`start` off is the
    /// inference engine's responsibility.
    #[must_use]
    pub fn to_buttons(self) -> Buttons {
        let [up, down, left, right, y, b, a, r, l, x, select, start] = self.values;
        Buttons {
            up,
            down,
            left,
            right,
            y,
            b,
            a,
            r,
            l,
            x,
            select,
            start,
        }
    }
}
