//! # Controller Shortcuts
//!
//! The six monitored inputs and the action each one fires on press.
//!
//! | Input | Pressed when | Action |
//! |-------|--------------|--------|
//! | A | `BUTTON_A` bit set | Toggle vibration |
//! | X | `BUTTON_X` bit set | Both motors to the preset intensity |
//! | LT | left trigger > 0 | Left motor + step |
//! | RT | right trigger > 0 | Right motor + step |
//! | LB | `BUTTON_LEFT_SHOULDER` bit set | Left motor - step |
//! | RB | `BUTTON_RIGHT_SHOULDER` bit set | Right motor - step |

use super::latch::EdgeLatch;
use crate::pad::{
    GamepadState, BUTTON_A, BUTTON_LEFT_SHOULDER, BUTTON_RIGHT_SHOULDER, BUTTON_X,
};
use crate::vibration::Motor;

/// A monitored controller input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    A,
    X,
    LeftTrigger,
    RightTrigger,
    LeftShoulder,
    RightShoulder,
}

impl Input {
    /// All monitored inputs in evaluation order
    pub const ALL: [Input; 6] = [
        Input::A,
        Input::X,
        Input::LeftTrigger,
        Input::RightTrigger,
        Input::LeftShoulder,
        Input::RightShoulder,
    ];

    /// Whether this input is currently down in `state`.
    #[must_use]
    pub fn is_held(self, state: &GamepadState) -> bool {
        match self {
            Input::A => state.is_pressed(BUTTON_A),
            Input::X => state.is_pressed(BUTTON_X),
            Input::LeftTrigger => state.left_trigger > 0,
            Input::RightTrigger => state.right_trigger > 0,
            Input::LeftShoulder => state.is_pressed(BUTTON_LEFT_SHOULDER),
            Input::RightShoulder => state.is_pressed(BUTTON_RIGHT_SHOULDER),
        }
    }

    /// Action bound to this input. `step` is the nudge size.
    #[must_use]
    pub fn action(self, step: f32) -> Action {
        match self {
            Input::A => Action::ToggleVibration,
            Input::X => Action::Preset,
            Input::LeftTrigger => Action::Nudge(Motor::Left, step),
            Input::RightTrigger => Action::Nudge(Motor::Right, step),
            Input::LeftShoulder => Action::Nudge(Motor::Left, -step),
            Input::RightShoulder => Action::Nudge(Motor::Right, -step),
        }
    }
}

/// What a shortcut does to the vibration session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Start or stop the output loop.
    ToggleVibration,
    /// Set both motors to the preset intensity.
    Preset,
    /// Change one motor's intensity by a signed delta.
    Nudge(Motor, f32),
}

/// One edge latch per monitored input.
#[derive(Debug, Clone, Default)]
pub struct InputLatches {
    latches: [EdgeLatch; 6],
}

impl InputLatches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update every latch from `state` and return the inputs that were just
    /// pressed, in [`Input::ALL`] order.
    pub fn rising_edges(&mut self, state: &GamepadState) -> Vec<Input> {
        Input::ALL
            .iter()
            .zip(self.latches.iter_mut())
            .filter_map(|(&input, latch)| latch.update(input.is_held(state)).then_some(input))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(mask: u16) -> GamepadState {
        GamepadState {
            buttons: mask,
            ..Default::default()
        }
    }

    #[test]
    fn test_buttons_use_bitmask() {
        assert!(Input::A.is_held(&buttons(BUTTON_A)));
        assert!(Input::X.is_held(&buttons(BUTTON_X)));
        assert!(Input::LeftShoulder.is_held(&buttons(BUTTON_LEFT_SHOULDER)));
        assert!(Input::RightShoulder.is_held(&buttons(BUTTON_RIGHT_SHOULDER)));
        assert!(!Input::A.is_held(&buttons(BUTTON_X)));
    }

    #[test]
    fn test_triggers_use_any_magnitude() {
        let state = GamepadState {
            left_trigger: 1,
            ..Default::default()
        };
        assert!(Input::LeftTrigger.is_held(&state));
        assert!(!Input::RightTrigger.is_held(&state));

        let state = GamepadState {
            right_trigger: 255,
            ..Default::default()
        };
        assert!(Input::RightTrigger.is_held(&state));
    }

    #[test]
    fn test_action_bindings() {
        assert_eq!(Input::A.action(0.1), Action::ToggleVibration);
        assert_eq!(Input::X.action(0.1), Action::Preset);
        assert_eq!(Input::LeftTrigger.action(0.1), Action::Nudge(Motor::Left, 0.1));
        assert_eq!(Input::RightTrigger.action(0.1), Action::Nudge(Motor::Right, 0.1));
        assert_eq!(Input::LeftShoulder.action(0.1), Action::Nudge(Motor::Left, -0.1));
        assert_eq!(Input::RightShoulder.action(0.1), Action::Nudge(Motor::Right, -0.1));
    }

    #[test]
    fn test_rising_edges_once_per_press() {
        let mut latches = InputLatches::new();
        let held = buttons(BUTTON_A);

        assert_eq!(latches.rising_edges(&held), vec![Input::A]);
        assert!(latches.rising_edges(&held).is_empty());
        assert!(latches.rising_edges(&GamepadState::default()).is_empty());
        assert_eq!(latches.rising_edges(&held), vec![Input::A]);
    }

    #[test]
    fn test_simultaneous_presses_in_fixed_order() {
        let mut latches = InputLatches::new();
        let state = GamepadState {
            buttons: BUTTON_RIGHT_SHOULDER | BUTTON_A,
            left_trigger: 40,
            ..Default::default()
        };

        assert_eq!(
            latches.rising_edges(&state),
            vec![Input::A, Input::LeftTrigger, Input::RightShoulder]
        );
    }

    #[test]
    fn test_inputs_latch_independently() {
        let mut latches = InputLatches::new();
        latches.rising_edges(&buttons(BUTTON_A));

        // A still held, X newly pressed
        let both = buttons(BUTTON_A | BUTTON_X);
        assert_eq!(latches.rising_edges(&both), vec![Input::X]);
    }
}
