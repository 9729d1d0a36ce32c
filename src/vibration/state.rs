//! Shared state read by the window and the output loop and written by
//! the window and the input poller.

use super::motor::{Motor, MotorState};

/// Snapshot of everything the window shows.
///
/// # Examples
///
/// ```
/// use pad_rumble::vibration::{Motor, RumbleState};
///
/// let mut state = RumbleState::default();
/// state.motor_mut(Motor::Left).set_intensity(0.5);
/// assert_eq!(state.motor_speeds(), (32768, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RumbleState {
    pub left: MotorState,
    pub right: MotorState,
    /// Whether the output loop is running.
    pub active: bool,
    /// Whether the last poll found a controller.
    pub connected: bool,
}

impl RumbleState {
    #[must_use]
    pub fn motor(&self, motor: Motor) -> &MotorState {
        match motor {
            Motor::Left => &self.left,
            Motor::Right => &self.right,
        }
    }

    pub fn motor_mut(&mut self, motor: Motor) -> &mut MotorState {
        match motor {
            Motor::Left => &mut self.left,
            Motor::Right => &mut self.right,
        }
    }

    /// Native `(left, right)` speeds with disabled motors forced to zero.
    #[must_use]
    pub fn motor_speeds(&self) -> (u16, u16) {
        (self.left.motor_speed(), self.right.motor_speed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = RumbleState::default();
        assert!(!state.active);
        assert!(!state.connected);
        assert!(state.left.enabled && state.right.enabled);
        assert_eq!(state.motor_speeds(), (0, 0));
    }

    #[test]
    fn test_motor_mut_targets_one_side() {
        let mut state = RumbleState::default();
        state.motor_mut(Motor::Right).set_intensity(1.0);
        assert_eq!(state.motor(Motor::Left).intensity, 0.0);
        assert_eq!(state.motor(Motor::Right).intensity, 1.0);
        assert_eq!(state.motor_speeds(), (0, 65535));
    }

    #[test]
    fn test_disabled_side_is_zero_in_speeds() {
        let mut state = RumbleState::default();
        state.left.set_intensity(0.5);
        state.right.set_intensity(0.5);
        state.right.enabled = false;
        assert_eq!(state.motor_speeds(), (32768, 0));
        assert_eq!(state.right.intensity, 0.5);
    }
}
