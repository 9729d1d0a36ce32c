//! # Pad Module
//!
//! Native gamepad access behind a small trait.
//!
//! This module handles:
//! - The XInput-shaped [`GamepadState`] snapshot every backend reports
//! - The [`Gamepad`] trait used by the poller and the vibration driver
//! - Picking the platform backend at compile time ([`open`])
//!
//! Backends:
//! - Windows: XInput through `rusty-xinput`
//! - Linux: evdev key/axis state plus an `FF_RUMBLE` effect
//! - Anything else: reports no controller

use std::sync::Arc;

use crate::error::Result;

#[cfg(target_os = "linux")]
pub mod evdev;
#[cfg(windows)]
pub mod xinput;

/// D-pad up
pub const BUTTON_DPAD_UP: u16 = 0x0001;
/// D-pad down
pub const BUTTON_DPAD_DOWN: u16 = 0x0002;
/// D-pad left
pub const BUTTON_DPAD_LEFT: u16 = 0x0004;
/// D-pad right
pub const BUTTON_DPAD_RIGHT: u16 = 0x0008;
/// Start (menu) button
pub const BUTTON_START: u16 = 0x0010;
/// Back (view) button
pub const BUTTON_BACK: u16 = 0x0020;
/// Left stick click
pub const BUTTON_LEFT_THUMB: u16 = 0x0040;
/// Right stick click
pub const BUTTON_RIGHT_THUMB: u16 = 0x0080;
/// Left shoulder (LB)
pub const BUTTON_LEFT_SHOULDER: u16 = 0x0100;
/// Right shoulder (RB)
pub const BUTTON_RIGHT_SHOULDER: u16 = 0x0200;
/// A face button
pub const BUTTON_A: u16 = 0x1000;
/// B face button
pub const BUTTON_B: u16 = 0x2000;
/// X face button
pub const BUTTON_X: u16 = 0x4000;
/// Y face button
pub const BUTTON_Y: u16 = 0x8000;

/// Snapshot of one controller's inputs, laid out like `XINPUT_GAMEPAD`.
///
/// # Examples
///
/// ```
/// use pad_rumble::pad::{GamepadState, BUTTON_A, BUTTON_X};
///
/// let state = GamepadState { buttons: BUTTON_A, ..Default::default() };
/// assert!(state.is_pressed(BUTTON_A));
/// assert!(!state.is_pressed(BUTTON_X));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    /// Digital buttons as a `BUTTON_*` bitmask.
    pub buttons: u16,
    /// Left trigger, 0 = released, 255 = fully pressed.
    pub left_trigger: u8,
    /// Right trigger, 0 = released, 255 = fully pressed.
    pub right_trigger: u8,
    /// Left stick X axis.
    pub thumb_lx: i16,
    /// Left stick Y axis.
    pub thumb_ly: i16,
    /// Right stick X axis.
    pub thumb_rx: i16,
    /// Right stick Y axis.
    pub thumb_ry: i16,
}

impl GamepadState {
    /// Returns true when any bit of `mask` is set in the button field.
    #[must_use]
    pub fn is_pressed(&self, mask: u16) -> bool {
        self.buttons & mask != 0
    }
}

/// Native controller access for a fixed slot.
///
/// Both calls are synchronous and cheap enough to make from a 10Hz loop.
#[cfg_attr(test, mockall::automock)]
pub trait Gamepad: Send + Sync {
    /// Query the current input state. `None` means no controller at `slot`.
    fn state(&self, slot: u32) -> Option<GamepadState>;

    /// Set both motor speeds on the full 16-bit scale.
    fn set_vibration(&self, slot: u32, left: u16, right: u16) -> Result<()>;
}

/// Open the gamepad backend for the current platform.
///
/// A missing controller is not an error here; backends report it through
/// [`Gamepad::state`] so the user can plug one in later.
///
/// # Errors
///
/// Returns `Backend` when the platform input library cannot be loaded.
pub fn open() -> Result<Arc<dyn Gamepad>> {
    #[cfg(windows)]
    {
        Ok(Arc::new(xinput::XInputPad::load()?))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Arc::new(evdev::EvdevPad::new()))
    }

    #[cfg(not(any(windows, target_os = "linux")))]
    {
        tracing::warn!("No gamepad backend for this platform, controller will never be detected");
        Ok(Arc::new(UnsupportedPad))
    }
}

/// Backend for platforms without controller support.
#[cfg(not(any(windows, target_os = "linux")))]
struct UnsupportedPad;

#[cfg(not(any(windows, target_os = "linux")))]
impl Gamepad for UnsupportedPad {
    fn state(&self, _slot: u32) -> Option<GamepadState> {
        None
    }

    fn set_vibration(&self, _slot: u32, _left: u16, _right: u16) -> Result<()> {
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xinput_button_masks() {
        assert_eq!(BUTTON_A, 0x1000);
        assert_eq!(BUTTON_X, 0x4000);
        assert_eq!(BUTTON_LEFT_SHOULDER, 0x0100);
        assert_eq!(BUTTON_RIGHT_SHOULDER, 0x0200);
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = GamepadState::default();
        assert_eq!(state.buttons, 0);
        assert_eq!(state.left_trigger, 0);
        assert_eq!(state.right_trigger, 0);
    }

    #[test]
    fn test_is_pressed_with_combined_buttons() {
        let state = GamepadState {
            buttons: BUTTON_A | BUTTON_RIGHT_SHOULDER,
            ..Default::default()
        };
        assert!(state.is_pressed(BUTTON_A));
        assert!(state.is_pressed(BUTTON_RIGHT_SHOULDER));
        assert!(!state.is_pressed(BUTTON_LEFT_SHOULDER));
        assert!(!state.is_pressed(BUTTON_X));
    }

    #[test]
    fn test_mock_gamepad_reports_absent_controller() {
        let mut pad = MockGamepad::new();
        pad.expect_state().returning(|_| None);
        assert_eq!(pad.state(0), None);
    }
}
