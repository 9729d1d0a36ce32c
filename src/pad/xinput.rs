//! # XInput Gamepad Backend
//!
//! Windows access to Xbox controllers through `rusty-xinput`, which loads
//! the newest available `xinput1_x.dll` at runtime.

use rusty_xinput::{XInputHandle, XInputUsageError};
use tracing::{debug, info};

use super::{Gamepad, GamepadState};
use crate::error::{Result, RumbleError};

/// XInput gamepad backend
pub struct XInputPad {
    handle: XInputHandle,
}

impl XInputPad {
    /// Load the XInput library.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if no XInput DLL could be loaded.
    pub fn load() -> Result<Self> {
        let handle = XInputHandle::load_default()
            .map_err(|e| RumbleError::Backend(format!("Failed to load XInput: {:?}", e)))?;
        info!("Using XInput gamepad backend");
        Ok(Self { handle })
    }
}

impl Gamepad for XInputPad {
    fn state(&self, slot: u32) -> Option<GamepadState> {
        match self.handle.get_state(slot) {
            Ok(state) => {
                let pad = &state.raw.Gamepad;
                Some(GamepadState {
                    buttons: pad.wButtons,
                    left_trigger: pad.bLeftTrigger,
                    right_trigger: pad.bRightTrigger,
                    thumb_lx: pad.sThumbLX,
                    thumb_ly: pad.sThumbLY,
                    thumb_rx: pad.sThumbRX,
                    thumb_ry: pad.sThumbRY,
                })
            }
            Err(XInputUsageError::DeviceNotConnected) => None,
            Err(e) => {
                debug!("XInputGetState failed for slot {}: {:?}", slot, e);
                None
            }
        }
    }

    fn set_vibration(&self, slot: u32, left: u16, right: u16) -> Result<()> {
        self.handle
            .set_state(slot, left, right)
            .map_err(|e| RumbleError::Controller(format!("XInputSetState failed: {:?}", e)))
    }
}
