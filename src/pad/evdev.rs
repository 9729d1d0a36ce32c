//! # Evdev Gamepad Backend
//!
//! Linux access to Xbox-compatible controllers through `/dev/input/event*`.
//!
//! ## Controller Detection
//!
//! A device counts as a rumble-capable gamepad when it advertises:
//! - `FF_RUMBLE` force feedback
//! - `BTN_SOUTH` (A) and `BTN_TL` (LB) keys
//!
//! Matching devices are ordered by path; slot N is the N-th match.
//!
//! ## Input Mapping (xpad layout)
//!
//! | Input | evdev | XInput |
//! |-------|-------|--------|
//! | A / B | BTN_SOUTH / BTN_EAST | `BUTTON_A` / `BUTTON_B` |
//! | X / Y | BTN_NORTH / BTN_WEST | `BUTTON_X` / `BUTTON_Y` |
//! | LB / RB | BTN_TL / BTN_TR | shoulders |
//! | Triggers | ABS_Z / ABS_RZ | 0-255 |
//! | Left stick | ABS_X / ABS_Y | i16 |
//! | Right stick | ABS_RX / ABS_RY | i16 |
//! | D-Pad | ABS_HAT0X / ABS_HAT0Y | d-pad bits |
//!
//! xpad reports X as `BTN_X`, which shares its code with `BTN_NORTH`.
//!
//! ## Vibration
//!
//! One `FF_RUMBLE` effect is uploaded per device. The left motor maps to the
//! strong magnitude and the right motor to the weak one.

use evdev::{
    AbsoluteAxisType, AttributeSet, Device, FFEffect, FFEffectData, FFEffectKind,
    FFEffectType, FFReplay, FFTrigger, Key,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, trace};

use super::{
    Gamepad, GamepadState, BUTTON_A, BUTTON_B, BUTTON_BACK, BUTTON_DPAD_DOWN, BUTTON_DPAD_LEFT,
    BUTTON_DPAD_RIGHT, BUTTON_DPAD_UP, BUTTON_LEFT_SHOULDER, BUTTON_LEFT_THUMB,
    BUTTON_RIGHT_SHOULDER, BUTTON_RIGHT_THUMB, BUTTON_START, BUTTON_X, BUTTON_Y,
};
use crate::error::{Result, RumbleError};

/// Directory scanned for input devices
const INPUT_DIR: &str = "/dev/input";

/// How long one rumble effect plays after each write.
///
/// Longer than the 100ms drive tick so the motors never gap between writes.
const RUMBLE_REPLAY_MS: u16 = 500;

/// Key to XInput bit mapping for digital buttons
const KEY_MAP: [(Key, u16); 10] = [
    (Key::BTN_SOUTH, BUTTON_A),
    (Key::BTN_EAST, BUTTON_B),
    (Key::BTN_NORTH, BUTTON_X),
    (Key::BTN_WEST, BUTTON_Y),
    (Key::BTN_TL, BUTTON_LEFT_SHOULDER),
    (Key::BTN_TR, BUTTON_RIGHT_SHOULDER),
    (Key::BTN_START, BUTTON_START),
    (Key::BTN_SELECT, BUTTON_BACK),
    (Key::BTN_THUMBL, BUTTON_LEFT_THUMB),
    (Key::BTN_THUMBR, BUTTON_RIGHT_THUMB),
];

/// An opened controller and its rumble effect
struct Connected {
    device: Device,
    path: PathBuf,
    rumble: Option<FFEffect>,
}

/// Evdev gamepad backend.
///
/// Opens the device lazily on the first query and drops it on any read
/// failure, so an unplugged controller is picked up again once replugged.
pub struct EvdevPad {
    input_dir: PathBuf,
    connected: Mutex<Option<Connected>>,
}

impl Default for EvdevPad {
    fn default() -> Self {
        Self::new()
    }
}

impl EvdevPad {
    /// Create a backend that scans `/dev/input`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_input_dir(INPUT_DIR)
    }

    /// Create a backend that scans a custom directory.
    #[must_use]
    pub fn with_input_dir<P: AsRef<Path>>(dir: P) -> Self {
        info!("Using evdev gamepad backend ({})", dir.as_ref().display());
        Self {
            input_dir: dir.as_ref().to_path_buf(),
            connected: Mutex::new(None),
        }
    }

    /// Find the `slot`-th rumble-capable gamepad in the input directory.
    fn find(&self, slot: u32) -> Result<Connected> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(&self.input_dir)
            .map_err(|e| {
                RumbleError::Controller(format!(
                    "Failed to read {}: {}",
                    self.input_dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().starts_with("event"))
                    .unwrap_or(false)
            })
            .collect();

        // Sort for deterministic slot numbering
        entries.sort();

        let mut remaining = slot;
        for path in entries {
            let device = match Device::open(&path) {
                Ok(device) => device,
                Err(e) => {
                    trace!("Could not open {}: {}", path.display(), e);
                    continue;
                }
            };

            if !is_rumble_gamepad(&device) {
                continue;
            }

            if remaining > 0 {
                remaining -= 1;
                continue;
            }

            let id = device.input_id();
            info!(
                "Found gamepad at {}: {} (vendor: 0x{:04x}, product: 0x{:04x})",
                path.display(),
                device.name().unwrap_or("Unknown"),
                id.vendor(),
                id.product()
            );
            return Ok(Connected {
                device,
                path,
                rumble: None,
            });
        }

        Err(RumbleError::Controller(format!("no gamepad at slot {}", slot)))
    }
}

impl Gamepad for EvdevPad {
    fn state(&self, slot: u32) -> Option<GamepadState> {
        let mut guard = self.connected.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.is_none() {
            match self.find(slot) {
                Ok(connected) => *guard = Some(connected),
                Err(e) => {
                    trace!("Gamepad scan failed: {}", e);
                    return None;
                }
            }
        }

        let connected = guard.as_ref()?;
        match read_state(&connected.device) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("Lost gamepad at {}: {}", connected.path.display(), e);
                *guard = None;
                None
            }
        }
    }

    fn set_vibration(&self, _slot: u32, left: u16, right: u16) -> Result<()> {
        let mut guard = self.connected.lock().unwrap_or_else(PoisonError::into_inner);
        let connected = guard
            .as_mut()
            .ok_or_else(|| RumbleError::Controller("no gamepad connected".to_string()))?;

        if left == 0 && right == 0 {
            if let Some(effect) = connected.rumble.as_mut() {
                effect.stop()?;
            }
            return Ok(());
        }

        let data = rumble_effect(left, right);
        let effect = match connected.rumble.take() {
            Some(mut effect) => {
                effect.update(data)?;
                effect
            }
            None => connected.device.upload_ff_effect(data)?,
        };

        connected.rumble.insert(effect).play(1)?;
        Ok(())
    }
}

/// Returns true if the device looks like a rumble-capable gamepad.
fn is_rumble_gamepad(device: &Device) -> bool {
    let has_rumble = device
        .supported_ff()
        .map(|ff| ff.contains(FFEffectType::FF_RUMBLE))
        .unwrap_or(false);

    let has_pad_keys = device
        .supported_keys()
        .map(|keys| keys.contains(Key::BTN_SOUTH) && keys.contains(Key::BTN_TL))
        .unwrap_or(false);

    has_rumble && has_pad_keys
}

/// Read the current key and axis state straight from the kernel.
fn read_state(device: &Device) -> std::io::Result<GamepadState> {
    let keys: AttributeSet<Key> = device.get_key_state()?;
    let abs = device.get_abs_state()?;

    let axis = |axis: AbsoluteAxisType| {
        let info = &abs[axis.0 as usize];
        (info.value, info.minimum, info.maximum)
    };

    let (hat_x, _, _) = axis(AbsoluteAxisType::ABS_HAT0X);
    let (hat_y, _, _) = axis(AbsoluteAxisType::ABS_HAT0Y);
    let (lt, lt_min, lt_max) = axis(AbsoluteAxisType::ABS_Z);
    let (rt, rt_min, rt_max) = axis(AbsoluteAxisType::ABS_RZ);
    let (lx, lx_min, lx_max) = axis(AbsoluteAxisType::ABS_X);
    let (ly, ly_min, ly_max) = axis(AbsoluteAxisType::ABS_Y);
    let (rx, rx_min, rx_max) = axis(AbsoluteAxisType::ABS_RX);
    let (ry, ry_min, ry_max) = axis(AbsoluteAxisType::ABS_RY);

    Ok(GamepadState {
        buttons: buttons_from_keys(|key| keys.contains(key), hat_x, hat_y),
        left_trigger: scale_trigger(lt, lt_min, lt_max),
        right_trigger: scale_trigger(rt, rt_min, rt_max),
        thumb_lx: scale_stick(lx, lx_min, lx_max),
        // evdev Y grows downward, XInput Y grows upward
        thumb_ly: invert_stick(scale_stick(ly, ly_min, ly_max)),
        thumb_rx: scale_stick(rx, rx_min, rx_max),
        thumb_ry: invert_stick(scale_stick(ry, ry_min, ry_max)),
    })
}

/// Build the XInput button mask from key state and d-pad hat values.
pub(crate) fn buttons_from_keys(is_down: impl Fn(Key) -> bool, hat_x: i32, hat_y: i32) -> u16 {
    let mut buttons = KEY_MAP
        .iter()
        .filter(|(key, _)| is_down(*key))
        .fold(0u16, |acc, (_, bit)| acc | bit);

    if hat_x < 0 {
        buttons |= BUTTON_DPAD_LEFT;
    } else if hat_x > 0 {
        buttons |= BUTTON_DPAD_RIGHT;
    }

    if hat_y < 0 {
        buttons |= BUTTON_DPAD_UP;
    } else if hat_y > 0 {
        buttons |= BUTTON_DPAD_DOWN;
    }

    buttons
}

/// Rescale a trigger reading from `[min, max]` to 0-255.
pub(crate) fn scale_trigger(value: i32, min: i32, max: i32) -> u8 {
    if max <= min {
        return 0;
    }
    let span = i64::from(max) - i64::from(min);
    let offset = (i64::from(value) - i64::from(min)).clamp(0, span);
    ((offset * 255 + span / 2) / span) as u8
}

/// Rescale a stick reading from `[min, max]` to the full i16 range.
pub(crate) fn scale_stick(value: i32, min: i32, max: i32) -> i16 {
    if max <= min {
        return 0;
    }
    let span = i64::from(max) - i64::from(min);
    let offset = (i64::from(value) - i64::from(min)).clamp(0, span);
    let scaled = offset * 65535 / span - 32768;
    scaled.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

fn invert_stick(value: i16) -> i16 {
    value.checked_neg().unwrap_or(i16::MAX)
}

fn rumble_effect(left: u16, right: u16) -> FFEffectData {
    FFEffectData {
        direction: 0,
        trigger: FFTrigger {
            button: 0,
            interval: 0,
        },
        replay: FFReplay {
            length: RUMBLE_REPLAY_MS,
            delay: 0,
        },
        kind: FFEffectKind::Rumble {
            strong_magnitude: left,
            weak_magnitude: right,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_buttons_follow_xpad_layout() {
        let buttons = buttons_from_keys(|key| key == Key::BTN_SOUTH || key == Key::BTN_NORTH, 0, 0);
        assert_eq!(buttons, BUTTON_A | BUTTON_X);
    }

    #[test]
    fn test_shoulders_map_to_xinput_bits() {
        let buttons = buttons_from_keys(|key| key == Key::BTN_TL || key == Key::BTN_TR, 0, 0);
        assert_eq!(buttons, BUTTON_LEFT_SHOULDER | BUTTON_RIGHT_SHOULDER);
    }

    #[test]
    fn test_dpad_hat_values() {
        assert_eq!(buttons_from_keys(|_| false, -1, 0), BUTTON_DPAD_LEFT);
        assert_eq!(buttons_from_keys(|_| false, 1, 0), BUTTON_DPAD_RIGHT);
        assert_eq!(buttons_from_keys(|_| false, 0, -1), BUTTON_DPAD_UP);
        assert_eq!(buttons_from_keys(|_| false, 0, 1), BUTTON_DPAD_DOWN);
        assert_eq!(buttons_from_keys(|_| false, 0, 0), 0);
    }

    #[test]
    fn test_scale_trigger_ranges() {
        // xpad 360 triggers report 0-255, Xbox One pads report 0-1023
        assert_eq!(scale_trigger(0, 0, 255), 0);
        assert_eq!(scale_trigger(255, 0, 255), 255);
        assert_eq!(scale_trigger(1023, 0, 1023), 255);
        assert_eq!(scale_trigger(512, 0, 1023), 128);
        assert_eq!(scale_trigger(1, 0, 1023), 0);
        assert_eq!(scale_trigger(4, 0, 1023), 1);
    }

    #[test]
    fn test_scale_trigger_out_of_range_and_degenerate() {
        assert_eq!(scale_trigger(-10, 0, 255), 0);
        assert_eq!(scale_trigger(400, 0, 255), 255);
        assert_eq!(scale_trigger(10, 0, 0), 0);
    }

    #[test]
    fn test_scale_stick() {
        assert_eq!(scale_stick(-32768, -32768, 32767), -32768);
        assert_eq!(scale_stick(32767, -32768, 32767), 32767);
        assert_eq!(scale_stick(0, 0, 255), -32768);
        assert_eq!(scale_stick(255, 0, 255), 32767);
        assert_eq!(scale_stick(5, 5, 5), 0);
    }

    #[test]
    fn test_invert_stick_saturates() {
        assert_eq!(invert_stick(100), -100);
        assert_eq!(invert_stick(i16::MIN), i16::MAX);
    }

    #[test]
    fn test_rumble_effect_motor_order() {
        let data = rumble_effect(1000, 2000);
        assert_eq!(data.replay.length, RUMBLE_REPLAY_MS);
        match data.kind {
            FFEffectKind::Rumble {
                strong_magnitude,
                weak_magnitude,
            } => {
                assert_eq!(strong_magnitude, 1000, "Left motor drives the strong magnitude");
                assert_eq!(weak_magnitude, 2000, "Right motor drives the weak magnitude");
            }
            _ => panic!("Expected rumble effect"),
        }
    }

    #[test]
    fn test_missing_input_dir_reports_no_controller() {
        let pad = EvdevPad::with_input_dir("/nonexistent/pad-rumble-input");
        assert_eq!(pad.state(0), None);
        assert!(pad.set_vibration(0, 100, 100).is_err());
    }

    #[test]
    fn test_empty_input_dir_reports_no_controller() {
        let dir = tempfile::tempdir().expect("temp dir");
        let pad = EvdevPad::with_input_dir(dir.path());
        assert_eq!(pad.state(0), None);
    }

    // Integration test - only runs with real hardware
    #[test]
    #[ignore]
    fn test_rumble_with_real_hardware() {
        // This test requires a connected rumble-capable controller
        let pad = EvdevPad::new();
        assert!(pad.state(0).is_some(), "Should detect connected controller");

        pad.set_vibration(0, 20000, 20000).expect("rumble on");
        std::thread::sleep(std::time::Duration::from_millis(200));
        pad.set_vibration(0, 0, 0).expect("rumble off");
    }
}
