//! # Vibration Module
//!
//! Motor state and the output loop that drives the controller's motors.
//!
//! This module handles:
//! - Per-motor enable flag and intensity ([`motor`])
//! - The shared state snapshot shown in the window ([`state`])
//! - Activation, the periodic output loop and immediate writes on change
//!   ([`session`])

pub mod motor;
pub mod session;
pub mod state;

pub use motor::{percent_label, to_motor_speed, Motor, MotorState};
pub use session::Session;
pub use state::RumbleState;
