//! # Pad Rumble Library
//!
//! Drive the two vibration motors of an Xbox-compatible controller, either
//! from a small desktop window or from shortcuts on the controller itself.
//!
//! The library splits into a native device seam ([`pad`]), the shared motor
//! state and output loop ([`vibration`]), edge-triggered controller
//! shortcuts ([`input`]) and the window ([`ui`]).

pub mod config;
pub mod error;
pub mod input;
pub mod pad;
pub mod ui;
pub mod vibration;
