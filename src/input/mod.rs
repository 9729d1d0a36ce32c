//! # Input Module
//!
//! Controller shortcuts for the vibration session.
//!
//! This module handles:
//! - Per-input press latches ([`latch`])
//! - The six monitored inputs and their actions ([`bindings`])
//! - The fixed-rate polling loop ([`poller`])

pub mod bindings;
pub mod latch;
pub mod poller;

pub use bindings::{Action, Input, InputLatches};
pub use poller::{shutdown, InputPoller};
